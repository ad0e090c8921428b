use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Dimension adapter families an overview can be requested for.
#[derive(Copy, Clone, Debug, Display, EnumString, EnumIter, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdapterKind {
    #[strum(serialize = "dexs")]
    Dexs,

    #[strum(serialize = "fees")]
    Fees,

    #[strum(serialize = "aggregators")]
    Aggregators,

    #[strum(serialize = "derivatives")]
    Derivatives,

    #[strum(serialize = "options")]
    Options,

    #[strum(serialize = "royalties")]
    Royalties,

    #[strum(serialize = "bridge-aggregators")]
    BridgeAggregators,
}

impl AdapterKind {
    /// The record type charted when the request does not name one.
    pub fn default_record_type(&self) -> RecordType {
        match self {
            AdapterKind::Dexs
            | AdapterKind::Aggregators
            | AdapterKind::Derivatives
            | AdapterKind::Royalties
            | AdapterKind::BridgeAggregators => RecordType::DailyVolume,
            AdapterKind::Fees => RecordType::DailyFees,
            AdapterKind::Options => RecordType::DailyNotionalVolume,
        }
    }
}

/// Record types tracked per adapter. Requests may name them either by the
/// long form or by the two/three-letter short code.
#[derive(Copy, Clone, Debug, Display, EnumString, EnumIter, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    #[strum(serialize = "dailyVolume")]
    DailyVolume,

    #[strum(serialize = "dailyFees")]
    DailyFees,

    #[strum(serialize = "dailyRevenue")]
    DailyRevenue,

    #[strum(serialize = "dailyHoldersRevenue")]
    DailyHoldersRevenue,

    #[strum(serialize = "dailyNotionalVolume")]
    DailyNotionalVolume,

    #[strum(serialize = "dailyPremiumVolume")]
    DailyPremiumVolume,
}

impl RecordType {
    pub fn from_short_code(code: &str) -> Option<Self> {
        match code {
            "dv" => Some(RecordType::DailyVolume),
            "df" => Some(RecordType::DailyFees),
            "dr" => Some(RecordType::DailyRevenue),
            "dhr" => Some(RecordType::DailyHoldersRevenue),
            "dnv" => Some(RecordType::DailyNotionalVolume),
            "dpv" => Some(RecordType::DailyPremiumVolume),
            _ => None,
        }
    }
}

/// Protocol categories accepted as an overview filter.
#[derive(Copy, Clone, Debug, Display, EnumString, EnumIter, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[strum(serialize = "dexes")]
    Dexes,

    #[strum(serialize = "lending")]
    Lending,

    #[strum(serialize = "yield")]
    Yield,

    #[strum(serialize = "derivatives")]
    Derivatives,

    #[strum(serialize = "liquid-staking")]
    LiquidStaking,

    #[strum(serialize = "bridge")]
    Bridge,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_short_codes_resolve_to_long_names() {
        assert_eq!(
            RecordType::from_short_code("dv"),
            Some(RecordType::DailyVolume)
        );
        assert_eq!(RecordType::from_short_code("xx"), None);
        assert_eq!(
            RecordType::from_str("dailyFees").unwrap(),
            RecordType::DailyFees
        );
    }

    #[test]
    fn test_adapter_defaults() {
        assert_eq!(
            AdapterKind::Options.default_record_type(),
            RecordType::DailyNotionalVolume
        );
        assert_eq!(
            AdapterKind::Fees.default_record_type(),
            RecordType::DailyFees
        );
    }
}
