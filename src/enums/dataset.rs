use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// The three historical series kept per protocol. Wire names match the
/// storage-layer record prefixes.
#[derive(Copy, Clone, Debug, Display, EnumString, EnumIter, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    /// Aggregate TVL per chain (bare scalars).
    #[strum(serialize = "dailyTvl")]
    DailyTvl,

    /// Per-token TVL in USD, nested under each chain.
    #[strum(serialize = "dailyUsdTokensTvl")]
    DailyUsdTokenTvl,

    /// Per-token raw amounts, nested under each chain.
    #[strum(serialize = "dailyTokensTvl")]
    DailyTokenTvl,
}

/// Distinguishes the three flavors of data row. The display form is the
/// verbatim row label in the CSV output.
#[derive(Copy, Clone, Debug, Display, EnumString, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowKind {
    #[strum(serialize = "TVL")]
    Aggregate,

    #[strum(serialize = "Tokens(USD)")]
    ValueByToken,

    #[strum(serialize = "Tokens")]
    CountByToken,
}

impl RowKind {
    /// The series a row kind is populated from.
    pub fn series_kind(&self) -> SeriesKind {
        match self {
            RowKind::Aggregate => SeriesKind::DailyTvl,
            RowKind::ValueByToken => SeriesKind::DailyUsdTokenTvl,
            RowKind::CountByToken => SeriesKind::DailyTokenTvl,
        }
    }
}
