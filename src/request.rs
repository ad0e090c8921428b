use std::str::FromStr;

use crate::{
    enums::request::{AdapterKind, Category, RecordType},
    error::{GridcraftResult, ValidationError},
};

/// Chain display names recognized by the chain-filter normalizer. Request
/// paths carry slugs; summaries are keyed by the display spelling.
const KNOWN_CHAINS: [&str; 10] = [
    "Ethereum",
    "BSC",
    "Polygon",
    "Arbitrum",
    "Optimism",
    "Avalanche",
    "Solana",
    "Base",
    "zkSync Era",
    "Manta Pacific",
];

/// Lowercases and joins on `-`, the URL-path spelling of a display name.
pub fn sluggify(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

/// Maps a raw chain filter back to its display spelling when it matches a
/// known chain's slug; unknown chains pass through lowercased.
fn normalize_chain_filter(raw: &str) -> String {
    let slug = sluggify(raw);
    KNOWN_CHAINS
        .iter()
        .find(|chain| sluggify(chain) == slug)
        .map(|chain| chain.to_string())
        .unwrap_or(slug)
}

/// Raw request parameters as the (external) HTTP layer hands them over.
#[derive(Clone, Debug, Default)]
pub struct RawOverviewRequest {
    pub adapter: Option<String>,
    pub data_type: Option<String>,
    pub category: Option<String>,
    pub chain: Option<String>,
    pub exclude_total_data_chart: bool,
    pub exclude_total_data_chart_breakdown: bool,
}

/// A fully validated overview request. Construction is the only gate:
/// unsupported adapter, record-type, or category values are rejected here,
/// before any summary lookup or chart work starts.
#[derive(Clone, Debug, PartialEq)]
pub struct OverviewRequest {
    pub adapter: AdapterKind,
    pub record_type: RecordType,
    pub category: Option<Category>,
    pub chain: Option<String>,
    pub exclude_total_data_chart: bool,
    pub exclude_total_data_chart_breakdown: bool,
}

impl OverviewRequest {
    pub fn parse(raw: RawOverviewRequest) -> GridcraftResult<Self> {
        let adapter_raw = raw
            .adapter
            .as_deref()
            .map(str::to_lowercase)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| ValidationError::MissingParameter("adapter".to_string()))?;
        let adapter = AdapterKind::from_str(&adapter_raw)
            .map_err(|_| ValidationError::UnsupportedAdapter(adapter_raw))?;

        let record_type = match raw.data_type.as_deref() {
            None => adapter.default_record_type(),
            Some(code) => RecordType::from_short_code(code)
                .or_else(|| RecordType::from_str(code).ok())
                .ok_or_else(|| ValidationError::UnsupportedRecordType(code.to_string()))?,
        };

        let category = match raw.category.as_deref() {
            None => None,
            Some(raw_category) => {
                // Historical spelling alias kept for compatibility.
                let canonical = if raw_category == "dexs" { "dexes" } else { raw_category };
                Some(
                    Category::from_str(canonical).map_err(|_| {
                        ValidationError::UnsupportedCategory(raw_category.to_string())
                    })?,
                )
            }
        };

        let chain = raw
            .chain
            .as_deref()
            .map(|c| normalize_chain_filter(&c.to_lowercase()));

        Ok(Self {
            adapter,
            record_type,
            category,
            chain,
            exclude_total_data_chart: raw.exclude_total_data_chart,
            exclude_total_data_chart_breakdown: raw.exclude_total_data_chart_breakdown,
        })
    }
}
