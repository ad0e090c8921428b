use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    enums::request::{AdapterKind, RecordType},
    error::{DataError, GridcraftError, GridcraftResult},
    request::OverviewRequest,
};

/// Downstream HTTP-cache hints. Overview responses stay fresh for a minute,
/// single-protocol responses for two.
pub const OVERVIEW_RESPONSE_TTL: Duration = Duration::from_secs(60);
pub const PROTOCOL_RESPONSE_TTL: Duration = Duration::from_secs(2 * 60);

/// Chart points keyed by timestamp label (unix seconds as a string),
/// insertion-ordered. Values are either bare numbers (total chart) or
/// per-protocol breakdown maps.
pub type ChartMap = Map<String, Value>;

/// Pre-aggregated rollup for one (adapter, record type, optional chain)
/// tuple. Totals cover fixed trailing windows; a missing window stays
/// `None` and flows through the percentage math as non-finite.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub total24: Option<f64>,
    pub total48hto24h: Option<f64>,
    pub total7d: Option<f64>,
    pub total14dto7d: Option<f64>,
    pub total30d: Option<f64>,
    pub total60dto30d: Option<f64>,
    pub total1y: Option<f64>,
    #[serde(rename = "total7DaysAgo")]
    pub total7_days_ago: Option<f64>,
    #[serde(rename = "total30DaysAgo")]
    pub total30_days_ago: Option<f64>,
    pub chart: ChartMap,
    #[serde(rename = "chartBreakdown")]
    pub chart_breakdown: ChartMap,
}

/// Per-record-type rollup: the adapter-wide summary plus one summary per
/// chain for filtered requests.
#[derive(Clone, Debug, Default)]
pub struct RecordSummary {
    pub overall: Summary,
    pub chain_data: HashMap<String, Summary>,
}

/// Everything cached for one adapter family.
#[derive(Debug, Default)]
pub struct AdapterSummaries {
    by_record_type: HashMap<RecordType, RecordSummary>,
}

impl AdapterSummaries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record_type: RecordType, summary: RecordSummary) {
        self.by_record_type.insert(record_type, summary);
    }

    pub fn get(&self, record_type: RecordType) -> Option<&RecordSummary> {
        self.by_record_type.get(&record_type)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct OverviewResponse {
    #[serde(rename = "totalDataChart", skip_serializing_if = "Option::is_none")]
    pub total_data_chart: Option<Vec<(i64, Value)>>,

    #[serde(
        rename = "totalDataChartBreakdown",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_data_chart_breakdown: Option<Vec<(i64, Value)>>,

    pub breakdown24h: Option<Value>,
    pub chain: Option<String>,

    pub total24: Option<f64>,
    pub total48hto24h: Option<f64>,
    pub total7d: Option<f64>,
    pub total14dto7d: Option<f64>,
    pub total30d: Option<f64>,
    pub total60dto30d: Option<f64>,
    pub total1y: Option<f64>,

    pub change_1d: f64,
    pub change_7d: f64,
    pub change_30d: f64,
    pub change_7dover7d: f64,
    pub change_30dover30d: f64,
}

impl OverviewResponse {
    /// Cache-duration hint for the HTTP layer serving this response.
    pub fn cache_ttl(&self) -> Duration {
        OVERVIEW_RESPONSE_TTL
    }
}

/// Period-over-period change in percent, rounded to two decimal places.
///
/// A zero previous value divides to a non-finite result which is returned
/// as-is, never raised; `serde_json` renders non-finite floats as null,
/// matching the upstream JSON behavior.
pub fn get_percentage(current: f64, previous: f64) -> f64 {
    (((current - previous) / previous) * 100.0 * 100.0).round() / 100.0
}

fn change(current: Option<f64>, previous: Option<f64>) -> f64 {
    get_percentage(
        current.unwrap_or(f64::NAN),
        previous.unwrap_or(f64::NAN),
    )
}

/// Reshapes a chart map into ascending `[timestamp, value]` pairs.
///
/// Labels sort by their numeric value, not lexically; the sort is stable,
/// so equal labels (impossible for map keys, but cheap to honor) keep
/// input order.
pub fn format_chart_data(data: &ChartMap) -> GridcraftResult<Vec<(i64, Value)>> {
    let mut points = data
        .iter()
        .map(|(label, value)| {
            let timestamp = label
                .parse::<i64>()
                .map_err(|_| DataError::BadChartLabel(label.clone()))?;
            Ok((timestamp, value.clone()))
        })
        .collect::<GridcraftResult<Vec<_>>>()?;
    points.sort_by_key(|(timestamp, _)| *timestamp);
    Ok(points)
}

/// Assembles the overview response for an already-validated request.
///
/// The summary resolves through the chain filter when one is set; a missing
/// summary is a distinct not-found signal, not a crash.
pub fn assemble_overview(
    request: &OverviewRequest,
    summaries: &AdapterSummaries,
) -> GridcraftResult<OverviewResponse> {
    let record = summaries
        .get(request.record_type)
        .ok_or(DataError::SummaryNotFound)?;
    let summary = match &request.chain {
        Some(chain) => record
            .chain_data
            .get(chain)
            .ok_or(DataError::SummaryNotFound)?,
        None => &record.overall,
    };

    let total_data_chart = if request.exclude_total_data_chart {
        None
    } else {
        Some(format_chart_data(&summary.chart)?)
    };
    let total_data_chart_breakdown = if request.exclude_total_data_chart_breakdown {
        None
    } else {
        Some(format_chart_data(&summary.chart_breakdown)?)
    };

    Ok(OverviewResponse {
        total_data_chart,
        total_data_chart_breakdown,
        breakdown24h: None,
        chain: request.chain.clone(),
        total24: summary.total24,
        total48hto24h: summary.total48hto24h,
        total7d: summary.total7d,
        total14dto7d: summary.total14dto7d,
        total30d: summary.total30d,
        total60dto30d: summary.total60dto30d,
        total1y: summary.total1y,
        change_1d: change(summary.total24, summary.total48hto24h),
        change_7d: change(summary.total24, summary.total7_days_ago),
        change_30d: change(summary.total24, summary.total30_days_ago),
        change_7dover7d: change(summary.total7d, summary.total14dto7d),
        change_30dover30d: change(summary.total30d, summary.total60dto30d),
    })
}

/// The not-found signal for single-protocol lookups, with guidance toward
/// the discovery endpoint.
pub fn protocol_not_found(protocol: &str, adapter: AdapterKind) -> GridcraftError {
    let kind = adapter.to_string();
    let mut chars = kind.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => kind.clone(),
    };
    DataError::ProtocolNotFound {
        resource: format!("{capitalized} for {protocol}"),
        adapter: kind,
    }
    .into()
}
