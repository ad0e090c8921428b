use std::collections::BTreeMap;

use futures::future::try_join_all;
use serde_json::Number;
use tracing::debug;

use crate::{
    enums::dataset::{RowKind, SeriesKind},
    error::GridcraftResult,
    fetcher::SeriesFetcher,
    grid::{Cell, LABEL_COLUMNS, SparseGrid, normalize_chain},
    protocol::Protocol,
    record::Series,
    schema,
    time::{closest_day_start, format_day},
};

/// Rows and staged cells for one protocol, computed before global row ids
/// and column offsets exist. Row indices are local; buckets carry the cells
/// until every protocol has reported in and columns can be assigned.
struct ProtocolRows {
    labels: Vec<Vec<Cell>>,
    cells: Vec<(usize, i64, Number)>,
}

impl ProtocolRows {
    fn push_row(&mut self, labels: Vec<Cell>) -> usize {
        self.labels.push(labels);
        self.labels.len() - 1
    }

    fn stage(&mut self, row: usize, timestamp: i64, value: Number) {
        self.cells.push((row, closest_day_start(timestamp), value));
    }
}

/// Builds the full CSV dataset for a set of protocols.
///
/// Fetches run concurrently (the three series of a protocol against each
/// other, and all protocols against each other); everything after the join
/// is strictly sequential. The merge walks protocols in input order, so two
/// builds over identical inputs produce identical text regardless of fetch
/// completion order.
///
/// Any fetch failure aborts the whole build. A partial CSV with protocols
/// silently missing would understate the data, so the error propagates
/// instead.
#[tracing::instrument(skip_all, fields(protocols = protocols.len()))]
pub async fn craft_csv_dataset<F: SeriesFetcher>(
    fetcher: &F,
    protocols: &[Protocol],
) -> GridcraftResult<String> {
    let per_protocol = try_join_all(protocols.iter().map(|protocol| async move {
        let (aggregate, usd_tokens, tokens) = tokio::try_join!(
            fetcher.historical(&protocol.id, SeriesKind::DailyTvl),
            fetcher.historical(&protocol.id, SeriesKind::DailyUsdTokenTvl),
            fetcher.historical(&protocol.id, SeriesKind::DailyTokenTvl),
        )?;
        GridcraftResult::Ok(build_protocol_rows(protocol, &aggregate, &usd_tokens, &tokens))
    }))
    .await?;

    // Single-threaded merge into the shared row and column namespaces.
    let mut grid = SparseGrid::new();
    let mut time_to_column: BTreeMap<i64, BTreeMap<usize, Number>> = BTreeMap::new();
    for rows in per_protocol.into_iter().flatten() {
        let ids: Vec<usize> = rows.labels.into_iter().map(|l| grid.push_row(l)).collect();
        for (local_row, bucket, value) in rows.cells {
            time_to_column
                .entry(bucket)
                .or_default()
                .insert(ids[local_row], value);
        }
    }

    debug!(
        rows = grid.row_count(),
        buckets = time_to_column.len(),
        "assigning columns"
    );

    // Distinct buckets ascending, one data column each, offsets starting
    // right after the label columns.
    grid.reserve_data_columns(time_to_column.len());
    for (index, (bucket, by_row)) in time_to_column.into_iter().enumerate() {
        let column = LABEL_COLUMNS + index;
        grid.set(1, column, format_day(bucket).into());
        grid.set(2, column, Cell::Num(Number::from(bucket)));
        for (row, value) in by_row {
            grid.set(row, column, Cell::Num(value));
        }
    }

    Ok(grid.to_csv())
}

/// Discovers rows for one protocol and stages their cells.
///
/// Returns `None` when the aggregate series is empty: a protocol with no
/// aggregate-level history contributes nothing, even if its token series
/// have data.
fn build_protocol_rows(
    protocol: &Protocol,
    aggregate: &Series,
    usd_tokens: &Series,
    tokens: &Series,
) -> Option<ProtocolRows> {
    if aggregate.is_empty() {
        debug!(protocol = %protocol.id, "empty aggregate series, skipping");
        return None;
    }

    let mut rows = ProtocolRows {
        labels: Vec::new(),
        cells: Vec::new(),
    };

    for chain in schema::partition_keys(aggregate) {
        let row = rows.push_row(row_labels(protocol, &chain, RowKind::Aggregate, None));
        for record in aggregate {
            if let Some(value) = record.scalar(&chain) {
                rows.stage(row, record.timestamp(), value.clone());
            }
        }
    }

    add_token_rows(&mut rows, protocol, usd_tokens, RowKind::ValueByToken);
    add_token_rows(&mut rows, protocol, tokens, RowKind::CountByToken);

    Some(rows)
}

/// One row per (chain, token) pair: chains from the series's last record,
/// tokens from the full-series scan. A token missing from a particular
/// record simply stages no cell for that day.
fn add_token_rows(rows: &mut ProtocolRows, protocol: &Protocol, series: &Series, kind: RowKind) {
    for chain in schema::partition_keys(series) {
        for token in schema::sub_dimension_keys(series, &chain) {
            let row = rows.push_row(row_labels(protocol, &chain, kind, Some(&token)));
            for record in series {
                if let Some(value) = record.nested_value(&chain, &token) {
                    rows.stage(row, record.timestamp(), value.clone());
                }
            }
        }
    }
}

fn row_labels(protocol: &Protocol, chain: &str, kind: RowKind, token: Option<&str>) -> Vec<Cell> {
    let mut labels = vec![
        protocol.name.as_str().into(),
        protocol.category.as_str().into(),
        normalize_chain(chain).into(),
        kind.to_string().into(),
    ];
    if let Some(token) = token {
        labels.push(token.into());
    }
    labels
}
