use std::collections::HashMap;
use std::future::Future;

use crate::{enums::dataset::SeriesKind, error::GridcraftResult, record::Series};

/// Source of per-protocol historical series.
///
/// Implementations resolve `(protocol_id, kind)` to a time-ordered sequence
/// of partial records, oldest first. A protocol with no history returns an
/// empty series, not an error.
pub trait SeriesFetcher: Send + Sync {
    fn historical(
        &self,
        protocol_id: &str,
        kind: SeriesKind,
    ) -> impl Future<Output = GridcraftResult<Series>> + Send;
}

/// Map-backed fetcher. Primarily for tests and offline replays; anything
/// not seeded resolves to an empty series.
#[derive(Debug, Default)]
pub struct InMemoryFetcher {
    series: HashMap<(String, SeriesKind), Series>,
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, protocol_id: &str, kind: SeriesKind, series: Series) -> Self {
        self.series.insert((protocol_id.to_string(), kind), series);
        self
    }
}

impl SeriesFetcher for InMemoryFetcher {
    async fn historical(&self, protocol_id: &str, kind: SeriesKind) -> GridcraftResult<Series> {
        Ok(self
            .series
            .get(&(protocol_id.to_string(), kind))
            .cloned()
            .unwrap_or_default())
    }
}
