use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tracing::debug;

/// How long the cache may grow before an opportunistic full sweep.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Request-coalescing response cache with manual time-based eviction.
///
/// The map stores the in-flight computation itself (a `Shared` future), not
/// just its eventual result, so concurrent identical requests await one
/// computation instead of racing to start duplicates. Entries live until
/// the next sweep: a full clear that runs at call time, never on a timer,
/// once more than the sweep interval has elapsed since the previous one.
/// Memory is therefore bounded by one interval's worth of distinct keys.
///
/// `T` is the cloneable result; error-caching callers use
/// `Result<Arc<Resp>, Arc<Error>>`. The cache is injected wherever it is
/// needed rather than living in process-wide state, which keeps tests
/// isolated.
pub struct ResponseCache<T: Clone> {
    inner: Mutex<Inner<T>>,
    sweep_interval: Duration,
}

struct Inner<T: Clone> {
    entries: HashMap<String, Shared<BoxFuture<'static, T>>>,
    last_sweep: Instant,
}

impl<T: Clone + Send + 'static> ResponseCache<T> {
    pub fn new() -> Self {
        Self::with_sweep_interval(SWEEP_INTERVAL)
    }

    pub fn with_sweep_interval(sweep_interval: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            sweep_interval,
        }
    }

    /// Returns the cached result for `key`, or runs `compute` and caches it.
    ///
    /// The first caller for a key inserts the computation before polling it;
    /// later callers clone the same shared handle. The lock is released
    /// before awaiting.
    pub async fn get_or_compute<F>(&self, key: &str, compute: F) -> T
    where
        F: Future<Output = T> + Send + 'static,
    {
        let shared = {
            let mut inner = self.lock();
            Self::sweep_if_due(&mut inner, self.sweep_interval);
            inner
                .entries
                .entry(key.to_string())
                .or_insert_with(|| compute.boxed().shared())
                .clone()
        };
        shared.await
    }

    /// Forces a sweep check without computing anything.
    pub fn sweep(&self) {
        let mut inner = self.lock();
        Self::sweep_if_due(&mut inner, self.sweep_interval);
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<T>> {
        // A poisoned lock only means a panic elsewhere; the map is still
        // usable, worst case it re-computes.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn sweep_if_due(inner: &mut Inner<T>, interval: Duration) {
        let now = Instant::now();
        if now.duration_since(inner.last_sweep) > interval {
            debug!(entries = inner.entries.len(), "sweeping response cache");
            inner.entries.clear();
            inner.last_sweep = now;
        }
    }
}

impl<T: Clone + Send + 'static> Default for ResponseCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(counter: &Arc<AtomicUsize>) -> impl Future<Output = u64> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            // Yield so a concurrent duplicate has a chance to race.
            tokio::task::yield_now().await;
            42
        }
    }

    #[tokio::test]
    async fn test_concurrent_identical_requests_share_one_computation() {
        let cache = ResponseCache::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            cache.get_or_compute("overview:dexs", counting(&counter)),
            cache.get_or_compute("overview:dexs", counting(&counter)),
        );

        assert_eq!((a, b), (42, 42));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_compute_independently() {
        let cache = ResponseCache::new();
        let counter = Arc::new(AtomicUsize::new(0));

        cache.get_or_compute("overview:dexs", counting(&counter)).await;
        cache.get_or_compute("overview:fees", counting(&counter)).await;

        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_completed_results_are_reused_until_swept() {
        let cache = ResponseCache::new();
        let counter = Arc::new(AtomicUsize::new(0));

        cache.get_or_compute("k", counting(&counter)).await;
        cache.get_or_compute("k", counting(&counter)).await;

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sweep_clears_after_interval() {
        let cache = ResponseCache::with_sweep_interval(Duration::ZERO);
        let counter = Arc::new(AtomicUsize::new(0));

        cache.get_or_compute("k", counting(&counter)).await;
        // Zero interval: the next call is already past due and re-computes.
        cache.get_or_compute("k", counting(&counter)).await;

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_errors_are_cached_as_values() {
        let cache: ResponseCache<Result<u64, Arc<String>>> = ResponseCache::new();

        let result = cache
            .get_or_compute("bad", async { Err(Arc::new("boom".to_string())) })
            .await;

        assert_eq!(result.unwrap_err().as_str(), "boom");
        assert_eq!(cache.len(), 1);
    }
}
