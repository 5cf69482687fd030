use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument, warn};

use common::metrics;

use super::provider::{Suggestion, SuggestionProvider};

/// TTL memoization in front of a suggestion provider.
///
/// A successful provider response, including an empty list, is stored for the
/// configured TTL; a failed call returns an empty list without storing
/// anything, so the next identical query tries the provider again.
/// Check-then-set is not atomic: two concurrent misses may both call the
/// provider and both insert the same value.
pub struct SuggestionCache {
    provider: Arc<dyn SuggestionProvider>,
    cache: Cache<String, Arc<Vec<Suggestion>>>,
    count: u32,
}

impl SuggestionCache {
    pub fn new(
        provider: Arc<dyn SuggestionProvider>,
        ttl: Duration,
        capacity: u64,
        count: u32,
    ) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self { provider, cache, count }
    }

    #[instrument(skip(self))]
    pub async fn lookup(&self, query: &str) -> Vec<Suggestion> {
        if let Some(hit) = self.cache.get(query).await {
            metrics::SUGGEST_CACHE_HITS_TOTAL.inc();
            debug!("suggest_cache_hit");
            return (*hit).clone();
        }

        metrics::SUGGEST_CACHE_MISSES_TOTAL.inc();
        match self.provider.suggest(query, self.count).await {
            Ok(list) => {
                self.cache
                    .insert(query.to_string(), Arc::new(list.clone()))
                    .await;
                list
            }
            Err(e) => {
                metrics::SUGGEST_UPSTREAM_ERRORS_TOTAL.inc();
                warn!(error = %e, "suggestion provider failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::provider::SuggestError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample(value: &str) -> Suggestion {
        Suggestion { value: value.into(), unrestricted_value: None, data: None }
    }

    struct CountingProvider {
        calls: AtomicUsize,
        list: Vec<Suggestion>,
    }

    impl CountingProvider {
        fn new(list: Vec<Suggestion>) -> Arc<Self> {
            Arc::new(Self { calls: AtomicUsize::new(0), list })
        }
    }

    #[async_trait]
    impl SuggestionProvider for CountingProvider {
        async fn suggest(&self, _q: &str, _n: u32) -> Result<Vec<Suggestion>, SuggestError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.list.clone())
        }
    }

    /// Fails the first `fail_times` calls, then succeeds.
    struct FlakyProvider {
        calls: AtomicUsize,
        fail_times: usize,
        list: Vec<Suggestion>,
    }

    #[async_trait]
    impl SuggestionProvider for FlakyProvider {
        async fn suggest(&self, _q: &str, _n: u32) -> Result<Vec<Suggestion>, SuggestError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_times {
                Err(SuggestError::Status(502))
            } else {
                Ok(self.list.clone())
            }
        }
    }

    fn day() -> Duration {
        Duration::from_secs(86_400)
    }

    #[tokio::test]
    async fn identical_query_reaches_provider_once() {
        let provider = CountingProvider::new(vec![sample("г Москва, ул Тверская")]);
        let cache = SuggestionCache::new(provider.clone(), day(), 100, 5);

        let first = cache.lookup("тверская").await;
        let second = cache.lookup("тверская").await;
        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn distinct_queries_are_separate_entries() {
        let provider = CountingProvider::new(vec![sample("x")]);
        let cache = SuggestionCache::new(provider.clone(), day(), 100, 5);

        cache.lookup("казань").await;
        cache.lookup("казань ").await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn expired_entry_reaches_provider_again() {
        let provider = CountingProvider::new(vec![sample("x")]);
        let cache =
            SuggestionCache::new(provider.clone(), Duration::from_millis(50), 100, 5);

        cache.lookup("псков").await;
        tokio::time::sleep(Duration::from_millis(120)).await;
        cache.lookup("псков").await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn provider_failure_returns_empty_and_is_not_cached() {
        let provider = Arc::new(FlakyProvider {
            calls: AtomicUsize::new(0),
            fail_times: 1,
            list: vec![sample("г Омск")],
        });
        let cache = SuggestionCache::new(provider.clone(), day(), 100, 5);

        let degraded = cache.lookup("омск").await;
        assert!(degraded.is_empty());

        // The failure must not have produced a cache entry
        let recovered = cache.lookup("омск").await;
        assert_eq!(recovered, vec![sample("г Омск")]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);

        // And the successful answer is now memoized
        cache.lookup("омск").await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_success_is_cached() {
        let provider = CountingProvider::new(vec![]);
        let cache = SuggestionCache::new(provider.clone(), day(), 100, 5);

        assert!(cache.lookup("нигде").await.is_empty());
        assert!(cache.lookup("нигде").await.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }
}
