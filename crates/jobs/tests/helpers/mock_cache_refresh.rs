use adns_application::ports::{CacheRefreshOutcome, CacheRefreshPort};
use adns_domain::DomainError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct MockCacheRefreshPort {
    calls: AtomicUsize,
    should_fail: AtomicBool,
    thresholds: Mutex<Vec<f64>>,
}

impl MockCacheRefreshPort {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            should_fail: AtomicBool::new(false),
            thresholds: Mutex::new(Vec::new()),
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn thresholds(&self) -> Vec<f64> {
        self.thresholds.lock().unwrap().clone()
    }
}

#[async_trait]
impl CacheRefreshPort for MockCacheRefreshPort {
    async fn run_refresh_cycle(&self, threshold: f64) -> Result<CacheRefreshOutcome, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.thresholds.lock().unwrap().push(threshold);

        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::ServiceUnavailable);
        }

        Ok(CacheRefreshOutcome {
            candidates_found: 2,
            dispatched: 2,
            cache_size: 10,
        })
    }
}
