#![allow(dead_code)]

pub mod mock_cache_refresh;

pub use mock_cache_refresh::MockCacheRefreshPort;
