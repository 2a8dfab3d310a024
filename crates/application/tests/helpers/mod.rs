#![allow(dead_code)]

pub mod mock_lookup;

pub use mock_lookup::MockDnsLookup;
