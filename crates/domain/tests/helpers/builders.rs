#![allow(dead_code)]
use adns_domain::{CachedRecord, RecordSet};
use std::net::IpAddr;

pub struct RecordSetBuilder {
    issued_at: u64,
    fetched_at: u64,
    records: Vec<CachedRecord>,
}

impl RecordSetBuilder {
    pub fn new() -> Self {
        Self {
            issued_at: 1,
            fetched_at: 1_000,
            records: vec![],
        }
    }

    pub fn issued_at(mut self, issued_at: u64) -> Self {
        self.issued_at = issued_at;
        self
    }

    pub fn fetched_at(mut self, fetched_at: u64) -> Self {
        self.fetched_at = fetched_at;
        self
    }

    pub fn record(mut self, ip: &str, ttl: u32) -> Self {
        let address: IpAddr = ip.parse().unwrap();
        self.records.push(CachedRecord::new(address, ttl));
        self
    }

    pub fn build(self) -> RecordSet {
        RecordSet::new(self.issued_at, self.fetched_at, self.records)
    }
}

impl Default for RecordSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
