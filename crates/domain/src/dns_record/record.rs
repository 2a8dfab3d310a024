use std::net::IpAddr;

/// One resolved address together with the TTL the upstream handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedRecord {
    pub address: IpAddr,

    pub ttl: u32,
}

impl CachedRecord {
    pub fn new(address: IpAddr, ttl: u32) -> Self {
        Self { address, ttl }
    }

    /// Seconds left at `elapsed` seconds after the fetch, or `None` once expired.
    pub fn remaining_ttl(&self, elapsed: u64) -> Option<u32> {
        let ttl = u64::from(self.ttl);
        if elapsed < ttl {
            Some((ttl - elapsed) as u32)
        } else {
            None
        }
    }
}

/// Every record obtained from one upstream response.
///
/// `issued_at` is the strictly increasing stamp taken when the query was
/// sent and orders merges in the record store. `fetched_at` is the monotonic
/// second at which the response was received and drives TTL decay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    pub issued_at: u64,

    pub fetched_at: u64,

    pub records: Vec<CachedRecord>,
}

impl RecordSet {
    pub fn new(issued_at: u64, fetched_at: u64, records: Vec<CachedRecord>) -> Self {
        Self {
            issued_at,
            fetched_at,
            records,
        }
    }

    /// Records still alive at `now`, paired with their remaining TTL, in
    /// response order.
    pub fn unexpired(&self, now: u64) -> Vec<(CachedRecord, u32)> {
        let elapsed = now.saturating_sub(self.fetched_at);
        self.records
            .iter()
            .filter_map(|record| record.remaining_ttl(elapsed).map(|left| (*record, left)))
            .collect()
    }

    /// Fraction of TTL consumed by the shortest-lived record still alive at
    /// `now`. `None` when nothing is left.
    pub fn consumed_fraction(&self, now: u64) -> Option<f64> {
        let elapsed = now.saturating_sub(self.fetched_at);
        self.records
            .iter()
            .filter(|record| record.remaining_ttl(elapsed).is_some())
            .map(|record| elapsed as f64 / f64::from(record.ttl))
            .fold(None, |acc: Option<f64>, fraction| {
                Some(acc.map_or(fraction, |current| current.max(fraction)))
            })
    }
}
