use super::clock::now_secs;
use adns_domain::{CachedRecord, DnsQuery, RecordSet, RecordType};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::debug;

/// What [`RecordStore::merge`] did with a candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Installed,
    Replaced,
    Discarded,
}

/// TTL-indexed A/AAAA record cache.
///
/// Owned by exactly one task; there is no internal locking. Entries are never
/// deleted, expiry is evaluated when reading.
#[derive(Debug, Default)]
pub struct RecordStore {
    a: FxHashMap<Arc<str>, RecordSet>,
    aaaa: FxHashMap<Arc<str>, RecordSet>,
}

/// Names compare case-insensitively and ignore a single trailing dot.
pub fn normalize_key(domain: &str) -> Arc<str> {
    let trimmed = domain.strip_suffix('.').unwrap_or(domain);
    Arc::from(trimmed.to_ascii_lowercase())
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, record_type: RecordType) -> &FxHashMap<Arc<str>, RecordSet> {
        match record_type {
            RecordType::A => &self.a,
            RecordType::AAAA => &self.aaaa,
        }
    }

    fn table_mut(&mut self, record_type: RecordType) -> &mut FxHashMap<Arc<str>, RecordSet> {
        match record_type {
            RecordType::A => &mut self.a,
            RecordType::AAAA => &mut self.aaaa,
        }
    }

    /// Unexpired records for `domain`, each carrying its remaining TTL.
    /// An empty result means the caller has to go upstream.
    pub fn read_unexpired(&self, domain: &str, record_type: RecordType) -> Vec<CachedRecord> {
        self.read_unexpired_at(domain, record_type, now_secs())
    }

    pub fn read_unexpired_at(
        &self,
        domain: &str,
        record_type: RecordType,
        now: u64,
    ) -> Vec<CachedRecord> {
        let key = normalize_key(domain);
        match self.table(record_type).get(&key) {
            Some(set) => set
                .unexpired(now)
                .into_iter()
                .map(|(record, remaining)| CachedRecord::new(record.address, remaining))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Installs `candidate` when nothing is cached yet, otherwise replaces
    /// the current set only if `candidate`'s query was issued strictly later.
    /// Arrival order plays no part.
    pub fn merge(
        &mut self,
        domain: &str,
        record_type: RecordType,
        candidate: RecordSet,
    ) -> MergeOutcome {
        let key = normalize_key(domain);
        let table = self.table_mut(record_type);

        let outcome = match table.get_mut(&key) {
            None => {
                table.insert(key.clone(), candidate);
                MergeOutcome::Installed
            }
            Some(existing) if candidate.issued_at > existing.issued_at => {
                *existing = candidate;
                MergeOutcome::Replaced
            }
            Some(_) => MergeOutcome::Discarded,
        };

        debug!(domain = %key, record_type = %record_type, outcome = ?outcome, "Record set merged");
        outcome
    }

    /// Keys that are still live but whose shortest-lived record has used up
    /// at least `threshold` of its TTL.
    pub fn refresh_candidates(&self, threshold: f64, now: u64) -> Vec<DnsQuery> {
        let mut candidates = Vec::new();

        for record_type in [RecordType::A, RecordType::AAAA] {
            for (domain, set) in self.table(record_type) {
                if let Some(fraction) = set.consumed_fraction(now) {
                    if fraction >= threshold {
                        candidates.push(DnsQuery::new(domain.clone(), record_type));
                    }
                }
            }
        }

        candidates
    }

    /// Cached keys across both record types, expired ones included.
    pub fn len(&self) -> usize {
        self.a.len() + self.aaaa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
