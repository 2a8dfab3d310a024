use crate::ports::DnsLookup;
use adns_domain::{LookupRequest, LookupResponse, ResolvedAddress};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Serves one lookup request end to end and turns every failure into a
/// `code = 1` response; nothing escapes as an error.
pub struct HandleLookupUseCase {
    lookup: Arc<dyn DnsLookup>,
}

impl HandleLookupUseCase {
    pub fn new(lookup: Arc<dyn DnsLookup>) -> Self {
        Self { lookup }
    }

    pub async fn execute(&self, request: &LookupRequest) -> LookupResponse {
        let start = Instant::now();
        let query = request.to_query();

        match self.lookup.resolve(&query).await {
            Ok(resolution) if !resolution.records.is_empty() => {
                debug!(
                    domain = %query.domain,
                    record_type = %query.record_type,
                    records = resolution.records.len(),
                    cache_hit = resolution.cache_hit,
                    elapsed_us = start.elapsed().as_micros() as u64,
                    "Lookup answered"
                );

                let records = resolution
                    .records
                    .iter()
                    .map(|record| ResolvedAddress::from_record(record))
                    .collect();
                LookupResponse::success(records)
            }
            Ok(_) => {
                warn!(
                    domain = %query.domain,
                    record_type = %query.record_type,
                    "Lookup resolved to an empty record list"
                );
                LookupResponse::failure("Dns query failed, no ip returned")
            }
            Err(e) => {
                warn!(
                    domain = %query.domain,
                    record_type = %query.record_type,
                    error = %e,
                    "Lookup failed"
                );
                LookupResponse::from_error(&e)
            }
        }
    }
}
