use crate::dns::cache::clock::{now_micros, now_secs};
use crate::dns::cache::store::normalize_key;
use crate::dns::cache::RecordStore;
use crate::dns::forwarding::{MessageBuilder, ResponseParser};
use adns_application::ports::{
    CacheRefreshOutcome, DnsResolution, TransportReply, TransportStatus, UpstreamTransport,
};
use adns_domain::{CachedRecord, DnsQuery, DomainError, RecordSet};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Slack added on top of the transport timeout before a send is abandoned.
const SEND_GRACE: Duration = Duration::from_millis(250);

pub(super) type LookupReply = oneshot::Sender<Result<DnsResolution, DomainError>>;

pub(super) enum Command {
    Lookup {
        query: DnsQuery,
        reply: LookupReply,
    },
    Refresh {
        query: DnsQuery,
        reply: oneshot::Sender<Result<(), DomainError>>,
    },
    RefreshStale {
        threshold: f64,
        reply: oneshot::Sender<CacheRefreshOutcome>,
    },
    CacheOnly {
        query: DnsQuery,
        reply: oneshot::Sender<Vec<CachedRecord>>,
    },
    CacheSize {
        reply: oneshot::Sender<usize>,
    },
}

struct Completion {
    id: u64,
    /// Unix seconds at which the transport handed the reply back.
    received_at: u64,
    reply: TransportReply,
}

enum Responder {
    Caller(LookupReply),
    RefreshOnly,
}

impl Responder {
    fn finish(self, result: Result<DnsResolution, DomainError>) {
        if let Responder::Caller(tx) = self {
            // The caller may have given up; nothing left to notify.
            let _ = tx.send(result);
        }
    }

    fn is_refresh(&self) -> bool {
        matches!(self, Responder::RefreshOnly)
    }
}

struct PendingQuery {
    query: DnsQuery,
    /// Strictly increasing across dispatches; orders merges for one key.
    issued_at: u64,
    responder: Responder,
}

enum DeferredJob {
    Merge { query: DnsQuery, set: RecordSet },
}

/// Single owner of the record store.
///
/// Commands, transport completions and deferred jobs are all processed on the
/// one task running [`ResolutionCoordinator::run`], so the store needs no
/// locking. Deferred jobs queued while handling a message run before the
/// next message is taken.
pub(super) struct ResolutionCoordinator {
    store: RecordStore,
    server: SocketAddr,
    timeout: Duration,
    transport: Arc<dyn UpstreamTransport>,

    next_id: u64,
    last_issued: u64,
    pending: FxHashMap<u64, PendingQuery>,
    refreshing: FxHashSet<DnsQuery>,
    jobs: VecDeque<DeferredJob>,

    commands: mpsc::Receiver<Command>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions: mpsc::UnboundedReceiver<Completion>,
}

impl ResolutionCoordinator {
    pub(super) fn new(
        server: SocketAddr,
        timeout: Duration,
        transport: Arc<dyn UpstreamTransport>,
        commands: mpsc::Receiver<Command>,
    ) -> Self {
        let (completions_tx, completions) = mpsc::unbounded_channel();
        Self {
            store: RecordStore::new(),
            server,
            timeout,
            transport,
            next_id: 0,
            last_issued: 0,
            pending: FxHashMap::default(),
            refreshing: FxHashSet::default(),
            jobs: VecDeque::new(),
            commands,
            completions_tx,
            completions,
        }
    }

    pub(super) async fn run(mut self) {
        info!(
            server = %self.server,
            timeout_ms = self.timeout.as_millis() as u64,
            protocol = self.transport.protocol_name(),
            "Resolution coordinator started"
        );

        loop {
            self.drain_jobs();

            tokio::select! {
                biased;

                Some(completion) = self.completions.recv() => {
                    self.handle_completion(completion);
                }
                command = self.commands.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        // Every handle is gone.
                        None => break,
                    }
                }
            }
        }

        self.drain_jobs();
        info!(
            in_flight = self.pending.len(),
            cached = self.store.len(),
            "Resolution coordinator stopped"
        );
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Lookup { query, reply } => self.lookup(query, reply),
            Command::Refresh { query, reply } => {
                let _ = reply.send(self.refresh(query));
            }
            Command::RefreshStale { threshold, reply } => {
                let _ = reply.send(self.refresh_stale(threshold));
            }
            Command::CacheOnly { query, reply } => {
                let _ = reply.send(self.store.read_unexpired(&query.domain, query.record_type));
            }
            Command::CacheSize { reply } => {
                let _ = reply.send(self.store.len());
            }
        }
    }

    fn lookup(&mut self, query: DnsQuery, reply: LookupReply) {
        let cached = self.store.read_unexpired(&query.domain, query.record_type);
        if !cached.is_empty() {
            debug!(query = %query, records = cached.len(), "Cache hit");
            let _ = reply.send(Ok(DnsResolution::new(cached, true)));
            return;
        }

        debug!(query = %query, "Cache miss, querying upstream");
        // Encoding failures are already reported to the caller by dispatch.
        let _ = self.dispatch(query, Responder::Caller(reply));
    }

    fn refresh(&mut self, query: DnsQuery) -> Result<(), DomainError> {
        let key = DnsQuery::new(normalize_key(&query.domain), query.record_type);
        if self.refreshing.contains(&key) {
            debug!(query = %query, "Refresh already in flight");
            return Ok(());
        }
        self.dispatch(query, Responder::RefreshOnly)?;
        self.refreshing.insert(key);
        Ok(())
    }

    fn refresh_stale(&mut self, threshold: f64) -> CacheRefreshOutcome {
        if self.store.is_empty() {
            return CacheRefreshOutcome::default();
        }

        let candidates = self.store.refresh_candidates(threshold, now_secs());
        let candidates_found = candidates.len();

        let mut dispatched = 0;
        for query in candidates {
            if self.refreshing.contains(&query) {
                continue;
            }
            match self.refresh(query) {
                Ok(()) => dispatched += 1,
                Err(e) => warn!(error = %e, "Failed to dispatch refresh"),
            }
        }

        CacheRefreshOutcome {
            candidates_found,
            dispatched,
            cache_size: self.store.len(),
        }
    }

    /// Encode `query` and hand it to the transport on a spawned task. The
    /// completion comes back through the coordinator's completion channel.
    fn dispatch(&mut self, query: DnsQuery, responder: Responder) -> Result<(), DomainError> {
        let payload = match MessageBuilder::build_query(&query.domain, &query.record_type) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(query = %query, error = %e, "Failed to encode DNS query");
                responder.finish(Err(e.clone()));
                return Err(e);
            }
        };

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        let issued_at = now_micros().max(self.last_issued + 1);
        self.last_issued = issued_at;

        debug!(
            id = id,
            query = %query,
            refresh_only = responder.is_refresh(),
            "Dispatching upstream query"
        );
        self.pending.insert(
            id,
            PendingQuery {
                query,
                issued_at,
                responder,
            },
        );

        let transport = Arc::clone(&self.transport);
        let completions = self.completions_tx.clone();
        let server = self.server;
        let timeout = self.timeout;

        tokio::spawn(async move {
            let started = Instant::now();
            let reply =
                match tokio::time::timeout(timeout + SEND_GRACE, transport.send(server, payload, timeout))
                    .await
                {
                    Ok(reply) => reply,
                    Err(_) => TransportReply::timed_out(started.elapsed()),
                };

            let _ = completions.send(Completion {
                id,
                received_at: now_secs(),
                reply,
            });
        });

        Ok(())
    }

    fn handle_completion(&mut self, completion: Completion) {
        let Some(PendingQuery {
            query,
            issued_at,
            responder,
        }) = self.pending.remove(&completion.id)
        else {
            debug!(id = completion.id, "Discarding completion with no pending query");
            return;
        };

        if responder.is_refresh() {
            self.refreshing
                .remove(&DnsQuery::new(normalize_key(&query.domain), query.record_type));
        }

        let reply = completion.reply;
        if !reply.is_ok() {
            let error = match reply.status {
                TransportStatus::Timeout => DomainError::TransportTimeout {
                    server: self.server.to_string(),
                },
                _ => DomainError::TransportFailure {
                    server: self.server.to_string(),
                    reason: reply.detail.unwrap_or_else(|| "unknown".to_string()),
                },
            };
            warn!(
                query = %query,
                latency_ms = reply.latency.as_millis() as u64,
                error = %error,
                "Upstream query failed"
            );
            responder.finish(Err(error));
            return;
        }

        match ResponseParser::parse(&reply.bytes, &query) {
            Ok(response) => {
                debug!(
                    query = %query,
                    rcode = ResponseParser::rcode_to_status(response.rcode),
                    records = response.records.len(),
                    latency_ms = reply.latency.as_millis() as u64,
                    "Upstream answered"
                );
                if response.truncated || response.capped {
                    warn!(
                        query = %query,
                        truncated = response.truncated,
                        capped = response.capped,
                        "Caching an incomplete answer list"
                    );
                }
                let set =
                    RecordSet::new(issued_at, completion.received_at, response.records.clone());
                responder.finish(Ok(DnsResolution::new(response.records, false)));
                self.jobs.push_back(DeferredJob::Merge { query, set });
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Upstream reply rejected");
                responder.finish(Err(e));
            }
        }
    }

    fn drain_jobs(&mut self) {
        while let Some(job) = self.jobs.pop_front() {
            match job {
                DeferredJob::Merge { query, set } => {
                    self.store.merge(&query.domain, query.record_type, set);
                }
            }
        }
    }
}
