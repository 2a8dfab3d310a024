use super::wire::{self, WireAnswer};
use adns_application::ports::{TransportReply, UpstreamTransport};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the mock hands back for one send.
#[derive(Debug, Clone)]
pub enum MockReply {
    Answer(Vec<WireAnswer>),
    NxDomain,
    Corrupt,
    Fail(&'static str),
    Timeout,
    /// Wait before producing the inner reply.
    Delayed(Duration, Box<MockReply>),
}

/// Counting transport that replays scripted replies built against the
/// query bytes it is given. Falls back to `default` once the script is empty.
#[derive(Clone)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<MockReply>>>,
    default: MockReply,
    calls: Arc<AtomicUsize>,
    sent: Arc<Mutex<Vec<(SocketAddr, Vec<u8>)>>>,
}

impl MockTransport {
    pub fn new(default: MockReply) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            default,
            calls: Arc::new(AtomicUsize::new(0)),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn answering(answers: Vec<WireAnswer>) -> Self {
        Self::new(MockReply::Answer(answers))
    }

    pub fn push(&self, reply: MockReply) {
        self.script.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<(SocketAddr, Vec<u8>)> {
        self.sent.lock().unwrap().clone()
    }

    fn next_reply(&self) -> MockReply {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default.clone())
    }
}

async fn render(reply: MockReply, payload: &[u8], timeout: Duration) -> TransportReply {
    let mut pending = reply;
    let mut waited = Duration::ZERO;
    let reply = loop {
        match pending {
            MockReply::Delayed(delay, inner) => {
                tokio::time::sleep(delay).await;
                waited += delay;
                pending = *inner;
            }
            other => break other,
        }
    };

    match reply {
        MockReply::Answer(answers) => {
            TransportReply::ok(wire::answer_reply(payload, &answers), waited)
        }
        MockReply::NxDomain => TransportReply::ok(wire::nxdomain_reply(payload), waited),
        MockReply::Corrupt => TransportReply::ok(wire::corrupt_reply(payload), waited),
        MockReply::Fail(reason) => TransportReply::failed(reason, waited),
        MockReply::Timeout => TransportReply::timed_out(timeout),
        MockReply::Delayed(..) => unreachable!(),
    }
}

#[async_trait]
impl UpstreamTransport for MockTransport {
    async fn send(&self, server: SocketAddr, payload: Vec<u8>, timeout: Duration) -> TransportReply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push((server, payload.clone()));

        let reply = self.next_reply();
        render(reply, &payload, timeout).await
    }

    fn protocol_name(&self) -> &'static str {
        "MOCK"
    }
}
