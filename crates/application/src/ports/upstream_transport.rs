use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportStatus {
    Ok,
    Fail,
    Timeout,
}

/// What the transport hands back once a send completes.
#[derive(Debug, Clone)]
pub struct TransportReply {
    pub status: TransportStatus,

    pub latency: Duration,

    /// Raw reply bytes. Empty unless `status` is `Ok`.
    pub bytes: Vec<u8>,

    /// Human readable failure reason, for diagnostics only.
    pub detail: Option<String>,
}

impl TransportReply {
    pub fn ok(bytes: Vec<u8>, latency: Duration) -> Self {
        Self {
            status: TransportStatus::Ok,
            latency,
            bytes,
            detail: None,
        }
    }

    pub fn failed(detail: impl Into<String>, latency: Duration) -> Self {
        Self {
            status: TransportStatus::Fail,
            latency,
            bytes: vec![],
            detail: Some(detail.into()),
        }
    }

    pub fn timed_out(latency: Duration) -> Self {
        Self {
            status: TransportStatus::Timeout,
            latency,
            bytes: vec![],
            detail: Some("timed out".to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == TransportStatus::Ok
    }
}

/// Sends one datagram to an upstream server and waits for its reply.
///
/// Implementations never fail through `Result`: every outcome, including
/// timeouts, is reported through [`TransportReply::status`].
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    async fn send(&self, server: SocketAddr, payload: Vec<u8>, timeout: Duration)
        -> TransportReply;

    fn protocol_name(&self) -> &'static str;
}
