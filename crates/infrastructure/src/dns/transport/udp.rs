//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! One ephemeral socket per query. Send and receive share a single deadline;
//! datagrams from any address other than the queried server, or carrying a
//! different transaction id, are ignored until the deadline fires. A datagram
//! from the server too short to carry an id is returned as is for the parser
//! to reject.

use adns_application::ports::{TransportReply, UpstreamTransport};
use async_trait::async_trait;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::{debug, warn};

pub const DNS_PORT: u16 = 53;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpTransport;

impl UdpTransport {
    pub fn new() -> Self {
        Self
    }

    async fn exchange(server: SocketAddr, payload: &[u8]) -> io::Result<Vec<u8>> {
        let bind_addr: SocketAddr = if server.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr).await?;
        let bytes_sent = socket.send_to(payload, server).await?;
        debug!(server = %server, bytes_sent = bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        loop {
            let (bytes_received, from_addr) = socket.recv_from(&mut recv_buf).await?;

            if from_addr != server {
                warn!(
                    expected = %server,
                    received_from = %from_addr,
                    "UDP response from unexpected source"
                );
                continue;
            }
            if is_foreign_reply(payload, &recv_buf[..bytes_received]) {
                warn!(server = %server, "UDP response with mismatched transaction id");
                continue;
            }

            recv_buf.truncate(bytes_received);
            return Ok(recv_buf);
        }
    }
}

/// True when `response` carries a transaction id that differs from the
/// query's. A reply too short to hold an id is not foreign.
pub(crate) fn is_foreign_reply(query: &[u8], response: &[u8]) -> bool {
    query.len() >= 2 && response.len() >= 2 && query[..2] != response[..2]
}

#[async_trait]
impl UpstreamTransport for UdpTransport {
    async fn send(&self, server: SocketAddr, payload: Vec<u8>, timeout: Duration) -> TransportReply {
        let started = Instant::now();

        match tokio::time::timeout_at(started + timeout, Self::exchange(server, &payload)).await {
            Ok(Ok(bytes)) => {
                debug!(server = %server, bytes_received = bytes.len(), "UDP response received");
                TransportReply::ok(bytes, started.elapsed())
            }
            Ok(Err(e)) => {
                warn!(server = %server, error = %e, "UDP exchange failed");
                TransportReply::failed(e.to_string(), started.elapsed())
            }
            Err(_) => {
                debug!(server = %server, timeout_ms = timeout.as_millis() as u64, "UDP query timed out");
                TransportReply::timed_out(started.elapsed())
            }
        }
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
