use super::wire::{self, WireAnswer};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

enum Behaviour {
    Answer(Vec<WireAnswer>),
    Raw(Vec<u8>),
    Silent,
}

/// Loopback UDP DNS server answering every query the same way.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(answers: Vec<WireAnswer>) -> Result<Self, std::io::Error> {
        Self::spawn(Behaviour::Answer(answers)).await
    }

    /// Replies to every query with exactly `bytes`.
    pub async fn start_raw(bytes: Vec<u8>) -> Result<Self, std::io::Error> {
        Self::spawn(Behaviour::Raw(bytes)).await
    }

    /// Reads queries but never replies.
    pub async fn start_silent() -> Result<Self, std::io::Error> {
        Self::spawn(Behaviour::Silent).await
    }

    async fn spawn(behaviour: Behaviour) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&queries);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            let response = match &behaviour {
                                Behaviour::Answer(answers) if len >= 12 => {
                                    Some(wire::answer_reply(&buf[..len], answers))
                                }
                                Behaviour::Raw(bytes) => Some(bytes.clone()),
                                _ => None,
                            };
                            if let Some(response) = response {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
