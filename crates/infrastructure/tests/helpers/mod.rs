#![allow(dead_code)]

pub mod dns_server_mock;
pub mod mock_transport;
pub mod wire;

pub use dns_server_mock::MockDnsServer;
pub use mock_transport::{MockReply, MockTransport};
pub use wire::WireAnswer;
