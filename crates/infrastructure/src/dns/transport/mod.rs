pub mod udp;

pub use udp::{UdpTransport, DNS_PORT};
