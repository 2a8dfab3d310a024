pub mod cache;
pub mod forwarding;
pub mod resolver;
pub mod transport;

pub use cache::{MergeOutcome, RecordStore};
pub use forwarding::{DnsResponse, MessageBuilder, ResponseParser};
pub use resolver::{LookupService, LookupServiceConfig};
pub use transport::UdpTransport;
