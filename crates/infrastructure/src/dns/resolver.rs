mod coordinator;
pub mod service;

pub use service::{LookupService, LookupServiceConfig, COMMAND_CHANNEL_CAPACITY};
