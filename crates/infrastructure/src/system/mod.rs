pub mod nameservers;

pub use nameservers::NameServers;
