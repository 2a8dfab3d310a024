//! adns infrastructure: record cache, wire codec, UDP transport and the
//! resolution coordinator.
pub mod dns;
pub mod system;
