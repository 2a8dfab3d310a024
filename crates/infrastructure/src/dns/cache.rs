pub mod clock;
pub mod store;

pub use store::{MergeOutcome, RecordStore};
