pub mod record;
pub mod record_type;

pub use record::{CachedRecord, RecordSet};
pub use record_type::RecordType;
