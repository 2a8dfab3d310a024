use super::{CachedRecord, DnsQuery, DomainError, RecordType};
use serde::{Deserialize, Serialize};

/// A caller's lookup request: `{"question": "example.com", "qtype": 1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRequest {
    pub question: String,

    pub qtype: RecordType,
}

impl LookupRequest {
    pub fn new(question: impl Into<String>, qtype: RecordType) -> Self {
        Self {
            question: question.into(),
            qtype,
        }
    }

    pub fn to_query(&self) -> DnsQuery {
        DnsQuery::new(self.question.as_str(), self.qtype)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub ip: String,

    pub ttl: i32,
}

impl ResolvedAddress {
    pub fn from_record(record: &CachedRecord) -> Self {
        Self {
            ip: record.address.to_string(),
            ttl: i32::try_from(record.ttl).unwrap_or(i32::MAX),
        }
    }
}

/// Lookup response. `code` is 0 on success (with at least one record) and 1 on
/// failure, in which case `error` carries the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    pub code: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default)]
    pub records: Vec<ResolvedAddress>,
}

impl LookupResponse {
    pub const SUCCESS: u8 = 0;
    pub const FAILURE: u8 = 1;

    pub fn success(records: Vec<ResolvedAddress>) -> Self {
        Self {
            code: Self::SUCCESS,
            error: None,
            records,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            code: Self::FAILURE,
            error: Some(error.into()),
            records: vec![],
        }
    }

    pub fn from_error(error: &DomainError) -> Self {
        Self::failure(error.caller_message())
    }

    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS
    }
}
