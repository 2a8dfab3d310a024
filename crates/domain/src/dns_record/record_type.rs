use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record types this service resolves.
///
/// On the lookup interface the type travels as a small request code
/// (`A = 1`, `AAAA = 2`), which is distinct from the DNS wire type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RecordType {
    A,
    AAAA,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
        }
    }

    pub fn request_code(&self) -> u8 {
        match self {
            RecordType::A => 1,
            RecordType::AAAA => 2,
        }
    }

    pub fn from_request_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(RecordType::A),
            2 => Some(RecordType::AAAA),
            _ => None,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::AAAA),
            _ => Err(format!("Unknown record type: {}", s)),
        }
    }
}

impl TryFrom<u8> for RecordType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_request_code(code).ok_or_else(|| format!("Unknown qtype code: {}", code))
    }
}

impl From<RecordType> for u8 {
    fn from(record_type: RecordType) -> Self {
        record_type.request_code()
    }
}
