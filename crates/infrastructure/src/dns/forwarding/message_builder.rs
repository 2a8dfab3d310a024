//! DNS Message Builder
//!
//! Constructs A/AAAA query messages in wire format using `hickory-proto`.
//! Queries always carry transaction id 0, class IN and the RD flag; replies
//! are correlated by the caller, not by id.

use super::record_type_map::RecordTypeMapper;
use adns_domain::{DomainError, RecordType};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use smallvec::SmallVec;
use std::str::FromStr;

pub const QUERY_ID: u16 = 0;
pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 253;

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query for `domain` and serialize it.
    ///
    /// Fails with [`DomainError::InvalidDomainName`] when the name is empty,
    /// has an empty or oversized label, is longer than 253 octets, or is
    /// rejected by the codec.
    pub fn build_query(domain: &str, record_type: &RecordType) -> Result<Vec<u8>, DomainError> {
        Self::validate_name(domain)?;

        let name = Name::from_str(domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(QUERY_ID, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        Self::serialize_message(&message)
    }

    fn validate_name(domain: &str) -> Result<(), DomainError> {
        let body = domain.strip_suffix('.').unwrap_or(domain);
        if body.is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "Invalid domain '{}': empty name",
                domain
            )));
        }
        if body.len() > MAX_NAME_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "Invalid domain '{}': name longer than {} octets",
                domain, MAX_NAME_LEN
            )));
        }

        let labels: SmallVec<[&str; 8]> = body.split('.').collect();
        for label in &labels {
            if label.is_empty() {
                return Err(DomainError::InvalidDomainName(format!(
                    "Invalid domain '{}': empty label",
                    domain
                )));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(DomainError::InvalidDomainName(format!(
                    "Invalid domain '{}': label longer than {} octets",
                    domain, MAX_LABEL_LEN
                )));
            }
        }
        Ok(())
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDomainName(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
