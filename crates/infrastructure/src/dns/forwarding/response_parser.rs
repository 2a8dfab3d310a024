use adns_domain::{CachedRecord, DnsQuery, DomainError, RecordType};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use std::net::IpAddr;
use tracing::{debug, warn};

/// Answers beyond this many matching records are dropped.
pub const MAX_ANSWER_RECORDS: usize = 100;

const HEADER_LEN: usize = 12;
const QR_BIT: u8 = 0x80;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    /// Matching answers in response order, with the TTL the server sent.
    pub records: Vec<CachedRecord>,

    pub rcode: ResponseCode,

    /// TC bit from the header.
    pub truncated: bool,

    /// Set when more than [`MAX_ANSWER_RECORDS`] matching answers were present.
    pub capped: bool,
}

pub struct ResponseParser;

impl ResponseParser {
    /// Decode an upstream reply and extract the answers of `query.record_type`.
    ///
    /// Returns `InvalidDnsResponse` when the bytes do not decode as a DNS
    /// response and `EmptyAnswer` when they do but carry no matching record.
    pub fn parse(response_bytes: &[u8], query: &DnsQuery) -> Result<DnsResponse, DomainError> {
        if response_bytes.len() < HEADER_LEN {
            return Err(DomainError::InvalidDnsResponse(format!(
                "reply for {} is {} bytes, shorter than a DNS header",
                query,
                response_bytes.len()
            )));
        }
        if response_bytes[2] & QR_BIT == 0 {
            return Err(DomainError::InvalidDnsResponse(format!(
                "reply for {} is not a response message",
                query
            )));
        }

        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response for {}: {}", query, e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let mut records = Vec::new();
        let mut matching = 0usize;

        for record in message.answers() {
            let address = match (record.data(), query.record_type) {
                (RData::A(a), RecordType::A) => IpAddr::V4(a.0),
                (RData::AAAA(aaaa), RecordType::AAAA) => IpAddr::V6(aaaa.0),
                _ => continue,
            };
            matching += 1;
            if records.len() < MAX_ANSWER_RECORDS {
                records.push(CachedRecord::new(address, record.ttl()));
            }
        }

        let capped = matching > records.len();
        if capped {
            warn!(
                query = %query,
                matching = matching,
                kept = records.len(),
                "Answer list capped"
            );
        }

        debug!(
            query = %query,
            rcode = Self::rcode_to_status(rcode),
            records = records.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        if records.is_empty() {
            return Err(DomainError::EmptyAnswer {
                domain: query.domain.to_string(),
                record_type: query.record_type.to_string(),
            });
        }

        Ok(DnsResponse {
            records,
            rcode,
            truncated,
            capped,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a_query() -> DnsQuery {
        DnsQuery::new("example.com", RecordType::A)
    }

    #[test]
    fn test_short_reply_is_parse_error() {
        let result = ResponseParser::parse(&[0x00, 0x00, 0x81], &a_query());
        assert!(matches!(result, Err(DomainError::InvalidDnsResponse(_))));
    }

    #[test]
    fn test_query_message_is_rejected() {
        let mut bytes = vec![0u8; 12];
        bytes[2] = 0x01;
        let result = ResponseParser::parse(&bytes, &a_query());
        assert!(matches!(result, Err(DomainError::InvalidDnsResponse(_))));
    }

    #[test]
    fn test_header_only_response_is_empty_answer() {
        let mut bytes = vec![0u8; 12];
        bytes[2] = 0x81;
        bytes[3] = 0x80;
        let result = ResponseParser::parse(&bytes, &a_query());
        assert!(matches!(result, Err(DomainError::EmptyAnswer { .. })));
    }
}
