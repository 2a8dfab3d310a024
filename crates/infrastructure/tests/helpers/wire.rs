use std::net::{Ipv4Addr, Ipv6Addr};

/// One answer record written with a compression pointer to the question name.
#[derive(Debug, Clone, Copy)]
pub enum WireAnswer {
    A(Ipv4Addr, u32),
    Aaaa(Ipv6Addr, u32),
    Cname(u32),
}

impl WireAnswer {
    pub fn a(ip: &str, ttl: u32) -> Self {
        Self::A(ip.parse().unwrap(), ttl)
    }

    pub fn aaaa(ip: &str, ttl: u32) -> Self {
        Self::Aaaa(ip.parse().unwrap(), ttl)
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[0xc0, 0x0c]);
        let (rtype, ttl, rdata): (u16, u32, Vec<u8>) = match self {
            Self::A(ip, ttl) => (1, *ttl, ip.octets().to_vec()),
            Self::Aaaa(ip, ttl) => (28, *ttl, ip.octets().to_vec()),
            Self::Cname(ttl) => (5, *ttl, vec![0xc0, 0x0c]),
        };
        out.extend_from_slice(&rtype.to_be_bytes());
        out.extend_from_slice(&[0x00, 0x01]);
        out.extend_from_slice(&ttl.to_be_bytes());
        out.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        out.extend_from_slice(&rdata);
    }
}

/// Reply to `query` echoing its id and question, with the given rcode and answers.
pub fn reply(query: &[u8], rcode: u8, truncated: bool, answers: &[WireAnswer]) -> Vec<u8> {
    assert!(query.len() >= 12, "query shorter than a DNS header");

    let mut response = Vec::with_capacity(512);
    response.extend_from_slice(&query[0..2]);
    response.push(if truncated { 0x83 } else { 0x81 });
    response.push(0x80 | (rcode & 0x0f));
    response.extend_from_slice(&query[4..6]);
    response.extend_from_slice(&(answers.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&query[12..]);

    for answer in answers {
        answer.write(&mut response);
    }
    response
}

pub fn answer_reply(query: &[u8], answers: &[WireAnswer]) -> Vec<u8> {
    reply(query, 0, false, answers)
}

pub fn nxdomain_reply(query: &[u8]) -> Vec<u8> {
    reply(query, 3, false, &[])
}

/// Response header claiming one answer that is not there.
pub fn corrupt_reply(query: &[u8]) -> Vec<u8> {
    let mut response = reply(query, 0, false, &[]);
    response[7] = 0x01;
    response.extend_from_slice(&[0xc0, 0x0c, 0x00]);
    response
}
