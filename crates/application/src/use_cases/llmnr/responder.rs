//! Builds the answer to one LLMNR query in place (RFC 4795 §2.1.1, §2.7).

use fnet_domain::dns_message::{
    flags, hostname_matches, write_address_answer, Header, Question, CLASS_IN, HEADER_SIZE,
};
use fnet_domain::RecordType;
use std::fmt;
use std::net::IpAddr;

/// Why a datagram got no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {
    TooShort,
    NotAQuery,
    UnsupportedOpcode,
    BadSectionCounts,
    MalformedQuestion,
    NotOurName,
    UnsupportedClass,
    UnsupportedType,
    NoAddress,
    NoRoom,
}

impl fmt::Display for Discard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Discard::TooShort => "shorter than header",
            Discard::NotAQuery => "QR set",
            Discard::UnsupportedOpcode => "non-zero opcode",
            Discard::BadSectionCounts => "section counts",
            Discard::MalformedQuestion => "malformed question",
            Discard::NotOurName => "name mismatch",
            Discard::UnsupportedClass => "class not IN",
            Discard::UnsupportedType => "type not A/AAAA",
            Discard::NoAddress => "no address of queried type",
            Discard::NoRoom => "answer does not fit",
        };
        f.write_str(reason)
    }
}

/// Turns the query in `msg[..received]` into a response and returns its
/// length.
///
/// `msg` is the whole message buffer; the answer record is written right
/// after the question, pointing back at the question name at offset 12.
/// `address_of` supplies the interface address for the queried type.
pub fn answer_query(
    msg: &mut [u8],
    received: usize,
    host_name: &str,
    ttl: u32,
    address_of: impl FnOnce(RecordType) -> Option<IpAddr>,
) -> Result<usize, Discard> {
    let query = msg.get(..received).ok_or(Discard::TooShort)?;
    let mut header = Header::parse(query).ok_or(Discard::TooShort)?;

    if header.is_response() {
        return Err(Discard::NotAQuery);
    }
    if header.opcode() != 0 {
        return Err(Discard::UnsupportedOpcode);
    }
    if header.qdcount != 1 || header.ancount != 0 || header.nscount != 0 {
        return Err(Discard::BadSectionCounts);
    }

    let question = Question::parse(query, HEADER_SIZE).ok_or(Discard::MalformedQuestion)?;
    if !hostname_matches(question.name(query), host_name) {
        return Err(Discard::NotOurName);
    }
    if question.qclass != CLASS_IN {
        return Err(Discard::UnsupportedClass);
    }
    let rtype = RecordType::from_u16(question.qtype).ok_or(Discard::UnsupportedType)?;
    let addr = address_of(rtype).ok_or(Discard::NoAddress)?;

    let answer_at = question.end();
    let answer_len =
        write_address_answer(msg, answer_at, HEADER_SIZE, &addr, ttl).map_err(|_| Discard::NoRoom)?;

    header.flags |= flags::QR | flags::LLMNR_C;
    header.ancount = 1;
    header.arcount = 0;
    header.write(msg).map_err(|_| Discard::NoRoom)?;

    Ok(answer_at + answer_len)
}
