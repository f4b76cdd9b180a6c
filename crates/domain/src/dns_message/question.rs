use super::name::{encode_name, name_len};
use super::{read_u16, write_u16};
use crate::{DomainError, RecordType};

pub const CLASS_IN: u16 = 1;

/// QTYPE + QCLASS following the question name.
pub const QUESTION_TAIL_SIZE: usize = 4;

/// A question entry located inside a received message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    /// Offset of the first name octet.
    pub name_at: usize,
    /// Name length including its terminating zero.
    pub name_len: usize,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    /// Locates the question at `at`. Fails when the name is compressed or
    /// the name plus its tail does not fit in `buf`.
    pub fn parse(buf: &[u8], at: usize) -> Option<Self> {
        let name_len = name_len(buf, at)?;
        let tail = at + name_len;
        Some(Self {
            name_at: at,
            name_len,
            qtype: read_u16(buf, tail)?,
            qclass: read_u16(buf, tail + 2)?,
        })
    }

    /// Offset just past QCLASS.
    pub fn end(&self) -> usize {
        self.name_at + self.name_len + QUESTION_TAIL_SIZE
    }

    pub fn name<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.name_at..self.name_at + self.name_len]
    }
}

/// Writes QNAME, QTYPE and QCLASS=IN at `at`; returns the octets written.
pub fn write_question(
    buf: &mut [u8],
    at: usize,
    host: &str,
    qtype: RecordType,
) -> Result<usize, DomainError> {
    let name_len = encode_name(host, buf, at)?;
    let tail = at + name_len;
    write_u16(buf, tail, qtype.to_u16())?;
    write_u16(buf, tail + 2, CLASS_IN)?;
    Ok(name_len + QUESTION_TAIL_SIZE)
}
