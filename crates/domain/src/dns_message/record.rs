use super::name::{compression_pointer, is_pointer};
use super::question::{Question, CLASS_IN};
use super::{read_u16, read_u32, write_bytes, write_u16, write_u32, Header, HEADER_SIZE};
use crate::{AddressFamily, DomainError, RecordType};
use std::net::IpAddr;

/// Compressed owner name (2) + TYPE (2) + CLASS (2) + TTL (4) + RDLENGTH (2).
pub const RR_HEADER_SIZE: usize = 12;

/// Fixed part of a resource record whose owner name is a compression
/// pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RrHeader {
    pub name_ptr: u16,
    pub rtype: u16,
    pub rr_class: u16,
    pub ttl: u32,
    pub rdlength: u16,
}

impl RrHeader {
    pub fn parse(buf: &[u8], at: usize) -> Option<Self> {
        Some(Self {
            name_ptr: read_u16(buf, at)?,
            rtype: read_u16(buf, at + 2)?,
            rr_class: read_u16(buf, at + 4)?,
            ttl: read_u32(buf, at + 6)?,
            rdlength: read_u16(buf, at + 10)?,
        })
    }

    pub fn write(&self, buf: &mut [u8], at: usize) -> Result<(), DomainError> {
        write_u16(buf, at, self.name_ptr)?;
        write_u16(buf, at + 2, self.rtype)?;
        write_u16(buf, at + 4, self.rr_class)?;
        write_u32(buf, at + 6, self.ttl)?;
        write_u16(buf, at + 10, self.rdlength)
    }
}

/// Writes an A or AAAA answer for the name stored at `name_at` (as a
/// compression pointer) and returns the record length.
pub fn write_address_answer(
    buf: &mut [u8],
    at: usize,
    name_at: usize,
    addr: &IpAddr,
    ttl: u32,
) -> Result<usize, DomainError> {
    let family = AddressFamily::of(addr);
    let header = RrHeader {
        name_ptr: compression_pointer(name_at),
        rtype: family.record_type().to_u16(),
        rr_class: CLASS_IN,
        ttl,
        rdlength: family.addr_len() as u16,
    };

    // Check the whole record fits before touching the buffer.
    let end = at + RR_HEADER_SIZE + family.addr_len();
    if end > buf.len() {
        return Err(DomainError::MessageTooLarge {
            needed: end,
            capacity: buf.len(),
        });
    }

    header.write(buf, at)?;
    match addr {
        IpAddr::V4(v4) => write_bytes(buf, at + RR_HEADER_SIZE, &v4.octets())?,
        IpAddr::V6(v6) => write_bytes(buf, at + RR_HEADER_SIZE, &v6.octets())?,
    }

    Ok(RR_HEADER_SIZE + family.addr_len())
}

/// Addresses of type `rtype`, class IN, found in a response.
///
/// Records are located by scanning for a compression-pointer octet from
/// the end of the fixed header on; question entries echoed by the server
/// are stepped over first when they parse, so label text is never taken
/// for a pointer. Once a record is found the scan resumes right after its
/// RDATA, so a record is never visited twice and its RDATA is never
/// mistaken for a record start. Records whose RDLENGTH does not match the
/// type are skipped; a record running past the message ends the scan.
pub struct AddressRecords<'a> {
    msg: &'a [u8],
    pos: usize,
    rtype: RecordType,
}

impl<'a> AddressRecords<'a> {
    pub fn new(msg: &'a [u8], rtype: RecordType) -> Self {
        Self {
            msg,
            pos: Self::answers_start(msg),
            rtype,
        }
    }

    fn answers_start(msg: &[u8]) -> usize {
        let qdcount = Header::parse(msg).map_or(0, |h| h.qdcount);
        let mut pos = HEADER_SIZE;
        for _ in 0..qdcount {
            match Question::parse(msg, pos) {
                Some(q) => pos = q.end(),
                None => return HEADER_SIZE,
            }
        }
        pos
    }

    fn finish(&mut self) -> Option<IpAddr> {
        self.pos = self.msg.len();
        None
    }
}

impl Iterator for AddressRecords<'_> {
    type Item = IpAddr;

    fn next(&mut self) -> Option<IpAddr> {
        while self.pos < self.msg.len() {
            if !is_pointer(self.msg[self.pos]) {
                self.pos += 1;
                continue;
            }

            let at = self.pos;
            let rr = match RrHeader::parse(self.msg, at) {
                Some(rr) => rr,
                None => return self.finish(),
            };
            let rdata_at = at + RR_HEADER_SIZE;
            let rdata_end = rdata_at + rr.rdlength as usize;
            let rdata = match self.msg.get(rdata_at..rdata_end) {
                Some(rdata) => rdata,
                None => return self.finish(),
            };
            self.pos = rdata_end;

            if rr.rtype == self.rtype.to_u16()
                && rr.rr_class == CLASS_IN
                && rdata.len() == self.rtype.rdata_len()
            {
                if let Some(addr) = self.rtype.family().addr_from_octets(rdata) {
                    return Some(addr);
                }
            }
        }
        None
    }
}
