use super::{read_u16, write_u16};
use crate::DomainError;

pub const HEADER_SIZE: usize = 12;

/// Header flag bits.
///
/// ```text
///   DNS:   |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
///   LLMNR: |QR|   Opcode  | C|TC| T| Z| Z| Z| Z|   RCODE   |
/// ```
pub mod flags {
    pub const QR: u16 = 0x8000;
    pub const OPCODE: u16 = 0x7800;
    pub const AA: u16 = 0x0400;
    pub const TC: u16 = 0x0200;
    pub const RD: u16 = 0x0100;
    pub const RA: u16 = 0x0080;
    pub const RCODE: u16 = 0x000F;

    /// LLMNR conflict: the name is not considered unique.
    pub const LLMNR_C: u16 = 0x0400;
    /// LLMNR tentative: uniqueness not yet verified.
    pub const LLMNR_T: u16 = 0x0100;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    /// Standard recursive query carrying one question.
    pub fn query(id: u16) -> Self {
        Self {
            id,
            flags: flags::RD,
            qdcount: 1,
            ..Self::default()
        }
    }

    pub fn parse(buf: &[u8]) -> Option<Self> {
        if buf.len() < HEADER_SIZE {
            return None;
        }
        Some(Self {
            id: read_u16(buf, 0)?,
            flags: read_u16(buf, 2)?,
            qdcount: read_u16(buf, 4)?,
            ancount: read_u16(buf, 6)?,
            nscount: read_u16(buf, 8)?,
            arcount: read_u16(buf, 10)?,
        })
    }

    pub fn write(&self, buf: &mut [u8]) -> Result<(), DomainError> {
        write_u16(buf, 0, self.id)?;
        write_u16(buf, 2, self.flags)?;
        write_u16(buf, 4, self.qdcount)?;
        write_u16(buf, 6, self.ancount)?;
        write_u16(buf, 8, self.nscount)?;
        write_u16(buf, 10, self.arcount)
    }

    pub fn is_response(&self) -> bool {
        self.flags & flags::QR != 0
    }

    pub fn opcode(&self) -> u8 {
        ((self.flags & flags::OPCODE) >> 11) as u8
    }

    pub fn rcode(&self) -> u8 {
        (self.flags & flags::RCODE) as u8
    }
}
