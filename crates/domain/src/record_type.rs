use crate::AddressFamily;
use std::fmt;

/// Record types this stack queries for and answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::AAAA => 28,
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            1 => Some(RecordType::A),
            28 => Some(RecordType::AAAA),
            _ => None,
        }
    }

    pub fn family(&self) -> AddressFamily {
        match self {
            RecordType::A => AddressFamily::Inet,
            RecordType::AAAA => AddressFamily::Inet6,
        }
    }

    /// RDATA length every valid record of this type carries.
    pub fn rdata_len(&self) -> usize {
        self.family().addr_len()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
