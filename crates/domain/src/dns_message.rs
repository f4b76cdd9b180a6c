//! DNS / LLMNR wire format (RFC 1035 §4.1, RFC 4795 §2.1.1).
//!
//! Messages are read and written in place inside caller-owned buffers.
//! Every access goes through the bounds-checked big-endian accessors
//! below; nothing is reinterpreted as a struct.

pub mod header;
pub mod name;
pub mod question;
pub mod record;

pub use header::{flags, Header, HEADER_SIZE};
pub use name::{encode_name, hostname_matches, name_len, MAX_LABEL_LEN, MAX_NAME_LEN};
pub use question::{write_question, Question, CLASS_IN, QUESTION_TAIL_SIZE};
pub use record::{write_address_answer, AddressRecords, RrHeader, RR_HEADER_SIZE};

use crate::DomainError;

/// Messages carried by UDP are restricted to 512 bytes, not counting the
/// IP or UDP headers.
pub const MIN_MESSAGE_SIZE: usize = 512;

pub fn read_u16(buf: &[u8], at: usize) -> Option<u16> {
    let bytes = buf.get(at..at.checked_add(2)?)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

pub fn read_u32(buf: &[u8], at: usize) -> Option<u32> {
    let bytes = buf.get(at..at.checked_add(4)?)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

pub fn write_u16(buf: &mut [u8], at: usize, value: u16) -> Result<(), DomainError> {
    write_bytes(buf, at, &value.to_be_bytes())
}

pub fn write_u32(buf: &mut [u8], at: usize, value: u32) -> Result<(), DomainError> {
    write_bytes(buf, at, &value.to_be_bytes())
}

pub fn write_bytes(buf: &mut [u8], at: usize, bytes: &[u8]) -> Result<(), DomainError> {
    let capacity = buf.len();
    let end = at + bytes.len();
    buf.get_mut(at..end)
        .ok_or(DomainError::MessageTooLarge {
            needed: end,
            capacity,
        })?
        .copy_from_slice(bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u16_out_of_bounds() {
        assert_eq!(read_u16(&[0x12, 0x34], 0), Some(0x1234));
        assert_eq!(read_u16(&[0x12, 0x34], 1), None);
        assert_eq!(read_u16(&[], usize::MAX), None);
    }

    #[test]
    fn test_write_u32_reports_capacity() {
        let mut buf = [0u8; 6];
        assert!(write_u32(&mut buf, 2, 0xDEAD_BEEF).is_ok());
        assert_eq!(buf, [0, 0, 0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(
            write_u32(&mut buf, 3, 1),
            Err(DomainError::MessageTooLarge {
                needed: 7,
                capacity: 6
            })
        );
    }
}
