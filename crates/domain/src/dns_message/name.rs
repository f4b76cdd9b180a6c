//! Domain names as length-prefixed label sequences.
//!
//! ```text
//!   07 'e' 'x' 'a' 'm' 'p' 'l' 'e' 03 'c' 'o' 'm' 00
//! ```
//!
//! A length octet with either of its top two bits set starts a compression
//! pointer (or a reserved extended label type). Names built or matched
//! here never contain one.

use super::write_bytes;
use crate::DomainError;

/// Longest name on the wire, length octets and terminating zero included.
pub const MAX_NAME_LEN: usize = 255;
pub const MAX_LABEL_LEN: usize = 63;

pub const COMPRESSED_MASK: u8 = 0xC0;
pub const COMPRESSED_INDEX_MASK: u16 = 0x3FFF;

/// True when `octet` is not a plain label length.
pub fn is_compressed(octet: u8) -> bool {
    octet & COMPRESSED_MASK != 0
}

/// True when `octet` starts a two-octet compression pointer.
pub fn is_pointer(octet: u8) -> bool {
    octet & COMPRESSED_MASK == COMPRESSED_MASK
}

/// Two-octet pointer to a name stored at `offset` within the message.
pub fn compression_pointer(offset: usize) -> u16 {
    ((COMPRESSED_MASK as u16) << 8) | (offset as u16 & COMPRESSED_INDEX_MASK)
}

/// Writes `host` as a label sequence at `at`, returning the octets written
/// (terminating zero included). One trailing dot is accepted.
pub fn encode_name(host: &str, buf: &mut [u8], at: usize) -> Result<usize, DomainError> {
    let trimmed = host.strip_suffix('.').unwrap_or(host);
    // Leading length octet plus terminating zero.
    if trimmed.is_empty() || trimmed.len() + 2 > MAX_NAME_LEN {
        return Err(DomainError::InvalidDomainName(host.to_string()));
    }

    let mut pos = at;
    for label in trimmed.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "{}: bad label '{}'",
                host, label
            )));
        }
        write_bytes(buf, pos, &[label.len() as u8])?;
        write_bytes(buf, pos + 1, label.as_bytes())?;
        pos += 1 + label.len();
    }
    write_bytes(buf, pos, &[0])?;

    Ok(pos + 1 - at)
}

/// Length of the uncompressed name starting at `at`, terminating zero
/// included. `None` if the name runs past the buffer or uses compression.
pub fn name_len(buf: &[u8], at: usize) -> Option<usize> {
    let mut pos = at;
    loop {
        let len = *buf.get(pos)?;
        if len == 0 {
            return Some(pos + 1 - at);
        }
        if is_compressed(len) {
            return None;
        }
        pos += 1 + len as usize;
    }
}

/// Compares a label-encoded query name against a dotted host name.
///
/// Labels compare case-insensitively and must line up exactly with the
/// host name's dot-separated parts, down to the terminating zero. A query
/// name using compression never matches.
pub fn hostname_matches(query_name: &[u8], host: &str) -> bool {
    let mut labels = host.strip_suffix('.').unwrap_or(host).split('.');
    let mut pos = 0;

    loop {
        let len = match query_name.get(pos) {
            Some(&len) => len as usize,
            None => return false,
        };
        if is_compressed(len as u8) {
            return false;
        }
        if len == 0 {
            return labels.next().is_none();
        }

        let label = match labels.next() {
            Some(label) => label,
            None => return false,
        };
        let bytes = match query_name.get(pos + 1..pos + 1 + len) {
            Some(bytes) => bytes,
            None => return false,
        };
        if !bytes.eq_ignore_ascii_case(label.as_bytes()) {
            return false;
        }

        pos += 1 + len;
    }
}
