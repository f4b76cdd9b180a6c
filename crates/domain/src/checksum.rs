//! Internet checksum (RFC 1071).
//!
//! The checksum field is the 16 bit one's complement of the one's
//! complement sum of all 16 bit words in the header and text. An odd
//! trailing octet is padded on the right with zeros to form a word. While
//! computing the checksum the checksum field itself must be zero.
//!
//! All words are taken in network byte order, so results can be written
//! straight into a header with `to_be_bytes`.
//!
//! A packet may be held as a chain of fragments (`&[&[u8]]`). Fragment
//! boundaries do not have to be word aligned: when a fragment ends on an
//! odd octet, the first octet of the next fragment completes that word as
//! its low half.

use std::net::IpAddr;

/// Adds every 16-bit word of `data` to `sum`.
///
/// Words are accumulated in blocks of 16, then 4, then single words. A
/// leftover octet is added as the high half of a zero-padded word.
fn sum_words(mut sum: u64, data: &[u8]) -> u64 {
    #[inline(always)]
    fn word(bytes: &[u8], at: usize) -> u64 {
        u16::from_be_bytes([bytes[at], bytes[at + 1]]) as u64
    }

    let mut blocks = data.chunks_exact(32);
    for block in &mut blocks {
        let mut at = 0;
        while at < 32 {
            sum += word(block, at);
            at += 2;
        }
    }

    let mut quads = blocks.remainder().chunks_exact(8);
    for quad in &mut quads {
        sum += word(quad, 0);
        sum += word(quad, 2);
        sum += word(quad, 4);
        sum += word(quad, 6);
    }

    let mut words = quads.remainder().chunks_exact(2);
    for w in &mut words {
        sum += word(w, 0);
    }

    if let [last] = words.remainder() {
        sum += (*last as u64) << 8;
    }

    sum
}

/// Partial sum over the first `len` octets of a fragment chain.
fn sum_chain(chain: &[&[u8]], len: usize) -> u64 {
    let mut sum = 0u64;
    let mut remaining = len;
    let mut split_word = false;

    for fragment in chain {
        if remaining == 0 {
            break;
        }

        let mut data = &fragment[..fragment.len().min(remaining)];
        remaining -= data.len();

        if split_word {
            // Previous fragment was odd: its last octet is already in the
            // high half, this fragment's first octet is the low half.
            match data.split_first() {
                Some((first, rest)) => {
                    sum += *first as u64;
                    data = rest;
                    split_word = false;
                }
                None => continue,
            }
        }

        sum = sum_words(sum, data);
        split_word = data.len() % 2 == 1;
    }

    sum
}

fn sum_addr(sum: u64, addr: &IpAddr) -> u64 {
    match addr {
        IpAddr::V4(v4) => sum_words(sum, &v4.octets()),
        IpAddr::V6(v6) => sum_words(sum, &v6.octets()),
    }
}

/// Folds carries back into the low 16 bits until none remain.
fn fold(mut sum: u64) -> u16 {
    while sum >> 16 != 0 {
        sum = (sum & 0xffff) + (sum >> 16);
    }
    sum as u16
}

/// Checksum of the first `len` octets of a fragment chain.
pub fn checksum(chain: &[&[u8]], len: usize) -> u16 {
    !fold(sum_chain(chain, len))
}

/// Checksum of a flat buffer.
pub fn checksum_buf(buf: &[u8]) -> u16 {
    !fold(sum_words(0, buf))
}

/// Checksum of a flat transport segment including the IP pseudo-header
/// (source, destination, protocol, segment length).
pub fn checksum_pseudo_buf(buf: &[u8], protocol: u8, src: &IpAddr, dst: &IpAddr) -> u16 {
    let mut sum = sum_words(0, buf);
    sum += protocol as u64 + buf.len() as u64;
    sum = sum_addr(sum, src);
    sum = sum_addr(sum, dst);
    !fold(sum)
}

/// First half of a two-pass pseudo-header checksum: covers the segment
/// held in `chain` plus the protocol and length words.
///
/// Returns the folded, uncomplemented intermediate sum that
/// [`checksum_pseudo_end`] continues from. `0xffff` is added before folding
/// (RFC 1624) so the intermediate is never a negative zero.
pub fn checksum_pseudo_start(chain: &[&[u8]], protocol: u8, protocol_len: u16) -> u16 {
    let mut sum = sum_chain(chain, protocol_len as usize);
    sum += protocol as u64 + protocol_len as u64;
    sum += 0xffff;
    fold(sum)
}

/// Second half of a two-pass pseudo-header checksum: adds the addresses to
/// the intermediate from [`checksum_pseudo_start`] and returns the final
/// checksum.
pub fn checksum_pseudo_end(partial: u16, src: &IpAddr, dst: &IpAddr) -> u16 {
    let mut sum = partial as u64;
    sum = sum_addr(sum, src);
    sum = sum_addr(sum, dst);
    sum += 0xffff;
    !fold(sum)
}
