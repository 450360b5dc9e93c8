//! Catch-all DNS responder messages
//!
//! While the provisioning access point is up every `A` query is answered
//! with the portal address, so any URL a client opens lands on the form.

use embassy_net::Ipv4Address;

pub const DNS_PORT: u16 = 53;

const HEADER_SIZE: usize = 12;
const TYPE_A: u16 = 1;
const CLASS_IN: u16 = 1;
const TTL_SECS: u32 = 60;
/// Compression pointer to the question name at offset 12
const NAME_POINTER: [u8; 2] = [0xC0, 0x0C];
const ANSWER_SIZE: usize = 16;

/// Flag bits
const FLAG_RESPONSE: u16 = 0x8000;
const FLAG_OPCODE_MASK: u16 = 0x7800;
const FLAG_RECURSION_DESIRED: u16 = 0x0100;
const FLAG_RECURSION_AVAILABLE: u16 = 0x0080;

/// Build the reply to `query` into `buffer`
///
/// Returns the reply length, or `None` for anything that is not a
/// standard single-question query or does not fit `buffer`.
pub fn build_dns_response(query: &[u8], address: Ipv4Address, buffer: &mut [u8]) -> Option<usize> {
    let header = query.get(..HEADER_SIZE)?;
    let flags = u16::from_be_bytes([header[2], header[3]]);
    let questions = u16::from_be_bytes([header[4], header[5]]);
    if flags & FLAG_RESPONSE != 0 || flags & FLAG_OPCODE_MASK != 0 || questions != 1 {
        return None;
    }

    let question_end = question_end(query)?;
    let question = &query[HEADER_SIZE..question_end];
    let qtype = u16::from_be_bytes([query[question_end - 4], query[question_end - 3]]);
    let qclass = u16::from_be_bytes([query[question_end - 2], query[question_end - 1]]);
    let answer = qtype == TYPE_A && qclass == CLASS_IN;

    let length = question_end + if answer { ANSWER_SIZE } else { 0 };
    let out = buffer.get_mut(..length)?;

    let reply_flags =
        FLAG_RESPONSE | (flags & FLAG_RECURSION_DESIRED) | FLAG_RECURSION_AVAILABLE;
    out[0..2].copy_from_slice(&header[0..2]);
    out[2..4].copy_from_slice(&reply_flags.to_be_bytes());
    out[4..6].copy_from_slice(&1u16.to_be_bytes());
    out[6..8].copy_from_slice(&u16::from(answer).to_be_bytes());
    out[8..12].fill(0);
    out[HEADER_SIZE..question_end].copy_from_slice(question);

    if answer {
        let record = &mut out[question_end..];
        record[0..2].copy_from_slice(&NAME_POINTER);
        record[2..4].copy_from_slice(&TYPE_A.to_be_bytes());
        record[4..6].copy_from_slice(&CLASS_IN.to_be_bytes());
        record[6..10].copy_from_slice(&TTL_SECS.to_be_bytes());
        record[10..12].copy_from_slice(&4u16.to_be_bytes());
        record[12..16].copy_from_slice(&address.octets());
    }

    Some(length)
}

/// Offset just past the first question (name, type, class)
fn question_end(query: &[u8]) -> Option<usize> {
    let mut i = HEADER_SIZE;
    loop {
        let len = usize::from(*query.get(i)?);
        if len == 0 {
            break;
        }
        // Compressed names never appear in a query's first question
        if len & 0xC0 != 0 {
            return None;
        }
        i += 1 + len;
    }
    let end = i + 1 + 4;
    (end <= query.len()).then_some(end)
}
