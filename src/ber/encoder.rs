// The forward direction: Rust values out to BER bytes, one TLV at a time.

use crate::ber::oid::Oid;
use crate::ber::Asn1Tag;

/// Minimal two's-complement INTEGER: redundant leading 0x00 / 0xFF bytes are
/// trimmed, then one sign byte is restored if the top bit disagrees with the
/// sign.
pub fn encode_integer(buf: &mut Vec<u8>, value: i64) {
    let bytes = value.to_be_bytes();

    let mut start_index = 0;

    if value > 0 {
        while start_index < 7 && bytes[start_index] == 0x00 {
            start_index += 1;
        }
        if (bytes[start_index] & 0x80) != 0 {
            // looks negative without a leading 0x00
            start_index -= 1;
        }
    } else if value < 0 {
        while start_index < 7 && bytes[start_index] == 0xFF {
            start_index += 1;
        }
        if (bytes[start_index] & 0x80) == 0 {
            // looks positive without a leading 0xFF
            start_index -= 1;
        }
    } else {
        start_index = 7;
    }

    let value_bytes = &bytes[start_index..];

    buf.push(Asn1Tag::Integer as u8);
    encode_length(buf, value_bytes.len());
    buf.extend_from_slice(value_bytes);
}

pub fn encode_length(buf: &mut Vec<u8>, len: usize) {
    if len < 128 {
        buf.push(len as u8);
    } else {
        let len_bytes = len.to_be_bytes();
        let mut start_index = 0;

        while start_index < len_bytes.len() && len_bytes[start_index] == 0x00 {
            start_index += 1;
        }

        let significant_bytes = &len_bytes[start_index..];

        buf.push(0x80 | (significant_bytes.len() as u8));
        buf.extend_from_slice(significant_bytes);
    }
}

pub fn encode_octet_string(buf: &mut Vec<u8>, value: &[u8]) {
    encode_bytes_with_tag(buf, Asn1Tag::OctetString, value);
}

pub fn encode_bit_string(buf: &mut Vec<u8>, value: &[u8]) {
    encode_bytes_with_tag(buf, Asn1Tag::BitString, value);
}

pub fn encode_ia5_string(buf: &mut Vec<u8>, value: &str) {
    encode_bytes_with_tag(buf, Asn1Tag::IA5String, value.as_bytes());
}

pub fn encode_null(buf: &mut Vec<u8>) {
    encode_empty(buf, Asn1Tag::Null);
}

/// NULL, EndOfContent and the varbind exception values are all a bare tag
/// with a zero length.
pub fn encode_empty(buf: &mut Vec<u8>, tag: Asn1Tag) {
    buf.push(tag as u8);
    buf.push(0x00);
}

fn encode_oid_arc(buf: &mut Vec<u8>, arc: u32) {
    let mut digits = [0u8; 5];
    let mut n = 0;
    let mut rest = arc;

    // low digit first, then emitted in reverse
    loop {
        digits[n] = (rest & 0x7F) as u8;
        rest >>= 7;
        n += 1;
        if rest == 0 {
            break;
        }
    }

    for i in (1..n).rev() {
        buf.push(digits[i] | 0x80);
    }
    buf.push(digits[0]);
}

pub fn encode_oid(buf: &mut Vec<u8>, oid: &Oid) {
    let arcs = oid.arcs();

    let mut body = Vec::with_capacity(arcs.len() + 2);
    // Oid guarantees two leading arcs that pack into one octet.
    body.push((arcs[0] * 40 + arcs[1]) as u8);
    for arc in &arcs[2..] {
        encode_oid_arc(&mut body, *arc);
    }

    buf.push(Asn1Tag::ObjectIdentifier as u8);
    encode_length(buf, body.len());
    buf.extend_from_slice(&body);
}

/// Counter32 / Gauge32 / TimeTicks always carry four payload octets. Their
/// decoders accept shorter encodings from peers, but the emitted width stays
/// fixed.
fn encode_unsigned32_fixed(buf: &mut Vec<u8>, tag: Asn1Tag, value: u32) {
    buf.push(tag as u8);
    encode_length(buf, 4);
    buf.extend_from_slice(&value.to_be_bytes());
}

pub fn encode_counter32(buf: &mut Vec<u8>, value: u32) {
    encode_unsigned32_fixed(buf, Asn1Tag::Counter32, value);
}

pub fn encode_gauge32(buf: &mut Vec<u8>, value: u32) {
    encode_unsigned32_fixed(buf, Asn1Tag::Gauge32, value);
}

pub fn encode_timeticks(buf: &mut Vec<u8>, value: u32) {
    encode_unsigned32_fixed(buf, Asn1Tag::TimeTicks, value);
}

/// Counter64 always carries eight payload octets.
pub fn encode_counter64(buf: &mut Vec<u8>, value: u64) {
    buf.push(Asn1Tag::Counter64 as u8);
    encode_length(buf, 8);
    buf.extend_from_slice(&value.to_be_bytes());
}

pub fn encode_ip_address(buf: &mut Vec<u8>, octets: [u8; 4]) {
    buf.push(Asn1Tag::IpAddress as u8);
    encode_length(buf, 4);
    buf.extend_from_slice(&octets);
}

fn encode_bytes_with_tag(buf: &mut Vec<u8>, tag: Asn1Tag, value: &[u8]) {
    buf.push(tag as u8);
    encode_length(buf, value.len());
    buf.extend_from_slice(value);
}

pub fn encode_container_with<F>(buf: &mut Vec<u8>, tag: Asn1Tag, f: F)
where
    F: FnOnce(&mut Vec<u8>),
{
    let mut value_buf = Vec::new();

    f(&mut value_buf);

    buf.push(tag as u8);
    encode_length(buf, value_buf.len());
    buf.extend_from_slice(&value_buf);
}

pub fn encode_sequence_with<F>(buf: &mut Vec<u8>, f: F)
where
    F: FnOnce(&mut Vec<u8>),
{
    encode_container_with(buf, Asn1Tag::Sequence, f);
}
