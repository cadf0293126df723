use thiserror::Error;

pub mod decoder;
pub mod encoder;
pub mod oid;
pub mod value;

pub use oid::Oid;
pub use value::Value;

pub type BerResult<T> = Result<T, BerError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BerError {
    #[error("Bad length: slice shorter than the declared or required payload")]
    BadLength,

    #[error("Unsupported ASN.1 type tag: {0:02X}")]
    UnsupportedType(u8),

    #[error("Malformed OID: truncated continuation or arc overflow")]
    MalformedOid,

    #[error("Integer overflow: payload wider than the value type")]
    IntegerOverflow,

    #[error("PDU type inconsistent with the outer tag")]
    UnexpectedPdu,

    #[error("Unexpected ASN.1 tag: expected {expected:?}, got {got:?}")]
    UnexpectedTag { expected: Asn1Tag, got: Asn1Tag },

    #[error("Trailing data after parsing complete structure")]
    TrailingData,

    #[error("Invalid value for enum: {0}")]
    InvalidEnumValue(i64),
}

/// Sink for recoverable codec anomalies (non-ASCII IA5 bytes, identifiers
/// outside the supported table). Injected so tests can assert on diagnostics.
pub trait Diagnostics {
    fn warn(&self, message: &str);
}

/// Default sink: forwards to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "snmpwire::ber", "{message}");
    }
}

/// ┌─────────────────────────────────────────────┐
/// │  BER TAG BYTE                               │
/// ├─────────────────────────────────────────────┤
/// │  Bit Layout:  [CLASS][P/C][TAG NUMBER]      │
/// │               Bits 8-7  6   Bits 5-1        │
/// │                                             │
/// │  CLASS (bits 8-7):                          │
/// │    00 = Universal                           │
/// │    01 = Application                         │
/// │    10 = Context-specific                    │
/// │    11 = Private                             │
/// │                                             │
/// │  P/C (bit 6):                               │
/// │    0 = Primitive (simple value)             │
/// │    1 = Constructed (has children)           │
/// └─────────────────────────────────────────────┘
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Asn1Tag {
    // --- Universal tags
    EndOfContent = 0x00,
    Integer = 0x02,
    BitString = 0x03,
    OctetString = 0x04,
    Null = 0x05,
    ObjectIdentifier = 0x06,
    IA5String = 0x16,
    Sequence = 0x30,

    // --- Application tags (SNMP) ---
    IpAddress = 0x40, // [APPLICATION 0]
    Counter32 = 0x41, // [APPLICATION 1]
    Gauge32 = 0x42,   // [APPLICATION 2]
    TimeTicks = 0x43, // [APPLICATION 3]
    Counter64 = 0x46, // [APPLICATION 6]

    // --- Context-specific tags (SNMP PDUs) ---
    GetRequest = 0xA0,     // [CONTEXT 0]
    GetNextRequest = 0xA1, // [CONTEXT 1]
    GetResponse = 0xA2,    // [CONTEXT 2]
    Report = 0xA8,         // [CONTEXT 8]

    // exception types
    NoSuchObject = 0x80,
    EndOfMibView = 0x82,
}

impl Asn1Tag {
    pub fn from_u8(tag_byte: u8) -> BerResult<Self> {
        match tag_byte {
            // Universal
            0x00 => Ok(Asn1Tag::EndOfContent),
            0x02 => Ok(Asn1Tag::Integer),
            0x03 => Ok(Asn1Tag::BitString),
            0x04 => Ok(Asn1Tag::OctetString),
            0x05 => Ok(Asn1Tag::Null),
            0x06 => Ok(Asn1Tag::ObjectIdentifier),
            0x16 => Ok(Asn1Tag::IA5String),
            // Some peers mis-emit SEQUENCE without the constructed bit; accept
            // 0x10 on decode, always emit 0x30.
            0x10 | 0x30 => Ok(Asn1Tag::Sequence),
            // Application
            0x40 => Ok(Asn1Tag::IpAddress),
            0x41 => Ok(Asn1Tag::Counter32),
            0x42 => Ok(Asn1Tag::Gauge32),
            0x43 => Ok(Asn1Tag::TimeTicks),
            0x46 => Ok(Asn1Tag::Counter64),
            // Context-specific (PDUs)
            0xA0 => Ok(Asn1Tag::GetRequest),
            0xA1 => Ok(Asn1Tag::GetNextRequest),
            0xA2 => Ok(Asn1Tag::GetResponse),
            0xA8 => Ok(Asn1Tag::Report),
            0x80 => Ok(Asn1Tag::NoSuchObject),
            0x82 => Ok(Asn1Tag::EndOfMibView),
            // Anything else is unsupported
            other => Err(BerError::UnsupportedType(other)),
        }
    }
}

/// One parsed TLV. `header_len` is the tag byte plus the length field (2 for
/// short form, 2 + k for long form), so `header_len + value_len` is the number
/// of input bytes this element occupies.
#[derive(Debug, PartialEq, Eq)]
pub struct BerObject<'a> {
    pub tag: Asn1Tag,
    pub header_len: usize,
    pub value_len: usize,
    pub value: &'a [u8],
}

pub fn parse_ber_object(input: &[u8]) -> BerResult<(BerObject<'_>, &[u8])> {
    let (tag, after_tag) = parse_tag(input)?;
    let (value_len, after_length) = parse_length(after_tag)?;

    let header_len = (after_length.as_ptr() as usize) - (input.as_ptr() as usize);

    // The declared length is checked against the slice before anything is
    // allocated from it.
    if after_length.len() < value_len {
        return Err(BerError::BadLength);
    }

    let (value, rest) = after_length.split_at(value_len);

    let object = BerObject {
        tag,
        header_len,
        value_len,
        value,
    };

    Ok((object, rest))
}

/// Rejects an element that did not arrive under the identifier a structural
/// parser requires at this position.
pub fn expect_tag(obj: &BerObject<'_>, expected: Asn1Tag) -> BerResult<()> {
    if obj.tag != expected {
        return Err(BerError::UnexpectedTag {
            expected,
            got: obj.tag,
        });
    }
    Ok(())
}

fn parse_tag(input: &[u8]) -> BerResult<(Asn1Tag, &[u8])> {
    let tag_byte = input.first().ok_or(BerError::BadLength)?;
    let tag = Asn1Tag::from_u8(*tag_byte)?;
    Ok((tag, &input[1..]))
}

pub fn parse_length(input: &[u8]) -> BerResult<(usize, &[u8])> {
    let len_byte = input.first().ok_or(BerError::BadLength)?;

    match *len_byte {
        // -- Short form: the byte is the length
        0x00..=0x7F => {
            let value_len = *len_byte as usize;
            Ok((value_len, &input[1..]))
        }
        // -- Long form: 0x80|k followed by k big-endian length octets
        0x81..=0xFE => {
            let num_len_bytes = (len_byte & 0x7F) as usize;

            if input.len() < 1 + num_len_bytes {
                return Err(BerError::BadLength);
            }

            let len_bytes = &input[1..][..num_len_bytes];
            let rest = &input[(1 + num_len_bytes)..];

            // Up to 126 length octets must decode; once leading zeros are
            // stripped, anything wider than usize cannot name a length that
            // fits in a datagram.
            let mut significant = len_bytes;
            while let Some((&0x00, tail)) = significant.split_first() {
                significant = tail;
            }
            if significant.len() > size_of::<usize>() {
                return Err(BerError::BadLength);
            }

            let mut value_len = 0usize;
            for byte in significant {
                value_len = (value_len << 8) | (*byte as usize);
            }
            Ok((value_len, rest))
        }
        // Indefinite form (0x80) and k = 127 (0xFF) are not BER lengths.
        0x80 => Err(BerError::BadLength),
        0xFF => Err(BerError::BadLength),
    }
}
