use crate::ber::decoder::{decode_integer, decode_unsigned_integer, decode_unsigned_integer64};
use crate::ber::oid::{decode_oid, Oid};
use crate::ber::{
    encoder, parse_ber_object, Asn1Tag, BerError, BerObject, BerResult, Diagnostics,
    TracingDiagnostics,
};
use crate::snmp::pdu::{parse_pdu, Pdu, PduType};

/// Every ASN.1 value that can appear in an SNMP v1/v2c/v3 datagram, one
/// variant per identifier octet. Decoded payloads are owned: the input buffer
/// can be dropped as soon as decode returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    EndOfContent,
    Integer(i64),
    BitString(Vec<u8>),
    OctetString(Vec<u8>),
    Null,
    Oid(Oid),
    IA5String(String),
    Sequence(Vec<Value>),
    IpAddress([u8; 4]),
    Counter32(u32),
    Gauge32(u32),
    TimeTicks(u32),
    Counter64(u64),
    NoSuchObject,
    EndOfMibView,
    GetRequest(Pdu),
    GetNextRequest(Pdu),
    GetResponse(Pdu),
    Report(Pdu),
}

impl Value {
    /// Decodes one TLV from the front of `input` and returns it together with
    /// the number of bytes consumed. Trailing bytes are left to the caller.
    pub fn decode(input: &[u8]) -> BerResult<(Value, usize)> {
        Self::decode_with(input, &TracingDiagnostics)
    }

    pub fn decode_with(input: &[u8], diag: &dyn Diagnostics) -> BerResult<(Value, usize)> {
        let (obj, _rest) = parse_ber_object(input).inspect_err(|err| {
            if let BerError::UnsupportedType(tag) = err {
                diag.warn(&format!("unsupported identifier 0x{tag:02X}"));
            }
        })?;

        let consumed = obj.header_len + obj.value_len;
        let value = Self::from_ber(obj, diag)?;
        Ok((value, consumed))
    }

    fn from_ber(obj: BerObject<'_>, diag: &dyn Diagnostics) -> BerResult<Value> {
        match obj.tag {
            Asn1Tag::EndOfContent => {
                require_empty(&obj)?;
                Ok(Value::EndOfContent)
            }
            Asn1Tag::Integer => {
                let val = decode_integer(obj.value)?;
                Ok(Value::Integer(val))
            }
            Asn1Tag::BitString => {
                // TODO: honor the leading unused-bit-count octet instead of
                // treating the body as opaque bytes.
                Ok(Value::BitString(obj.value.to_vec()))
            }
            Asn1Tag::OctetString => Ok(Value::OctetString(obj.value.to_vec())),
            Asn1Tag::Null => {
                require_empty(&obj)?;
                Ok(Value::Null)
            }
            Asn1Tag::ObjectIdentifier => {
                let oid = decode_oid(obj.value)?;
                Ok(Value::Oid(oid))
            }
            Asn1Tag::IA5String => {
                // IA5 is nominally ASCII, but peers routinely put UTF-8 in
                // these strings. Accept it and say so.
                if !obj.value.is_ascii() {
                    diag.warn("non-ASCII byte in IA5String");
                }
                let text = String::from_utf8_lossy(obj.value).into_owned();
                Ok(Value::IA5String(text))
            }
            Asn1Tag::Sequence => {
                let mut children = Vec::new();
                let mut body = obj.value;
                while !body.is_empty() {
                    let (child, used) = Value::decode_with(body, diag)?;
                    children.push(child);
                    body = &body[used..];
                }
                Ok(Value::Sequence(children))
            }
            Asn1Tag::IpAddress => {
                // Exactly four octets behind a short-form header.
                if obj.header_len != 2 || obj.value_len != 4 {
                    return Err(BerError::BadLength);
                }
                let mut octets = [0u8; 4];
                octets.copy_from_slice(obj.value);
                Ok(Value::IpAddress(octets))
            }
            Asn1Tag::Counter32 => Ok(Value::Counter32(decode_unsigned_integer(obj.value)?)),
            Asn1Tag::Gauge32 => Ok(Value::Gauge32(decode_unsigned_integer(obj.value)?)),
            Asn1Tag::TimeTicks => Ok(Value::TimeTicks(decode_unsigned_integer(obj.value)?)),
            Asn1Tag::Counter64 => Ok(Value::Counter64(decode_unsigned_integer64(obj.value)?)),
            Asn1Tag::NoSuchObject => {
                require_empty(&obj)?;
                Ok(Value::NoSuchObject)
            }
            Asn1Tag::EndOfMibView => {
                require_empty(&obj)?;
                Ok(Value::EndOfMibView)
            }
            Asn1Tag::GetRequest
            | Asn1Tag::GetNextRequest
            | Asn1Tag::GetResponse
            | Asn1Tag::Report => {
                let outer = obj.tag;
                let pdu = parse_pdu(obj)?;
                Value::from_pdu(outer, pdu)
            }
        }
    }

    /// Wraps a decoded PDU in the variant its own type selects, after
    /// checking that type against the identifier the TLV arrived under. The
    /// PDU codec is a separate collaborator, so the two can disagree; a
    /// disagreement is `UnexpectedPdu`.
    pub fn from_pdu(outer: Asn1Tag, pdu: Pdu) -> BerResult<Value> {
        if pdu.pdu_type.tag() != outer {
            return Err(BerError::UnexpectedPdu);
        }
        Ok(match pdu.pdu_type {
            PduType::GetRequest => Value::GetRequest(pdu),
            PduType::GetNextRequest => Value::GetNextRequest(pdu),
            PduType::GetResponse => Value::GetResponse(pdu),
            PduType::Report => Value::Report(pdu),
        })
    }

    pub fn write_to_buf(&self, buf: &mut Vec<u8>) {
        self.write_to_buf_with(buf, &TracingDiagnostics);
    }

    pub fn write_to_buf_with(&self, buf: &mut Vec<u8>, diag: &dyn Diagnostics) {
        match self {
            Value::EndOfContent => encoder::encode_empty(buf, Asn1Tag::EndOfContent),
            Value::Integer(val) => encoder::encode_integer(buf, *val),
            Value::BitString(val) => encoder::encode_bit_string(buf, val),
            Value::OctetString(val) => encoder::encode_octet_string(buf, val),
            Value::Null => encoder::encode_null(buf),
            Value::Oid(oid) => encoder::encode_oid(buf, oid),
            Value::IA5String(text) => {
                if !text.is_ascii() {
                    diag.warn("non-ASCII byte in IA5String");
                }
                encoder::encode_ia5_string(buf, text);
            }
            Value::Sequence(children) => {
                encoder::encode_sequence_with(buf, |body| {
                    for child in children {
                        child.write_to_buf_with(body, diag);
                    }
                });
            }
            Value::IpAddress(octets) => encoder::encode_ip_address(buf, *octets),
            Value::Counter32(val) => encoder::encode_counter32(buf, *val),
            Value::Gauge32(val) => encoder::encode_gauge32(buf, *val),
            Value::TimeTicks(val) => encoder::encode_timeticks(buf, *val),
            Value::Counter64(val) => encoder::encode_counter64(buf, *val),
            Value::NoSuchObject => encoder::encode_empty(buf, Asn1Tag::NoSuchObject),
            Value::EndOfMibView => encoder::encode_empty(buf, Asn1Tag::EndOfMibView),
            // The PDU encoder produces the whole TLV, context tag included.
            Value::GetRequest(pdu)
            | Value::GetNextRequest(pdu)
            | Value::GetResponse(pdu)
            | Value::Report(pdu) => pdu.write_to_buf(buf),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_to_buf(&mut buf);
        buf
    }
}

fn require_empty(obj: &BerObject<'_>) -> BerResult<()> {
    if obj.value_len != 0 {
        return Err(BerError::BadLength);
    }
    Ok(())
}
