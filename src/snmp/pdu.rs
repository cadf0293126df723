use crate::ber::decoder::decode_integer;
use crate::ber::encoder;
use crate::ber::oid::decode_oid;
use crate::ber::value::Value;
use crate::ber::{expect_tag, parse_ber_object, Asn1Tag, BerError, BerObject, BerResult, Oid};

/// The PDU shapes this codec speaks. GetBulk, Set and the traps are not part
/// of the supported surface; their tags fall out as `UnsupportedType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PduType {
    GetRequest,
    GetNextRequest,
    GetResponse,
    Report,
}

impl PduType {
    pub fn tag(self) -> Asn1Tag {
        match self {
            PduType::GetRequest => Asn1Tag::GetRequest,
            PduType::GetNextRequest => Asn1Tag::GetNextRequest,
            PduType::GetResponse => Asn1Tag::GetResponse,
            PduType::Report => Asn1Tag::Report,
        }
    }

    pub fn from_tag(tag: Asn1Tag) -> BerResult<Self> {
        match tag {
            Asn1Tag::GetRequest => Ok(PduType::GetRequest),
            Asn1Tag::GetNextRequest => Ok(PduType::GetNextRequest),
            Asn1Tag::GetResponse => Ok(PduType::GetResponse),
            Asn1Tag::Report => Ok(PduType::Report),
            other => Err(BerError::UnsupportedType(other as u8)),
        }
    }
}

// https://datatracker.ietf.org/doc/html/rfc3416#section-3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorStatus {
    NoError = 0,
    TooBig = 1,
    NoSuchName = 2,
    BadValue = 3,
    ReadOnly = 4,
    GenErr = 5,
    NoAccess = 6,
    WrongType = 7,
    WrongLength = 8,
    WrongEncoding = 9,
    WrongValue = 10,
    NoCreation = 11,
    InconsistentValue = 12,
    ResourceUnavailable = 13,
    CommitFailed = 14,
    UndoFailed = 15,
    AuthorizationError = 16,
    NotWritable = 17,
    InconsistentName = 18,
}

impl TryFrom<i64> for ErrorStatus {
    type Error = BerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorStatus::NoError),
            1 => Ok(ErrorStatus::TooBig),
            2 => Ok(ErrorStatus::NoSuchName),
            3 => Ok(ErrorStatus::BadValue),
            4 => Ok(ErrorStatus::ReadOnly),
            5 => Ok(ErrorStatus::GenErr),
            6 => Ok(ErrorStatus::NoAccess),
            7 => Ok(ErrorStatus::WrongType),
            8 => Ok(ErrorStatus::WrongLength),
            9 => Ok(ErrorStatus::WrongEncoding),
            10 => Ok(ErrorStatus::WrongValue),
            11 => Ok(ErrorStatus::NoCreation),
            12 => Ok(ErrorStatus::InconsistentValue),
            13 => Ok(ErrorStatus::ResourceUnavailable),
            14 => Ok(ErrorStatus::CommitFailed),
            15 => Ok(ErrorStatus::UndoFailed),
            16 => Ok(ErrorStatus::AuthorizationError),
            17 => Ok(ErrorStatus::NotWritable),
            18 => Ok(ErrorStatus::InconsistentName),
            _ => Err(BerError::InvalidEnumValue(value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarBind {
    pub oid: Oid,
    pub value: Value,
}

impl VarBind {
    pub fn write_to_buf(&self, buf: &mut Vec<u8>) {
        encoder::encode_sequence_with(buf, |content_buf| {
            encoder::encode_oid(content_buf, &self.oid);
            self.value.write_to_buf(content_buf);
        });
    }
}

pub fn parse_varbind(obj: BerObject) -> BerResult<VarBind> {
    expect_tag(&obj, Asn1Tag::Sequence)?;

    let (oid_obj, after_oid) = parse_ber_object(obj.value)?;
    expect_tag(&oid_obj, Asn1Tag::ObjectIdentifier)?;
    let oid = decode_oid(oid_obj.value)?;

    let (value, used) = Value::decode(after_oid)?;
    if used != after_oid.len() {
        return Err(BerError::TrailingData);
    }

    Ok(VarBind { oid, value })
}

pub fn parse_varbind_list(obj: BerObject) -> BerResult<Vec<VarBind>> {
    expect_tag(&obj, Asn1Tag::Sequence)?;

    let mut varbinds = Vec::new();

    let mut current_slice = obj.value;
    while !current_slice.is_empty() {
        let (varbind_obj, rest) = parse_ber_object(current_slice)?;
        varbinds.push(parse_varbind(varbind_obj)?);
        current_slice = rest;
    }

    Ok(varbinds)
}

/// One request/response PDU:
/// request-id, error-status, error-index, then the varbind list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdu {
    pub pdu_type: PduType,
    pub request_id: i32,
    pub error_status: ErrorStatus,
    pub error_index: i32,
    pub varbinds: Vec<VarBind>,
}

impl Pdu {
    pub fn write_to_buf(&self, buf: &mut Vec<u8>) {
        encoder::encode_container_with(buf, self.pdu_type.tag(), |content_buf| {
            encoder::encode_integer(content_buf, i64::from(self.request_id));
            encoder::encode_integer(content_buf, i64::from(self.error_status as i32));
            encoder::encode_integer(content_buf, i64::from(self.error_index));
            encoder::encode_sequence_with(content_buf, |varbind_list_buf| {
                for varbind in &self.varbinds {
                    varbind.write_to_buf(varbind_list_buf);
                }
            });
        });
    }
}

pub fn parse_pdu(obj: BerObject) -> BerResult<Pdu> {
    let pdu_type = PduType::from_tag(obj.tag)?;

    let (request_id, rest) = parse_i32_field(obj.value)?;

    let (status_raw, rest) = parse_i64_field(rest)?;
    let error_status = ErrorStatus::try_from(status_raw)?;

    let (error_index, rest) = parse_i32_field(rest)?;

    let (varbind_list_obj, rest) = parse_ber_object(rest)?;
    let varbinds = parse_varbind_list(varbind_list_obj)?;

    if !rest.is_empty() {
        return Err(BerError::TrailingData);
    }

    Ok(Pdu {
        pdu_type,
        request_id,
        error_status,
        error_index,
        varbinds,
    })
}

pub(crate) fn parse_i64_field(input: &[u8]) -> BerResult<(i64, &[u8])> {
    let (obj, rest) = parse_ber_object(input)?;
    expect_tag(&obj, Asn1Tag::Integer)?;
    Ok((decode_integer(obj.value)?, rest))
}

/// An INTEGER field that is Integer32 on the wire (request-id, error-index,
/// message version).
pub(crate) fn parse_i32_field(input: &[u8]) -> BerResult<(i32, &[u8])> {
    let (value, rest) = parse_i64_field(input)?;
    let value = i32::try_from(value).map_err(|_| BerError::IntegerOverflow)?;
    Ok((value, rest))
}
