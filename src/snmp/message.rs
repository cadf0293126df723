use crate::{
    ber::{encoder, expect_tag, parse_ber_object, Asn1Tag, BerError, BerResult},
    snmp::pdu::{parse_i32_field, parse_pdu, Pdu},
};

/// A community-based SNMP message: version 0 is v1, version 1 is v2c.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnmpMessage {
    pub version: i32,
    pub community: Vec<u8>,
    pub pdu: Pdu,
}

/// One complete datagram: a SEQUENCE holding version, community and the PDU,
/// with nothing before or after it.
pub fn parse_message(input: &[u8]) -> BerResult<SnmpMessage> {
    let (envelope, trailing) = parse_ber_object(input)?;
    expect_tag(&envelope, Asn1Tag::Sequence)?;
    if !trailing.is_empty() {
        return Err(BerError::TrailingData);
    }

    let (version, body) = parse_i32_field(envelope.value)?;
    let (community, body) = parse_community_field(body)?;

    let (pdu_obj, body) = parse_ber_object(body)?;
    let pdu = parse_pdu(pdu_obj)?;

    if !body.is_empty() {
        return Err(BerError::TrailingData);
    }

    Ok(SnmpMessage {
        version,
        community,
        pdu,
    })
}

fn parse_community_field(input: &[u8]) -> BerResult<(Vec<u8>, &[u8])> {
    let (obj, rest) = parse_ber_object(input)?;
    expect_tag(&obj, Asn1Tag::OctetString)?;
    Ok((obj.value.to_vec(), rest))
}

impl SnmpMessage {
    pub fn write_to_buf(&self, buf: &mut Vec<u8>) {
        encoder::encode_sequence_with(buf, |content_buf| {
            encoder::encode_integer(content_buf, i64::from(self.version));
            encoder::encode_octet_string(content_buf, &self.community);
            self.pdu.write_to_buf(content_buf);
        });
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_to_buf(&mut buf);
        buf
    }
}
