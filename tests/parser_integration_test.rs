use snmpwire::ber::{Asn1Tag, BerError, Oid, Value};
use snmpwire::snmp::message::parse_message;
use snmpwire::snmp::pdu::{ErrorStatus, PduType};

const RAW_PACKET: &[u8] = &[
    0x30, 0x29, 0x02, 0x01, 0x01, 0x04, 0x06, 0x70, 0x75, 0x62, 0x6c, 0x69, 0x63, 0xa0, 0x1c, 0x02,
    0x04, 0x00, 0x00, 0x00, 0x01, 0x02, 0x01, 0x00, 0x02, 0x01, 0x00, 0x30, 0x0e, 0x30, 0x0c, 0x06,
    0x08, 0x2b, 0x06, 0x01, 0x02, 0x01, 0x01, 0x01, 0x00, 0x05, 0x00,
];

fn sys_descr_oid() -> Oid {
    Oid::new(vec![1, 3, 6, 1, 2, 1, 1, 1, 0]).unwrap()
}

#[test]
fn test_parse_v2c_get_request() {
    let message = parse_message(RAW_PACKET).unwrap();

    assert_eq!(message.version, 1);
    assert_eq!(message.community, b"public");

    let pdu = message.pdu;
    assert_eq!(pdu.pdu_type, PduType::GetRequest);
    assert_eq!(pdu.request_id, 1);
    assert_eq!(pdu.error_status, ErrorStatus::NoError);
    assert_eq!(pdu.error_index, 0);

    assert_eq!(pdu.varbinds.len(), 1);

    let varbind = &pdu.varbinds[0];
    assert_eq!(varbind.oid, sys_descr_oid());
    assert_eq!(varbind.value, Value::Null);
}

const RAW_PACKET_RESPONSE: &[u8] = &[
    0x30, 0x42, 0x02, 0x01, 0x01, 0x04, 0x06, 0x70, 0x75, 0x62, 0x6c, 0x69, 0x63, 0xa2, 0x35, 0x02,
    0x04, 0x00, 0x00, 0x00, 0x01, 0x02, 0x01, 0x00, 0x02, 0x01, 0x00, 0x30, 0x27, 0x30, 0x25, 0x06,
    0x08, 0x2b, 0x06, 0x01, 0x02, 0x01, 0x01, 0x01, 0x00, 0x04, 0x19, 0x53, 0x61, 0x6d, 0x70, 0x6c,
    0x65, 0x20, 0x73, 0x79, 0x73, 0x74, 0x65, 0x6d, 0x20, 0x64, 0x65, 0x73, 0x63, 0x72, 0x69, 0x70,
    0x74, 0x69, 0x6f, 0x6e,
];

#[test]
fn test_parse_v2c_get_response() {
    let message = parse_message(RAW_PACKET_RESPONSE).unwrap();

    assert_eq!(message.version, 1);
    assert_eq!(message.community, b"public");

    let pdu = message.pdu;
    assert_eq!(pdu.pdu_type, PduType::GetResponse);
    assert_eq!(pdu.request_id, 1);
    assert_eq!(pdu.error_status, ErrorStatus::NoError);
    assert_eq!(pdu.error_index, 0);

    assert_eq!(pdu.varbinds.len(), 1);

    let varbind = &pdu.varbinds[0];
    assert_eq!(varbind.oid, sys_descr_oid());

    let expected_value = b"Sample system description";
    match &varbind.value {
        Value::OctetString(val) => {
            assert_eq!(val, expected_value);
        }
        _ => panic!("Expected OctetString, got {:?}", varbind.value),
    }
}

#[test]
fn test_message_reencode_round_trip() {
    // The captured packet pads the request-id to four bytes, so re-encoding is
    // not byte-identical; parse equality is the contract.
    let message = parse_message(RAW_PACKET_RESPONSE).unwrap();
    let reencoded = message.to_bytes();
    let reparsed = parse_message(&reencoded).unwrap();
    assert_eq!(reparsed, message);
}

#[test]
fn test_version_field_must_be_an_integer() {
    // an OCTET STRING where the version INTEGER belongs
    let packet = [0x30, 0x03, 0x04, 0x01, 0x00];
    assert_eq!(
        parse_message(&packet).unwrap_err(),
        BerError::UnexpectedTag {
            expected: Asn1Tag::Integer,
            got: Asn1Tag::OctetString,
        }
    );
}

#[test]
fn test_community_field_must_be_an_octet_string() {
    // version parses, then an INTEGER where the community belongs
    let packet = [0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x07];
    assert_eq!(
        parse_message(&packet).unwrap_err(),
        BerError::UnexpectedTag {
            expected: Asn1Tag::OctetString,
            got: Asn1Tag::Integer,
        }
    );
}

#[test]
fn test_trailing_bytes_after_message_are_rejected() {
    let mut packet = RAW_PACKET.to_vec();
    packet.push(0x00);
    assert!(parse_message(&packet).is_err());
}

#[test]
fn test_whole_packet_decodes_as_a_value_tree() {
    // The same datagram through the generic codec: a three-element sequence
    // whose last child carries the PDU.
    let (value, consumed) = Value::decode(RAW_PACKET).unwrap();
    assert_eq!(consumed, RAW_PACKET.len());

    let children = match value {
        Value::Sequence(children) => children,
        other => panic!("expected a Sequence, got {other:?}"),
    };
    assert_eq!(children.len(), 3);
    assert_eq!(children[0], Value::Integer(1));
    assert_eq!(children[1], Value::OctetString(b"public".to_vec()));
    match &children[2] {
        Value::GetRequest(pdu) => assert_eq!(pdu.request_id, 1),
        other => panic!("expected a GetRequest, got {other:?}"),
    }
}
