//! Integration tests for the DNS header codec.

use bytes::Buf;
use dns_header_codec::{
    split_header, CodeField, Header, HeaderError, MessageContent, Opcode, ResponseCode,
    ResponseFields, HEADER_LEN,
};

/// Decode consumes exactly the header from a longer stream.
#[test]
fn test_decode_advances_past_header_only() {
    let mut message = Header::query(0xABCD).question_entries(2).build().to_vec();
    message.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

    let mut src = &message[..];
    let header = Header::decode(&mut src).unwrap();

    assert_eq!(header.id(), 0xABCD);
    assert_eq!(header.question_entries(), 2);
    assert_eq!(src.remaining(), 4);
    assert_eq!(src.get_u32(), 0xDEAD_BEEF);
}

/// A captured response header decodes every field, including the response-only ones.
#[test]
fn test_decode_captured_response() {
    // id 0x1234, QR RD RA, NXDOMAIN, 1 question, 0 answers, 1 authority, 1 additional
    let bytes = [0x12, 0x34, 0x81, 0x83, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01];

    let header = Header::from_bytes(&bytes).unwrap();

    assert_eq!(header.id(), 0x1234);
    assert!(!header.is_request());
    assert_eq!(header.opcode(), Opcode::Query);
    assert!(header.is_recursion_desired());
    assert_eq!(
        header.response_fields(),
        ResponseFields {
            authoritative_answer: false,
            truncated: false,
            recursion_available: true,
            response_code: ResponseCode::NameError,
        }
    );
    assert_eq!(header.question_entries(), 1);
    assert_eq!(header.answer_entries(), 0);
    assert_eq!(header.authority_records(), 1);
    assert_eq!(header.additional_records(), 1);
}

/// Re-encoding a decoded response emits only the request-side flags.
#[test]
fn test_reencode_decoded_response() {
    let bytes = [0x12, 0x34, 0x85, 0x83, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04];

    let header = Header::from_bytes(&bytes).unwrap();
    assert!(header.is_authoritative_answer());

    let reencoded = header.to_bytes();
    assert_eq!(reencoded.len(), HEADER_LEN);
    assert_eq!(&reencoded[..2], &bytes[..2]);
    assert_eq!(&reencoded[2..4], &[0x81, 0x00]);
    assert_eq!(&reencoded[4..], &bytes[4..]);
}

#[test]
fn test_every_opcode_roundtrips() {
    for opcode in Opcode::ALL {
        let header = Header::builder().id(9).request(true).opcode(opcode).build();
        let decoded = Header::from_bytes(&header.to_bytes()).unwrap();

        assert_eq!(decoded, header);
    }
}

#[test]
fn test_opcode_nibble_fifteen_rejected() {
    let bytes = [0x00, 0x01, 0x78, 0x00, 0, 0, 0, 0, 0, 0, 0, 0];

    let err = split_header(&bytes).unwrap_err();
    assert_eq!(
        err,
        HeaderError::InvalidCode {
            field: CodeField::Opcode,
            code: 15
        }
    );
    assert_eq!(err.to_string(), "no opcode for code 15 exists");
}

#[test]
fn test_empty_input_truncated() {
    assert_eq!(
        Header::from_bytes(&[]),
        Err(HeaderError::TruncatedInput { have: 0, need: 12 })
    );
}
