use bytes::{Buf, BufMut};
use tracing::debug;

use crate::dns_header::Header;
use crate::error::Result;

/// A section of a DNS message that can be written to and read from the wire.
///
/// Sections are decoded one after another from the same cursor, so
/// `decode` must advance `src` past exactly the bytes it consumed.
pub trait MessageContent: Sized {
    fn encode<B: BufMut>(&self, dst: &mut B);

    fn decode<B: Buf>(src: &mut B) -> Result<Self>;

    fn to_vec(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        self.encode(&mut bytes);
        bytes
    }
}

impl MessageContent for Header {
    fn encode<B: BufMut>(&self, dst: &mut B) {
        Header::encode(self, dst)
    }

    fn decode<B: Buf>(src: &mut B) -> Result<Self> {
        Header::decode(src)
    }
}

/// Parse the header off the front of a whole DNS message
/// Returns the header and the undecoded sections that follow it
pub fn split_header(message: &[u8]) -> Result<(Header, &[u8])> {
    let mut rest = message;
    let header = Header::decode(&mut rest)?;

    debug!(
        id = header.id(),
        questions = header.question_entries(),
        answers = header.answer_entries(),
        authority = header.authority_records(),
        additional = header.additional_records(),
        remaining = rest.len(),
        "split DNS header from message"
    );

    Ok((header, rest))
}
