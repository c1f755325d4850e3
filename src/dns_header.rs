use std::fmt;

use bytes::{Buf, BufMut};
use tracing::{debug, trace};

use crate::dns_codes::{Opcode, ResponseCode};
use crate::error::{HeaderError, Result};

/// Size of the encoded header in bytes.
pub const HEADER_LEN: usize = 12;

/// Bit positions and masks of the flag word (bit 15 = most significant).
pub mod flag_bits {
    pub const QR: u16 = 1 << 15;
    pub const OPCODE_SHIFT: u16 = 11;
    pub const OPCODE_MASK: u16 = 0xF;
    pub const AA: u16 = 1 << 10;
    pub const TC: u16 = 1 << 9;
    pub const RD: u16 = 1 << 8;
    pub const RA: u16 = 1 << 7;
    /// Reserved Z bits. Never read into a Header, never written.
    pub const Z_MASK: u16 = 0b111 << 4;
    pub const RCODE_MASK: u16 = 0xF;
}

/// Unpacked form of the 16-bit flag word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub qr: bool,            // Query/Response (false = query, true = response)
    pub opcode: Opcode,      // Kind of query
    pub aa: bool,            // Authoritative Answer
    pub tc: bool,            // Truncation
    pub rd: bool,            // Recursion Desired
    pub ra: bool,            // Recursion Available
    pub rcode: ResponseCode, // Response code
}

impl Flags {
    /// The subset of a header's flags that goes on the wire when encoding.
    /// AA, TC, RA and RCODE describe a received response and are always
    /// emitted as zero.
    pub fn outgoing(header: &Header) -> Self {
        Flags {
            qr: !header.request,
            opcode: header.opcode,
            aa: false,
            tc: false,
            rd: header.recursion_desired,
            ra: false,
            rcode: ResponseCode::NoError,
        }
    }

    pub fn to_u16(&self) -> u16 {
        use flag_bits::*;

        let mut flags: u16 = 0;

        if self.qr {
            flags |= QR;
        }
        flags |= (self.opcode.code() as u16 & OPCODE_MASK) << OPCODE_SHIFT;
        if self.aa {
            flags |= AA;
        }
        if self.tc {
            flags |= TC;
        }
        if self.rd {
            flags |= RD;
        }
        if self.ra {
            flags |= RA;
        }
        flags |= self.rcode.code() as u16 & RCODE_MASK;

        flags
    }

    /// Unpack a flag word, rejecting unknown opcode or response codes.
    /// The Z bits are ignored.
    pub fn from_u16(flags: u16) -> Result<Self> {
        use flag_bits::*;

        Ok(Flags {
            qr: flags & QR != 0,
            opcode: Opcode::from_code(((flags >> OPCODE_SHIFT) & OPCODE_MASK) as u8)?,
            aa: flags & AA != 0,
            tc: flags & TC != 0,
            rd: flags & RD != 0,
            ra: flags & RA != 0,
            rcode: ResponseCode::from_code((flags & RCODE_MASK) as u8)?,
        })
    }
}

/// Fields that only describe a received response.
///
/// They are recovered on decode but never encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResponseFields {
    pub authoritative_answer: bool,
    pub truncated: bool,
    pub recursion_available: bool,
    pub response_code: ResponseCode,
}

/// A DNS message header.
///
/// Immutable once built: construct one with [`HeaderBuilder`] for an
/// outgoing message, or obtain one from [`Header::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    id: u16,
    request: bool,
    opcode: Opcode,
    authoritative_answer: bool,
    truncated: bool,
    recursion_desired: bool,
    recursion_available: bool,
    response_code: ResponseCode,
    question_entries: u16,
    answer_entries: u16,
    authority_records: u16,
    additional_records: u16,
}

impl Header {
    pub fn builder() -> HeaderBuilder {
        HeaderBuilder::default()
    }

    /// Start a standard recursive query with the given transaction id.
    pub fn query(id: u16) -> HeaderBuilder {
        HeaderBuilder::default()
            .id(id)
            .request(true)
            .opcode(Opcode::Query)
            .recursion_desired(true)
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn is_request(&self) -> bool {
        self.request
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn is_authoritative_answer(&self) -> bool {
        self.authoritative_answer
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn is_recursion_desired(&self) -> bool {
        self.recursion_desired
    }

    pub fn is_recursion_available(&self) -> bool {
        self.recursion_available
    }

    pub fn response_code(&self) -> ResponseCode {
        self.response_code
    }

    pub fn question_entries(&self) -> u16 {
        self.question_entries
    }

    pub fn answer_entries(&self) -> u16 {
        self.answer_entries
    }

    pub fn authority_records(&self) -> u16 {
        self.authority_records
    }

    pub fn additional_records(&self) -> u16 {
        self.additional_records
    }

    pub fn response_fields(&self) -> ResponseFields {
        ResponseFields {
            authoritative_answer: self.authoritative_answer,
            truncated: self.truncated,
            recursion_available: self.recursion_available,
            response_code: self.response_code,
        }
    }

    /// Write the 12-byte header into `dst`.
    ///
    /// Only the request-side flags are written, see [`Flags::outgoing`].
    ///
    /// # Panics
    ///
    /// Panics if `dst` has less than `HEADER_LEN` bytes of room.
    pub fn encode<B: BufMut>(&self, dst: &mut B) {
        dst.put_u16(self.id);
        dst.put_u16(Flags::outgoing(self).to_u16());
        dst.put_u16(self.question_entries);
        dst.put_u16(self.answer_entries);
        dst.put_u16(self.authority_records);
        dst.put_u16(self.additional_records);
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        self.encode(&mut &mut bytes[..]);
        bytes
    }

    /// Read a header from the front of `src`, advancing it by exactly
    /// `HEADER_LEN` bytes.
    ///
    /// A truncated source is left untouched. A header with an unknown
    /// opcode or response code has still been consumed when the error is
    /// returned.
    pub fn decode<B: Buf>(src: &mut B) -> Result<Self> {
        if src.remaining() < HEADER_LEN {
            debug!(have = src.remaining(), "truncated DNS header");
            return Err(HeaderError::TruncatedInput {
                have: src.remaining(),
                need: HEADER_LEN,
            });
        }

        let id = src.get_u16();
        let raw_flags = src.get_u16();
        let question_entries = src.get_u16();
        let answer_entries = src.get_u16();
        let authority_records = src.get_u16();
        let additional_records = src.get_u16();

        let flags = Flags::from_u16(raw_flags).map_err(|e| {
            debug!(id, flags = raw_flags, "rejecting DNS header: {}", e);
            e
        })?;

        let header = Header {
            id,
            request: !flags.qr,
            opcode: flags.opcode,
            authoritative_answer: flags.aa,
            truncated: flags.tc,
            recursion_desired: flags.rd,
            recursion_available: flags.ra,
            response_code: flags.rcode,
            question_entries,
            answer_entries,
            authority_records,
            additional_records,
        };
        trace!(%header, "decoded DNS header");

        Ok(header)
    }

    /// Decode a header from the start of a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut src = bytes;
        Self::decode(&mut src)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Header [id={}, request={}, opcode={}, authoritative_answer={}, truncated={}, \
             recursion_desired={}, recursion_available={}, response_code={}, \
             question_entries={}, answer_entries={}, authority_records={}, additional_records={}]",
            self.id,
            self.request,
            self.opcode,
            self.authoritative_answer,
            self.truncated,
            self.recursion_desired,
            self.recursion_available,
            self.response_code,
            self.question_entries,
            self.answer_entries,
            self.authority_records,
            self.additional_records,
        )
    }
}

/// Builds a [`Header`] field by field.
#[derive(Debug, Clone, Default)]
pub struct HeaderBuilder {
    header: Header,
}

impl HeaderBuilder {
    pub fn id(mut self, id: u16) -> Self {
        self.header.id = id;

        self
    }

    pub fn request(mut self, request: bool) -> Self {
        self.header.request = request;

        self
    }

    pub fn opcode(mut self, opcode: Opcode) -> Self {
        self.header.opcode = opcode;

        self
    }

    pub fn recursion_desired(mut self, recursion_desired: bool) -> Self {
        self.header.recursion_desired = recursion_desired;

        self
    }

    /// Set the fields of a received response. These are dropped by
    /// [`Header::encode`].
    pub fn response_fields(mut self, fields: ResponseFields) -> Self {
        self.header.authoritative_answer = fields.authoritative_answer;
        self.header.truncated = fields.truncated;
        self.header.recursion_available = fields.recursion_available;
        self.header.response_code = fields.response_code;

        self
    }

    pub fn question_entries(mut self, n: u16) -> Self {
        self.header.question_entries = n;

        self
    }

    pub fn answer_entries(mut self, n: u16) -> Self {
        self.header.answer_entries = n;

        self
    }

    pub fn authority_records(mut self, n: u16) -> Self {
        self.header.authority_records = n;

        self
    }

    pub fn additional_records(mut self, n: u16) -> Self {
        self.header.additional_records = n;

        self
    }

    /// Set all four section counts from section lengths, failing instead
    /// of truncating when a length does not fit in 16 bits.
    pub fn section_counts(
        self,
        questions: usize,
        answers: usize,
        authority: usize,
        additional: usize,
    ) -> Result<Self> {
        Ok(self
            .question_entries(count("question_entries", questions)?)
            .answer_entries(count("answer_entries", answers)?)
            .authority_records(count("authority_records", authority)?)
            .additional_records(count("additional_records", additional)?))
    }

    pub fn build(self) -> Header {
        self.header
    }
}

fn count(field: &'static str, value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| HeaderError::ValueOutOfRange { field, value })
}
