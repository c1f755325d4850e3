//! Encoding and decoding of the fixed 12-byte DNS message header.

pub mod dns_codes;
pub mod dns_header;
pub mod dns_message;
pub mod error;

pub use dns_codes::{Opcode, ResponseCode};
pub use dns_header::{Flags, Header, HeaderBuilder, ResponseFields, HEADER_LEN};
pub use dns_message::{split_header, MessageContent};
pub use error::{CodeField, HeaderError, Result};
