use std::fmt;

use thiserror::Error;

/// Which enumerated header field carried an unknown code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeField {
    Opcode,
    ResponseCode,
}

impl fmt::Display for CodeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeField::Opcode => f.write_str("opcode"),
            CodeField::ResponseCode => f.write_str("response code"),
        }
    }
}

/// Errors produced while building, encoding or decoding a DNS header.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// The 4-bit opcode or response code matches no known value.
    #[error("no {field} for code {code} exists")]
    InvalidCode { field: CodeField, code: u8 },

    /// Not enough bytes left in the source to hold a header.
    #[error("buffer too small for DNS header: have {have} bytes, need {need}")]
    TruncatedInput { have: usize, need: usize },

    /// A length does not fit the 16-bit field it is written into.
    #[error("{field} value {value} does not fit in 16 bits")]
    ValueOutOfRange { field: &'static str, value: usize },
}

pub type Result<T> = std::result::Result<T, HeaderError>;
