use std::fmt;

use crate::error::{CodeField, HeaderError, Result};

/// Kind of query carried in the OPCODE nibble of the flag word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Opcode {
    #[default]
    Query = 0,  // Standard query
    IQuery = 1, // Inverse query
    Status = 2, // Server status request
}

impl Opcode {
    pub const ALL: [Opcode; 3] = [Opcode::Query, Opcode::IQuery, Opcode::Status];

    /// Look up the opcode for a wire code.
    /// Codes 3-15 are reserved and rejected rather than mapped to a default.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Opcode::Query),
            1 => Ok(Opcode::IQuery),
            2 => Ok(Opcode::Status),
            _ => Err(HeaderError::InvalidCode {
                field: CodeField::Opcode,
                code,
            }),
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::Query => "QUERY",
            Opcode::IQuery => "IQUERY",
            Opcode::Status => "STATUS",
        };
        f.write_str(name)
    }
}

/// Outcome of a query, carried in the RCODE nibble of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseCode {
    #[default]
    NoError = 0,
    FormatError = 1,
    ServerFailure = 2,
    NameError = 3,
    NotImplemented = 4,
    Refused = 5,
}

impl ResponseCode {
    pub const ALL: [ResponseCode; 6] = [
        ResponseCode::NoError,
        ResponseCode::FormatError,
        ResponseCode::ServerFailure,
        ResponseCode::NameError,
        ResponseCode::NotImplemented,
        ResponseCode::Refused,
    ];

    /// Look up the response code for a wire code.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(ResponseCode::NoError),
            1 => Ok(ResponseCode::FormatError),
            2 => Ok(ResponseCode::ServerFailure),
            3 => Ok(ResponseCode::NameError),
            4 => Ok(ResponseCode::NotImplemented),
            5 => Ok(ResponseCode::Refused),
            _ => Err(HeaderError::InvalidCode {
                field: CodeField::ResponseCode,
                code,
            }),
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseCode::NoError => "NO_ERROR",
            ResponseCode::FormatError => "FORMAT_ERROR",
            ResponseCode::ServerFailure => "SERVER_FAILURE",
            ResponseCode::NameError => "NAME_ERROR",
            ResponseCode::NotImplemented => "NOT_IMPLEMENTED",
            ResponseCode::Refused => "REFUSED",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_opcode_codes_map_back() {
        for opcode in Opcode::ALL {
            assert_eq!(Opcode::from_code(opcode.code()), Ok(opcode));
        }
        let codes: HashSet<u8> = Opcode::ALL.iter().map(|o| o.code()).collect();
        assert_eq!(codes.len(), Opcode::ALL.len());
    }

    #[test]
    fn test_response_code_codes_map_back() {
        for rcode in ResponseCode::ALL {
            assert_eq!(ResponseCode::from_code(rcode.code()), Ok(rcode));
        }
        let codes: HashSet<u8> = ResponseCode::ALL.iter().map(|r| r.code()).collect();
        assert_eq!(codes.len(), ResponseCode::ALL.len());
    }

    #[test]
    fn test_reserved_opcodes_rejected() {
        for code in 3..=15u8 {
            assert_eq!(
                Opcode::from_code(code),
                Err(HeaderError::InvalidCode {
                    field: CodeField::Opcode,
                    code
                })
            );
        }
    }

    #[test]
    fn test_unknown_response_codes_rejected() {
        for code in 6..=15u8 {
            let err = ResponseCode::from_code(code).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("no response code for code {} exists", code)
            );
        }
    }

    #[test]
    fn test_mnemonics() {
        assert_eq!(Opcode::IQuery.to_string(), "IQUERY");
        assert_eq!(ResponseCode::NotImplemented.to_string(), "NOT_IMPLEMENTED");
    }
}
