use std::fmt;
use std::num::ParseIntError;

/// Failure to read one SDP line into its typed form.
#[derive(Debug)]
pub enum SdpError {
    Missing(&'static str),
    Invalid(&'static str),
    ParseInt(ParseIntError),
}

impl From<ParseIntError> for SdpError {
    fn from(e: ParseIntError) -> Self {
        Self::ParseInt(e)
    }
}

impl fmt::Display for SdpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(what) => write!(f, "Missing field: {what}"),
            Self::Invalid(what) => write!(f, "Invalid field: {what}"),
            Self::ParseInt(e) => write!(f, "Parse int error: {e}"),
        }
    }
}

impl std::error::Error for SdpError {}
