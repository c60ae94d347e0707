use crate::signaling::session_description::SdpType;
use std::{fmt, io};

/// Failures of the offer/answer exchange with the signaling endpoint.
#[derive(Debug)]
pub enum SignalingError {
    /// Connection, timeout or protocol failure below HTTP status handling.
    Http(reqwest::Error),
    /// The endpoint answered with a non-success status code.
    Status(u16),
    /// The response body is not a session description.
    Json(serde_json::Error),
    /// The endpoint returned a description that is not an answer.
    UnexpectedType(SdpType),
    /// The pinned CA could not be loaded.
    Tls(io::Error),
}

impl From<reqwest::Error> for SignalingError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for SignalingError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<io::Error> for SignalingError {
    fn from(e: io::Error) -> Self {
        Self::Tls(e)
    }
}

impl fmt::Display for SignalingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Status(code) => write!(f, "offer endpoint returned status {code}"),
            Self::Json(e) => write!(f, "invalid answer body: {e}"),
            Self::UnexpectedType(t) => write!(f, "expected an answer, got {t}"),
            Self::Tls(e) => write!(f, "TLS setup error: {e}"),
        }
    }
}

impl std::error::Error for SignalingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Tls(e) => Some(e),
            Self::Status(_) | Self::UnexpectedType(_) => None,
        }
    }
}
