use serde::{Deserialize, Serialize};
use std::fmt;

/// `type` member of a session description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpType {
    Offer,
    Pranswer,
    Answer,
    Rollback,
}

impl fmt::Display for SdpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Offer => "offer",
            Self::Pranswer => "pranswer",
            Self::Answer => "answer",
            Self::Rollback => "rollback",
        })
    }
}

/// The `{ "sdp": ..., "type": ... }` envelope posted to and returned by `/offer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    pub sdp: String,
    #[serde(rename = "type")]
    pub sdp_type: SdpType,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            sdp: sdp.into(),
            sdp_type: SdpType::Offer,
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            sdp: sdp.into(),
            sdp_type: SdpType::Answer,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn serializes_with_type_key() {
        let json = serde_json::to_value(SessionDescription::offer("v=0\r\n")).unwrap();
        assert_eq!(json, serde_json::json!({ "sdp": "v=0\r\n", "type": "offer" }));
    }

    #[test]
    fn reads_server_answer() {
        let d: SessionDescription =
            serde_json::from_str(r#"{"sdp":"v=0\r\ns=-\r\n","type":"answer"}"#).unwrap();
        assert_eq!(d, SessionDescription::answer("v=0\r\ns=-\r\n"));
        assert_eq!(d.sdp_type.to_string(), "answer");
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(serde_json::from_str::<SessionDescription>(r#"{"sdp":"","type":"hello"}"#).is_err());
        assert!(serde_json::from_str::<SessionDescription>(r#"{"type":"answer"}"#).is_err());
    }
}
