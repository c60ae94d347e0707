use crate::control::control_error::ControlError;
use serde::{Deserialize, Serialize};

/// Creation parameters of a data channel, in the JSON shape the browser API takes
/// (`{"ordered": false, "maxRetransmits": 0}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataChannelInit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_packet_life_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retransmits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// Text side of a data channel provided by the peer connection.
pub trait DataChannel {
    fn label(&self) -> &str;

    /// # Errors
    /// The channel is closed or the transport rejected the message.
    fn send(&self, text: &str) -> Result<(), ControlError>;

    fn close(&self);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn init_uses_browser_field_names() {
        let init: DataChannelInit =
            serde_json::from_str(r#"{"ordered": false, "maxRetransmits": 0}"#).unwrap();
        assert_eq!(init.ordered, Some(false));
        assert_eq!(init.max_retransmits, Some(0));
        assert_eq!(init.max_packet_life_time, None);

        let partial: DataChannelInit =
            serde_json::from_str(r#"{"ordered": false, "maxPacketLifeTime": 500}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&partial).unwrap(),
            r#"{"ordered":false,"maxPacketLifeTime":500}"#
        );
    }
}
