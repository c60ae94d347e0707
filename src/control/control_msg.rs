use crate::control::control_error::ControlError;
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

/// Text messages of the data-channel control protocol.
///
/// ```text
/// ping <ms>            client -> server, ms since the session's first stamp
/// pong <ms>            server -> client, echo of the ping stamp
/// target_bitrate <bps> client -> server
/// target_fps <n>       client -> server
/// target_height <px>   client -> server
/// stats <json object>  server -> client
/// ```
///
/// Anything else is free text (the server acknowledges targets in prose).
#[derive(Debug, Clone, PartialEq)]
pub enum ControlMsg {
    Ping(u64),
    Pong(u64),
    TargetBitrate(u64),
    TargetFps(u32),
    TargetHeight(u32),
    Stats(Map<String, Value>),
    Text(String),
}

impl ControlMsg {
    /// `key: value` lines for a stats object; strings are shown without quotes.
    #[must_use]
    pub fn render_stats(stats: &Map<String, Value>) -> String {
        let mut out = String::new();
        for (k, v) in stats {
            let value = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            out.push_str(k);
            out.push_str(": ");
            out.push_str(&value);
            out.push('\n');
        }
        out
    }
}

fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T, ControlError> {
    value.trim().parse().map_err(|_| ControlError::InvalidNumber {
        field,
        value: value.to_owned(),
    })
}

impl FromStr for ControlMsg {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ControlError::Empty);
        }
        let (word, rest) = s.split_once(' ').unwrap_or((s, ""));
        Ok(match word {
            "ping" => Self::Ping(number("ping", rest)?),
            "pong" => Self::Pong(number("pong", rest)?),
            "target_bitrate" => Self::TargetBitrate(number("target_bitrate", rest)?),
            "target_fps" => Self::TargetFps(number("target_fps", rest)?),
            "target_height" => Self::TargetHeight(number("target_height", rest)?),
            "stats" => Self::Stats(serde_json::from_str(rest).map_err(ControlError::InvalidStats)?),
            _ => Self::Text(s.to_owned()),
        })
    }
}

impl fmt::Display for ControlMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ping(ms) => write!(f, "ping {ms}"),
            Self::Pong(ms) => write!(f, "pong {ms}"),
            Self::TargetBitrate(bps) => write!(f, "target_bitrate {bps}"),
            Self::TargetFps(fps) => write!(f, "target_fps {fps}"),
            Self::TargetHeight(px) => write!(f, "target_height {px}"),
            Self::Stats(map) => {
                let json = serde_json::to_string(map).map_err(|_| fmt::Error)?;
                write!(f, "stats {json}")
            }
            Self::Text(t) => f.write_str(t),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn parses_every_command() {
        assert_eq!("ping 0".parse::<ControlMsg>().unwrap(), ControlMsg::Ping(0));
        assert_eq!("pong 1534".parse::<ControlMsg>().unwrap(), ControlMsg::Pong(1534));
        assert_eq!(
            "target_bitrate 1000000".parse::<ControlMsg>().unwrap(),
            ControlMsg::TargetBitrate(1_000_000)
        );
        assert_eq!("target_fps 30".parse::<ControlMsg>().unwrap(), ControlMsg::TargetFps(30));
        assert_eq!(
            "target_height 720".parse::<ControlMsg>().unwrap(),
            ControlMsg::TargetHeight(720)
        );
    }

    #[test]
    fn formats_the_wire_text() {
        assert_eq!(ControlMsg::Ping(42).to_string(), "ping 42");
        assert_eq!(ControlMsg::TargetBitrate(2_500_000).to_string(), "target_bitrate 2500000");
        assert_eq!(ControlMsg::TargetHeight(1080).to_string(), "target_height 1080");
        assert_eq!(ControlMsg::Text("hello".into()).to_string(), "hello");
    }

    #[test]
    fn stats_object_and_rendering() {
        let msg: ControlMsg = r#"stats {"Target FPS":"30","...Target kBit":1000.0}"#
            .parse()
            .unwrap();
        let ControlMsg::Stats(map) = &msg else {
            panic!("expected stats, got {msg:?}");
        };
        let rendered = ControlMsg::render_stats(map);
        assert!(rendered.contains("Target FPS: 30\n"));
        assert!(rendered.contains("...Target kBit: 1000.0\n"));

        let again: ControlMsg = msg.to_string().parse().unwrap();
        assert_eq!(again, msg);
    }

    #[test]
    fn prose_is_free_text() {
        assert_eq!(
            "new fps target is 30".parse::<ControlMsg>().unwrap(),
            ControlMsg::Text("new fps target is 30".into())
        );
        // prefix must be the whole first word
        assert_eq!(
            "pinged 3".parse::<ControlMsg>().unwrap(),
            ControlMsg::Text("pinged 3".into())
        );
    }

    #[test]
    fn malformed_payloads_are_errors() {
        assert!(matches!("".parse::<ControlMsg>(), Err(ControlError::Empty)));
        assert!(matches!(
            "pong".parse::<ControlMsg>(),
            Err(ControlError::InvalidNumber { field: "pong", .. })
        ));
        assert!(matches!(
            "target_fps fast".parse::<ControlMsg>(),
            Err(ControlError::InvalidNumber { field: "target_fps", .. })
        ));
        assert!(matches!(
            "stats [1,2]".parse::<ControlMsg>(),
            Err(ControlError::InvalidStats(_))
        ));
    }
}
