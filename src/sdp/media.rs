use crate::sdp::payload_type::PayloadType;
use crate::sdp::port_spec::PortSpec;
use crate::sdp::sdp_error::SdpError;
use std::{fmt, str::FromStr};

/// Media type named by an `m=` line.
///
/// The standard values are `Audio`, `Video`, `Text`, `Application` and `Message`.
/// Anything else is kept verbatim in `Other`. Matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Video,
    Text,
    Application,
    Message,
    Other(String),
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio => f.write_str("audio"),
            Self::Video => f.write_str("video"),
            Self::Text => f.write_str("text"),
            Self::Application => f.write_str("application"),
            Self::Message => f.write_str("message"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

impl From<&str> for MediaKind {
    fn from(s: &str) -> Self {
        match s {
            "audio" => Self::Audio,
            "video" => Self::Video,
            "text" => Self::Text,
            "application" => Self::Application,
            "message" => Self::Message,
            other => Self::Other(other.to_string()),
        }
    }
}

impl FromStr for MediaKind {
    type Err = SdpError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SdpError::Missing("media kind"));
        }
        Ok(Self::from(s))
    }
}

/// A parsed `m=<media> <port>[/<num>] <proto> <fmt>...` line.
///
/// The text up to and including the proto token is kept verbatim as `head`,
/// so replacing the format list never disturbs spacing in front of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLine {
    kind: MediaKind,
    port: PortSpec,
    proto: String,
    fmts: Vec<String>,
    head: String,
}

impl MediaLine {
    pub const fn kind(&self) -> &MediaKind {
        &self.kind
    }

    pub const fn port(&self) -> &PortSpec {
        &self.port
    }

    /// Transport protocol, e.g. `"UDP/TLS/RTP/SAVPF"`.
    pub fn proto(&self) -> &str {
        &self.proto
    }

    /// Format tokens; payload type numbers for RTP media.
    pub fn fmts(&self) -> &[String] {
        &self.fmts
    }

    /// Format tokens that are payload type numbers, in line order.
    pub fn payload_types(&self) -> Vec<PayloadType> {
        self.fmts.iter().filter_map(|f| f.parse().ok()).collect()
    }

    /// Same line with its format list replaced by `pts`.
    #[must_use]
    pub fn with_payload_types(&self, pts: &[PayloadType]) -> Self {
        Self {
            fmts: pts.iter().map(ToString::to_string).collect(),
            ..self.clone()
        }
    }
}

/// Parses the value of an `m=` line (the text after `m=`).
impl FromStr for MediaLine {
    type Err = SdpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spans = token_spans(s);
        let token = |i: usize| spans.get(i).map(|&(a, b)| &s[a..b]);

        let kind: MediaKind = token(0).ok_or(SdpError::Missing("m= kind"))?.parse()?;
        let port: PortSpec = token(1).ok_or(SdpError::Missing("m= port"))?.parse()?;
        let proto = token(2).ok_or(SdpError::Missing("m= proto"))?.to_owned();
        let head_end = spans[2].1;
        let fmts = spans[3..].iter().map(|&(a, b)| s[a..b].to_owned()).collect();

        Ok(Self {
            kind,
            port,
            proto,
            fmts,
            head: s[..head_end].to_owned(),
        })
    }
}

/// Renders the full line including the `m=` prefix, without a line terminator.
impl fmt::Display for MediaLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m={}", self.head)?;
        for fmt in &self.fmts {
            write!(f, " {fmt}")?;
        }
        Ok(())
    }
}

/// Byte ranges of the whitespace-separated tokens of `s`.
fn token_spans(s: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in s.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(st)) => {
                spans.push((st, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(st) = start {
        spans.push((st, s.len()));
    }
    spans
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn media_kind_display_and_from() {
        assert_eq!(MediaKind::Audio.to_string(), "audio");
        assert_eq!(MediaKind::Video.to_string(), "video");
        assert_eq!(MediaKind::from("application"), MediaKind::Application);
        // case-sensitive
        assert_eq!(MediaKind::from("Audio"), MediaKind::Other("Audio".into()));
        assert!("".parse::<MediaKind>().is_err());
    }

    #[test]
    fn parses_webrtc_audio_line() {
        let m: MediaLine = "audio 9 UDP/TLS/RTP/SAVPF 111 0 8".parse().unwrap();
        assert_eq!(m.kind(), &MediaKind::Audio);
        assert_eq!(m.port(), &PortSpec::new(9, None));
        assert_eq!(m.proto(), "UDP/TLS/RTP/SAVPF");
        assert_eq!(m.fmts(), ["111", "0", "8"]);
        assert_eq!(
            m.payload_types(),
            vec![PayloadType::new(111), PayloadType::new(0), PayloadType::new(8)]
        );
        assert_eq!(m.to_string(), "m=audio 9 UDP/TLS/RTP/SAVPF 111 0 8");
    }

    #[test]
    fn replacing_formats_keeps_head_verbatim() {
        let m: MediaLine = "video  9/2   RTP/AVPF 96 97 98".parse().unwrap();
        let narrowed = m.with_payload_types(&[PayloadType::new(98), PayloadType::new(96)]);
        assert_eq!(narrowed.to_string(), "m=video  9/2   RTP/AVPF 98 96");

        let empty = m.with_payload_types(&[]);
        assert_eq!(empty.to_string(), "m=video  9/2   RTP/AVPF");
    }

    #[test]
    fn non_numeric_formats_are_not_payload_types() {
        let m: MediaLine = "application 9 UDP/DTLS/SCTP webrtc-datachannel"
            .parse()
            .unwrap();
        assert_eq!(m.fmts(), ["webrtc-datachannel"]);
        assert!(m.payload_types().is_empty());
    }

    #[test]
    fn missing_fields_are_errors() {
        assert!("".parse::<MediaLine>().is_err());
        assert!("audio".parse::<MediaLine>().is_err());
        assert!("audio 9".parse::<MediaLine>().is_err());
        assert!("audio nine RTP/AVP 0".parse::<MediaLine>().is_err());
    }
}
