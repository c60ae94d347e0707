use crate::sdp::media::{MediaKind, MediaLine};
use crate::sdp::payload_type::{PayloadType, digit_prefix_len};

/// One line of an SDP blob as split on `\n`.
///
/// `content` excludes the terminator; `cr` records whether the line ended in
/// `\r\n` so untouched lines can be written back byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    content: &'a str,
    cr: bool,
}

impl<'a> RawLine<'a> {
    fn new(segment: &'a str) -> Self {
        match segment.strip_suffix('\r') {
            Some(content) => Self { content, cr: true },
            None => Self {
                content: segment,
                cr: false,
            },
        }
    }

    pub const fn content(&self) -> &'a str {
        self.content
    }

    pub const fn has_cr(&self) -> bool {
        self.cr
    }

    /// Appends `text` followed by this line's original terminator (always ending in `\n`).
    pub fn write_with_ending(&self, out: &mut String, text: &str) {
        out.push_str(text);
        if self.cr {
            out.push('\r');
        }
        out.push('\n');
    }

    /// Appends the line unchanged.
    pub fn write_to(&self, out: &mut String) {
        self.write_with_ending(out, self.content);
    }
}

/// Splits an SDP blob into lines. A trailing empty segment after the final
/// `\n` is not a line.
pub fn raw_lines(sdp: &str) -> impl Iterator<Item = RawLine<'_>> {
    let body = sdp.strip_suffix('\n').unwrap_or(sdp);
    let empty = sdp.is_empty();
    body.split('\n').filter(move |_| !empty).map(RawLine::new)
}

/// Attribute lines that describe one payload type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecAttrKind {
    RtpMap,
    Fmtp,
    RtcpFb,
}

impl CodecAttrKind {
    const fn prefix(self) -> &'static str {
        match self {
            Self::RtpMap => "a=rtpmap:",
            Self::Fmtp => "a=fmtp:",
            Self::RtcpFb => "a=rtcp-fb:",
        }
    }
}

/// `a=rtpmap:`, `a=fmtp:` or `a=rtcp-fb:` followed by a numeric payload type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecAttr<'a> {
    kind: CodecAttrKind,
    /// Text after the colon: `<pt>[<rest>]`.
    body: &'a str,
    digits: usize,
}

impl<'a> CodecAttr<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        [CodecAttrKind::RtpMap, CodecAttrKind::Fmtp, CodecAttrKind::RtcpFb]
            .into_iter()
            .find_map(|kind| {
                let body = line.strip_prefix(kind.prefix())?;
                let digits = digit_prefix_len(body);
                (digits > 0).then_some(Self { kind, body, digits })
            })
    }

    pub const fn kind(&self) -> CodecAttrKind {
        self.kind
    }

    /// Attribute value after the colon, e.g. `111 opus/48000/2`.
    pub const fn value(&self) -> &'a str {
        self.body
    }

    /// `None` when the digits do not fit a payload type number; such a line
    /// can never be selected.
    pub fn payload_type(&self) -> Option<PayloadType> {
        self.body[..self.digits].parse().ok()
    }

    /// Whitespace-separated text after the payload type, or `None` when the
    /// digits are not followed by whitespace.
    fn params(&self) -> Option<&'a str> {
        let rest = &self.body[self.digits..];
        rest.starts_with(char::is_whitespace)
            .then(|| rest.trim_start())
    }

    /// Encoding name of an `a=rtpmap` line: the token before the first `/`.
    pub fn codec_name(&self) -> Option<&'a str> {
        if self.kind != CodecAttrKind::RtpMap {
            return None;
        }
        let params = self.params()?;
        let end = params
            .find(|c: char| c == '/' || c.is_whitespace())
            .unwrap_or(params.len());
        let name = &params[..end];
        (!name.is_empty()).then_some(name)
    }

    /// Associated payload type of a retransmission `a=fmtp:<pt> apt=<apt>` line.
    /// Only a bare `apt=` parameter qualifies.
    pub fn apt(&self) -> Option<PayloadType> {
        if self.kind != CodecAttrKind::Fmtp {
            return None;
        }
        self.params()?.strip_prefix("apt=")?.parse().ok()
    }
}

/// Typed view of one SDP line, borrowing from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdpLine<'a> {
    /// Any `m=` line. `line` is `None` when the fields after the kind are malformed.
    Media {
        kind: MediaKind,
        line: Option<MediaLine>,
    },
    CodecAttr(CodecAttr<'a>),
    Other(&'a str),
}

impl<'a> SdpLine<'a> {
    /// Classifies a line given without its terminator.
    pub fn parse(content: &'a str) -> Self {
        if let Some(value) = content.strip_prefix("m=") {
            let kind = MediaKind::from(value.split_whitespace().next().unwrap_or(""));
            return Self::Media {
                kind,
                line: value.parse().ok(),
            };
        }
        CodecAttr::parse(content).map_or(Self::Other(content), Self::CodecAttr)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    fn attr(line: &str) -> CodecAttr<'_> {
        match SdpLine::parse(line) {
            SdpLine::CodecAttr(a) => a,
            other => panic!("expected codec attribute, got {other:?}"),
        }
    }

    #[test]
    fn raw_lines_keep_carriage_returns() {
        let lines: Vec<_> = raw_lines("v=0\r\ns=-\nt=0 0\r\n").collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].content(), "v=0");
        assert!(lines[0].has_cr());
        assert_eq!(lines[1].content(), "s=-");
        assert!(!lines[1].has_cr());
        assert!(lines[2].has_cr());

        let mut out = String::new();
        for l in &lines {
            l.write_to(&mut out);
        }
        assert_eq!(out, "v=0\r\ns=-\nt=0 0\r\n");
    }

    #[test]
    fn raw_lines_edge_cases() {
        assert_eq!(raw_lines("").count(), 0);
        assert_eq!(raw_lines("\n").count(), 1);
        assert_eq!(raw_lines("v=0").count(), 1);
        // an interior blank line is a line
        assert_eq!(raw_lines("v=0\n\ns=-\n").count(), 3);
    }

    #[test]
    fn rtpmap_codec_name_is_a_whole_token() {
        let a = attr("a=rtpmap:111 opus/48000/2");
        assert_eq!(a.kind(), CodecAttrKind::RtpMap);
        assert_eq!(a.payload_type(), Some(PayloadType::new(111)));
        assert_eq!(a.codec_name(), Some("opus"));
        assert_eq!(a.value(), "111 opus/48000/2");

        assert_eq!(attr("a=rtpmap:98 H264-SVC/90000").codec_name(), Some("H264-SVC"));
        assert_eq!(attr("a=rtpmap:13 CN").codec_name(), Some("CN"));
        assert_eq!(attr("a=rtpmap:96x VP8/90000").codec_name(), None);
        assert_eq!(attr("a=rtpmap:96").codec_name(), None);
    }

    #[test]
    fn fmtp_apt_only_for_bare_parameter() {
        assert_eq!(attr("a=fmtp:97 apt=96").apt(), Some(PayloadType::new(96)));
        assert_eq!(attr("a=fmtp:97 apt=96;rtx-time=3000").apt(), None);
        assert_eq!(attr("a=fmtp:111 minptime=10;useinbandfec=1").apt(), None);
        assert_eq!(attr("a=rtcp-fb:97 apt=96").apt(), None);
    }

    #[test]
    fn classifies_media_and_other_lines() {
        match SdpLine::parse("m=video 9 UDP/TLS/RTP/SAVPF 96 97") {
            SdpLine::Media { kind, line } => {
                assert_eq!(kind, MediaKind::Video);
                assert_eq!(line.unwrap().fmts(), ["96", "97"]);
            }
            other => panic!("unexpected {other:?}"),
        }
        match SdpLine::parse("m=audio") {
            SdpLine::Media { kind, line } => {
                assert_eq!(kind, MediaKind::Audio);
                assert!(line.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(SdpLine::parse("a=rtcp-fb:* nack"), SdpLine::Other("a=rtcp-fb:* nack"));
        assert_eq!(SdpLine::parse("a=ssrc:1 cname:x"), SdpLine::Other("a=ssrc:1 cname:x"));
        assert_eq!(SdpLine::parse("c=IN IP4 0.0.0.0"), SdpLine::Other("c=IN IP4 0.0.0.0"));
    }

    #[test]
    fn oversized_payload_type_has_none() {
        let a = attr("a=fmtp:99999999999 apt=96");
        assert_eq!(a.payload_type(), None);
    }
}
