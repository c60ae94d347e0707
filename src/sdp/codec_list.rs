use crate::sdp::media::MediaKind;
use crate::sdp::rtp_map::RtpMap;
use crate::sdp::sdp_line::{CodecAttrKind, SdpLine, raw_lines};

/// Codecs announced by one media section, in `a=rtpmap` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCodecs {
    pub kind: MediaKind,
    pub codecs: Vec<RtpMap>,
}

impl MediaCodecs {
    /// Distinct encoding names, e.g. `["VP8", "rtx", "H264"]`.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for c in &self.codecs {
            if !names.contains(&c.encoding_name.as_str()) {
                names.push(&c.encoding_name);
            }
        }
        names
    }
}

/// Lists the `a=rtpmap` entries of every media section. Session-level and
/// malformed `a=rtpmap` lines are skipped.
#[must_use]
pub fn list_codecs(sdp: &str) -> Vec<MediaCodecs> {
    let mut sections: Vec<MediaCodecs> = Vec::new();
    for raw in raw_lines(sdp) {
        match SdpLine::parse(raw.content()) {
            SdpLine::Media { kind, .. } => sections.push(MediaCodecs {
                kind,
                codecs: Vec::new(),
            }),
            SdpLine::CodecAttr(attr) if attr.kind() == CodecAttrKind::RtpMap => {
                let parsed = attr.value().parse::<RtpMap>();
                if let (Some(section), Ok(rm)) = (sections.last_mut(), parsed) {
                    section.codecs.push(rm);
                }
            }
            _ => {}
        }
    }
    sections
}
