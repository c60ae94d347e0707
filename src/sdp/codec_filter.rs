//! Restricts one media section of an SDP offer to a single codec.
//!
//! Both passes walk the same line sequence with a two-state section tracker:
//! the discovery pass collects the allowed payload types (the codec's own
//! types plus any retransmission types whose `apt=` points at one of them),
//! the rewrite pass drops codec attributes for every other payload type and
//! narrows the section's `m=` line to the allowed list.

use crate::sdp::media::MediaKind;
use crate::sdp::payload_type::PayloadType;
use crate::sdp::sdp_line::{CodecAttrKind, SdpLine, raw_lines};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Outside,
    InTarget,
}

impl Section {
    /// Only `m=` lines change state.
    fn advance(self, line: &SdpLine<'_>, target: &MediaKind) -> Self {
        match line {
            SdpLine::Media { kind, .. } if kind == target => Self::InTarget,
            SdpLine::Media { .. } => Self::Outside,
            _ => self,
        }
    }
}

/// Payload types kept when filtering `kind` sections down to `codec`, in
/// first-seen order and without duplicates.
///
/// `codec` is compared verbatim (case-sensitive) with the whole encoding name
/// of each `a=rtpmap` line, so `H264` never selects `H264-SVC`. A
/// retransmission type counts only when its `a=fmtp:<pt> apt=<apt>` line comes
/// after the codec it refers to.
#[must_use]
pub fn allowed_payload_types(kind: &MediaKind, codec: &str, sdp: &str) -> Vec<PayloadType> {
    let mut allowed: Vec<PayloadType> = Vec::new();
    let mut section = Section::Outside;

    for raw in raw_lines(sdp) {
        let line = SdpLine::parse(raw.content());
        section = section.advance(&line, kind);
        if section != Section::InTarget {
            continue;
        }
        let SdpLine::CodecAttr(attr) = line else {
            continue;
        };

        let found = match attr.kind() {
            CodecAttrKind::RtpMap if attr.codec_name() == Some(codec) => attr.payload_type(),
            CodecAttrKind::Fmtp => attr
                .apt()
                .filter(|apt| allowed.contains(apt))
                .and_then(|_| attr.payload_type()),
            _ => None,
        };

        if let Some(pt) = found.filter(|pt| !allowed.contains(pt)) {
            allowed.push(pt);
        }
    }

    allowed
}

/// Returns `sdp` with every `kind` section narrowed to `codec`.
///
/// Inside target sections, `a=rtpmap`, `a=fmtp` and `a=rtcp-fb` lines for
/// payload types that are not allowed are removed and the `m=` line's format
/// list becomes exactly the allowed list. Everything else, including all
/// other sections, is copied unchanged with its original line ending; every
/// output line ends in `\n`.
///
/// An unknown codec is not an error: the section keeps no codec attributes
/// and its `m=` line ends after the transport protocol.
#[must_use]
pub fn filter_codec(kind: &MediaKind, codec: &str, sdp: &str) -> String {
    let allowed = allowed_payload_types(kind, codec, sdp);
    let mut out = String::with_capacity(sdp.len());
    let mut section = Section::Outside;

    for raw in raw_lines(sdp) {
        let line = SdpLine::parse(raw.content());
        section = section.advance(&line, kind);

        if section == Section::InTarget {
            match &line {
                SdpLine::CodecAttr(attr)
                    if !attr.payload_type().is_some_and(|pt| allowed.contains(&pt)) =>
                {
                    continue;
                }
                SdpLine::Media {
                    line: Some(media), ..
                } => {
                    let narrowed = media.with_payload_types(&allowed);
                    raw.write_with_ending(&mut out, &narrowed.to_string());
                    continue;
                }
                _ => {}
            }
        }

        raw.write_to(&mut out);
    }

    out
}
