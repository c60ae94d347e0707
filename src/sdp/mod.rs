//! Typed SDP line handling and codec selection by SDP rewriting.

pub mod codec_filter;
pub mod codec_list;
pub mod media;
pub mod payload_type;
pub mod port_spec;
pub mod rtp_map;
pub mod sdp_error;
pub mod sdp_line;

pub use codec_filter::{allowed_payload_types, filter_codec};
pub use codec_list::{MediaCodecs, list_codecs};
pub use media::{MediaKind, MediaLine};
pub use payload_type::PayloadType;
pub use sdp_error::SdpError;
