use crate::sdp::payload_type::PayloadType;
use std::{fmt, str::FromStr};

/// Value of an `a=rtpmap:` attribute: `<pt> <encoding>/<clock>[/<params>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpMap {
    pub payload_type: PayloadType,
    /// Kept as written; SDP treats encoding names case-insensitively.
    pub encoding_name: String,
    pub clock_rate: u32,
    /// Channel count for audio codecs.
    pub encoding_params: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RtpMapParseError {
    MissingParts,
    InvalidPayloadType,
    InvalidClockRate,
    InvalidParams,
    PayloadTypeOutOfRange,
    TrailingGarbage,
}

impl fmt::Display for RtpMapParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParts => write!(f, "Missing required parts in rtpmap"),
            Self::InvalidPayloadType => write!(f, "Invalid payload type"),
            Self::InvalidClockRate => write!(f, "Invalid clock rate"),
            Self::InvalidParams => write!(f, "Invalid encoding parameters"),
            Self::PayloadTypeOutOfRange => write!(f, "Payload type out of [0,127]"),
            Self::TrailingGarbage => write!(f, "Unexpected trailing tokens after rtpmap"),
        }
    }
}

impl std::error::Error for RtpMapParseError {}

impl fmt::Display for RtpMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{}",
            self.payload_type, self.encoding_name, self.clock_rate
        )?;
        if let Some(p) = self.encoding_params {
            write!(f, "/{p}")?;
        }
        Ok(())
    }
}

impl FromStr for RtpMap {
    type Err = RtpMapParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use RtpMapParseError::{
            InvalidClockRate, InvalidParams, InvalidPayloadType, MissingParts,
            PayloadTypeOutOfRange, TrailingGarbage,
        };

        let mut it = s.split_whitespace();
        let pt_str = it.next().ok_or(MissingParts)?;
        let rhs = it.next().ok_or(MissingParts)?;
        if it.next().is_some() {
            return Err(TrailingGarbage);
        }

        let payload_type: PayloadType = pt_str.parse().map_err(|_| InvalidPayloadType)?;
        if payload_type.value() > 127 {
            return Err(PayloadTypeOutOfRange);
        }

        let mut parts = rhs.splitn(3, '/');
        let encoding_name = parts.next().ok_or(MissingParts)?.to_string();
        if encoding_name.is_empty() {
            return Err(MissingParts);
        }
        let clock_rate: u32 = parts
            .next()
            .ok_or(MissingParts)?
            .parse()
            .map_err(|_| InvalidClockRate)?;

        let encoding_params = match parts.next() {
            None | Some("") => None,
            Some(p) => {
                let v: u16 = p.parse().map_err(|_| InvalidParams)?;
                // zero channels carries no information
                (v != 0).then_some(v)
            }
        };

        Ok(Self {
            payload_type,
            encoding_name,
            clock_rate,
            encoding_params,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn parses_opus_with_channels() {
        let rm: RtpMap = "111 opus/48000/2".parse().unwrap();
        assert_eq!(rm.payload_type, PayloadType::new(111));
        assert_eq!(rm.encoding_name, "opus");
        assert_eq!(rm.clock_rate, 48_000);
        assert_eq!(rm.encoding_params, Some(2));
        assert_eq!(rm.to_string(), "111 opus/48000/2");
    }

    #[test]
    fn parses_video_and_static_types() {
        let rm: RtpMap = "96 VP8/90000".parse().unwrap();
        assert_eq!(rm.encoding_name, "VP8");
        assert_eq!(rm.encoding_params, None);

        let rm: RtpMap = "  0\tPCMU/8000 ".parse().unwrap();
        assert_eq!(rm.payload_type, PayloadType::new(0));
        assert_eq!(rm.clock_rate, 8_000);
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!("".parse::<RtpMap>(), Err(RtpMapParseError::MissingParts));
        assert_eq!("96".parse::<RtpMap>(), Err(RtpMapParseError::MissingParts));
        assert_eq!("96 VP8".parse::<RtpMap>(), Err(RtpMapParseError::MissingParts));
        assert_eq!(
            "x9 opus/48000".parse::<RtpMap>(),
            Err(RtpMapParseError::InvalidPayloadType)
        );
        assert_eq!(
            "96 opus/fast".parse::<RtpMap>(),
            Err(RtpMapParseError::InvalidClockRate)
        );
        assert_eq!(
            "200 opus/48000".parse::<RtpMap>(),
            Err(RtpMapParseError::PayloadTypeOutOfRange)
        );
        assert_eq!(
            "96 opus/48000/2 extra".parse::<RtpMap>(),
            Err(RtpMapParseError::TrailingGarbage)
        );
        assert_eq!(
            "96 opus/48000/two".parse::<RtpMap>(),
            Err(RtpMapParseError::InvalidParams)
        );
    }

    #[test]
    fn zero_channels_becomes_none() {
        let rm: RtpMap = "98 opus/48000/0".parse().unwrap();
        assert_eq!(rm.encoding_params, None);
    }
}
