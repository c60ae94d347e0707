use crate::sdp::sdp_error::SdpError;
use std::{fmt, str::FromStr};

/// RTP payload type number as written in `m=` lines and codec attributes.
///
/// Parsed from decimal digits only, so `"096"` and `"96"` are the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PayloadType(u32);

impl PayloadType {
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PayloadType {
    type Err = SdpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || digit_prefix_len(s) != s.len() {
            return Err(SdpError::Invalid("payload type"));
        }
        Ok(Self(s.parse::<u32>()?))
    }
}

/// Length of the leading run of ASCII digits in `s`.
pub(crate) fn digit_prefix_len(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}
