use crate::sdp::sdp_error::SdpError;
use std::{fmt, str::FromStr};

/// Port field of an `m=` line: `<port>` or `<port>/<number of ports>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSpec {
    base: u16,
    num: Option<u16>,
}

impl PortSpec {
    #[must_use]
    pub const fn new(base: u16, num: Option<u16>) -> Self {
        Self { base, num }
    }

    #[must_use]
    pub const fn base(&self) -> u16 {
        self.base
    }

    #[must_use]
    pub const fn num(&self) -> Option<u16> {
        self.num
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.num {
            Some(n) => write!(f, "{}/{}", self.base, n),
            None => write!(f, "{}", self.base),
        }
    }
}

impl FromStr for PortSpec {
    type Err = SdpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, num) = match s.split_once('/') {
            Some((b, n)) => (b, Some(n.parse::<u16>()?)),
            None => (s, None),
        };
        Ok(Self::new(base.parse::<u16>()?, num))
    }
}
