use std::{convert::Infallible, fmt, str::FromStr};

const DEFAULT_SENTINEL: &str = "default";

/// Codec selected for one media kind. `Default` leaves the offer untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CodecChoice {
    #[default]
    Default,
    Named(String),
}

impl CodecChoice {
    /// Codec name to filter for, `None` for the no-filter sentinel.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Named(n) => Some(n),
        }
    }
}

/// `"default"` and blank text select [`CodecChoice::Default`]; anything else is
/// taken verbatim as a codec name.
impl FromStr for CodecChoice {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(if s.is_empty() || s == DEFAULT_SENTINEL {
            Self::Default
        } else {
            Self::Named(s.to_owned())
        })
    }
}

impl fmt::Display for CodecChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or(DEFAULT_SENTINEL))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn sentinel_and_names() {
        assert_eq!("default".parse::<CodecChoice>().unwrap(), CodecChoice::Default);
        assert_eq!("  ".parse::<CodecChoice>().unwrap(), CodecChoice::Default);
        let vp8: CodecChoice = "VP8".parse().unwrap();
        assert_eq!(vp8.name(), Some("VP8"));
        assert_eq!(vp8.to_string(), "VP8");
        assert_eq!(CodecChoice::Default.to_string(), "default");
        // the sentinel is case-sensitive, like codec names
        assert_eq!("Default".parse::<CodecChoice>().unwrap().name(), Some("Default"));
    }
}
