use std::collections::HashMap;
use std::fs;
use std::str::FromStr;

/// INI-style configuration: `key = value` pairs, optionally grouped under
/// `[Section]` headers. `#` starts a comment line; values may be quoted.
#[derive(Debug, Default)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    /// # Errors
    /// Returns a readable message when the file cannot be read.
    pub fn load(path: &str) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Error reading file {path}: {e}"))?;
        Ok(Self::parse(&content))
    }

    /// Parses configuration text. Lines that are not headers or `key = value`
    /// pairs are ignored.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut globals = HashMap::new();
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current_section = Some(name.trim().to_string());
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_string();
                let value = value.trim().trim_matches('"').to_string();

                match &current_section {
                    None => {
                        globals.insert(key, value);
                    }
                    Some(sec) => {
                        sections.entry(sec.clone()).or_default().insert(key, value);
                    }
                }
            }
        }
        Self { globals, sections }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(String::as_str)
    }

    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn get_or_default<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.get(section, key)
            .or_else(|| self.get_global(key))
            .unwrap_or(default)
    }

    #[must_use]
    pub fn get_non_empty_or_default<'a>(
        &'a self,
        section: &str,
        key: &str,
        default: &'a str,
    ) -> &'a str {
        self.get_non_empty(section, key)
            .or_else(|| self.get_global(key).filter(|s| !s.is_empty()))
            .unwrap_or(default)
    }

    /// Section value (falling back to a global of the same key) parsed as `T`.
    /// Missing or unparsable values yield `None`.
    #[must_use]
    pub fn get_parsed<T: FromStr>(&self, section: &str, key: &str) -> Option<T> {
        self.get_non_empty(section, key)
            .or_else(|| self.get_global(key).filter(|s| !s.is_empty()))
            .and_then(|v| v.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    const SAMPLE: &str = r#"
# offer client
timeout_ms = 2500

[Signaling]
offer_url = "http://127.0.0.1:8080/offer"

[Codecs]
audio = opus
video =
"#;

    #[test]
    fn sections_globals_and_quotes() {
        let cfg = Config::parse(SAMPLE);
        assert_eq!(cfg.get_global("timeout_ms"), Some("2500"));
        assert_eq!(
            cfg.get("Signaling", "offer_url"),
            Some("http://127.0.0.1:8080/offer")
        );
        assert_eq!(cfg.get("Codecs", "audio"), Some("opus"));
        assert_eq!(cfg.get("Codecs", "video"), Some(""));
        assert_eq!(cfg.get_non_empty("Codecs", "video"), None);
        assert_eq!(cfg.get("Missing", "key"), None);
    }

    #[test]
    fn defaults_and_global_fallback() {
        let cfg = Config::parse(SAMPLE);
        assert_eq!(cfg.get_non_empty_or_default("Codecs", "video", "default"), "default");
        assert_eq!(cfg.get_or_default("Signaling", "timeout_ms", "0"), "2500");
        assert_eq!(cfg.get_parsed::<u64>("Signaling", "timeout_ms"), Some(2500));
        assert_eq!(cfg.get_parsed::<u64>("Codecs", "audio"), None);
    }

    #[test]
    fn empty_config_has_nothing() {
        let cfg = Config::empty();
        assert!(cfg.globals.is_empty());
        assert!(cfg.sections.is_empty());
        assert_eq!(cfg.get_or_default("Ice", "use_stun", "false"), "false");
    }
}
