use crate::log::log_level::LogLevel;
use std::time::SystemTime;

/// One queued log line, stamped when it was produced rather than when it is written.
#[derive(Debug, Clone)]
pub struct LogMsg {
    pub level: LogLevel,
    /// Milliseconds since the UNIX epoch.
    pub ts_ms: u128,
    pub text: String,
    /// Module path of the call site.
    pub target: &'static str,
}

impl LogMsg {
    pub fn new(level: LogLevel, text: impl Into<String>, target: &'static str) -> Self {
        Self {
            level,
            ts_ms: now_millis(),
            text: text.into(),
            target,
        }
    }

    /// Line format used by the file writer.
    #[must_use]
    pub fn render(&self) -> String {
        format!("[{}] {} {} | {}", self.level, self.ts_ms, self.target, self.text)
    }
}

pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_contains_level_target_and_text() {
        let m = LogMsg::new(LogLevel::Info, "offer posted", "rtcoffer::session");
        let line = m.render();
        assert!(line.starts_with("[INFO] "));
        assert!(line.contains("rtcoffer::session"));
        assert!(line.ends_with("| offer posted"));
        assert!(m.ts_ms > 0);
    }
}
