use crate::log::log_level::LogLevel;

/// Destination for log lines. Implementations must never block the caller.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, msg: &str, target: &'static str);
}
