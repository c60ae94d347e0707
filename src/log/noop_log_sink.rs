use crate::log::{log_level::LogLevel, log_sink::LogSink};

/// Discards everything. Handy for tests and for the CLI when `--quiet` is given.
#[derive(Debug, Clone, Default)]
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    #[inline]
    fn log(&self, _level: LogLevel, _msg: &str, _target: &'static str) {}
}
