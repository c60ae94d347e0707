use std::sync::mpsc;

use crate::log::{log_level::LogLevel, log_msg::LogMsg, log_sink::LogSink};

/// Cloneable producer side of the [`Logger`](super::logger::Logger) queue.
///
/// Sending never blocks: a full queue drops the line and reports it.
#[derive(Clone)]
pub struct LoggerHandle {
    pub(super) tx: mpsc::SyncSender<LogMsg>,
}

impl LogSink for LoggerHandle {
    #[inline]
    fn log(&self, level: LogLevel, msg: &str, target: &'static str) {
        let _ = self.try_log(level, msg, target);
    }
}

impl LoggerHandle {
    /// Enqueues one line stamped with the current time.
    ///
    /// # Errors
    /// - `TrySendError::Full` when the bounded queue is at capacity.
    /// - `TrySendError::Disconnected` when the writer thread is gone.
    pub fn try_log<S: Into<String>>(
        &self,
        level: LogLevel,
        text: S,
        target: &'static str,
    ) -> Result<(), mpsc::TrySendError<LogMsg>> {
        self.tx.try_send(LogMsg::new(level, text, target))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use std::sync::mpsc::{TrySendError, sync_channel};

    #[test]
    fn queued_line_keeps_level_text_and_target() {
        let (tx, rx) = sync_channel::<LogMsg>(2);
        let h = LoggerHandle { tx };

        h.try_log(LogLevel::Debug, "gathering complete", "rtcoffer::session")
            .expect("queue has room");

        let msg = rx.recv().expect("a message should arrive");
        assert_eq!(msg.level, LogLevel::Debug);
        assert_eq!(msg.text, "gathering complete");
        assert_eq!(msg.target, "rtcoffer::session");
    }

    #[test]
    fn full_queue_drops_the_line() {
        let (tx, _rx) = sync_channel::<LogMsg>(1);
        let h = LoggerHandle { tx };

        h.try_log(LogLevel::Info, "first", "t").expect("first send fits");
        assert!(matches!(
            h.try_log(LogLevel::Info, "second", "t"),
            Err(TrySendError::Full(_))
        ));
    }

    #[test]
    fn sink_impl_swallows_disconnect() {
        let (tx, rx) = sync_channel::<LogMsg>(1);
        drop(rx);
        let h = LoggerHandle { tx };

        assert!(matches!(
            h.try_log(LogLevel::Error, "nobody listens", "t"),
            Err(TrySendError::Disconnected(_))
        ));
        // Through the trait the error is ignored.
        h.log(LogLevel::Error, "nobody listens", "t");
    }
}
