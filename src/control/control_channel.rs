use crate::control::{
    channel_log::ChannelLog, control_error::ControlError, control_msg::ControlMsg,
    data_channel::DataChannel, ping_clock::PingClock, stream_targets::StreamTargets,
};
use crate::log::log_sink::LogSink;
use crate::{sink_debug, sink_info, sink_warn};
use std::sync::Arc;

/// Client end of the control protocol spoken over the `chat` data channel.
///
/// Owns the channel, the encoding targets, the ping clock and the
/// scroll-back of everything sent and received.
pub struct ControlChannel<C: DataChannel> {
    channel: C,
    targets: StreamTargets,
    clock: PingClock,
    log: ChannelLog,
    last_rtt_ms: Option<u64>,
    stats: Option<String>,
    open: bool,
    log_sink: Arc<dyn LogSink>,
}

impl<C: DataChannel> ControlChannel<C> {
    pub fn new(channel: C, targets: StreamTargets, log_sink: Arc<dyn LogSink>) -> Self {
        Self {
            channel,
            targets,
            clock: PingClock::new(),
            log: ChannelLog::default(),
            last_rtt_ms: None,
            stats: None,
            open: false,
            log_sink,
        }
    }

    /// Marks the channel open and announces the current targets.
    ///
    /// # Errors
    /// A target message could not be sent.
    pub fn on_open(&mut self) -> Result<(), ControlError> {
        self.open = true;
        self.log.push("- open");
        sink_info!(self.log_sink, "[CONTROL] channel '{}' open", self.channel.label());
        for msg in self.targets.announce() {
            self.send(&msg)?;
        }
        Ok(())
    }

    /// Sends one `ping <stamp>`.
    ///
    /// # Errors
    /// [`ControlError::Closed`] once the channel has closed.
    pub fn tick(&mut self) -> Result<(), ControlError> {
        if !self.open {
            return Err(ControlError::Closed);
        }
        let msg = ControlMsg::Ping(self.clock.stamp());
        self.log.push(format!("> {msg}"));
        self.send(&msg)
    }

    /// Handles one received text. The line is logged even when it fails to parse.
    ///
    /// # Errors
    /// A known command carried a malformed payload.
    pub fn on_message(&mut self, text: &str) -> Result<ControlMsg, ControlError> {
        self.log.push(format!("< {text}"));
        let msg = match text.parse::<ControlMsg>() {
            Ok(m) => m,
            Err(e) => {
                sink_warn!(self.log_sink, "[CONTROL] bad message {:?}: {}", text, e);
                return Err(e);
            }
        };
        match &msg {
            ControlMsg::Pong(stamp) => {
                let rtt = self.clock.rtt_ms(*stamp);
                self.log.push(format!(" RTT {rtt} ms"));
                self.last_rtt_ms = Some(rtt);
                sink_debug!(self.log_sink, "[CONTROL] rtt {} ms", rtt);
            }
            ControlMsg::Stats(map) => {
                self.stats = Some(ControlMsg::render_stats(map));
            }
            _ => {}
        }
        Ok(msg)
    }

    pub fn on_close(&mut self) {
        self.open = false;
        self.log.push("- close");
        sink_info!(self.log_sink, "[CONTROL] channel '{}' closed", self.channel.label());
    }

    /// Asks the transport to close; [`Self::on_close`] follows when it reports back.
    pub fn close(&self) {
        self.channel.close();
    }

    /// # Errors
    /// The open channel refused the message.
    pub fn set_bitrate_kbps(&mut self, kbps: u32) -> Result<(), ControlError> {
        let msg = self.targets.set_bitrate_kbps(kbps);
        self.send_if_open(&msg)
    }

    /// # Errors
    /// The open channel refused the message.
    pub fn set_fps(&mut self, fps: u32) -> Result<(), ControlError> {
        let msg = self.targets.set_fps(fps);
        self.send_if_open(&msg)
    }

    /// Snaps `height` to the ladder before sending.
    ///
    /// # Errors
    /// The open channel refused the message.
    pub fn set_height(&mut self, height: u32) -> Result<(), ControlError> {
        let msg = self.targets.set_height(height);
        self.send_if_open(&msg)
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn targets(&self) -> &StreamTargets {
        &self.targets
    }

    pub const fn log(&self) -> &ChannelLog {
        &self.log
    }

    pub const fn last_rtt_ms(&self) -> Option<u64> {
        self.last_rtt_ms
    }

    /// Last `stats` report rendered as `key: value` lines.
    pub fn stats(&self) -> Option<&str> {
        self.stats.as_deref()
    }

    pub const fn channel(&self) -> &C {
        &self.channel
    }

    fn send_if_open(&self, msg: &ControlMsg) -> Result<(), ControlError> {
        if self.open { self.send(msg) } else { Ok(()) }
    }

    fn send(&self, msg: &ControlMsg) -> Result<(), ControlError> {
        self.channel.send(&msg.to_string())
    }
}
