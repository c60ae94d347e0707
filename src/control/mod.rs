//! Data-channel control protocol: ping/pong round trips, encoding targets and
//! server statistics.

pub mod channel_log;
pub mod control_channel;
pub mod control_error;
pub mod control_msg;
pub mod data_channel;
pub mod ping_clock;
pub mod ping_worker;
pub mod stream_targets;

pub use channel_log::ChannelLog;
pub use control_channel::ControlChannel;
pub use control_error::ControlError;
pub use control_msg::ControlMsg;
pub use data_channel::{DataChannel, DataChannelInit};
pub use ping_clock::PingClock;
pub use ping_worker::PingWorker;
pub use stream_targets::{HEIGHT_LADDER, StreamTargets};
