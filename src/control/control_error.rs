use std::fmt;

#[derive(Debug)]
pub enum ControlError {
    /// Empty message text.
    Empty,
    /// A known command carried a payload that is not a number.
    InvalidNumber { field: &'static str, value: String },
    /// `stats` payload is not a JSON object.
    InvalidStats(serde_json::Error),
    /// Sending on a channel that is not open.
    Closed,
    /// The transport refused the message.
    Send(String),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty control message"),
            Self::InvalidNumber { field, value } => {
                write!(f, "invalid number for {field}: {value:?}")
            }
            Self::InvalidStats(e) => write!(f, "invalid stats payload: {e}"),
            Self::Closed => write!(f, "data channel is closed"),
            Self::Send(e) => write!(f, "data channel send failed: {e}"),
        }
    }
}

impl std::error::Error for ControlError {}
