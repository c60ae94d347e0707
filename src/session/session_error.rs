use crate::control::control_error::ControlError;
use crate::session::peer_connection::PeerError;
use crate::signaling::signaling_error::SignalingError;
use std::{fmt, time::Duration};

#[derive(Debug)]
pub enum SessionError {
    Peer(PeerError),
    Signaling(SignalingError),
    Control(ControlError),
    /// Candidate gathering did not complete within the configured time.
    GatheringTimeout(Duration),
    /// Gathering completed but the peer exposes no local description.
    NoLocalDescription,
    /// A thread panicked while holding the control channel.
    Poisoned,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Peer(e) => write!(f, "peer connection: {e}"),
            Self::Signaling(e) => write!(f, "signaling: {e}"),
            Self::Control(e) => write!(f, "control channel: {e}"),
            Self::GatheringTimeout(d) => {
                write!(f, "ICE gathering incomplete after {} ms", d.as_millis())
            }
            Self::NoLocalDescription => write!(f, "no local description after gathering"),
            Self::Poisoned => write!(f, "control channel lock poisoned"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Peer(e) => Some(e),
            Self::Signaling(e) => Some(e),
            Self::Control(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PeerError> for SessionError {
    fn from(e: PeerError) -> Self {
        Self::Peer(e)
    }
}

impl From<SignalingError> for SessionError {
    fn from(e: SignalingError) -> Self {
        Self::Signaling(e)
    }
}

impl From<ControlError> for SessionError {
    fn from(e: ControlError) -> Self {
        Self::Control(e)
    }
}
