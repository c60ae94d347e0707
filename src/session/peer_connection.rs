use crate::control::data_channel::{DataChannel, DataChannelInit};
use crate::session::ice_state::{IceConnectionState, IceGatheringState, SignalingState};
use crate::session::offer_options::OfferOptions;
use crate::signaling::session_description::SessionDescription;
use std::fmt;

pub const GOOGLE_STUN: &str = "stun:stun.l.google.com:19302";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BundlePolicy {
    Balanced,
    MaxCompat,
    #[default]
    MaxBundle,
}

impl fmt::Display for BundlePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Balanced => "balanced",
            Self::MaxCompat => "max-compat",
            Self::MaxBundle => "max-bundle",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IceServer {
    pub urls: Vec<String>,
}

/// Construction parameters for a peer connection: unified-plan semantics are
/// implied, bundling and ICE servers are configurable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PeerConfig {
    pub bundle_policy: BundlePolicy,
    pub ice_servers: Vec<IceServer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerError {
    /// The call is not valid in the current signaling state.
    InvalidState(&'static str),
    /// The implementation rejected a description.
    Rejected(String),
    Closed,
}

impl fmt::Display for PeerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState(op) => write!(f, "{op} not allowed in current state"),
            Self::Rejected(why) => write!(f, "description rejected: {why}"),
            Self::Closed => write!(f, "peer connection is closed"),
        }
    }
}

impl std::error::Error for PeerError {}

/// The WebRTC peer connection the session drives. ICE, DTLS and media live
/// behind this trait.
pub trait PeerConnection {
    type Channel: DataChannel + Send + 'static;

    /// # Errors
    /// The connection cannot create an offer now.
    fn create_offer(&mut self, options: &OfferOptions) -> Result<SessionDescription, PeerError>;

    /// Starts candidate gathering.
    ///
    /// # Errors
    /// The description was rejected.
    fn set_local_description(&mut self, desc: &SessionDescription) -> Result<(), PeerError>;

    /// Local description including the candidates gathered so far.
    fn local_description(&self) -> Option<SessionDescription>;

    /// # Errors
    /// The description was rejected.
    fn set_remote_description(&mut self, desc: &SessionDescription) -> Result<(), PeerError>;

    fn ice_gathering_state(&self) -> IceGatheringState;
    fn ice_connection_state(&self) -> IceConnectionState;
    fn signaling_state(&self) -> SignalingState;

    /// # Errors
    /// The connection is closed.
    fn create_data_channel(
        &mut self,
        label: &str,
        init: &DataChannelInit,
    ) -> Result<Self::Channel, PeerError>;

    fn restart_ice(&mut self);
    fn stop_transceivers(&mut self);
    fn stop_senders(&mut self);
    fn close(&mut self);
}
