//! Peer-connection session: offer negotiation, state trails, start and stop.

pub mod codec_choice;
pub mod ice_state;
pub mod negotiator;
pub mod offer_options;
pub mod peer_connection;
pub mod recorded_peer;
#[allow(clippy::module_inception)]
pub mod session;
pub mod session_error;
pub mod state_trail;

pub use codec_choice::CodecChoice;
pub use ice_state::{IceConnectionState, IceGatheringState, SignalingState};
pub use negotiator::{NegotiationOutcome, Negotiator, apply_codec_choices};
pub use offer_options::OfferOptions;
pub use peer_connection::{BundlePolicy, IceServer, PeerConfig, PeerConnection, PeerError};
pub use recorded_peer::{RecordedChannel, RecordedPeer};
pub use session::Session;
pub use session_error::SessionError;
pub use state_trail::{SessionTrails, StateTrail};
