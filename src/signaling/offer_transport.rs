use crate::signaling::{session_description::SessionDescription, signaling_error::SignalingError};

/// Delivers a local offer to the remote side and returns its answer.
pub trait OfferTransport {
    /// # Errors
    /// Any failure to reach the endpoint or to read a valid answer.
    fn send_offer(&self, offer: &SessionDescription) -> Result<SessionDescription, SignalingError>;
}
