//! Offer/answer exchange with the companion server.

pub mod http_offer_client;
pub mod offer_transport;
pub mod session_description;
pub mod signaling_error;
pub mod tls;

pub use http_offer_client::HttpOfferClient;
pub use offer_transport::OfferTransport;
pub use session_description::{SdpType, SessionDescription};
pub use signaling_error::SignalingError;
