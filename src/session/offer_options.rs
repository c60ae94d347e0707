/// Options passed to `create_offer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferOptions {
    pub ice_restart: bool,
    pub offer_to_receive_audio: bool,
    pub offer_to_receive_video: bool,
}

impl Default for OfferOptions {
    /// Fresh ICE credentials and receive slots for both kinds, so an offer is
    /// useful even without local tracks.
    fn default() -> Self {
        Self {
            ice_restart: true,
            offer_to_receive_audio: true,
            offer_to_receive_video: true,
        }
    }
}
