use crate::control::{
    control_error::ControlError,
    data_channel::{DataChannel, DataChannelInit},
};
use crate::session::{
    ice_state::{IceConnectionState, IceGatheringState, SignalingState},
    offer_options::OfferOptions,
    peer_connection::{PeerConfig, PeerConnection, PeerError},
};
use crate::signaling::session_description::{SdpType, SessionDescription};
use std::cell::Cell;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

/// Peer connection that replays a captured local offer.
///
/// Gathering completes after a configurable number of state queries; every
/// lifecycle call is recorded in [`RecordedPeer::events`]. Used by the offer
/// client to drive the signaling side from a saved browser offer.
pub struct RecordedPeer {
    config: PeerConfig,
    offer_sdp: String,
    local: Option<SessionDescription>,
    remote: Option<SessionDescription>,
    /// `None` gathers forever.
    gathering_polls: Option<u32>,
    polls_left: Cell<u32>,
    connection: IceConnectionState,
    signaling: SignalingState,
    channels: Vec<RecordedChannel>,
    events: Vec<&'static str>,
}

impl RecordedPeer {
    pub fn new(offer_sdp: impl Into<String>) -> Self {
        Self::with_config(PeerConfig::default(), offer_sdp)
    }

    pub fn with_config(config: PeerConfig, offer_sdp: impl Into<String>) -> Self {
        Self {
            config,
            offer_sdp: offer_sdp.into(),
            local: None,
            remote: None,
            gathering_polls: Some(0),
            polls_left: Cell::new(0),
            connection: IceConnectionState::New,
            signaling: SignalingState::Stable,
            channels: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Reports `gathering` for `polls` queries before `complete`.
    #[must_use]
    pub fn with_gathering_polls(mut self, polls: u32) -> Self {
        self.gathering_polls = Some(polls);
        self
    }

    #[must_use]
    pub fn with_stalled_gathering(mut self) -> Self {
        self.gathering_polls = None;
        self
    }

    pub const fn config(&self) -> &PeerConfig {
        &self.config
    }

    pub fn remote_description(&self) -> Option<&SessionDescription> {
        self.remote.as_ref()
    }

    pub fn events(&self) -> &[&'static str] {
        &self.events
    }

    pub fn channels(&self) -> &[RecordedChannel] {
        &self.channels
    }

    fn ensure_open(&self) -> Result<(), PeerError> {
        if self.signaling == SignalingState::Closed {
            Err(PeerError::Closed)
        } else {
            Ok(())
        }
    }
}

impl PeerConnection for RecordedPeer {
    type Channel = RecordedChannel;

    fn create_offer(&mut self, _options: &OfferOptions) -> Result<SessionDescription, PeerError> {
        self.ensure_open()?;
        self.events.push("create_offer");
        Ok(SessionDescription::offer(self.offer_sdp.clone()))
    }

    fn set_local_description(&mut self, desc: &SessionDescription) -> Result<(), PeerError> {
        self.ensure_open()?;
        if desc.sdp_type != SdpType::Offer {
            return Err(PeerError::Rejected(format!("local {} not supported", desc.sdp_type)));
        }
        self.events.push("set_local_description");
        self.local = Some(desc.clone());
        self.signaling = SignalingState::HaveLocalOffer;
        self.polls_left.set(self.gathering_polls.unwrap_or(u32::MAX));
        Ok(())
    }

    fn local_description(&self) -> Option<SessionDescription> {
        self.local.clone()
    }

    fn set_remote_description(&mut self, desc: &SessionDescription) -> Result<(), PeerError> {
        self.ensure_open()?;
        if self.signaling != SignalingState::HaveLocalOffer {
            return Err(PeerError::InvalidState("set_remote_description"));
        }
        if desc.sdp_type != SdpType::Answer {
            return Err(PeerError::Rejected(format!("expected answer, got {}", desc.sdp_type)));
        }
        self.events.push("set_remote_description");
        self.remote = Some(desc.clone());
        self.signaling = SignalingState::Stable;
        self.connection = IceConnectionState::Checking;
        Ok(())
    }

    fn ice_gathering_state(&self) -> IceGatheringState {
        if self.local.is_none() {
            return IceGatheringState::New;
        }
        if self.gathering_polls.is_none() {
            return IceGatheringState::Gathering;
        }
        match self.polls_left.get() {
            0 => IceGatheringState::Complete,
            n => {
                self.polls_left.set(n - 1);
                IceGatheringState::Gathering
            }
        }
    }

    fn ice_connection_state(&self) -> IceConnectionState {
        self.connection
    }

    fn signaling_state(&self) -> SignalingState {
        self.signaling
    }

    fn create_data_channel(
        &mut self,
        label: &str,
        init: &DataChannelInit,
    ) -> Result<Self::Channel, PeerError> {
        self.ensure_open()?;
        self.events.push("create_data_channel");
        let channel = RecordedChannel::new(label, init.clone());
        self.channels.push(channel.clone());
        Ok(channel)
    }

    fn restart_ice(&mut self) {
        self.events.push("restart_ice");
    }

    fn stop_transceivers(&mut self) {
        self.events.push("stop_transceivers");
    }

    fn stop_senders(&mut self) {
        self.events.push("stop_senders");
    }

    fn close(&mut self) {
        self.events.push("close");
        for ch in &self.channels {
            ch.close();
        }
        self.connection = IceConnectionState::Closed;
        self.signaling = SignalingState::Closed;
    }
}

/// Data channel that keeps every message sent on it.
#[derive(Debug, Clone)]
pub struct RecordedChannel {
    label: String,
    init: DataChannelInit,
    sent: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

impl RecordedChannel {
    pub fn new(label: &str, init: DataChannelInit) -> Self {
        Self {
            label: label.to_owned(),
            init,
            sent: Arc::new(Mutex::new(Vec::new())),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub const fn init(&self) -> &DataChannelInit {
        &self.init
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl DataChannel for RecordedChannel {
    fn label(&self) -> &str {
        &self.label
    }

    fn send(&self, text: &str) -> Result<(), ControlError> {
        if self.is_closed() {
            return Err(ControlError::Closed);
        }
        self.sent
            .lock()
            .map_err(|_| ControlError::Send("recorder lock poisoned".into()))?
            .push(text.to_owned());
        Ok(())
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn answer_before_offer_is_rejected() {
        let mut peer = RecordedPeer::new("v=0\r\n");
        let err = peer
            .set_remote_description(&SessionDescription::answer("v=0\r\n"))
            .unwrap_err();
        assert_eq!(err, PeerError::InvalidState("set_remote_description"));
    }

    #[test]
    fn closed_peer_refuses_work() {
        let mut peer = RecordedPeer::new("v=0\r\n");
        let ch = peer
            .create_data_channel("chat", &DataChannelInit::default())
            .unwrap();
        peer.close();
        assert!(ch.is_closed());
        assert!(matches!(ch.send("ping 0"), Err(ControlError::Closed)));
        assert_eq!(
            peer.create_offer(&OfferOptions::default()).unwrap_err(),
            PeerError::Closed
        );
        assert_eq!(peer.signaling_state(), SignalingState::Closed);
    }
}
