use crate::log::log_sink::LogSink;
use crate::sdp::{MediaKind, filter_codec, list_codecs};
use crate::session::{
    ice_state::IceGatheringState, offer_options::OfferOptions, peer_connection::PeerConnection,
    session_error::SessionError, state_trail::SessionTrails,
};
use crate::settings::{CodecSettings, IceSettings};
use crate::signaling::{offer_transport::OfferTransport, session_description::SessionDescription};
use crate::{sink_debug, sink_info, sink_warn};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// SDP exchanged by one negotiation round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationOutcome {
    /// The offer as posted, after codec filtering.
    pub offer_sdp: String,
    pub answer_sdp: String,
}

/// Narrows the audio section, then the video section, to the configured codecs.
/// A [`CodecChoice::Default`](crate::session::codec_choice::CodecChoice) kind is left untouched.
#[must_use]
pub fn apply_codec_choices(sdp: &str, codecs: &CodecSettings) -> String {
    let mut sdp = sdp.to_owned();
    for (kind, choice) in [
        (MediaKind::Audio, &codecs.audio),
        (MediaKind::Video, &codecs.video),
    ] {
        if let Some(name) = choice.name() {
            sdp = filter_codec(&kind, name, &sdp);
        }
    }
    sdp
}

/// Runs the offer side of one offer/answer exchange.
pub struct Negotiator<'a, T: OfferTransport + ?Sized> {
    transport: &'a T,
    codecs: CodecSettings,
    gathering_timeout: Duration,
    poll_interval: Duration,
    log_sink: Arc<dyn LogSink>,
}

impl<'a, T: OfferTransport + ?Sized> Negotiator<'a, T> {
    pub fn new(
        transport: &'a T,
        codecs: &CodecSettings,
        ice: &IceSettings,
        log_sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            transport,
            codecs: codecs.clone(),
            gathering_timeout: ice.gathering_timeout(),
            poll_interval: ice.gathering_poll().max(Duration::from_millis(1)),
            log_sink,
        }
    }

    /// Creates and applies a local offer, waits for gathering to complete,
    /// filters codecs, posts the offer and applies the answer.
    ///
    /// # Errors
    /// Any peer, gathering or signaling failure; the peer is left as it was at
    /// the failing step.
    pub fn negotiate<P: PeerConnection>(
        &self,
        peer: &mut P,
        trails: &mut SessionTrails,
    ) -> Result<NegotiationOutcome, SessionError> {
        let offer = peer.create_offer(&OfferOptions::default())?;
        peer.set_local_description(&offer)?;
        trails.observe(peer);

        self.wait_for_gathering(peer, trails)?;

        let local = peer
            .local_description()
            .ok_or(SessionError::NoLocalDescription)?;
        for section in list_codecs(&local.sdp) {
            sink_debug!(
                self.log_sink,
                "[NEGOTIATE] offered {}: {}",
                section.kind,
                section.names().join(", ")
            );
        }

        let offer = SessionDescription {
            sdp: apply_codec_choices(&local.sdp, &self.codecs),
            sdp_type: local.sdp_type,
        };
        sink_info!(
            self.log_sink,
            "[NEGOTIATE] posting offer (audio={}, video={})",
            self.codecs.audio,
            self.codecs.video
        );

        let answer = self.transport.send_offer(&offer)?;
        peer.set_remote_description(&answer)?;
        trails.observe(peer);
        sink_info!(
            self.log_sink,
            "[NEGOTIATE] answer applied, signaling {}",
            trails.signaling
        );

        Ok(NegotiationOutcome {
            offer_sdp: offer.sdp,
            answer_sdp: answer.sdp,
        })
    }

    fn wait_for_gathering<P: PeerConnection>(
        &self,
        peer: &P,
        trails: &mut SessionTrails,
    ) -> Result<(), SessionError> {
        let deadline = Instant::now() + self.gathering_timeout;
        loop {
            let state = peer.ice_gathering_state();
            trails.observe(peer);
            if state == IceGatheringState::Complete {
                return Ok(());
            }
            if Instant::now() >= deadline {
                sink_warn!(
                    self.log_sink,
                    "[NEGOTIATE] gathering stuck at {} ({})",
                    state,
                    trails.ice_gathering
                );
                return Err(SessionError::GatheringTimeout(self.gathering_timeout));
            }
            thread::sleep(self.poll_interval);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::NoopLogSink;
    use crate::session::codec_choice::CodecChoice;
    use crate::session::recorded_peer::RecordedPeer;
    use crate::signaling::signaling_error::SignalingError;
    use std::cell::RefCell;

    const OFFER: &str = "v=0\r\n\
o=- 1 2 IN IP4 127.0.0.1\r\n\
s=-\r\n\
t=0 0\r\n\
m=audio 9 UDP/TLS/RTP/SAVPF 111 0 8\r\n\
a=rtpmap:111 opus/48000/2\r\n\
a=fmtp:111 minptime=10;useinbandfec=1\r\n\
a=rtpmap:0 PCMU/8000\r\n\
a=rtpmap:8 PCMA/8000\r\n\
m=video 9 UDP/TLS/RTP/SAVPF 96 97 98 99\r\n\
a=rtpmap:96 VP8/90000\r\n\
a=rtcp-fb:96 nack\r\n\
a=rtpmap:97 rtx/90000\r\n\
a=fmtp:97 apt=96\r\n\
a=rtpmap:98 H264/90000\r\n\
a=rtpmap:99 rtx/90000\r\n\
a=fmtp:99 apt=98\r\n";

    /// Answers every offer and remembers what was posted.
    #[derive(Default)]
    struct EchoServer {
        posted: RefCell<Vec<SessionDescription>>,
    }

    impl OfferTransport for EchoServer {
        fn send_offer(
            &self,
            offer: &SessionDescription,
        ) -> Result<SessionDescription, SignalingError> {
            self.posted.borrow_mut().push(offer.clone());
            Ok(SessionDescription::answer(offer.sdp.replace("a=", "a=x-")))
        }
    }

    struct DownServer;

    impl OfferTransport for DownServer {
        fn send_offer(&self, _: &SessionDescription) -> Result<SessionDescription, SignalingError> {
            Err(SignalingError::Status(502))
        }
    }

    fn ice(timeout_ms: u64) -> IceSettings {
        IceSettings {
            gathering_timeout_ms: timeout_ms,
            gathering_poll_ms: 1,
            ..IceSettings::default()
        }
    }

    fn run(
        peer: &mut RecordedPeer,
        codecs: &CodecSettings,
        server: &EchoServer,
    ) -> Result<NegotiationOutcome, SessionError> {
        let mut trails = SessionTrails::new(peer);
        Negotiator::new(server, codecs, &ice(1000), Arc::new(NoopLogSink))
            .negotiate(peer, &mut trails)
    }

    #[test]
    fn default_choices_post_the_offer_unchanged() {
        let server = EchoServer::default();
        let mut peer = RecordedPeer::new(OFFER);
        let outcome = run(&mut peer, &CodecSettings::default(), &server).unwrap();
        assert_eq!(outcome.offer_sdp, OFFER);
        assert_eq!(server.posted.borrow()[0].sdp, OFFER);
        assert_eq!(
            peer.remote_description().unwrap().sdp,
            outcome.answer_sdp
        );
    }

    #[test]
    fn filters_audio_then_video() {
        let server = EchoServer::default();
        let mut peer = RecordedPeer::new(OFFER);
        let codecs = CodecSettings {
            audio: CodecChoice::Named("opus".into()),
            video: CodecChoice::Named("H264".into()),
        };
        let outcome = run(&mut peer, &codecs, &server).unwrap();
        assert!(outcome.offer_sdp.contains("m=audio 9 UDP/TLS/RTP/SAVPF 111\r\n"));
        assert!(outcome.offer_sdp.contains("m=video 9 UDP/TLS/RTP/SAVPF 98 99\r\n"));
        assert!(!outcome.offer_sdp.contains("a=rtpmap:0 "));
        assert!(!outcome.offer_sdp.contains("a=rtcp-fb:96 "));
        assert_eq!(outcome.offer_sdp, apply_codec_choices(OFFER, &codecs));
    }

    #[test]
    fn trails_follow_the_exchange() {
        let server = EchoServer::default();
        let mut peer = RecordedPeer::new(OFFER).with_gathering_polls(3);
        let mut trails = SessionTrails::new(&peer);
        Negotiator::new(&server, &CodecSettings::default(), &ice(1000), Arc::new(NoopLogSink))
            .negotiate(&mut peer, &mut trails)
            .unwrap();
        assert_eq!(trails.ice_gathering.to_string(), "new -> gathering -> complete");
        assert_eq!(
            trails.signaling.to_string(),
            "stable -> have-local-offer -> stable"
        );
    }

    #[test]
    fn gathering_timeout_is_reported() {
        let server = EchoServer::default();
        let mut peer = RecordedPeer::new(OFFER).with_stalled_gathering();
        let mut trails = SessionTrails::new(&peer);
        let err = Negotiator::new(&server, &CodecSettings::default(), &ice(20), Arc::new(NoopLogSink))
            .negotiate(&mut peer, &mut trails)
            .unwrap_err();
        assert!(matches!(err, SessionError::GatheringTimeout(d) if d == Duration::from_millis(20)));
        assert!(server.posted.borrow().is_empty());
    }

    #[test]
    fn signaling_failure_leaves_local_offer() {
        let mut peer = RecordedPeer::new(OFFER);
        let mut trails = SessionTrails::new(&peer);
        let err = Negotiator::new(&DownServer, &CodecSettings::default(), &ice(1000), Arc::new(NoopLogSink))
            .negotiate(&mut peer, &mut trails)
            .unwrap_err();
        assert!(matches!(err, SessionError::Signaling(SignalingError::Status(502))));
        assert!(peer.remote_description().is_none());
    }
}
