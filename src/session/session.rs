use crate::control::{
    control_channel::ControlChannel, control_msg::ControlMsg, ping_worker::PingWorker,
};
use crate::log::log_sink::LogSink;
use crate::session::{
    negotiator::{NegotiationOutcome, Negotiator},
    peer_connection::{PeerConfig, PeerConnection, PeerError},
    session_error::SessionError,
    state_trail::SessionTrails,
};
use crate::settings::{ClientSettings, SessionSettings};
use crate::signaling::offer_transport::OfferTransport;
use crate::{sink_info, sink_warn};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

/// One started client session: a negotiated peer connection plus its control
/// channel.
///
/// Data-channel events are fed in by the owner through
/// [`Session::channel_opened`], [`Session::channel_message`] and
/// [`Session::channel_closed`].
pub struct Session<P: PeerConnection> {
    peer: P,
    control: Arc<Mutex<ControlChannel<P::Channel>>>,
    ping: Option<PingWorker>,
    trails: SessionTrails,
    outcome: NegotiationOutcome,
    settings: SessionSettings,
    log_sink: Arc<dyn LogSink>,
}

impl<P: PeerConnection> Session<P> {
    /// Builds the peer connection, opens the control channel and negotiates.
    ///
    /// Without local media, ICE is restarted and negotiation is deferred by the
    /// configured delay.
    ///
    /// # Errors
    /// Peer construction or any negotiation step failed.
    pub fn start<F, T>(
        make_peer: F,
        settings: &ClientSettings,
        transport: &T,
        log_sink: Arc<dyn LogSink>,
    ) -> Result<Self, SessionError>
    where
        F: FnOnce(&PeerConfig) -> Result<P, PeerError>,
        T: OfferTransport + ?Sized,
    {
        let config = settings.ice.peer_config();
        sink_info!(
            log_sink,
            "[SESSION] starting (bundle={}, ice servers={})",
            config.bundle_policy,
            config.ice_servers.len()
        );
        let mut peer = make_peer(&config)?;
        let mut trails = SessionTrails::new(&peer);

        let channel =
            peer.create_data_channel(&settings.data_channel.label, &settings.data_channel.init)?;
        let control = ControlChannel::new(channel, settings.targets, Arc::clone(&log_sink));

        if !settings.session.use_media {
            peer.restart_ice();
            thread::sleep(Duration::from_millis(settings.session.negotiate_delay_ms));
        }

        let negotiator = Negotiator::new(
            transport,
            &settings.codecs,
            &settings.ice,
            Arc::clone(&log_sink),
        );
        let outcome = negotiator.negotiate(&mut peer, &mut trails)?;

        Ok(Self {
            peer,
            control: Arc::new(Mutex::new(control)),
            ping: None,
            trails,
            outcome,
            settings: settings.session.clone(),
            log_sink,
        })
    }

    /// Announces the targets and starts pinging.
    ///
    /// # Errors
    /// The targets could not be sent.
    pub fn channel_opened(&mut self) -> Result<(), SessionError> {
        self.lock_control()?.on_open()?;
        if let Some(mut old) = self.ping.take() {
            old.stop();
        }
        self.ping = Some(PingWorker::spawn(
            Arc::clone(&self.control),
            Duration::from_millis(self.settings.ping_interval_ms),
            Arc::clone(&self.log_sink),
        ));
        Ok(())
    }

    /// # Errors
    /// The message carried a malformed payload.
    pub fn channel_message(&self, text: &str) -> Result<ControlMsg, SessionError> {
        Ok(self.lock_control()?.on_message(text)?)
    }

    pub fn channel_closed(&mut self) {
        if let Some(mut ping) = self.ping.take() {
            ping.stop();
        }
        match self.lock_control() {
            Ok(mut cc) => cc.on_close(),
            Err(_) => sink_warn!(self.log_sink, "[SESSION] channel closed with poisoned control"),
        }
    }

    /// Refreshes the state trails from the peer.
    pub fn observe_states(&mut self) {
        self.trails.observe(&self.peer);
    }

    /// Closes the data channel, stops transceivers and senders, and closes the
    /// connection after the grace delay. Returns the closed peer and the final
    /// state trails.
    pub fn stop(mut self) -> (P, SessionTrails) {
        if let Some(mut ping) = self.ping.take() {
            ping.stop();
        }
        match self.lock_control() {
            Ok(cc) => cc.close(),
            Err(_) => sink_warn!(self.log_sink, "[SESSION] stopping with poisoned control"),
        }
        self.peer.stop_transceivers();
        self.peer.stop_senders();
        thread::sleep(Duration::from_millis(self.settings.close_delay_ms));
        self.peer.close();
        self.trails.observe(&self.peer);
        sink_info!(
            self.log_sink,
            "[SESSION] stopped; ice {} / signaling {}",
            self.trails.ice_connection,
            self.trails.signaling
        );
        (self.peer, self.trails)
    }

    pub fn control(&self) -> Arc<Mutex<ControlChannel<P::Channel>>> {
        Arc::clone(&self.control)
    }

    pub const fn outcome(&self) -> &NegotiationOutcome {
        &self.outcome
    }

    pub const fn trails(&self) -> &SessionTrails {
        &self.trails
    }

    pub const fn peer(&self) -> &P {
        &self.peer
    }

    pub fn is_pinging(&self) -> bool {
        self.ping.as_ref().is_some_and(PingWorker::is_running)
    }

    fn lock_control(&self) -> Result<MutexGuard<'_, ControlChannel<P::Channel>>, SessionError> {
        self.control.lock().map_err(|_| SessionError::Poisoned)
    }
}
