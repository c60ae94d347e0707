use crate::log::log_sink::LogSink;
use crate::settings::SignalingSettings;
use crate::signaling::{
    offer_transport::OfferTransport,
    session_description::{SdpType, SessionDescription},
    signaling_error::SignalingError,
    tls::pinned_client_config,
};
use crate::{sink_debug, sink_info, sink_trace, sink_warn};
use reqwest::blocking::Client;
use std::sync::Arc;
use std::time::Duration;

/// Posts offers as JSON to the companion server's `/offer` endpoint.
pub struct HttpOfferClient {
    client: Client,
    offer_url: String,
    log_sink: Arc<dyn LogSink>,
}

impl HttpOfferClient {
    /// # Errors
    /// The pinned CA cannot be loaded or the HTTP client cannot be built.
    pub fn new(
        settings: &SignalingSettings,
        log_sink: Arc<dyn LogSink>,
    ) -> Result<Self, SignalingError> {
        let mut builder = Client::builder().timeout(Duration::from_millis(settings.timeout_ms));
        if let Some(ca) = &settings.ca_pem {
            sink_info!(log_sink, "[SIGNALING] pinning CA from {}", ca.display());
            builder = builder.use_preconfigured_tls(pinned_client_config(ca)?);
        }
        Ok(Self {
            client: builder.build()?,
            offer_url: settings.offer_url.clone(),
            log_sink,
        })
    }

    pub fn offer_url(&self) -> &str {
        &self.offer_url
    }
}

impl OfferTransport for HttpOfferClient {
    fn send_offer(&self, offer: &SessionDescription) -> Result<SessionDescription, SignalingError> {
        sink_info!(
            self.log_sink,
            "[SIGNALING] POST {} ({} bytes of SDP)",
            self.offer_url,
            offer.sdp.len()
        );

        let response = self.client.post(&self.offer_url).json(offer).send()?;
        let status = response.status();
        if !status.is_success() {
            sink_warn!(self.log_sink, "[SIGNALING] offer rejected: {}", status);
            return Err(SignalingError::Status(status.as_u16()));
        }

        let body = response.text()?;
        sink_trace!(self.log_sink, "[SIGNALING] response body: {}", body);
        let answer: SessionDescription = serde_json::from_str(&body)?;
        if answer.sdp_type != SdpType::Answer {
            return Err(SignalingError::UnexpectedType(answer.sdp_type));
        }

        sink_debug!(
            self.log_sink,
            "[SIGNALING] answer received ({} bytes of SDP)",
            answer.sdp.len()
        );
        Ok(answer)
    }
}
