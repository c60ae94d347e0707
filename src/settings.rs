use crate::config::Config;
use crate::control::{data_channel::DataChannelInit, stream_targets::StreamTargets};
use crate::log::logger::LogSettings;
use crate::session::{
    codec_choice::CodecChoice,
    peer_connection::{BundlePolicy, GOOGLE_STUN, IceServer, PeerConfig},
};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_OFFER_URL: &str = "http://127.0.0.1:8080/offer";
const DEFAULT_DC_PARAMETERS: &str = r#"{"ordered": true}"#;

/// `[Signaling]`: where offers are posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalingSettings {
    pub offer_url: String,
    /// PEM bundle trusted instead of the platform roots for `https` endpoints.
    pub ca_pem: Option<PathBuf>,
    pub timeout_ms: u64,
}

impl Default for SignalingSettings {
    fn default() -> Self {
        Self {
            offer_url: DEFAULT_OFFER_URL.to_owned(),
            ca_pem: None,
            timeout_ms: 10_000,
        }
    }
}

/// `[Ice]`: STUN servers and how long to wait for candidate gathering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IceSettings {
    pub use_stun: bool,
    pub stun_urls: Vec<String>,
    pub gathering_timeout_ms: u64,
    pub gathering_poll_ms: u64,
}

impl Default for IceSettings {
    fn default() -> Self {
        Self {
            use_stun: false,
            stun_urls: vec![GOOGLE_STUN.to_owned()],
            gathering_timeout_ms: 10_000,
            gathering_poll_ms: 50,
        }
    }
}

impl IceSettings {
    /// Max-bundle, plus the STUN servers when enabled.
    #[must_use]
    pub fn peer_config(&self) -> PeerConfig {
        let ice_servers = if self.use_stun && !self.stun_urls.is_empty() {
            vec![IceServer {
                urls: self.stun_urls.clone(),
            }]
        } else {
            Vec::new()
        };
        PeerConfig {
            bundle_policy: BundlePolicy::MaxBundle,
            ice_servers,
        }
    }

    pub const fn gathering_timeout(&self) -> Duration {
        Duration::from_millis(self.gathering_timeout_ms)
    }

    pub const fn gathering_poll(&self) -> Duration {
        Duration::from_millis(self.gathering_poll_ms)
    }
}

/// `[Codecs]`: per-kind codec selection, `default` meaning no filtering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodecSettings {
    pub audio: CodecChoice,
    pub video: CodecChoice,
}

/// `[DataChannel]`: label and the JSON creation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataChannelSettings {
    pub label: String,
    pub init: DataChannelInit,
}

impl Default for DataChannelSettings {
    fn default() -> Self {
        Self {
            label: "chat".to_owned(),
            init: DataChannelInit {
                ordered: Some(true),
                ..DataChannelInit::default()
            },
        }
    }
}

/// `[Session]`: negotiation mode and timings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Local tracks were added; otherwise ICE is restarted and negotiation is
    /// deferred by `negotiate_delay_ms`.
    pub use_media: bool,
    pub negotiate_delay_ms: u64,
    pub ping_interval_ms: u64,
    /// Grace period between stopping transceivers and closing the connection.
    pub close_delay_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            use_media: false,
            negotiate_delay_ms: 100,
            ping_interval_ms: 1000,
            close_delay_ms: 500,
        }
    }
}

/// Everything the offer client reads from its configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientSettings {
    pub signaling: SignalingSettings,
    pub ice: IceSettings,
    pub codecs: CodecSettings,
    pub data_channel: DataChannelSettings,
    pub targets: StreamTargets,
    pub session: SessionSettings,
    pub logging: LogSettings,
}

impl ClientSettings {
    /// Missing keys take their defaults; unparsable numbers fall back too.
    ///
    /// # Errors
    /// `[DataChannel] parameters` is not valid JSON for a data channel.
    pub fn from_config(config: &Config) -> Result<Self, String> {
        let d = Self::default();

        let signaling = SignalingSettings {
            offer_url: config
                .get_non_empty_or_default("Signaling", "offer_url", &d.signaling.offer_url)
                .to_owned(),
            ca_pem: config.get_non_empty("Signaling", "ca_pem").map(PathBuf::from),
            timeout_ms: config
                .get_parsed("Signaling", "timeout_ms")
                .unwrap_or(d.signaling.timeout_ms),
        };

        let ice = IceSettings {
            use_stun: config.get_parsed("Ice", "use_stun").unwrap_or(d.ice.use_stun),
            stun_urls: config
                .get_non_empty("Ice", "stun_urls")
                .map_or(d.ice.stun_urls, |v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|u| !u.is_empty())
                        .map(str::to_owned)
                        .collect()
                }),
            gathering_timeout_ms: config
                .get_parsed("Ice", "gathering_timeout_ms")
                .unwrap_or(d.ice.gathering_timeout_ms),
            gathering_poll_ms: config
                .get_parsed("Ice", "gathering_poll_ms")
                .unwrap_or(d.ice.gathering_poll_ms),
        };

        let codecs = CodecSettings {
            audio: config.get_parsed("Codecs", "audio").unwrap_or_default(),
            video: config.get_parsed("Codecs", "video").unwrap_or_default(),
        };

        let parameters =
            config.get_non_empty_or_default("DataChannel", "parameters", DEFAULT_DC_PARAMETERS);
        let init: DataChannelInit = serde_json::from_str(parameters)
            .map_err(|e| format!("[DataChannel] parameters: {e}"))?;
        let data_channel = DataChannelSettings {
            label: config
                .get_non_empty_or_default("DataChannel", "label", &d.data_channel.label)
                .to_owned(),
            init,
        };

        let targets = StreamTargets::new(
            config
                .get_parsed("Stream", "bitrate_kbps")
                .unwrap_or(d.targets.bitrate_kbps()),
            config.get_parsed("Stream", "fps").unwrap_or(d.targets.fps()),
            config.get_parsed("Stream", "height").unwrap_or(d.targets.height()),
        );

        let session = SessionSettings {
            use_media: config
                .get_parsed("Session", "use_media")
                .unwrap_or(d.session.use_media),
            negotiate_delay_ms: config
                .get_parsed("Session", "negotiate_delay_ms")
                .unwrap_or(d.session.negotiate_delay_ms),
            ping_interval_ms: config
                .get_parsed("Session", "ping_interval_ms")
                .unwrap_or(d.session.ping_interval_ms),
            close_delay_ms: config
                .get_parsed("Session", "close_delay_ms")
                .unwrap_or(d.session.close_delay_ms),
        };

        Ok(Self {
            signaling,
            ice,
            codecs,
            data_channel,
            targets,
            session,
            logging: LogSettings::from_config(config, "offer_client"),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    const SAMPLE: &str = r#"
[Signaling]
offer_url = https://media.example:8443/offer
timeout_ms = 2500

[Ice]
use_stun = true

[Codecs]
audio = opus
video = default

[DataChannel]
parameters = {"ordered": false, "maxRetransmits": 0}

[Stream]
bitrate_kbps = 2500
height = 700

[Session]
close_delay_ms = 0
"#;

    #[test]
    fn reads_every_section() {
        let s = ClientSettings::from_config(&Config::parse(SAMPLE)).unwrap();
        assert_eq!(s.signaling.offer_url, "https://media.example:8443/offer");
        assert_eq!(s.signaling.timeout_ms, 2500);
        assert_eq!(s.codecs.audio, CodecChoice::Named("opus".into()));
        assert_eq!(s.codecs.video, CodecChoice::Default);
        assert_eq!(s.data_channel.label, "chat");
        assert_eq!(s.data_channel.init.ordered, Some(false));
        assert_eq!(s.data_channel.init.max_retransmits, Some(0));
        assert_eq!(s.targets.bitrate_kbps(), 2500);
        assert_eq!(s.targets.fps(), 30);
        assert_eq!(s.targets.height(), 480);
        assert_eq!(s.session.close_delay_ms, 0);
        assert_eq!(s.session.ping_interval_ms, 1000);
        assert_eq!(s.logging.file_prefix.as_deref(), Some("offer_client"));
    }

    #[test]
    fn stun_only_when_enabled() {
        let s = ClientSettings::from_config(&Config::parse(SAMPLE)).unwrap();
        let pc = s.ice.peer_config();
        assert_eq!(pc.bundle_policy, BundlePolicy::MaxBundle);
        assert_eq!(pc.ice_servers[0].urls, vec![GOOGLE_STUN.to_owned()]);

        let plain = ClientSettings::from_config(&Config::empty()).unwrap();
        assert!(plain.ice.peer_config().ice_servers.is_empty());
        assert_eq!(plain, ClientSettings {
            logging: LogSettings::from_config(&Config::empty(), "offer_client"),
            ..ClientSettings::default()
        });
    }

    #[test]
    fn bad_channel_parameters_are_rejected() {
        let cfg = Config::parse("[DataChannel]\nparameters = {ordered}\n");
        let err = ClientSettings::from_config(&cfg).unwrap_err();
        assert!(err.starts_with("[DataChannel] parameters"));
    }
}
