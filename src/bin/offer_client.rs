//! Posts a recorded local offer to the companion server and prints the answer.
//!
//! The offer file holds either raw SDP or the `{"sdp": ..., "type": "offer"}`
//! JSON a browser logs; codecs are filtered per the `[Codecs]` section first.

use rtcoffer::{
    config::Config, logger_info,
    log::{log_sink::LogSink, logger::Logger},
    session::{RecordedPeer, Session},
    settings::ClientSettings,
    signaling::{HttpOfferClient, SessionDescription},
};
use std::sync::Arc;
use std::{env, fs, process};

fn load_offer(path: &str) -> Result<String, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    if text.trim_start().starts_with('{') {
        let desc: SessionDescription =
            serde_json::from_str(&text).map_err(|e| format!("{path}: {e}"))?;
        Ok(desc.sdp)
    } else {
        Ok(text)
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let Some(offer_path) = args.get(1) else {
        eprintln!("Usage: {} <OFFER_FILE> [CONFIG]", args[0]);
        process::exit(2);
    };

    let config_result = match args.get(2) {
        Some(path) => Config::load(path),
        None => Config::load("offer_client.conf").or_else(|_| Config::load("offer_client_default.conf")),
    };
    let config = config_result.unwrap_or_else(|e| {
        eprintln!("Error loading config: {e}. Using empty config.");
        Config::empty()
    });

    let settings = match ClientSettings::from_config(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[offer_client] bad config: {e}");
            process::exit(1);
        }
    };

    let offer = match load_offer(offer_path) {
        Ok(sdp) => sdp,
        Err(e) => {
            eprintln!("[offer_client] {e}");
            process::exit(1);
        }
    };

    let logger = Logger::start(&settings.logging);
    let log_sink: Arc<dyn LogSink> = Arc::new(logger.handle());
    eprintln!("[offer_client] logging to {}", logger.file_path().display());
    logger_info!(logger, "[MAIN] offer_client starting with {}", offer_path);

    let code = run(&settings, offer, Arc::clone(&log_sink));
    logger_info!(logger, "[MAIN] offer_client exiting with {}", code);

    drop(log_sink);
    logger.shutdown();
    process::exit(code);
}

fn run(settings: &ClientSettings, offer: String, log_sink: Arc<dyn LogSink>) -> i32 {
    let transport = match HttpOfferClient::new(&settings.signaling, Arc::clone(&log_sink)) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("[offer_client] {e}");
            return 1;
        }
    };
    eprintln!("[offer_client] posting to {}", transport.offer_url());

    let session = Session::start(
        |peer_config| Ok(RecordedPeer::with_config(peer_config.clone(), offer)),
        settings,
        &transport,
        log_sink,
    );
    let session = match session {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[offer_client] negotiation failed: {e}");
            return 1;
        }
    };

    println!("--- offer ---");
    print!("{}", session.outcome().offer_sdp);
    println!("--- answer ---");
    print!("{}", session.outcome().answer_sdp);

    let (_, trails) = session.stop();
    println!("--- states ---");
    println!("ice gathering:  {}", trails.ice_gathering);
    println!("ice connection: {}", trails.ice_connection);
    println!("signaling:      {}", trails.signaling);
    0
}
