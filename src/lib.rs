//! rtcoffer is the native side of a WebRTC demo client: it narrows SDP offers to
//! chosen codecs and runs the offer/answer exchange with a companion server.
//!
//! It provides two binaries:
//! - `sdp_filter`: Filters an SDP file down to one audio and/or video codec, or lists its codecs.
//! - `offer_client`: Posts a recorded offer to the server's `/offer` endpoint and prints the answer.
//!
//! The peer connection itself (ICE, DTLS, media) is an external collaborator
//! reached through the [`session::PeerConnection`] trait.

/// Handles configuration loading and management.
pub mod config;
/// Data-channel control protocol (ping/pong, encoding targets, stats).
pub mod control;
/// Logging utilities for the application.
pub mod log;
/// SDP line parsing and codec filtering.
pub mod sdp;
/// Peer-connection session: negotiation, state trails, start and stop.
pub mod session;
/// Typed client settings read from the configuration file.
pub mod settings;
/// Offer/answer transport to the signaling endpoint.
pub mod signaling;
