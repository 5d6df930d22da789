//! Core engine: résumé field extraction, per-field confidence scoring, and
//! job classification / deduplication / candidate-to-job matching.
//!
//! This crate owns no I/O surface. The web API, persistence layer, crawler
//! scheduling, and OCR/text extraction live in separate services that feed
//! plain strings and job records in and take structured results out.

pub mod config;
pub mod confidence;
pub mod engine;
pub mod errors;
pub mod extraction;
pub mod jobs;
pub mod models;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes structured logging for binaries embedding the engine.
/// Honors `RUST_LOG`; falls back to the given default filter.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
