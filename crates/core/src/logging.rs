//! Tracing subscriber setup shared by pipeline consumers.
//!
//! The pipeline crates emit `tracing` events but never install a subscriber;
//! the embedding application calls [`init`] once at startup.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, falling back to
/// `default_level` (e.g. `"info"` or `"fii_ingestion=debug"`). Calling this
/// more than once is harmless; later calls leave the first subscriber in
/// place.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
