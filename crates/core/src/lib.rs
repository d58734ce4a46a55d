//! Core types and configuration for the FII screening pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - Raw listing table and fund record types
//! - Filter criteria and aggregate summaries
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod types;

pub use config::ScreenerConfig;
pub use error::{Error, Result};
pub use types::*;
