//! Shared types, error model, and configuration for vc-scout.
//!
//! This crate is the foundation depended on by all other vc-scout crates.
//! It provides:
//! - [`ScoutError`] — the unified error type
//! - Domain types ([`NormalizedUrl`], [`RawPage`], [`EnrichmentResult`], [`SignalRecord`])
//! - Configuration ([`AppConfig`], [`EnrichmentConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_USER_AGENT, EnrichmentConfig, FetchConfig, ServerConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, ScoutError};
pub use types::{
    EnrichmentResult, NormalizedUrl, RawPage, SignalRecord, SignalType, Source, SourceType,
    coerce_scheme,
};
