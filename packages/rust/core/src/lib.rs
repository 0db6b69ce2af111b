//! Website enrichment pipeline for vc-scout.
//!
//! This crate ties together fetching, text normalization, the heuristic
//! extractors and signal inference into one operation, [`Enricher::enrich`],
//! backed by an injected [`EnrichmentStore`].

pub mod enricher;
pub mod keywords;
pub mod signals;
pub mod store;
pub mod summary;
pub mod topics;

pub use enricher::{Enricher, analyze_page};
pub use keywords::extract_keywords;
pub use signals::infer_signals;
pub use store::{EnrichmentStore, FlightGuard, FlightPermit, MemoryStore};
pub use summary::build_summary;
pub use topics::build_what_they_do;
