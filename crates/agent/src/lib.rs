//! Insights engine for free-text customer interactions.
//!
//! Analysis is deterministic keyword matching over the note text: a short
//! summary, a sentiment label, follow-up action items and a fixed confidence
//! score. No model is called and nothing is persisted.

pub mod insights;

pub use insights::{analyze, Insights, InsightsEngine, Sentiment};
