//! Error types for scrape operations.
//!
//! Structural assumptions about page markup live behind these variants;
//! when one fires, the page no longer matches the shape the extractor
//! depends on and the active mode aborts.

/// Error type for markup lookups.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// No element in the searched scope matched the selector.
    #[error("no element matched selector `{selector}`")]
    TagNotFound { selector: String },

    /// A literal text marker the page layout depends on is missing.
    #[error("marker `{marker}` not found on page")]
    MarkerNotFound { marker: &'static str },
}
