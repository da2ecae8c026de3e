//! Track catalog: the `Track` model and the search collaborators that
//! produce it.
//!
//! Tracks are immutable once returned from a search; the rest of the
//! program shares them behind `Arc`.

mod display;
mod itunes;
mod model;

pub use display::display_from_fields;
pub use itunes::ItunesSearch;
pub use model::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search endpoint returned status {0}")]
    Status(u16),
    #[error("malformed search response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A free-text track search against some catalog.
pub trait TrackSearch {
    fn search(&self, term: &str) -> Result<Vec<Track>, SearchError>;
}
