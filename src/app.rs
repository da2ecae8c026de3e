//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the search results,
//! the active screen and the last playback snapshot.

mod model;

pub use model::*;
