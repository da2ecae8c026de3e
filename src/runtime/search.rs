use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::catalog::{Track, TrackSearch};

/// A finished search, tagged with the id the app handed out for it.
pub struct SearchDone {
    pub seq: u64,
    pub result: Result<Vec<Track>, String>,
}

/// Run `term` against `searcher` on a worker thread and report back on `tx`.
pub fn spawn_search(
    searcher: Arc<dyn TrackSearch + Send + Sync>,
    seq: u64,
    term: String,
    tx: Sender<SearchDone>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let result = searcher.search(&term).map_err(|e| {
            warn!(term = %term, "search failed: {e}");
            e.to_string()
        });
        if tx.send(SearchDone { seq, result }).is_err() {
            debug!(seq, "search finished after the app stopped listening");
        }
    })
}
