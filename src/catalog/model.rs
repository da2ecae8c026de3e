use serde::Deserialize;

/// A playable preview and the metadata shown next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: u64,
    pub title: String,
    pub artist: String,
    pub artwork_url: Option<String>,
    /// Where the preview audio lives: an http(s) URL, a `file://` URI or a path.
    pub preview_url: String,
}

/// Response envelope of the search endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub result_count: usize,
    #[serde(default)]
    pub results: Vec<RawTrack>,
}

/// One `results[]` entry. Every field is optional upstream (podcasts,
/// music videos and region-locked songs leave some of them out).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTrack {
    pub track_id: Option<u64>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub artwork_url100: Option<String>,
    pub preview_url: Option<String>,
}

impl RawTrack {
    /// Convert into a `Track`, dropping records that cannot be played.
    pub(crate) fn into_track(self) -> Option<Track> {
        let id = self.track_id?;
        let preview_url = self.preview_url.filter(|u| !u.trim().is_empty())?;
        Some(Track {
            id,
            title: self
                .track_name
                .unwrap_or_else(|| "Untitled".to_string()),
            artist: self
                .artist_name
                .unwrap_or_else(|| "Unknown artist".to_string()),
            artwork_url: self.artwork_url100,
            preview_url,
        })
    }
}
