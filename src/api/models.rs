use serde::{Deserialize, Serialize};

/// One subtitle stream embedded in a video, as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleTrack {
    pub language: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "streamIndex")]
    pub stream_index: Option<u32>,
    #[serde(default)]
    pub codec: Option<String>,
}

impl SubtitleTrack {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            title: None,
            stream_index: None,
            codec: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VideoInfo {
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub bitrate: u64,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub subtitles: Vec<SubtitleTrack>,
}

/// Body of `GET /api/video`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResponse {
    #[serde(default)]
    pub path: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub info: VideoInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Directory,
    Video,
}

/// An entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseItem {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub duration: Option<f64>,
}

impl BrowseItem {
    pub fn is_playable(&self) -> bool {
        self.kind == ItemKind::Video
    }
}

/// Body of `GET /api/browse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Listing {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub items: Vec<BrowseItem>,
}

/// Strip the extension and turn `_`/`-` into spaces.
pub fn display_name(file_name: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    };
    stem.replace(['_', '-'], " ")
}

/// `MM:SS`, or an ellipsis while the server has not probed the file yet.
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(secs) if secs.is_finite() && secs > 0.0 => {
            let total = secs as u64;
            format!("{:02}:{:02}", total / 60, total % 60)
        }
        _ => "⋯".to_string(),
    }
}

/// Parent directory of a browse path; the root is its own parent.
pub fn parent_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => trimmed[..idx].to_string(),
    }
}
