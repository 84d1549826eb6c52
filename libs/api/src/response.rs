use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Source {
    pub id: i32,
    pub display_name: String,
    pub filename: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Channel {
    pub id: i32,
    pub stream_path: String,
    pub source_id: Option<i32>,
    pub pos: i32,
    /// Playback state is not tracked, this is always `false`.
    pub is_playing: bool,
}
