use crate::entity::{channel, source};

impl From<source::Model> for api::response::Source {
    fn from(value: source::Model) -> Self {
        api::response::Source {
            id: value.id,
            display_name: value.display_name,
            filename: value.filename,
        }
    }
}

impl From<channel::Model> for api::response::Channel {
    fn from(value: channel::Model) -> Self {
        api::response::Channel {
            id: value.id,
            stream_path: value.stream_path,
            source_id: value.source_id,
            pos: value.pos,
            is_playing: false,
        }
    }
}
