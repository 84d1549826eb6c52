use crate::request::{CreateSourceQuery, Pagination};

pub const SOURCES: &str = "/sources/";
pub const CHANNELS: &str = "/channels/";

pub fn source(id: i32) -> String {
    format!("/sources/{}", id)
}

pub fn channel(id: i32) -> String {
    format!("/channels/{}", id)
}

pub fn sources_page(qry: Pagination) -> String {
    with_query(SOURCES, qry)
}

pub fn sources_create(display_name: &str) -> String {
    with_query(
        SOURCES,
        CreateSourceQuery {
            display_name: Some(display_name.to_string()),
        },
    )
}

pub fn channels_page(qry: Pagination) -> String {
    with_query(CHANNELS, qry)
}

fn with_query<T: serde::Serialize>(path: &str, qry: T) -> String {
    match serde_html_form::to_string(qry) {
        Ok(query) if !query.is_empty() => format!("{}?{}", path, query),
        _ => path.to_string(),
    }
}
