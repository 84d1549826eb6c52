use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

pub const DEFAULT_MAX_STR_LENGTH: usize = 255;
pub const DEFAULT_PAGE_LIMIT: u64 = 100;
pub const MAX_PAGE_LIMIT: u64 = 1000;
/// Offsets are bound as signed 64-bit integers by the database drivers.
pub const MAX_PAGE_SKIP: u64 = i64::MAX as u64;

/// Runtime bounds applied to every client supplied string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_str_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_str_length: DEFAULT_MAX_STR_LENGTH,
        }
    }
}

/// Error code raised by [`within_max_length`].
pub const TOO_LONG: &str = "too_long";

/// Lengths count characters, not bytes.
pub fn within_max_length(value: &str, limits: &Limits) -> Result<(), ValidationError> {
    let length = value.chars().count();
    if length <= limits.max_str_length {
        return Ok(());
    }
    let mut err = ValidationError::new(TOO_LONG);
    err.add_param(Cow::from("max"), &limits.max_str_length);
    err.add_param(Cow::from("length"), &length);
    Err(err)
}

#[derive(Serialize, Deserialize, Validate, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    #[serde(default)]
    #[validate(range(max = 9223372036854775807u64))]
    pub skip: u64,
    #[serde(default = "default_page_limit")]
    #[validate(range(max = 1000))]
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

fn default_page_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

#[derive(Serialize, Deserialize, Validate, Clone, Debug)]
#[validate(context = Limits)]
pub struct CreateSource {
    #[validate(custom(function = "within_max_length", use_context))]
    pub display_name: String,
}

/// Query form of [`CreateSource`], `POST /sources/?display_name=...`.
/// When both are sent the query string wins over the JSON body.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CreateSourceQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Serialize, Deserialize, Validate, Clone, Debug, Default)]
#[validate(context = Limits)]
pub struct UpdateSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "within_max_length", use_context))]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "within_max_length", use_context))]
    pub filename: Option<String>,
}

#[derive(Serialize, Deserialize, Validate, Clone, Debug)]
#[validate(context = Limits)]
pub struct CreateChannel {
    #[validate(custom(function = "within_max_length", use_context))]
    pub stream_path: String,
    #[serde(default)]
    pub source_id: Option<i32>,
    /// Accepted for compatibility, a new channel always starts at 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<i32>,
}

#[derive(Serialize, Deserialize, Validate, Clone, Debug, Default)]
#[validate(context = Limits)]
pub struct UpdateChannel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "within_max_length", use_context))]
    pub stream_path: Option<String>,
    /// `None` leaves the reference untouched, `Some(None)` clears it.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_id: Option<Option<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_playing: Option<bool>,
}

fn double_option<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Deserialize::deserialize(de).map(Some)
}
