use std::fmt;

use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Source,
    Channel,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Source => write!(f, "Source"),
            Kind::Channel => write!(f, "Channel"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} with id {id} does not exist")]
    NotFound { kind: Kind, id: i32 },
    #[error("{kind} with {field} '{value}' already exists")]
    AlreadyExists {
        kind: Kind,
        field: &'static str,
        value: String,
    },
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl StoreError {
    pub fn not_found(kind: Kind, id: i32) -> Self {
        StoreError::NotFound { kind, id }
    }

    pub fn already_exists<T>(kind: Kind, field: &'static str, value: T) -> Self
    where
        T: ToString,
    {
        StoreError::AlreadyExists {
            kind,
            field,
            value: value.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
