// src/error/types.rs
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The connection source could not hand out a connection
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A repository statement failed; `context` names the operation and input
    #[error("Error while {context}: {source}")]
    Statement {
        context: String,
        #[source]
        source: rusqlite::Error,
    },

    /// The insert ran but the store returned no generated key
    #[error("Failed to retrieve generated id: {0}")]
    GeneratedKey(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    pub fn statement(context: impl Into<String>, source: rusqlite::Error) -> Self {
        AppError::Statement {
            context: context.into(),
            source,
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Connection(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
