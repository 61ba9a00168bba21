// src/domain/genre.rs
use serde::{Deserialize, Serialize};

/// A movie genre, e.g. "Drama"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    /// Store-assigned identifier
    pub id: i64,

    /// Unique by convention only
    pub name: String,
}

impl Genre {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
