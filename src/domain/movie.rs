// src/domain/movie.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Genre;

/// A movie that has not been persisted yet
///
/// Carries everything except the id, which only the store can assign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub release_date: NaiveDate,
    pub genre: Genre,
    /// Running time in minutes
    pub duration: u32,
    pub director: String,
    pub summary: String,
}

/// A persisted movie with its genre fully loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    pub genre: Genre,
    /// Running time in minutes
    pub duration: u32,
    pub director: String,
    pub summary: String,
}

impl NewMovie {
    pub fn new(
        title: impl Into<String>,
        release_date: NaiveDate,
        genre: Genre,
        duration: u32,
        director: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            release_date,
            genre,
            duration,
            director: director.into(),
            summary: summary.into(),
        }
    }
}

impl Movie {
    /// Combine an unsaved movie with the id the store generated for it
    pub fn from_new(id: i64, movie: &NewMovie) -> Self {
        Self {
            id,
            title: movie.title.clone(),
            release_date: movie.release_date,
            genre: movie.genre.clone(),
            duration: movie.duration,
            director: movie.director.clone(),
            summary: movie.summary.clone(),
        }
    }
}
