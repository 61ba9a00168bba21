// src/repositories/mod.rs
//
// Repository layer
//
// RULES:
// - Repositories are plain data mappers
// - One connection per call, released before returning
// - Values are always bound as parameters, never spliced into SQL
// - Columns are read by name

pub mod genre_repository;
pub mod movie_repository;
mod row_mapping;

#[cfg(test)]
pub(crate) mod test_support;

pub use genre_repository::{GenreRepository, SqliteGenreRepository};
pub use movie_repository::{MovieRepository, SqliteMovieRepository};
