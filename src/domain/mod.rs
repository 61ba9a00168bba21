// src/domain/mod.rs
//
// Catalog entities
//
// Plain immutable values. Repositories build fresh ones on every read and
// keep nothing.

pub mod genre;
pub mod movie;

pub use genre::Genre;
pub use movie::{Movie, NewMovie};
