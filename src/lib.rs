//! hidden-object - find-the-hidden-object game: polygon hit testing,
//! pan/zoom click mapping, puzzle catalogs and the solo game loop

pub mod authoring;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod game;
pub mod geometry;
