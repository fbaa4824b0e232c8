//! tunelink - resolve music links and search streaming platforms together.
//!
//! Given a track, album or artist URL from a supported platform,
//! [`Engine::resolve_permalink`] turns it into a normalized
//! [`MusicalEntity`]; [`Engine::aggregate_search`] runs one free-text query
//! against several platforms concurrently and merges the answers into a
//! single ranked list.
//!
//! Supported platforms: Spotify, Deezer, Qobuz, Tidal and 7digital.
//!
//! [`MusicalEntity`]: model::MusicalEntity

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod model;
pub mod platform;
pub mod resolver;
pub mod search;
#[cfg(test)]
pub mod test_utils;
pub mod uid;

pub use engine::Engine;
pub use error::{Error, Result};
