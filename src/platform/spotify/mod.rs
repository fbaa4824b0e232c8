//! Spotify Web API adapter.
//!
//! Tracks are scored by Spotify's own popularity figure; albums by
//! position. See: https://developer.spotify.com/documentation/web-api

pub mod adapter;
pub mod client;
pub mod dto;
pub mod permalink;

pub use client::{SpotifyPlatform, descriptor};

pub const TAG: &str = "spotify";
