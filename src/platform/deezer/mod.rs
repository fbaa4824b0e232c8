//! Deezer public API adapter (no credentials needed).

pub mod adapter;
pub mod client;
pub mod dto;
pub mod permalink;

pub use client::{DeezerPlatform, descriptor};

pub const TAG: &str = "deezer";
