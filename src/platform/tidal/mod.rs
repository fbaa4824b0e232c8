//! Tidal adapter. Requires an API token (`key`).

pub mod adapter;
pub mod client;
pub mod dto;
pub mod permalink;

pub use client::{TidalPlatform, descriptor};

pub const TAG: &str = "tidal";
