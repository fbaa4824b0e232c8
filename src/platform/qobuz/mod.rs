//! Qobuz adapter. Requires an application id (`key`).

pub mod adapter;
pub mod client;
pub mod dto;
pub mod permalink;

pub use client::{QobuzPlatform, descriptor};

pub const TAG: &str = "qobuz";
