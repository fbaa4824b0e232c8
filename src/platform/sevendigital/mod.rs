//! 7digital adapter. Requires an OAuth consumer key and secret.
//!
//! The only XML provider: responses go through `fetch::xml` first, which
//! is why the DTOs here spell attributes as `@name`.

pub mod adapter;
pub mod client;
pub mod dto;
pub mod permalink;

pub use client::{SevenDigitalPlatform, descriptor};

pub const TAG: &str = "sevendigital";
