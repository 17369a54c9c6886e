//! # deicidium-service
//!
//! Application layer: guild resolution, guild-scoped collection fetches,
//! the country reference list and the wheel client/relay, plus DTOs.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::*;
