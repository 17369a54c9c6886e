//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs (and the outbound wheel payload)
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain values to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CollectionQuery, CreateWheelRequest, WheelConfig, WheelEntry, WheelOptions};

pub use responses::{
    EventListResponse, GuildListing, HealthChecks, HealthResponse, MemberListResponse,
    PresentationEvent, ReadinessResponse, RelayResponse,
};
