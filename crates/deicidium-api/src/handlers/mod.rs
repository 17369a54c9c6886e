//! HTTP request handlers
//!
//! Thin adapters from Axum extractors to the service layer.

pub mod countries;
pub mod dashboard;
pub mod health;
pub mod wheel;
