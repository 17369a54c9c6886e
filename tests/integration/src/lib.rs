//! Integration test utilities for the guild dashboard
//!
//! Runs the real axum application on a local port with in-memory
//! repositories, and stands up throwaway axum servers in place of the
//! countries and raffle APIs.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
pub use upstream::*;
