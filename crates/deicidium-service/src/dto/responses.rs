//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use deicidium_core::entities::{Event, Guild, Member};

// ============================================================================
// Guild Responses
// ============================================================================

/// Instruction for the presentation layer, produced instead of navigating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PresentationEvent {
    /// Go back to the landing page
    RedirectHome { replace: bool },
}

impl PresentationEvent {
    /// Target path of the event
    pub fn path(&self) -> &'static str {
        match self {
            Self::RedirectHome { .. } => "/",
        }
    }
}

/// Guilds of the current user
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GuildListing {
    pub guilds: Vec<Guild>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate: Option<PresentationEvent>,
}

impl GuildListing {
    pub fn new(guilds: Vec<Guild>) -> Self {
        Self {
            guilds,
            navigate: None,
        }
    }

    /// Empty listing asking the client to go home (failed lookup)
    pub fn redirect_home() -> Self {
        Self {
            guilds: Vec::new(),
            navigate: Some(PresentationEvent::RedirectHome { replace: true }),
        }
    }
}

// ============================================================================
// Collection Responses
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemberListResponse {
    pub members: Vec<Member>,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventListResponse {
    pub events: Vec<Event>,
    pub total: u64,
}

// ============================================================================
// Wheel Responses
// ============================================================================

/// Upstream answer of the raffle API, passed through unchanged
#[derive(Debug, Clone, PartialEq)]
pub struct RelayResponse {
    pub status: u16,
    pub body: Value,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
