//! Request DTOs for API endpoints
//!
//! Inbound DTOs implement `Deserialize` and `Validate` for input validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use deicidium_core::entities::Participant;
use deicidium_core::value_objects::{QueryOptions, SortOrder};

/// Maximum accepted `limit` for collection queries
pub const MAX_COLLECTION_LIMIT: u32 = 1000;

pub const DEFAULT_WHEEL_TITLE: &str = "Deicidium Guild Raffle";
pub const DEFAULT_WHEEL_DESCRIPTION: &str = "Spin the Wheel of Destiny for your chance to win!";

/// Share mode requested for every wheel
pub const WHEEL_SHARE_MODE: &str = "copyable";

// ============================================================================
// Collection Requests
// ============================================================================

/// Query string of `GET /api/members` and `GET /api/events`
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct CollectionQuery {
    #[serde(default)]
    pub sort: SortOrder,

    /// `0` means no limit
    #[validate(range(max = 1000, message = "limit must be between 0 and 1000"))]
    pub limit: Option<u32>,
}

impl CollectionQuery {
    pub fn into_options(self) -> QueryOptions {
        QueryOptions {
            sort: self.sort,
            limit: self.limit,
        }
    }
}

// ============================================================================
// Wheel Requests
// ============================================================================

/// One slice of the wheel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelEntry {
    pub text: String,
}

impl WheelEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<&Participant> for WheelEntry {
    fn from(participant: &Participant) -> Self {
        Self::new(participant.name.clone())
    }
}

/// Caller-facing options for creating a wheel
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelOptions {
    pub api_key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub entries: Vec<WheelEntry>,
}

impl WheelOptions {
    pub fn new(api_key: impl Into<String>, entries: Vec<WheelEntry>) -> Self {
        Self {
            api_key: api_key.into(),
            title: None,
            description: None,
            entries,
        }
    }

    /// One entry per enabled participant, in list order
    pub fn from_participants(api_key: impl Into<String>, participants: &[Participant]) -> Self {
        let entries = participants
            .iter()
            .filter(|p| p.enabled)
            .map(WheelEntry::from)
            .collect();
        Self::new(api_key, entries)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Wheel configuration as the raffle API expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WheelConfig {
    pub title: String,
    pub description: String,
    pub entries: Vec<WheelEntry>,
}

/// Body posted to the relay endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWheelRequest {
    pub wheel_config: WheelConfig,
    pub api_key: String,
    pub share_mode: &'static str,
}

impl From<WheelOptions> for CreateWheelRequest {
    fn from(options: WheelOptions) -> Self {
        Self {
            wheel_config: WheelConfig {
                title: options.title.unwrap_or_else(|| DEFAULT_WHEEL_TITLE.to_string()),
                description: options
                    .description
                    .unwrap_or_else(|| DEFAULT_WHEEL_DESCRIPTION.to_string()),
                entries: options.entries,
            },
            api_key: options.api_key,
            share_mode: WHEEL_SHARE_MODE,
        }
    }
}
