//! Event entity - a guild activity (dungeon run, raid) and its participants

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::GuildId;

/// Guild event entity
///
/// `participants` is stored as JSON text; use [`Event::participant_list`] to decode it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub event_type: String,
    pub participants: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub guild: GuildId,
}

/// One entry of an event's participant list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub enabled: bool,
}

impl Event {
    /// Create a new Event with the given participants
    pub fn new(guild: GuildId, event_type: String, participants: &[Participant]) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            event_type,
            participants: serde_json::to_string(participants).unwrap_or_else(|_| "[]".to_string()),
            created_at: now,
            updated_at: now,
            guild,
        }
    }

    /// Decode the participants column
    ///
    /// An empty column decodes to an empty list.
    pub fn participant_list(&self) -> Result<Vec<Participant>, serde_json::Error> {
        if self.participants.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&self.participants)
    }

    /// Participants still eligible (e.g. for a raffle wheel)
    pub fn enabled_participants(&self) -> Result<Vec<Participant>, serde_json::Error> {
        Ok(self
            .participant_list()?
            .into_iter()
            .filter(|p| p.enabled)
            .collect())
    }

    #[inline]
    pub fn belongs_to(&self, guild: GuildId) -> bool {
        self.guild == guild
    }
}
