//! Member entity - a character roster entry belonging to one guild

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::GuildId;

/// Guild member entity
///
/// Created and updated by administrative flows outside this service; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub class: String,
    pub stat_atk: Option<i32>,
    pub stat_def: Option<i32>,
    pub stat_acc: Option<i32>,
    pub growth_rate: Option<String>,
    pub grade: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub guild: GuildId,
}

impl Member {
    /// Create a new Member with no recorded stats
    pub fn new(guild: GuildId, name: String, class: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            class,
            stat_atk: None,
            stat_def: None,
            stat_acc: None,
            growth_rate: None,
            grade: None,
            created_at: Utc::now(),
            guild,
        }
    }

    #[inline]
    pub fn belongs_to(&self, guild: GuildId) -> bool {
        self.guild == guild
    }
}
