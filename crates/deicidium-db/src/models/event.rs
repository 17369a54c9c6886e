//! Event database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for events table
#[derive(Debug, Clone, FromRow)]
pub struct EventModel {
    pub id: Uuid,
    pub guild: i64,
    #[sqlx(rename = "type")]
    pub event_type: String,
    pub participants: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventModel {
    pub const COLUMNS: &'static str = "id, guild, type, participants, created_at, updated_at";
}
