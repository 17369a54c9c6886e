//! Member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: Uuid,
    pub guild: i64,
    pub name: String,
    pub class: String,
    pub stat_atk: Option<i32>,
    pub stat_def: Option<i32>,
    pub stat_acc: Option<i32>,
    pub growth_rate: Option<String>,
    pub grade: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl MemberModel {
    pub const COLUMNS: &'static str =
        "id, guild, name, class, stat_atk, stat_def, stat_acc, growth_rate, grade, created_at";
}
