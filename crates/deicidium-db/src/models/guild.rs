//! Guild database model

use sqlx::FromRow;

/// Database model for guilds table (dashboard projection)
#[derive(Debug, Clone, FromRow)]
pub struct GuildModel {
    pub id: i64,
    pub name: String,
    pub intro: Option<String>,
    pub region: Option<String>,
    pub server: Option<String>,
}
