//! PostgreSQL implementation of UserGuildRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use deicidium_core::entities::Guild;
use deicidium_core::traits::{RepoResult, UserGuildRepository};
use deicidium_core::value_objects::{GuildId, UserId};

use crate::models::GuildModel;

use super::error::{map_db_error, multiple_associations};

/// PostgreSQL implementation of UserGuildRepository
#[derive(Clone)]
pub struct PgUserGuildRepository {
    pool: PgPool,
}

impl PgUserGuildRepository {
    /// Create a new PgUserGuildRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserGuildRepository for PgUserGuildRepository {
    #[instrument(skip(self))]
    async fn find_guild_id(&self, user_id: UserId) -> RepoResult<Option<GuildId>> {
        // Two rows are enough to tell "exactly one" from "more than one".
        let ids: Vec<i64> = sqlx::query_scalar(
            r"
            SELECT g.id
            FROM user_guilds ug
            JOIN guilds g ON g.id = ug.guild
            WHERE ug.user_id = $1
            LIMIT 2
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        match ids.as_slice() {
            [] => Ok(None),
            [id] => Ok(Some(GuildId::new(*id))),
            _ => Err(multiple_associations(user_id)),
        }
    }

    #[instrument(skip(self))]
    async fn find_guilds(&self, user_id: UserId) -> RepoResult<Vec<Guild>> {
        let results = sqlx::query_as::<_, GuildModel>(
            r"
            SELECT g.id, g.name, g.intro, g.region, g.server
            FROM guilds g
            JOIN user_guilds ug ON ug.guild = g.id
            WHERE ug.user_id = $1
            ORDER BY g.id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Guild::from).collect())
    }
}
