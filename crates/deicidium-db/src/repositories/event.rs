//! PostgreSQL implementation of the event collection

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use deicidium_core::entities::Event;
use deicidium_core::traits::{RepoResult, ScopedRepository};
use deicidium_core::value_objects::{GuildId, Page, QueryOptions};

use crate::models::EventModel;

use super::error::map_db_error;
use super::scoped::{fetch_scoped, ScopedTable};

const EVENTS: ScopedTable = ScopedTable {
    name: "events",
    columns: EventModel::COLUMNS,
};

/// PostgreSQL implementation of `ScopedRepository<Event>`
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    /// Create a new PgEventRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScopedRepository<Event> for PgEventRepository {
    fn collection(&self) -> &'static str {
        EVENTS.name
    }

    #[instrument(skip(self))]
    async fn find_by_guild(&self, guild_id: GuildId, options: QueryOptions) -> RepoResult<Page<Event>> {
        let (rows, total) = fetch_scoped::<EventModel>(&self.pool, &EVENTS, guild_id, options)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(rows.into_iter().map(Event::from).collect(), total))
    }
}
