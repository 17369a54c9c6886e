//! PostgreSQL implementation of the member collection

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use deicidium_core::entities::Member;
use deicidium_core::traits::{RepoResult, ScopedRepository};
use deicidium_core::value_objects::{GuildId, Page, QueryOptions};

use crate::models::MemberModel;

use super::error::map_db_error;
use super::scoped::{fetch_scoped, ScopedTable};

const MEMBERS: ScopedTable = ScopedTable {
    name: "members",
    columns: MemberModel::COLUMNS,
};

/// PostgreSQL implementation of `ScopedRepository<Member>`
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScopedRepository<Member> for PgMemberRepository {
    fn collection(&self) -> &'static str {
        MEMBERS.name
    }

    #[instrument(skip(self))]
    async fn find_by_guild(&self, guild_id: GuildId, options: QueryOptions) -> RepoResult<Page<Member>> {
        let (rows, total) = fetch_scoped::<MemberModel>(&self.pool, &MEMBERS, guild_id, options)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(rows.into_iter().map(Member::from).collect(), total))
    }
}
