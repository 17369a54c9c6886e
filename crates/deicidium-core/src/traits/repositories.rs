//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every read of a guild-owned collection goes
//! through [`ScopedRepository`], which takes the guild id as a required
//! argument so no cross-guild read can be expressed.

use async_trait::async_trait;

use crate::entities::Guild;
use crate::error::DomainError;
use crate::value_objects::{GuildId, Page, QueryOptions, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User <-> Guild association
// ============================================================================

#[async_trait]
pub trait UserGuildRepository: Send + Sync {
    /// Find the single guild id associated with a user
    ///
    /// Returns `Ok(None)` when there is no association and
    /// `Err(DomainError::MultipleGuildAssociations)` when more than one row matches.
    async fn find_guild_id(&self, user_id: UserId) -> RepoResult<Option<GuildId>>;

    /// List the full guild projections associated with a user
    async fn find_guilds(&self, user_id: UserId) -> RepoResult<Vec<Guild>>;
}

// ============================================================================
// Guild-scoped collections
// ============================================================================

#[async_trait]
pub trait ScopedRepository<T>: Send + Sync
where
    T: Send + 'static,
{
    /// Collection (table) name, also used as part of cache keys
    fn collection(&self) -> &'static str;

    /// Fetch rows belonging to `guild_id`
    ///
    /// `total` in the returned page counts all matching rows, ignoring `options.limit`.
    async fn find_by_guild(&self, guild_id: GuildId, options: QueryOptions) -> RepoResult<Page<T>>;
}
