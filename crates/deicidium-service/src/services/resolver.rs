//! Guild resolution
//!
//! Maps the signed-in user to the single guild they belong to. Failures never
//! reach the caller: they are logged and surface as "no guild".

use tracing::{instrument, warn};

use deicidium_cache::QueryKey;
use deicidium_common::ResolutionPolicy;
use deicidium_core::traits::RepoResult;
use deicidium_core::value_objects::{GuildId, UserId};

use crate::dto::GuildListing;

use super::caches::{GUILDS_KEY, GUILD_ID_KEY};
use super::context::ServiceContext;

/// Guild resolver
pub struct GuildResolver<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GuildResolver<'a> {
    /// Create a new GuildResolver
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Guild id of `user`, or `None` when signed out, unassociated or on error
    #[instrument(skip(self))]
    pub async fn resolve_guild_id(&self, user: Option<UserId>) -> Option<GuildId> {
        let user_id = user?;

        match self.try_resolve(user_id).await {
            Ok(Some(guild_id)) => Some(guild_id),
            Ok(None) => {
                warn!(user_id = %user_id, "No guild associated with user");
                None
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Guild resolution failed");
                None
            }
        }
    }

    /// Resolution with the repository error kept, for callers that must not
    /// cache a failure as "no guild"
    pub(crate) async fn try_resolve(&self, user_id: UserId) -> RepoResult<Option<GuildId>> {
        let repo = self.ctx.user_guild_repo();

        match self.ctx.resolution_policy() {
            ResolutionPolicy::PerCall => repo.find_guild_id(user_id).await,
            ResolutionPolicy::Cached => {
                self.ctx
                    .caches()
                    .guild_ids
                    .try_get_or_fetch(QueryKey::user(GUILD_ID_KEY, user_id), || {
                        repo.find_guild_id(user_id)
                    })
                    .await
            }
        }
    }

    /// Guilds of `user`
    ///
    /// On a failed lookup the listing is empty and carries a redirect-home
    /// event for the presentation layer.
    #[instrument(skip(self))]
    pub async fn list_guilds(&self, user: Option<UserId>) -> GuildListing {
        let Some(user_id) = user else {
            return GuildListing::default();
        };

        let repo = self.ctx.user_guild_repo();
        let result = self
            .ctx
            .caches()
            .guilds
            .try_get_or_fetch(QueryKey::user(GUILDS_KEY, user_id), || repo.find_guilds(user_id))
            .await;

        match result {
            Ok(guilds) => GuildListing::new(guilds),
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Failed to list guilds");
                GuildListing::redirect_home()
            }
        }
    }
}
