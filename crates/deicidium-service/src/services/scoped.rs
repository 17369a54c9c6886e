//! Guild-scoped collection fetches
//!
//! A fetch runs in two dependent steps: resolve the caller's guild, then read
//! the collection filtered by that guild. Signed-out, unresolved and failed
//! fetches all return an empty page.

use tracing::{instrument, warn};

use deicidium_cache::{QueryCache, QueryKey};
use deicidium_core::entities::{Event, Member};
use deicidium_core::traits::{RepoResult, ScopedRepository};
use deicidium_core::value_objects::{Page, QueryOptions, UserId};

use super::context::ServiceContext;
use super::resolver::GuildResolver;

/// Scoped collection fetcher
pub struct ScopedFetcher<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ScopedFetcher<'a> {
    /// Create a new ScopedFetcher
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Members of the caller's guild
    #[instrument(skip(self))]
    pub async fn fetch_members(&self, user: Option<UserId>, options: QueryOptions) -> Page<Member> {
        self.fetch(self.ctx.member_repo(), &self.ctx.caches().members, user, options)
            .await
    }

    /// Events of the caller's guild
    #[instrument(skip(self))]
    pub async fn fetch_events(&self, user: Option<UserId>, options: QueryOptions) -> Page<Event> {
        self.fetch(self.ctx.event_repo(), &self.ctx.caches().events, user, options)
            .await
    }

    async fn fetch<T>(
        &self,
        repo: &dyn ScopedRepository<T>,
        cache: &QueryCache<QueryKey, Page<T>>,
        user: Option<UserId>,
        options: QueryOptions,
    ) -> Page<T>
    where
        T: Clone + Send + 'static,
    {
        // Disabled until someone is signed in.
        let Some(user_id) = user else {
            return Page::empty();
        };

        let key = QueryKey::scoped(repo.collection(), Some(user_id), options);
        let result = cache
            .try_get_or_fetch(key, || self.load(repo, user_id, options))
            .await;

        match result {
            Ok(page) => page,
            Err(e) => {
                warn!(
                    collection = repo.collection(),
                    user_id = %user_id,
                    error = %e,
                    "Scoped fetch failed"
                );
                Page::empty()
            }
        }
    }

    async fn load<T>(
        &self,
        repo: &dyn ScopedRepository<T>,
        user_id: UserId,
        options: QueryOptions,
    ) -> RepoResult<Page<T>>
    where
        T: Send + 'static,
    {
        let Some(guild_id) = GuildResolver::new(self.ctx).try_resolve(user_id).await? else {
            warn!(user_id = %user_id, "No guild associated with user");
            return Ok(Page::empty());
        };

        repo.find_by_guild(guild_id, options).await
    }
}
