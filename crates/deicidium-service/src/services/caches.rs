//! Query caches shared by all services of one process

use std::sync::Arc;
use std::time::Duration;

use deicidium_cache::{QueryCache, QueryKey};
use deicidium_core::entities::{Country, Event, Guild, Member};
use deicidium_core::value_objects::{GuildId, Page};

/// Fixed key of the country reference list
pub const COUNTRIES_KEY: &str = "countries-data";
/// Scope of memoised user -> guild id resolutions
pub const GUILD_ID_KEY: &str = "user-guild-id";
/// Scope of per-user guild listings
pub const GUILDS_KEY: &str = "user-guilds";

/// One cache per value type
#[derive(Debug)]
pub struct QueryCaches {
    pub guild_ids: QueryCache<QueryKey, Option<GuildId>>,
    pub guilds: QueryCache<QueryKey, Vec<Guild>>,
    pub members: QueryCache<QueryKey, Page<Member>>,
    pub events: QueryCache<QueryKey, Page<Event>>,
    /// Never goes stale
    pub countries: QueryCache<QueryKey, Arc<Vec<Country>>>,
}

impl QueryCaches {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            guild_ids: QueryCache::new(Some(stale_after)),
            guilds: QueryCache::new(Some(stale_after)),
            members: QueryCache::new(Some(stale_after)),
            events: QueryCache::new(Some(stale_after)),
            countries: QueryCache::unbounded(),
        }
    }
}
