//! In-memory repositories with call counters for service tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use deicidium_common::auth::JwtService;
use deicidium_common::{QueryCacheConfig, ResolutionPolicy, UpstreamConfig};
use deicidium_core::entities::{Event, Guild, Member};
use deicidium_core::error::DomainError;
use deicidium_core::traits::{RepoResult, ScopedRepository, UserGuildRepository};
use deicidium_core::value_objects::{GuildId, Page, QueryOptions, SortOrder, UserId};

use super::context::{ServiceContext, ServiceContextBuilder};

pub struct FakeUserGuildRepository {
    guilds: Vec<Guild>,
    fail: AtomicBool,
    pub resolve_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
}

impl FakeUserGuildRepository {
    pub fn with_guilds(guilds: Vec<Guild>) -> Self {
        Self {
            guilds,
            fail: AtomicBool::new(false),
            resolve_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        }
    }

    pub fn associated(guild_id: GuildId) -> Self {
        Self::with_guilds(vec![Guild::new(guild_id, format!("Guild {guild_id}"))])
    }

    pub fn unassociated() -> Self {
        Self::with_guilds(Vec::new())
    }

    pub fn failing() -> Self {
        let repo = Self::unassociated();
        repo.fail.store(true, Ordering::SeqCst);
        repo
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserGuildRepository for FakeUserGuildRepository {
    async fn find_guild_id(&self, user_id: UserId) -> RepoResult<Option<GuildId>> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }
        match self.guilds.as_slice() {
            [] => Ok(None),
            [guild] => Ok(Some(guild.id)),
            _ => Err(DomainError::MultipleGuildAssociations(user_id)),
        }
    }

    async fn find_guilds(&self, _user_id: UserId) -> RepoResult<Vec<Guild>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }
        Ok(self.guilds.clone())
    }
}

/// Rows a fake scoped repository can filter and sort
pub trait GuildRow: Clone + Send + Sync + 'static {
    fn guild(&self) -> GuildId;
    fn created_at(&self) -> DateTime<Utc>;
}

impl GuildRow for Member {
    fn guild(&self) -> GuildId {
        self.guild
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl GuildRow for Event {
    fn guild(&self) -> GuildId {
        self.guild
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

pub struct FakeScopedRepository<T> {
    collection: &'static str,
    rows: Vec<T>,
    fail: AtomicBool,
    delay: Option<Duration>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(GuildId, QueryOptions)>>,
}

impl<T: GuildRow> FakeScopedRepository<T> {
    pub fn new(collection: &'static str, rows: Vec<T>) -> Self {
        Self {
            collection,
            rows,
            fail: AtomicBool::new(false),
            delay: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Guild and options of every query issued so far
    pub fn seen(&self) -> Vec<(GuildId, QueryOptions)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl<T: GuildRow> ScopedRepository<T> for FakeScopedRepository<T> {
    fn collection(&self) -> &'static str {
        self.collection
    }

    async fn find_by_guild(&self, guild_id: GuildId, options: QueryOptions) -> RepoResult<Page<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((guild_id, options));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("statement timeout".to_string()));
        }

        let mut rows: Vec<T> = self.rows.iter().filter(|r| r.guild() == guild_id).cloned().collect();
        let total = rows.len() as u64;
        match options.sort {
            SortOrder::Asc => rows.sort_by_key(|r| r.created_at()),
            SortOrder::Desc => rows.sort_by_key(|r| std::cmp::Reverse(r.created_at())),
            SortOrder::None => {}
        }
        if let Some(limit) = options.effective_limit() {
            rows.truncate(limit as usize);
        }
        Ok(Page::new(rows, total))
    }
}

/// Member of `guild` created `minutes_ago` minutes in the past
pub fn member(guild: GuildId, name: &str, minutes_ago: i64) -> Member {
    let mut member = Member::new(guild, name.to_string(), "Warrior".to_string());
    member.created_at = Utc::now() - chrono::Duration::minutes(minutes_ago);
    member
}

pub fn event(guild: GuildId, kind: &str, minutes_ago: i64) -> Event {
    let mut event = Event::new(guild, kind.to_string(), &[]);
    event.created_at = Utc::now() - chrono::Duration::minutes(minutes_ago);
    event.updated_at = event.created_at;
    event
}

/// Handles on the fakes behind a test context
pub struct Fixture {
    pub ctx: ServiceContext,
    pub user_guilds: Arc<FakeUserGuildRepository>,
    pub members: Arc<FakeScopedRepository<Member>>,
    pub events: Arc<FakeScopedRepository<Event>>,
}

pub fn fixture(
    user_guilds: FakeUserGuildRepository,
    members: FakeScopedRepository<Member>,
    events: FakeScopedRepository<Event>,
    resolution: ResolutionPolicy,
) -> Fixture {
    fixture_with_upstream(user_guilds, members, events, resolution, UpstreamConfig::default(), "http://127.0.0.1:9")
}

pub fn fixture_with_upstream(
    user_guilds: FakeUserGuildRepository,
    members: FakeScopedRepository<Member>,
    events: FakeScopedRepository<Event>,
    resolution: ResolutionPolicy,
    upstream: UpstreamConfig,
    base_url: &str,
) -> Fixture {
    let cache = QueryCacheConfig {
        stale_secs: 60,
        resolution,
    };
    build(user_guilds, members, events, cache, upstream, base_url)
}

/// Fixture with an explicit query cache configuration
pub fn fixture_with_cache(
    user_guilds: FakeUserGuildRepository,
    members: FakeScopedRepository<Member>,
    events: FakeScopedRepository<Event>,
    cache: QueryCacheConfig,
) -> Fixture {
    build(user_guilds, members, events, cache, UpstreamConfig::default(), "http://127.0.0.1:9")
}

fn build(
    user_guilds: FakeUserGuildRepository,
    members: FakeScopedRepository<Member>,
    events: FakeScopedRepository<Event>,
    cache: QueryCacheConfig,
    upstream: UpstreamConfig,
    base_url: &str,
) -> Fixture {
    let user_guilds = Arc::new(user_guilds);
    let members = Arc::new(members);
    let events = Arc::new(events);

    let ctx = ServiceContextBuilder::new()
        .user_guild_repo(user_guilds.clone())
        .member_repo(members.clone())
        .event_repo(events.clone())
        .query_cache(cache)
        .upstream(upstream)
        .base_url(base_url)
        .jwt_service(Arc::new(JwtService::new("test-secret", "authenticated")))
        .build()
        .unwrap();

    Fixture {
        ctx,
        user_guilds,
        members,
        events,
    }
}
