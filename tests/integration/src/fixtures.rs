//! Test fixtures and in-memory repositories
//!
//! The repositories below implement the same ports as the PostgreSQL ones and
//! count how often they are queried, so tests can observe cache behaviour
//! through the HTTP surface.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use deicidium_core::{
    DomainError, Event, Guild, GuildId, Member, Page, Participant, QueryOptions, RepoResult,
    ScopedRepository, SortOrder, UserGuildRepository, UserId,
};

/// Counter for unique guild ids
static GUILD_COUNTER: AtomicI64 = AtomicI64::new(1000);

/// Get a unique guild id
pub fn unique_guild_id() -> GuildId {
    GuildId::new(GUILD_COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Fixed base instant so `created_at` ordering is deterministic
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// A member created `minutes` after [`base_time`]
pub fn member(guild: GuildId, name: &str, minutes: i64) -> Member {
    let mut member = Member::new(guild, name.to_string(), "Warrior".to_string());
    member.created_at = base_time() + Duration::minutes(minutes);
    member
}

/// An event created `minutes` after [`base_time`]
pub fn event(guild: GuildId, event_type: &str, minutes: i64, participants: &[Participant]) -> Event {
    let mut event = Event::new(guild, event_type.to_string(), participants);
    event.created_at = base_time() + Duration::minutes(minutes);
    event.updated_at = event.created_at;
    event
}

/// A participant entry
pub fn participant(name: &str, enabled: bool) -> Participant {
    Participant {
        id: name.to_lowercase(),
        name: name.to_string(),
        enabled,
    }
}

// ============================================================================
// User <-> Guild
// ============================================================================

/// In-memory `user_guilds` joined to `guilds`
#[derive(Default)]
pub struct InMemoryUserGuilds {
    links: HashMap<UserId, Vec<Guild>>,
    failing: AtomicBool,
    resolve_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl InMemoryUserGuilds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a user with a guild
    pub fn link(mut self, user_id: UserId, guild: Guild) -> Self {
        self.links.entry(user_id).or_default().push(guild);
        self
    }

    /// Make every query fail with a database error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> RepoResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserGuildRepository for InMemoryUserGuilds {
    async fn find_guild_id(&self, user_id: UserId) -> RepoResult<Option<GuildId>> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        match self.links.get(&user_id).map(Vec::as_slice) {
            None | Some([]) => Ok(None),
            Some([guild]) => Ok(Some(guild.id)),
            Some(_) => Err(DomainError::MultipleGuildAssociations(user_id)),
        }
    }

    async fn find_guilds(&self, user_id: UserId) -> RepoResult<Vec<Guild>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let mut guilds = self.links.get(&user_id).cloned().unwrap_or_default();
        guilds.sort_by_key(|g| g.id);
        Ok(guilds)
    }
}

// ============================================================================
// Guild-scoped collections
// ============================================================================

/// Row of a guild-scoped table
pub trait ScopedRow: Clone + Send + Sync + 'static {
    fn guild(&self) -> GuildId;
    fn created_at(&self) -> DateTime<Utc>;
}

impl ScopedRow for Member {
    fn guild(&self) -> GuildId {
        self.guild
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl ScopedRow for Event {
    fn guild(&self) -> GuildId {
        self.guild
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// In-memory `members` or `events` table
pub struct InMemoryCollection<T> {
    collection: &'static str,
    rows: Vec<T>,
    calls: AtomicUsize,
}

impl<T: ScopedRow> InMemoryCollection<T> {
    pub fn new(collection: &'static str, rows: Vec<T>) -> Self {
        Self {
            collection,
            rows,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T: ScopedRow> ScopedRepository<T> for InMemoryCollection<T> {
    fn collection(&self) -> &'static str {
        self.collection
    }

    async fn find_by_guild(&self, guild_id: GuildId, options: QueryOptions) -> RepoResult<Page<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut rows: Vec<T> = self
            .rows
            .iter()
            .filter(|row| row.guild() == guild_id)
            .cloned()
            .collect();
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

/// Shared handles on the in-memory store backing one test server
#[derive(Clone)]
pub struct Store {
    pub user_guilds: Arc<InMemoryUserGuilds>,
    pub members: Arc<InMemoryCollection<Member>>,
    pub events: Arc<InMemoryCollection<Event>>,
}

impl Store {
    pub fn new(user_guilds: InMemoryUserGuilds, members: Vec<Member>, events: Vec<Event>) -> Self {
        Self {
            user_guilds: Arc::new(user_guilds),
            members: Arc::new(InMemoryCollection::new("members", members)),
            events: Arc::new(InMemoryCollection::new("events", events)),
        }
    }

    /// A store with no associations and no rows
    pub fn empty() -> Self {
        Self::new(InMemoryUserGuilds::new(), Vec::new(), Vec::new())
    }
}

/// One signed-in user, their guild and that guild's rows, plus a stranger guild
pub struct GuildWorld {
    pub user_id: UserId,
    pub guild: Guild,
    pub other_guild: GuildId,
    pub store: Store,
}

impl GuildWorld {
    /// Five members (created 10, 20 .. 50 minutes in, inserted out of order),
    /// two events, and rows of another guild that must never leak
    pub fn new() -> Self {
        let user_id = UserId::random();
        let mut guild = Guild::new(unique_guild_id(), "Deicidium".to_string());
        guild.region = Some("Asia".to_string());
        let other_guild = unique_guild_id();

        let members = vec![
            member(guild.id, "Cyra", 30),
            member(guild.id, "Asha", 10),
            member(other_guild, "Intruder", 5),
            member(guild.id, "Eldon", 50),
            member(guild.id, "Brann", 20),
            member(guild.id, "Dova", 40),
        ];
        let events = vec![
            event(guild.id, "raid", 15, &[participant("Asha", true), participant("Brann", false)]),
            event(guild.id, "dungeon", 25, &[participant("Cyra", true)]),
            event(other_guild, "raid", 1, &[]),
        ];

        let user_guilds = InMemoryUserGuilds::new().link(user_id, guild.clone());

        Self {
            user_id,
            guild,
            other_guild,
            store: Store::new(user_guilds, members, events),
        }
    }
}

impl Default for GuildWorld {
    fn default() -> Self {
        Self::new()
    }
}
