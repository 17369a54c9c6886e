//! Service context - dependency container for services
//!
//! Holds the repositories, query caches, HTTP client and settings needed by services.

use std::sync::Arc;
use std::time::Duration;

use deicidium_common::auth::JwtService;
use deicidium_common::{QueryCacheConfig, ResolutionPolicy, UpstreamConfig};
use deicidium_core::entities::{Event, Member};
use deicidium_core::traits::{ScopedRepository, UserGuildRepository};
use deicidium_db::PgPool;

use super::caches::QueryCaches;
use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - The user/guild association and the guild-scoped collections
/// - Process-wide query caches
/// - The outbound HTTP client and third-party endpoints
/// - JWT verification
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool (absent when repositories are not database-backed)
    pool: Option<PgPool>,

    // Repositories
    user_guild_repo: Arc<dyn UserGuildRepository>,
    member_repo: Arc<dyn ScopedRepository<Member>>,
    event_repo: Arc<dyn ScopedRepository<Event>>,

    // Caches
    caches: Arc<QueryCaches>,
    resolution: ResolutionPolicy,

    // Outbound HTTP
    http_client: reqwest::Client,
    upstream: UpstreamConfig,
    base_url: String,

    // Services
    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if any
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    pub fn user_guild_repo(&self) -> &dyn UserGuildRepository {
        self.user_guild_repo.as_ref()
    }

    pub fn member_repo(&self) -> &dyn ScopedRepository<Member> {
        self.member_repo.as_ref()
    }

    pub fn event_repo(&self) -> &dyn ScopedRepository<Event> {
        self.event_repo.as_ref()
    }

    // === Caches ===

    pub fn caches(&self) -> &QueryCaches {
        &self.caches
    }

    /// How scoped fetches resolve the caller's guild
    pub fn resolution_policy(&self) -> ResolutionPolicy {
        self.resolution
    }

    // === Outbound HTTP ===

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    pub fn upstream(&self) -> &UpstreamConfig {
        &self.upstream
    }

    /// Public base URL of this deployment, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("caches", &self.caches)
            .field("resolution", &self.resolution)
            .field("upstream", &self.upstream)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_guild_repo: Option<Arc<dyn UserGuildRepository>>,
    member_repo: Option<Arc<dyn ScopedRepository<Member>>>,
    event_repo: Option<Arc<dyn ScopedRepository<Event>>>,
    query_cache: QueryCacheConfig,
    http_client: Option<reqwest::Client>,
    upstream: UpstreamConfig,
    base_url: Option<String>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            user_guild_repo: None,
            member_repo: None,
            event_repo: None,
            query_cache: QueryCacheConfig::default(),
            http_client: None,
            upstream: UpstreamConfig::default(),
            base_url: None,
            jwt_service: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_guild_repo(mut self, repo: Arc<dyn UserGuildRepository>) -> Self {
        self.user_guild_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn ScopedRepository<Member>>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn event_repo(mut self, repo: Arc<dyn ScopedRepository<Event>>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn query_cache(mut self, config: QueryCacheConfig) -> Self {
        self.query_cache = config;
        self
    }

    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn upstream(mut self, upstream: UpstreamConfig) -> Self {
        self.upstream = upstream;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(10))
                .build()
                .map_err(|e| ServiceError::internal(format!("http client: {e}")))?,
        };

        Ok(ServiceContext {
            pool: self.pool,
            user_guild_repo: self
                .user_guild_repo
                .ok_or_else(|| ServiceError::validation("user_guild_repo is required"))?,
            member_repo: self
                .member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            event_repo: self
                .event_repo
                .ok_or_else(|| ServiceError::validation("event_repo is required"))?,
            caches: Arc::new(QueryCaches::new(self.query_cache.stale_after())),
            resolution: self.query_cache.resolution,
            http_client,
            upstream: self.upstream,
            base_url: self
                .base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .ok_or_else(|| ServiceError::validation("base_url is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
