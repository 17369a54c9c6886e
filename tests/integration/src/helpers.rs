//! Test helpers for integration tests
//!
//! Provides utilities for spawning the application on a local port and
//! asserting on its responses.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use deicidium_api::{create_app, AppState};
use deicidium_common::{AppConfig, JwtService};
use deicidium_core::UserId;
use deicidium_service::ServiceContextBuilder;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::Store;

/// Shared secret the test servers verify tokens with
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Audience of test tokens
pub const TEST_JWT_AUDIENCE: &str = "authenticated";

/// Nothing listens on the discard port, so requests there fail fast
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9/unreachable";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    state: AppState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server over `store` with default settings
    pub async fn start(store: &Store) -> Result<Self> {
        Self::start_with(store, &[]).await
    }

    /// Start a server over `store`, overriding configuration keys
    ///
    /// `BASE_URL` always points at the server itself so the wheel client
    /// reaches this server's relay.
    pub async fn start_with(store: &Store, overrides: &[(&str, &str)]) -> Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let base_url = format!("http://{addr}");
        let config = test_config(&base_url, addr.port(), overrides)?;
        let state = build_state(config, store)?;

        let app = create_app(state.clone());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            state,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// State shared with the running app
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Issue a valid token for `user_id`
    pub fn token_for(&self, user_id: UserId) -> Result<String> {
        Ok(self.state.jwt_service().issue_token(user_id, 3600)?)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with a raw body and JSON content type
    pub async fn post_raw(&self, path: &str, body: &'static str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?)
    }
}

/// Build a configuration the way `AppConfig::from_env` would, from a map
///
/// Upstream URLs default to an unreachable address; tests that need them
/// override `COUNTRIES_API_URL` or `WHEEL_API_URL`.
pub fn test_config(base_url: &str, port: u16, overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let port = port.to_string();
    let mut vars: HashMap<String, String> = [
        ("APP_ENV", "development"),
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", port.as_str()),
        ("BASE_URL", base_url),
        ("DATABASE_URL", "postgresql://unused@127.0.0.1:9/deicidium"),
        ("SUPABASE_JWT_SECRET", TEST_JWT_SECRET),
        ("JWT_AUDIENCE", TEST_JWT_AUDIENCE),
        ("COUNTRIES_API_URL", UNREACHABLE_URL),
        ("WHEEL_API_URL", UNREACHABLE_URL),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "1000"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    for (key, value) in overrides {
        vars.insert((*key).to_string(), (*value).to_string());
    }

    AppConfig::from_lookup(|key| vars.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Wire the app state to the in-memory store (no database pool)
fn build_state(config: AppConfig, store: &Store) -> Result<AppState> {
    let jwt_service = std::sync::Arc::new(JwtService::new(&config.jwt.secret, &config.jwt.audience));

    let context = ServiceContextBuilder::new()
        .user_guild_repo(store.user_guilds.clone())
        .member_repo(store.members.clone())
        .event_repo(store.events.clone())
        .query_cache(config.query_cache.clone())
        .upstream(config.upstream.clone())
        .base_url(config.app.base_url.clone())
        .jwt_service(jwt_service)
        .build()?;

    Ok(AppState::new(context, config))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
