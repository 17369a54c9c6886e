//! Wheel of names integration
//!
//! [`WheelClient`] builds a wheel and posts it to this deployment's relay
//! endpoint. [`WheelRelay`] is that endpoint's backend: it moves the API key
//! from the body into the `x-api-key` header and forwards the rest to the
//! raffle API, passing the answer through unchanged.

use serde_json::Value;
use tracing::{error, instrument, warn};

use crate::dto::{CreateWheelRequest, RelayResponse, WheelOptions};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Header carrying the raffle API key upstream
pub const API_KEY_HEADER: &str = "x-api-key";

/// Body field holding the API key on the way in
const API_KEY_FIELD: &str = "apiKey";

/// Relay path, relative to the deployment base URL
const RELAY_PATH: &str = "/api/wheel";

/// Wheel client
pub struct WheelClient<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WheelClient<'a> {
    /// Create a new WheelClient
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a shared wheel and return its public URL
    ///
    /// Returns `None` on transport errors and on any answer without a
    /// `data.path` string.
    #[instrument(skip(self, options), fields(entries = options.entries.len()))]
    pub async fn create_wheel(&self, options: WheelOptions) -> Option<String> {
        let payload = CreateWheelRequest::from(options);
        let url = format!("{}{RELAY_PATH}", self.ctx.base_url());

        let response = match self.ctx.http_client().post(&url).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Error creating wheel");
                return None;
            }
        };

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "Error creating wheel");
                return None;
            }
        };

        match share_path(&body) {
            Some(path) => Some(format!("{}/{path}", self.ctx.upstream().wheel_share_host)),
            None => {
                warn!(response = %body, "Invalid response format");
                None
            }
        }
    }
}

/// Non-empty `data.path` string of a raffle API answer
fn share_path(body: &Value) -> Option<&str> {
    body.get("data")?
        .get("path")?
        .as_str()
        .filter(|path| !path.is_empty())
}

/// Wheel relay
pub struct WheelRelay<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WheelRelay<'a> {
    /// Create a new WheelRelay
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Forward a wheel body to the raffle API
    ///
    /// The upstream status and JSON body come back unchanged, error statuses
    /// included. Only an unreachable upstream or a non-JSON answer is an error.
    #[instrument(skip(self, body))]
    pub async fn forward(&self, body: Value) -> ServiceResult<RelayResponse> {
        let (api_key, payload) = split_api_key(body);

        let mut request = self
            .ctx
            .http_client()
            .post(&self.ctx.upstream().wheel_api_url)
            .json(&payload);
        if let Some(key) = api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, "Raffle API unreachable");
            ServiceError::upstream(format!("raffle API unreachable: {e}"))
        })?;

        let status = response.status().as_u16();
        let body = response.json::<Value>().await.map_err(|e| {
            error!(status, error = %e, "Raffle API returned a non-JSON body");
            ServiceError::upstream(format!("raffle API returned a non-JSON body: {e}"))
        })?;

        Ok(RelayResponse { status, body })
    }
}

/// Take `apiKey` out of a JSON object body
///
/// Non-string keys are sent in their JSON text form; a `null` key counts as absent.
fn split_api_key(body: Value) -> (Option<String>, Value) {
    let Value::Object(mut map) = body else {
        return (None, body);
    };

    let key = match map.remove(API_KEY_FIELD) {
        None | Some(Value::Null) => None,
        Some(Value::String(key)) => Some(key),
        Some(other) => Some(other.to_string()),
    };

    (key, Value::Object(map))
}
