//! HTTP middleware
//!
//! Every route gets a request id, a tracing span and a timeout. Dashboard
//! routes additionally pass a global rate limit and the CORS policy.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use deicidium_common::{AppConfig, CorsConfig};
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id, tracing and timeout
///
/// Timed-out requests are answered with 503.
pub fn apply_base<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(request_span)
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(TimeoutLayer::with_status_code(StatusCode::SERVICE_UNAVAILABLE, timeout)),
    )
}

/// Base stack plus CORS and the rate limit, for the dashboard API routes
pub fn apply_api<S>(router: Router<S>, config: &AppConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let router = router.layer(cors_layer(&config.cors, config.app.env.is_production()));
    let router = apply_base(router, config.api.request_timeout());

    // One bucket shared by all callers; the builder takes a refill interval, not a rate
    let refill_ms = (1000 / u64::from(config.rate_limit.requests_per_second.max(1))).max(1);
    let governor = GovernorConfigBuilder::default()
        .per_millisecond(refill_ms)
        .burst_size(config.rate_limit.burst)
        .key_extractor(GlobalKeyExtractor)
        .finish();

    // Outermost, so rejected requests never reach tracing or handlers
    match governor {
        Some(governor) => router.layer(GovernorLayer {
            config: Arc::new(governor),
        }),
        None => {
            tracing::warn!(
                requests_per_second = config.rate_limit.requests_per_second,
                burst = config.rate_limit.burst,
                "Invalid rate limit configuration, rate limiting disabled"
            );
            router
        }
    }
}

fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id,
    )
}

/// Configured origins, or any origin in development when none are set
fn cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)]);

    if config.allowed_origins.is_empty() && !is_production {
        tracing::warn!("CORS: allowing any origin; set CORS_ALLOWED_ORIGINS outside development");
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        tracing::warn!("CORS: no allowed origins, cross-origin browser requests will be refused");
    }
    layer.allow_origin(AllowOrigin::list(origins))
}
