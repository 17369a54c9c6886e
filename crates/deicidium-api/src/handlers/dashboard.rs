//! Guild dashboard handlers
//!
//! Every endpoint here works signed out: without a bearer token the response
//! has the usual shape with no rows.

use axum::{extract::State, Json};
use deicidium_service::{
    CollectionQuery, EventListResponse, GuildListing, GuildResolver, MemberListResponse, ScopedFetcher,
};

use crate::extractors::{OptionalAuthUser, ValidatedQuery};
use crate::state::AppState;

/// Guilds of the current user
///
/// GET /api/guilds
pub async fn list_guilds(State(state): State<AppState>, auth: OptionalAuthUser) -> Json<GuildListing> {
    let resolver = GuildResolver::new(state.service_context());
    Json(resolver.list_guilds(auth.user_id()).await)
}

/// Members of the current user's guild
///
/// GET /api/members?sort=&limit=
pub async fn list_members(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ValidatedQuery(query): ValidatedQuery<CollectionQuery>,
) -> Json<MemberListResponse> {
    let fetcher = ScopedFetcher::new(state.service_context());
    let page = fetcher.fetch_members(auth.user_id(), query.into_options()).await;
    Json(MemberListResponse::from(page))
}

/// Events of the current user's guild
///
/// GET /api/events?sort=&limit=
pub async fn list_events(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ValidatedQuery(query): ValidatedQuery<CollectionQuery>,
) -> Json<EventListResponse> {
    let fetcher = ScopedFetcher::new(state.service_context());
    let page = fetcher.fetch_events(auth.user_id(), query.into_options()).await;
    Json(EventListResponse::from(page))
}
