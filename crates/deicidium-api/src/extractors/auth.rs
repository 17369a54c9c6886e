//! Authentication extractor
//!
//! Verifies bearer tokens issued by the external auth provider.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use deicidium_core::UserId;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from a verified token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// User ID from the token subject
    pub user_id: UserId,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// Optional authenticated user
///
/// `None` when no Authorization header is present (the signed-out path).
/// A header that is not a valid bearer token is rejected with 401.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<UserId> {
        self.0.map(|auth| auth.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(OptionalAuthUser(None));
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InvalidAuthFormat)?;

        // Get the app state to access JWT service
        let app_state = AppState::from_ref(state);

        let user_id = app_state
            .jwt_service()
            .authenticate(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::App(e)
            })?;

        Ok(OptionalAuthUser(Some(AuthUser::new(user_id))))
    }
}
