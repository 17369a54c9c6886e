//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::UserId;

/// Domain layer errors
///
/// Repositories are the only producers. A user without a guild is not an
/// error; resolution reports it as `None`.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The user/guild link table holds more than one row for the user
    #[error("User {0} is associated with more than one guild")]
    MultipleGuildAssociations(UserId),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::MultipleGuildAssociations(_) => "MULTIPLE_GUILD_ASSOCIATIONS",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }
}
