//! Error handling utilities for repositories

use deicidium_core::error::DomainError;
use deicidium_core::value_objects::UserId;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create a "more than one association" error
pub fn multiple_associations(user_id: UserId) -> DomainError {
    DomainError::MultipleGuildAssociations(user_id)
}
