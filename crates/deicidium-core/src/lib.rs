//! # deicidium-core
//!
//! Domain layer containing entities, value objects and repository traits for
//! the guild dashboard. This crate has zero dependencies on infrastructure
//! (database, HTTP client, web framework).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Country, Event, Guild, Member, Participant};
pub use error::DomainError;
pub use traits::{RepoResult, ScopedRepository, UserGuildRepository};
pub use value_objects::{
    GuildId, GuildIdParseError, Page, QueryOptions, SortOrder, SortOrderParseError, UserId,
};
