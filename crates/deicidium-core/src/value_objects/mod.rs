//! Value objects - immutable types that represent domain concepts

mod ids;
mod query;

pub use ids::{GuildId, GuildIdParseError, UserId};
pub use query::{Page, QueryOptions, SortOrder, SortOrderParseError};
