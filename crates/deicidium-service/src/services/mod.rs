//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] for the duration of a call.

pub mod caches;
pub mod context;
pub mod countries;
pub mod error;
pub mod resolver;
pub mod scoped;
pub mod wheel;

#[cfg(test)]
pub(crate) mod testing;

pub use caches::{QueryCaches, COUNTRIES_KEY, GUILDS_KEY, GUILD_ID_KEY};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use countries::{CountryService, COUNTRY_FIELDS};
pub use error::{ServiceError, ServiceResult};
pub use resolver::GuildResolver;
pub use scoped::ScopedFetcher;
pub use wheel::{WheelClient, WheelRelay};
