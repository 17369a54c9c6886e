//! Query cache and its key type

mod cache;
mod key;

pub use cache::QueryCache;
pub use key::QueryKey;
