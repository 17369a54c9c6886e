//! # deicidium-cache
//!
//! In-process query cache shared by the dashboard services.
//!
//! ## Features
//!
//! - **Explicit keys**: entries are keyed by a [`QueryKey`] tuple of scope, user and
//!   query options, so a change of any part is a different entry
//! - **In-flight sharing**: concurrent fetches of the same key run the fetch once
//! - **Staleness**: completed entries are reused until `stale_after` elapses
//!   (or forever when it is `None`)
//!
//! ## Example
//!
//! ```ignore
//! use deicidium_cache::{QueryCache, QueryKey};
//!
//! let cache: QueryCache<QueryKey, Page<Member>> = QueryCache::new(Some(Duration::from_secs(30)));
//! let key = QueryKey::scoped("members", Some(user_id), options);
//!
//! let page = cache.get_or_fetch(key, || async { load_members().await }).await;
//! ```

pub mod query;

pub use query::{QueryCache, QueryKey};
