//! Cache keys for dashboard queries

use std::fmt;

use deicidium_core::value_objects::{QueryOptions, UserId};

/// Key identifying one cached query
///
/// Two fetches share an entry only when scope, user and options are all equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    /// Query family, e.g. a collection name or a fixed key like `countries-data`
    pub scope: &'static str,
    pub user: Option<UserId>,
    pub options: QueryOptions,
}

impl QueryKey {
    /// Key for a process-wide query that does not depend on the caller
    pub fn global(scope: &'static str) -> Self {
        Self {
            scope,
            user: None,
            options: QueryOptions::default(),
        }
    }

    /// Key for a per-user query without options
    pub fn user(scope: &'static str, user: UserId) -> Self {
        Self {
            scope,
            user: Some(user),
            options: QueryOptions::default(),
        }
    }

    /// Key for a guild-scoped collection fetch
    ///
    /// Options are normalized, so a zero limit and no limit share an entry.
    pub fn scoped(scope: &'static str, user: Option<UserId>, options: QueryOptions) -> Self {
        Self {
            scope,
            user,
            options: options.normalized(),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scope)?;
        if let Some(user) = self.user {
            write!(f, ":{user}")?;
        }
        write!(f, ":{}", self.options.sort)?;
        if let Some(limit) = self.options.limit {
            write!(f, ":{limit}")?;
        }
        Ok(())
    }
}
