//! Query options and paged results for guild-scoped collection reads

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordering applied to `created_at` of a scoped collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
    /// Server-determined order
    #[default]
    None,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
            Self::None => "none",
        }
    }
}

/// Error when parsing a SortOrder from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sort order: {0} (expected asc, desc or none)")]
pub struct SortOrderParseError(pub String);

impl std::str::FromStr for SortOrder {
    type Err = SortOrderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            "none" | "" => Ok(Self::None),
            _ => Err(SortOrderParseError(s.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a guild-scoped collection fetch
///
/// Part of the query cache key, so two fetches with equal options are
/// interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QueryOptions {
    #[serde(default)]
    pub sort: SortOrder,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl QueryOptions {
    pub fn sorted(sort: SortOrder) -> Self {
        Self { sort, limit: None }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Row cap to apply; `None` when no limit or a non-positive one was given
    pub fn effective_limit(&self) -> Option<u32> {
        self.limit.filter(|&limit| limit > 0)
    }

    /// Same query with `limit: Some(0)` folded into "no limit"
    pub fn normalized(self) -> Self {
        Self {
            sort: self.sort,
            limit: self.effective_limit(),
        }
    }
}

/// A page of rows plus the total number of matching rows
///
/// `total` counts every row matching the filter, regardless of any limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(rows: Vec<T>, total: u64) -> Self {
        Self { rows, total }
    }

    /// The neutral result used for disabled, unresolved and failed fetches
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}
