//! Identifier value objects
//!
//! `UserId` is issued by the external auth provider (a UUID in the token
//! `sub` claim). `GuildId` is the bigint primary key of the `guilds` table.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of an externally authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    #[inline]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Generate a random user id (tests and fixtures)
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Identifier of a guild
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct GuildId(i64);

impl GuildId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

/// Error when parsing a GuildId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GuildIdParseError {
    #[error("invalid guild id format")]
    InvalidFormat,
}

impl fmt::Display for GuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for GuildId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<GuildId> for i64 {
    fn from(id: GuildId) -> Self {
        id.0
    }
}

impl std::str::FromStr for GuildId {
    type Err = GuildIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(GuildId)
            .map_err(|_| GuildIdParseError::InvalidFormat)
    }
}

// Deserialize from number or numeric string
impl<'de> Deserialize<'de> for GuildId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct GuildIdVisitor;

        impl Visitor<'_> for GuildIdVisitor {
            type Value = GuildId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer or numeric string guild id")
            }

            fn visit_i64<E>(self, value: i64) -> Result<GuildId, E>
            where
                E: de::Error,
            {
                Ok(GuildId(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<GuildId, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(GuildId)
                    .map_err(|_| de::Error::custom("guild id out of range"))
            }

            fn visit_str<E>(self, value: &str) -> Result<GuildId, E>
            where
                E: de::Error,
            {
                value
                    .parse::<i64>()
                    .map(GuildId)
                    .map_err(|_| de::Error::custom("invalid guild id string"))
            }
        }

        deserializer.deserialize_any(GuildIdVisitor)
    }
}
