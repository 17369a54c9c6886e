//! Guild entity - the organisational unit that owns members and events

use serde::{Deserialize, Serialize};

use crate::value_objects::GuildId;

/// Guild entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub id: GuildId,
    pub name: String,
    pub intro: Option<String>,
    pub region: Option<String>,
    pub server: Option<String>,
}

impl Guild {
    /// Create a new Guild with only a name
    pub fn new(id: GuildId, name: String) -> Self {
        Self {
            id,
            name,
            intro: None,
            region: None,
            server: None,
        }
    }

    /// "region / server" label, or whichever half is known
    pub fn location(&self) -> Option<String> {
        match (self.region.as_deref(), self.server.as_deref()) {
            (Some(region), Some(server)) => Some(format!("{region} / {server}")),
            (Some(one), None) | (None, Some(one)) => Some(one.to_string()),
            (None, None) => None,
        }
    }
}
