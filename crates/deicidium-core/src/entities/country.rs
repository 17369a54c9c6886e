//! Country reference entry

use serde::{Deserialize, Serialize};

/// Country reference data (name, ISO 3166-1 alpha-2 code, flag image URL)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub code: String,
    pub flag: String,
}
