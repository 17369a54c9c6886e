//! Country reference list
//!
//! Fetched once from the public countries API, reduced to name/code/flag and
//! sorted by name. Successful results are kept for the life of the process.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{error, info, instrument};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use deicidium_cache::QueryKey;
use deicidium_core::entities::Country;

use super::caches::COUNTRIES_KEY;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Fields requested from the countries API
pub const COUNTRY_FIELDS: &str = "name,cca2,flags,population,region";

#[derive(Debug, Deserialize)]
struct RawCountry {
    name: RawName,
    cca2: String,
    #[serde(default)]
    flags: Option<RawFlags>,
}

#[derive(Debug, Deserialize)]
struct RawName {
    common: String,
}

#[derive(Debug, Deserialize)]
struct RawFlags {
    #[serde(default)]
    svg: Option<String>,
}

impl From<RawCountry> for Country {
    fn from(raw: RawCountry) -> Self {
        Country {
            name: raw.name.common,
            code: raw.cca2,
            flag: raw.flags.and_then(|f| f.svg).unwrap_or_default(),
        }
    }
}

/// Country service
pub struct CountryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CountryService<'a> {
    /// Create a new CountryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sorted country list, or `None` when it could not be fetched
    ///
    /// A failure is not remembered; the next call asks the API again.
    #[instrument(skip(self))]
    pub async fn fetch_countries(&self) -> Option<Arc<Vec<Country>>> {
        let result = self
            .ctx
            .caches()
            .countries
            .try_get_or_fetch(QueryKey::global(COUNTRIES_KEY), || self.load())
            .await;

        match result {
            Ok(countries) => Some(countries),
            Err(e) => {
                error!(error = %e, "Failed to fetch countries");
                None
            }
        }
    }

    async fn load(&self) -> ServiceResult<Arc<Vec<Country>>> {
        let url = &self.ctx.upstream().countries_url;

        let raw: Vec<RawCountry> = self
            .ctx
            .http_client()
            .get(url)
            .query(&[("fields", COUNTRY_FIELDS)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let countries = transform_countries(raw);
        info!(count = countries.len(), "Country list loaded");
        Ok(Arc::new(countries))
    }
}

fn transform_countries(raw: Vec<RawCountry>) -> Vec<Country> {
    let mut countries: Vec<Country> = raw.into_iter().map(Country::from).collect();
    countries.sort_by(|a, b| compare_names(&a.name, &b.name));
    countries
}

/// Case-insensitive, accent-tolerant name ordering; ties fall back to the raw names
fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Lowercased name with diacritics removed
///
/// Canonical decomposition splits off combining marks; letters whose stroke
/// is part of the base character have no decomposition and are mapped here.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|&c| !is_combining_mark(c))
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'ł' => 'l',
            'ø' => 'o',
            'đ' => 'd',
            'ħ' => 'h',
            'ı' => 'i',
            other => other,
        })
        .collect()
}
