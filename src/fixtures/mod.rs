//! Fixtures

use thiserror::Error;

use crate::{products::Product, site::SiteInfo};

const DEFAULT_CATALOG_YAML: &str = include_str!("catalog.yml");
const DEFAULT_SITE_YAML: &str = include_str!("site.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Built-in catalog used as the last catalog fallback.
///
/// # Errors
///
/// Returns a `FixtureError` if the embedded fixture cannot be parsed.
pub fn default_catalog() -> Result<Vec<Product>, FixtureError> {
    parse_catalog(DEFAULT_CATALOG_YAML)
}

/// Parse a YAML list of products.
///
/// # Errors
///
/// Returns a `FixtureError` if the document is not a list of products.
pub fn parse_catalog(yaml: &str) -> Result<Vec<Product>, FixtureError> {
    Ok(serde_norway::from_str(yaml)?)
}

/// Built-in site content used as the last site content fallback.
///
/// # Errors
///
/// Returns a `FixtureError` if the embedded fixture cannot be parsed.
pub fn default_site_info() -> Result<SiteInfo, FixtureError> {
    Ok(serde_norway::from_str(DEFAULT_SITE_YAML)?)
}
