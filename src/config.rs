//! Site configuration and endpoint resolution.
//!
//! Configuration comes from two places with different jobs:
//!
//! - **`config.toml`** — site identity, page sizes, menu slots, extra URIs,
//!   and the revalidation window. Sparse: every key is optional and unknown
//!   keys are rejected to catch typos early.
//! - **Environment variables** — the GraphQL endpoint, resolved once at
//!   process start with a two-tier fallback:
//!
//!   1. `HOMEPRESS_GRAPHQL_ENDPOINT` — full endpoint URL, wins when set
//!   2. `HOMEPRESS_CMS_URL` — CMS base URL; `/graphql` is appended after
//!      trimming any trailing slash
//!
//! If neither variable is set the client is still constructed (so a build
//! pass can start and report per-route failures) but every query fails at
//! request time with a connectivity error.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Hearthside Realty"    # Brand shown in the header and footer
//! descriptor = "REALTOR®"       # Small text next to the brand name
//!
//! [listings]
//! home_count = 4                # Listings on the home page
//! index_count = 8               # Listings on the /listings index
//! slug_page = 100               # Page size for slug enumeration
//!
//! [menus]
//! header_slot = "primary"       # CMS menu slug for the header menu
//! footer_slot = "footer"        # CMS menu slug for the footer menu
//!
//! [routes]
//! revalidate_secs = 60          # Window before a route is regenerated
//! extra_uris = []               # Extra CMS URIs resolved by node type
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Primary endpoint variable: the full GraphQL URL.
pub const ENDPOINT_VAR: &str = "HOMEPRESS_GRAPHQL_ENDPOINT";

/// Fallback variable: the CMS base URL, to which [`GRAPHQL_SUFFIX`] is appended.
pub const CMS_URL_VAR: &str = "HOMEPRESS_CMS_URL";

/// Path suffix appended to [`CMS_URL_VAR`].
pub const GRAPHQL_SUFFIX: &str = "/graphql";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Brand identity shown by the render layer.
    pub site: SiteIdentity,
    /// Listing page sizes.
    pub listings: ListingsConfig,
    /// CMS menu slots fetched for the header and footer.
    pub menus: MenusConfig,
    /// Route surface settings.
    pub routes: RoutesConfig,
}

impl SiteConfig {
    /// Load from a `config.toml` path. A missing file yields the defaults;
    /// a malformed file is an error (silent fallback would hide typos).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listings.home_count == 0 || self.listings.index_count == 0 {
            return Err(ConfigError::Validation(
                "listings.home_count and listings.index_count must be non-zero".into(),
            ));
        }
        if self.listings.slug_page == 0 {
            return Err(ConfigError::Validation(
                "listings.slug_page must be non-zero".into(),
            ));
        }
        if self.menus.header_slot.is_empty() || self.menus.footer_slot.is_empty() {
            return Err(ConfigError::Validation(
                "menus.header_slot and menus.footer_slot must not be empty".into(),
            ));
        }
        if self.routes.revalidate_secs == 0 {
            return Err(ConfigError::Validation(
                "routes.revalidate_secs must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Brand identity shown in the header and footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteIdentity {
    pub name: String,
    pub descriptor: String,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            name: "Hearthside Realty".to_string(),
            descriptor: "REALTOR®".to_string(),
        }
    }
}

/// Listing page sizes per route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingsConfig {
    /// Number of listings fetched for the home page.
    pub home_count: u32,
    /// Number of listings fetched for the listings index.
    pub index_count: u32,
    /// Page size for the slug-enumeration query.
    pub slug_page: u32,
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            home_count: 4,
            index_count: 8,
            slug_page: 100,
        }
    }
}

/// CMS menu slots. Menus are fetched by slug, one query per slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenusConfig {
    pub header_slot: String,
    pub footer_slot: String,
}

impl Default for MenusConfig {
    fn default() -> Self {
        Self {
            header_slot: "primary".to_string(),
            footer_slot: "footer".to_string(),
        }
    }
}

/// Route surface settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutesConfig {
    /// Seconds before a generated route is eligible for regeneration.
    /// This window is the system's only freshness guarantee.
    pub revalidate_secs: u64,
    /// CMS URIs beyond the fixed route surface, resolved by node type
    /// through the template resolver (e.g. `"/about/"`).
    pub extra_uris: Vec<String>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            revalidate_secs: 60,
            extra_uris: Vec::new(),
        }
    }
}

/// Resolve the GraphQL endpoint from the process environment.
///
/// `None` means no endpoint is configured; the client still constructs
/// and every query fails at request time.
pub fn resolve_endpoint() -> Option<String> {
    resolve_endpoint_from(
        std::env::var(ENDPOINT_VAR).ok().as_deref(),
        std::env::var(CMS_URL_VAR).ok().as_deref(),
    )
}

/// Pure endpoint resolution: primary wins, else base URL + `/graphql`
/// with a trailing slash trimmed. Empty values count as unset.
pub fn resolve_endpoint_from(primary: Option<&str>, base_url: Option<&str>) -> Option<String> {
    if let Some(endpoint) = primary
        && !endpoint.is_empty()
    {
        return Some(endpoint.to_string());
    }
    let base = base_url?;
    if base.is_empty() {
        return None;
    }
    Some(format!("{}{}", base.trim_end_matches('/'), GRAPHQL_SUFFIX))
}

/// Stock `config.toml` with all options documented, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# homepress configuration
# All options are optional - defaults shown below.
#
# The GraphQL endpoint is NOT configured here. Set one of:
#   HOMEPRESS_GRAPHQL_ENDPOINT  full endpoint URL (wins when both are set)
#   HOMEPRESS_CMS_URL           CMS base URL; "/graphql" is appended

[site]
# Brand shown in the header and footer
name = "Hearthside Realty"
# Small text next to the brand name
descriptor = "REALTOR®"

[listings]
# Listings shown on the home page
home_count = 4
# Listings shown on the /listings index
index_count = 8
# Page size for the slug-enumeration query (pre-generated detail pages)
slug_page = 100

[menus]
# CMS menu slug for the header menu
header_slot = "primary"
# CMS menu slug for the footer menu
footer_slot = "footer"

[routes]
# Seconds before a generated route is eligible for regeneration
revalidate_secs = 60
# Extra CMS URIs resolved by node type (rendered with the generic
# template when the type is not recognized)
extra_uris = []
"##
}
