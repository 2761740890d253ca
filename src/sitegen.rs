//! Static site generation over the route surface.
//!
//! Walks every route the site exposes, generates each one through the
//! orchestrator in [`routes`](crate::routes), renders the settled
//! outcome, and writes the documents under the output directory:
//!
//! ```text
//! dist/
//! ├── index.html                   # Home
//! ├── listings/
//! │   ├── index.html               # Listings index
//! │   └── oak-ridge-drive/
//! │       └── index.html           # Listing detail (one per slug)
//! ├── about/
//! │   └── index.html               # Extra URIs, resolved by node type
//! └── .routes-manifest.json        # Regeneration manifest
//! ```
//!
//! ## Regeneration window
//!
//! Each generated route records its generation time and revalidation
//! window in the routes manifest. A later build skips a route while its
//! window is open and its output file is still on disk; `--force` loads
//! an empty manifest so every route regenerates. The window applies to
//! not-found outcomes too: an absent slug writes the not-found document
//! and becomes eligible for another lookup when the window closes.
//!
//! ## Failure isolation
//!
//! One route failing its required fetch never aborts the build. The
//! route is reported as failed, its previous output (if any) is left in
//! place, and every other route proceeds. The build as a whole only
//! errors on local I/O problems.

use crate::client::CmsClient;
use crate::config::SiteConfig;
use crate::render;
use crate::routes::{self, RouteOutcome};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Name of the routes manifest file within the output directory.
const MANIFEST_FILENAME: &str = ".routes-manifest.json";

/// Version of the routes manifest format. Bump this to invalidate all
/// existing manifests when the format changes.
const MANIFEST_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One generated route's manifest record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteRecord {
    /// Unix timestamp of the generation pass that wrote this route.
    pub generated_at: u64,
    /// Seconds the route stays fresh after `generated_at`.
    pub revalidate_secs: u64,
    /// Output path relative to the output directory.
    pub output_path: String,
}

/// On-disk manifest mapping routes to their generation records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesManifest {
    pub version: u32,
    pub entries: HashMap<String, RouteRecord>,
}

impl RoutesManifest {
    /// Create an empty manifest (used for `--force` or a first build).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: HashMap::new(),
        }
    }

    /// Load from the output directory. Returns an empty manifest if the
    /// file doesn't exist or can't be parsed (version mismatch,
    /// corruption).
    pub fn load(output_dir: &Path) -> Self {
        let path = output_dir.join(MANIFEST_FILENAME);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        let manifest: Self = match serde_json::from_str(&content) {
            Ok(m) => m,
            Err(_) => return Self::empty(),
        };
        if manifest.version != MANIFEST_VERSION {
            return Self::empty();
        }
        manifest
    }

    /// Save to the output directory.
    pub fn save(&self, output_dir: &Path) -> io::Result<()> {
        let path = output_dir.join(MANIFEST_FILENAME);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    /// Whether a route's last generation is still within its window. A
    /// fresh record whose output file has gone missing does not count.
    pub fn is_fresh(&self, route: &str, output_dir: &Path, now: u64) -> bool {
        let Some(record) = self.entries.get(route) else {
            return false;
        };
        if now >= record.generated_at.saturating_add(record.revalidate_secs) {
            return false;
        }
        output_dir.join(&record.output_path).exists()
    }

    fn record(&mut self, route: &str, output_path: &str, revalidate_secs: u64, now: u64) {
        self.entries.insert(
            route.to_string(),
            RouteRecord {
                generated_at: now,
                revalidate_secs,
                output_path: output_path.to_string(),
            },
        );
    }
}

/// What happened to one route during a build pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Generated and written this pass.
    Generated,
    /// Skipped: still within its revalidation window.
    Fresh,
    /// The backend has no node for this route; the not-found document
    /// was written.
    NotFound,
    /// The route's required fetch failed; previous output untouched.
    Failed(String),
}

/// Per-route report collected over a build pass.
#[derive(Debug, Clone)]
pub struct RouteReport {
    pub route: String,
    pub output_path: String,
    pub disposition: Disposition,
}

/// The result of one build pass.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub reports: Vec<RouteReport>,
}

impl BuildSummary {
    pub fn generated(&self) -> usize {
        self.count(|d| matches!(d, Disposition::Generated | Disposition::NotFound))
    }

    pub fn fresh(&self) -> usize {
        self.count(|d| matches!(d, Disposition::Fresh))
    }

    pub fn failed(&self) -> usize {
        self.count(|d| matches!(d, Disposition::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&Disposition) -> bool) -> usize {
        self.reports
            .iter()
            .filter(|r| pred(&r.disposition))
            .count()
    }
}

/// Generate the full site into `output_dir`.
///
/// `force` loads an empty manifest so every route regenerates regardless
/// of its window.
pub async fn build(
    client: &CmsClient,
    config: &SiteConfig,
    output_dir: &Path,
    force: bool,
) -> Result<BuildSummary, BuildError> {
    fs::create_dir_all(output_dir)?;
    let mut manifest = if force {
        RoutesManifest::empty()
    } else {
        RoutesManifest::load(output_dir)
    };
    let now = unix_now();
    let mut reports = Vec::new();

    // Fixed routes, then the enumerated detail routes, then extra URIs.
    // Freshness is checked before fetching so a skipped route costs no
    // queries.
    if manifest.is_fresh("/", output_dir, now) {
        reports.push(fresh_report("/", "index.html"));
    } else {
        let outcome = routes::home(client, config).await;
        reports.push(write_route(
            config,
            output_dir,
            &mut manifest,
            now,
            "/",
            "index.html",
            outcome,
        )?);
    }

    if manifest.is_fresh("/listings", output_dir, now) {
        reports.push(fresh_report("/listings", "listings/index.html"));
    } else {
        let outcome = routes::listing_index(client, config).await;
        reports.push(write_route(
            config,
            output_dir,
            &mut manifest,
            now,
            "/listings",
            "listings/index.html",
            outcome,
        )?);
    }

    match routes::listing_slugs(client, config).await {
        Ok(slugs) => {
            // Skip fresh detail routes before fetching, then generate
            // the rest concurrently.
            let mut pending = Vec::new();
            for slug in slugs {
                let route = format!("/listings/{}", slug);
                let output_path = format!("listings/{}/index.html", slug);
                if manifest.is_fresh(&route, output_dir, now) {
                    reports.push(fresh_report(&route, &output_path));
                } else {
                    pending.push((slug, route, output_path));
                }
            }
            let outcomes = futures::future::join_all(
                pending
                    .iter()
                    .map(|(slug, _, _)| routes::listing_detail(client, config, slug)),
            )
            .await;
            for ((_, route, output_path), outcome) in pending.into_iter().zip(outcomes) {
                reports.push(write_route(
                    config,
                    output_dir,
                    &mut manifest,
                    now,
                    &route,
                    &output_path,
                    outcome,
                )?);
            }
        }
        Err(err) => {
            // Without the slug enumeration no detail route can be
            // addressed; report the surface as one failure.
            reports.push(RouteReport {
                route: "/listings/{slug}".to_string(),
                output_path: String::new(),
                disposition: Disposition::Failed(err.to_string()),
            });
        }
    }

    for uri in &config.routes.extra_uris {
        let output_path = format!("{}/index.html", uri.trim_matches('/'));
        if manifest.is_fresh(uri, output_dir, now) {
            reports.push(fresh_report(uri, &output_path));
            continue;
        }
        let outcome = routes::node(client, config, uri).await;
        reports.push(write_route(
            config,
            output_dir,
            &mut manifest,
            now,
            uri,
            &output_path,
            outcome,
        )?);
    }

    manifest.save(output_dir)?;
    Ok(BuildSummary { reports })
}

fn fresh_report(route: &str, output_path: &str) -> RouteReport {
    RouteReport {
        route: route.to_string(),
        output_path: output_path.to_string(),
        disposition: Disposition::Fresh,
    }
}

/// Render a settled outcome and write it, recording the route in the
/// manifest. Failures touch neither disk nor manifest.
fn write_route(
    config: &SiteConfig,
    output_dir: &Path,
    manifest: &mut RoutesManifest,
    now: u64,
    route: &str,
    output_path: &str,
    outcome: Result<RouteOutcome, routes::RouteError>,
) -> Result<RouteReport, BuildError> {
    let disposition = match outcome {
        Ok(RouteOutcome::Page {
            view,
            revalidate_secs,
        }) => {
            let html = render::render_page(&config.site, &view);
            write_document(output_dir, output_path, &html)?;
            manifest.record(route, output_path, revalidate_secs, now);
            Disposition::Generated
        }
        Ok(RouteOutcome::NotFound { revalidate_secs }) => {
            let html = render::render_not_found(&config.site);
            write_document(output_dir, output_path, &html)?;
            manifest.record(route, output_path, revalidate_secs, now);
            Disposition::NotFound
        }
        Err(err) => Disposition::Failed(err.to_string()),
    };
    Ok(RouteReport {
        route: route.to_string(),
        output_path: output_path.to_string(),
        disposition,
    })
}

fn write_document(output_dir: &Path, output_path: &str, html: &str) -> io::Result<()> {
    let path: PathBuf = output_dir.join(output_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::MockTransport;
    use crate::queries::{
        HOME_CONTACT, HOME_PAGE, LISTING_BY_SLUG, LISTING_SLUGS, LISTINGS, MENU_BY_SLUG, NODE_TYPE,
    };
    use serde_json::json;
    use tempfile::TempDir;

    fn full_backend() -> MockTransport {
        MockTransport::new()
            .respond(&HOME_PAGE, json!({"nodeByUri": null}))
            .respond(&HOME_CONTACT, json!({"nodeByUri": null}))
            .respond(&LISTINGS, json!({"listings": {"nodes": []}}))
            .respond(
                &LISTING_SLUGS,
                json!({"listings": {"nodes": [{"slug": "oak-ridge-drive"}]}}),
            )
            .respond(
                &LISTING_BY_SLUG,
                json!({"listing": {"id": "l1", "title": "Oak Ridge Drive", "slug": "oak-ridge-drive"}}),
            )
            .respond(&MENU_BY_SLUG, json!({"menu": null}))
    }

    // =========================================================================
    // Routes manifest
    // =========================================================================

    #[test]
    fn manifest_round_trips() {
        let tmp = TempDir::new().unwrap();
        let mut manifest = RoutesManifest::empty();
        manifest.record("/", "index.html", 60, 1000);
        manifest.save(tmp.path()).unwrap();

        let loaded = RoutesManifest::load(tmp.path());
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.entries["/"].generated_at, 1000);
        assert_eq!(loaded.entries["/"].revalidate_secs, 60);
    }

    #[test]
    fn missing_or_corrupt_manifest_loads_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(RoutesManifest::load(tmp.path()).entries.is_empty());

        fs::write(tmp.path().join(MANIFEST_FILENAME), "not json").unwrap();
        assert!(RoutesManifest::load(tmp.path()).entries.is_empty());
    }

    #[test]
    fn version_mismatch_loads_empty() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(MANIFEST_FILENAME),
            r#"{"version": 99, "entries": {"/": {"generated_at": 0, "revalidate_secs": 60, "output_path": "index.html"}}}"#,
        )
        .unwrap();
        assert!(RoutesManifest::load(tmp.path()).entries.is_empty());
    }

    #[test]
    fn freshness_requires_window_and_output_file() {
        let tmp = TempDir::new().unwrap();
        let mut manifest = RoutesManifest::empty();
        manifest.record("/", "index.html", 60, 1000);

        // Output file missing: stale even inside the window.
        assert!(!manifest.is_fresh("/", tmp.path(), 1030));

        fs::write(tmp.path().join("index.html"), "<html>").unwrap();
        assert!(manifest.is_fresh("/", tmp.path(), 1030));
        // Window closed.
        assert!(!manifest.is_fresh("/", tmp.path(), 1060));
        // Unknown route.
        assert!(!manifest.is_fresh("/other", tmp.path(), 1030));
    }

    // =========================================================================
    // Build pass
    // =========================================================================

    #[tokio::test]
    async fn build_writes_fixed_and_detail_routes() {
        let tmp = TempDir::new().unwrap();
        let client = full_backend().into_client();

        let summary = build(&client, &SiteConfig::default(), tmp.path(), false)
            .await
            .unwrap();

        assert_eq!(summary.failed(), 0);
        assert!(tmp.path().join("index.html").exists());
        assert!(tmp.path().join("listings/index.html").exists());
        assert!(
            tmp.path()
                .join("listings/oak-ridge-drive/index.html")
                .exists()
        );
        assert!(tmp.path().join(MANIFEST_FILENAME).exists());
    }

    #[tokio::test]
    async fn second_build_inside_window_skips_routes() {
        let tmp = TempDir::new().unwrap();
        let transport = full_backend();
        let client = transport.into_client();
        let config = SiteConfig::default();

        build(&client, &config, tmp.path(), false).await.unwrap();
        let first_calls = transport.calls().len();

        // Fresh client, same transport: the manifest, not the query
        // cache, is what skips the work.
        let summary = build(&transport.into_client(), &config, tmp.path(), false)
            .await
            .unwrap();

        assert_eq!(summary.generated(), 0);
        assert!(summary.fresh() >= 3);
        // Only the slug enumeration went back to the wire.
        assert_eq!(transport.calls().len(), first_calls + 1);
    }

    #[tokio::test]
    async fn force_regenerates_inside_the_window() {
        let tmp = TempDir::new().unwrap();
        let transport = full_backend();
        let config = SiteConfig::default();

        build(&transport.into_client(), &config, tmp.path(), false)
            .await
            .unwrap();
        let summary = build(&transport.into_client(), &config, tmp.path(), true)
            .await
            .unwrap();

        assert_eq!(summary.fresh(), 0);
        assert!(summary.generated() >= 3);
    }

    #[tokio::test]
    async fn absent_listing_writes_not_found_document() {
        let tmp = TempDir::new().unwrap();
        let transport = full_backend().respond(&LISTING_BY_SLUG, json!({"listing": null}));
        let client = transport.into_client();

        let summary = build(&client, &SiteConfig::default(), tmp.path(), false)
            .await
            .unwrap();

        let detail = summary
            .reports
            .iter()
            .find(|r| r.route == "/listings/oak-ridge-drive")
            .unwrap();
        assert_eq!(detail.disposition, Disposition::NotFound);
        let html =
            fs::read_to_string(tmp.path().join("listings/oak-ridge-drive/index.html")).unwrap();
        assert!(html.contains("Page Not Found"));
    }

    #[tokio::test]
    async fn failed_route_is_isolated() {
        let tmp = TempDir::new().unwrap();
        let transport = full_backend().fail(&HOME_PAGE, "backend down");
        let client = transport.into_client();

        let summary = build(&client, &SiteConfig::default(), tmp.path(), false)
            .await
            .unwrap();

        let home = summary.reports.iter().find(|r| r.route == "/").unwrap();
        assert!(matches!(home.disposition, Disposition::Failed(_)));
        assert!(!tmp.path().join("index.html").exists());
        // The rest of the surface still generated.
        assert!(tmp.path().join("listings/index.html").exists());
    }

    #[tokio::test]
    async fn slug_enumeration_failure_reports_the_detail_surface() {
        let tmp = TempDir::new().unwrap();
        let transport = full_backend().fail(&LISTING_SLUGS, "backend down");
        let client = transport.into_client();

        let summary = build(&client, &SiteConfig::default(), tmp.path(), false)
            .await
            .unwrap();

        assert_eq!(summary.failed(), 1);
        assert!(tmp.path().join("index.html").exists());
    }

    #[tokio::test]
    async fn extra_uris_generate_through_the_resolver() {
        let tmp = TempDir::new().unwrap();
        let transport = full_backend().respond(
            &NODE_TYPE,
            json!({"nodeByUri": {"__typename": "Testimonial", "name": "praise"}}),
        );
        let client = transport.into_client();
        let mut config = SiteConfig::default();
        config.routes.extra_uris = vec!["/testimonial/praise/".to_string()];

        build(&client, &config, tmp.path(), false).await.unwrap();

        let html =
            fs::read_to_string(tmp.path().join("testimonial/praise/index.html")).unwrap();
        assert!(html.contains("praise"));
    }
}
