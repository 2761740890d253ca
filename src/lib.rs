//! # homepress
//!
//! A static site generator for headless-CMS real estate and marketing
//! sites. The CMS owns the content and exposes it over GraphQL;
//! homepress pulls it route by route and writes a plain HTML site that
//! needs no server-side runtime.
//!
//! # Architecture: Fetch → Map → Render
//!
//! Every route flows through the same three layers:
//!
//! ```text
//! 1. Fetch    queries + client   →  raw JSON      (cached per pass)
//! 2. Map      raw JSON           →  view-models   (pure, total)
//! 3. Render   view-models        →  HTML on disk  (maud templates)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Degradability**: the orchestrator decides per route which fetches
//!   are required and which degrade to documented defaults, so a partial
//!   CMS outage narrows the site instead of taking it down.
//! - **Totality**: mapping never fails, whatever shape the backend
//!   returns. Every formatting and fallback decision is a pure function
//!   testable without a network.
//! - **Freshness**: generated routes carry a revalidation window; a
//!   rebuild inside the window skips the route entirely.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`queries`] | GraphQL operations paired with their cache policies |
//! | [`client`] | Shared query client: transport seam, per-pass result cache with replace-only merge |
//! | [`node`] | Wire types for CMS nodes and the type-discovery enum |
//! | [`mapper`] | Pure view-model mapping: formatting rules and section fallbacks |
//! | [`resolver`] | Node-type template dispatch for catch-all URIs |
//! | [`routes`] | Per-route orchestration: concurrent fetches, required vs optional |
//! | [`render`] | Maud templates from view-models to HTML documents |
//! | [`sitegen`] | Build pass: route walking, output writing, regeneration manifest |
//! | [`config`] | `config.toml` loading and GraphQL endpoint resolution |
//! | [`output`] | CLI output formatting for build reports |
//!
//! # Design Decisions
//!
//! ## Replace-Only Caching
//!
//! The per-pass query cache never merges structurally. By-URI lookups
//! share one slot per URI, and a result from a different field selection
//! fully replaces what was stored. Resolved node shapes change across
//! CMS edits; replacing is the only policy that cannot leak stale
//! fields. See [`client`] for the exact contract.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a
//! compile-time HTML macro system: malformed markup is a build error,
//! interpolation is auto-escaped, and there is no template directory to
//! ship or get out of sync.
//!
//! ## Static Output With a Freshness Window
//!
//! The original deployment target for this kind of site regenerates
//! pages on demand after a time window. homepress keeps the same
//! contract offline: the routes manifest records when each route was
//! written and a rebuild regenerates only the routes whose window has
//! closed.

pub mod client;
pub mod config;
pub mod mapper;
pub mod node;
pub mod output;
pub mod queries;
pub mod render;
pub mod resolver;
pub mod routes;
pub mod sitegen;
