//! Per-route static-generation orchestration.
//!
//! For each route this module issues every query the route needs,
//! concurrently, then assembles the page view-model and declares how long
//! the result stays valid (the revalidation window).
//!
//! ## Required vs optional tasks
//!
//! Each route's fetch is a join over a fixed set of labeled tasks, and
//! each task is statically required or optional:
//!
//! | Route | Required | Optional (degrades to) |
//! |-------|----------|------------------------|
//! | home | content node | listings (empty), both menus (empty) |
//! | listing detail | listing by slug | both menus (empty) |
//! | listing index | listings page | home contact (none), both menus (empty) |
//! | catch-all node | node resolution | both menus (empty) |
//!
//! All tasks are launched together and results are combined only after
//! every one has settled; nothing depends on completion order. A
//! required-task failure fails the route; an optional-task failure
//! substitutes its documented default. An absent node for a known slug
//! or URI is a [`RouteOutcome::NotFound`], not an error.
//!
//! Whole-section defaults also live at this layer: when the backend
//! carries no about/contact/footer group at all, the orchestrator
//! substitutes the hand-authored section fallback from
//! [`mapper`](crate::mapper) so the page stays fully renderable.

use crate::client::{ClientError, CmsClient};
use crate::config::SiteConfig;
use crate::mapper::{
    self, AboutSection, ContactSection, FooterSection, HeroSection, ListingCard, ListingDetail,
    MenuItem,
};
use crate::node::{RawHomeGroups, RawListing, RawMenuItem};
use crate::queries::{HOME_CONTACT, HOME_PAGE, LISTING_BY_SLUG, LISTING_SLUGS, LISTINGS, MENU_BY_SLUG};
use crate::resolver::{self, NodeViewModel, Resolution};
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("primary content query failed: {0}")]
    Client(#[from] ClientError),
}

/// Fully-assembled home page view-model.
#[derive(Debug, Clone)]
pub struct HomePage {
    pub hero: HeroSection,
    pub about: AboutSection,
    pub contact: ContactSection,
    pub footer: FooterSection,
    pub listings: Vec<ListingCard>,
    pub header_menu: Vec<MenuItem>,
    pub footer_menu: Vec<MenuItem>,
}

/// Listings index view-model. Contact info is a degradable extra for
/// the header, not a full section.
#[derive(Debug, Clone)]
pub struct ListingIndexPage {
    pub listings: Vec<ListingCard>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub header_menu: Vec<MenuItem>,
    pub footer_menu: Vec<MenuItem>,
}

/// Listing detail view-model.
#[derive(Debug, Clone)]
pub struct ListingDetailPage {
    pub listing: ListingDetail,
    pub header_menu: Vec<MenuItem>,
    pub footer_menu: Vec<MenuItem>,
}

/// Catch-all node view-model.
#[derive(Debug, Clone)]
pub struct NodePage {
    pub node: NodeViewModel,
    pub header_menu: Vec<MenuItem>,
    pub footer_menu: Vec<MenuItem>,
}

/// The render-ready payload for one route.
#[derive(Debug, Clone)]
pub enum PageView {
    Home(HomePage),
    ListingIndex(ListingIndexPage),
    ListingDetail(ListingDetailPage),
    Node(NodePage),
}

/// Outcome of generating one route: a payload plus its cache lifetime,
/// or a not-found with its own (equally bounded) lifetime.
#[derive(Debug, Clone)]
pub enum RouteOutcome {
    Page {
        view: PageView,
        revalidate_secs: u64,
    },
    NotFound {
        revalidate_secs: u64,
    },
}

// ============================================================================
// Shared fetch helpers
// ============================================================================

/// Fetch a named menu slot as ordered items.
async fn fetch_menu(client: &CmsClient, slug: &str) -> Result<Vec<MenuItem>, ClientError> {
    let data = client.query(&MENU_BY_SLUG, json!({ "slug": slug })).await?;
    let nodes: Vec<RawMenuItem> =
        serde_json::from_value(data["menu"]["menuItems"]["nodes"].clone()).unwrap_or_default();
    Ok(mapper::map_menu_items(nodes))
}

/// Optional-task wrapper: a failed menu degrades to an empty menu.
async fn menu_or_empty(client: &CmsClient, slug: &str) -> Vec<MenuItem> {
    fetch_menu(client, slug).await.unwrap_or_default()
}

/// Parse the nodes of a listings connection, tolerating a null or
/// missing connection.
fn listing_nodes(data: &Value) -> Vec<RawListing> {
    serde_json::from_value(data["listings"]["nodes"].clone()).unwrap_or_default()
}

// ============================================================================
// Routes
// ============================================================================

/// Generate the home route. Fails only if the content query fails;
/// listings and menus degrade to empty collections.
pub async fn home(client: &CmsClient, config: &SiteConfig) -> Result<RouteOutcome, RouteError> {
    let (content, listings, header_menu, footer_menu) = tokio::join!(
        client.query(&HOME_PAGE, json!({ "uri": "/" })),
        client.query(&LISTINGS, json!({ "first": config.listings.home_count })),
        menu_or_empty(client, &config.menus.header_slot),
        menu_or_empty(client, &config.menus.footer_slot),
    );

    let data = content?;
    let groups: RawHomeGroups =
        serde_json::from_value(data["nodeByUri"].clone()).unwrap_or_default();

    let listings = listings
        .map(|data| {
            listing_nodes(&data)
                .iter()
                .map(mapper::map_listing_card)
                .collect()
        })
        .unwrap_or_default();

    Ok(RouteOutcome::Page {
        view: PageView::Home(HomePage {
            hero: HeroSection::from_raw(groups.hero.as_ref()),
            about: groups
                .about
                .as_ref()
                .map(AboutSection::from_raw)
                .unwrap_or_else(AboutSection::fallback),
            contact: groups
                .contact
                .as_ref()
                .map(ContactSection::from_raw)
                .unwrap_or_else(ContactSection::fallback),
            footer: groups
                .footer
                .as_ref()
                .map(FooterSection::from_raw)
                .unwrap_or_else(FooterSection::fallback),
            listings,
            header_menu,
            footer_menu,
        }),
        revalidate_secs: config.routes.revalidate_secs,
    })
}

/// Generate the listings index route. The listings page is required;
/// the home contact group and menus degrade.
pub async fn listing_index(
    client: &CmsClient,
    config: &SiteConfig,
) -> Result<RouteOutcome, RouteError> {
    let (listings, contact, header_menu, footer_menu) = tokio::join!(
        client.query(&LISTINGS, json!({ "first": config.listings.index_count })),
        client.query(&HOME_CONTACT, json!({ "uri": "/" })),
        menu_or_empty(client, &config.menus.header_slot),
        menu_or_empty(client, &config.menus.footer_slot),
    );

    let data = listings?;
    let listings: Vec<ListingCard> = listing_nodes(&data)
        .iter()
        .map(mapper::map_listing_card)
        .collect();

    let (contact_phone, contact_email) = contact
        .ok()
        .map(|data| {
            let phone = data["nodeByUri"]["contact"]["phone"]
                .as_str()
                .map(str::to_string);
            let email = data["nodeByUri"]["contact"]["email"]
                .as_str()
                .map(str::to_string);
            (phone, email)
        })
        .unwrap_or((None, None));

    Ok(RouteOutcome::Page {
        view: PageView::ListingIndex(ListingIndexPage {
            listings,
            contact_phone,
            contact_email,
            header_menu,
            footer_menu,
        }),
        revalidate_secs: config.routes.revalidate_secs,
    })
}

/// Generate a listing detail route. The listing query is required; an
/// absent listing resolves to `NotFound` rather than an error.
pub async fn listing_detail(
    client: &CmsClient,
    config: &SiteConfig,
    slug: &str,
) -> Result<RouteOutcome, RouteError> {
    let (listing, header_menu, footer_menu) = tokio::join!(
        client.query(&LISTING_BY_SLUG, json!({ "slug": slug })),
        menu_or_empty(client, &config.menus.header_slot),
        menu_or_empty(client, &config.menus.footer_slot),
    );

    let data = listing?;
    if data["listing"].is_null() {
        return Ok(RouteOutcome::NotFound {
            revalidate_secs: config.routes.revalidate_secs,
        });
    }
    let raw: RawListing = serde_json::from_value(data["listing"].clone()).unwrap_or_default();

    Ok(RouteOutcome::Page {
        view: PageView::ListingDetail(ListingDetailPage {
            listing: mapper::map_listing_detail(&raw),
            header_menu,
            footer_menu,
        }),
        revalidate_secs: config.routes.revalidate_secs,
    })
}

/// Generate the catch-all node route for an arbitrary URI, dispatching
/// through the template resolver.
pub async fn node(
    client: &CmsClient,
    config: &SiteConfig,
    uri: &str,
) -> Result<RouteOutcome, RouteError> {
    let (resolution, header_menu, footer_menu) = tokio::join!(
        resolver::resolve_uri(client, uri),
        menu_or_empty(client, &config.menus.header_slot),
        menu_or_empty(client, &config.menus.footer_slot),
    );

    match resolution? {
        Resolution::NotFound => Ok(RouteOutcome::NotFound {
            revalidate_secs: config.routes.revalidate_secs,
        }),
        Resolution::Rendered(node) => Ok(RouteOutcome::Page {
            view: PageView::Node(NodePage {
                node,
                header_menu,
                footer_menu,
            }),
            revalidate_secs: config.routes.revalidate_secs,
        }),
    }
}

/// Enumerate listing slugs for pre-generation. Failure here is fatal to
/// the build's detail-route surface, so it propagates.
pub async fn listing_slugs(
    client: &CmsClient,
    config: &SiteConfig,
) -> Result<Vec<String>, RouteError> {
    let data = client
        .query(&LISTING_SLUGS, json!({ "first": config.listings.slug_page }))
        .await?;
    let slugs = listing_nodes(&data)
        .into_iter()
        .filter_map(|node| node.slug)
        .filter(|slug| !slug.is_empty())
        .collect();
    Ok(slugs)
}
