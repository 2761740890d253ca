//! HTML rendering for generated routes.
//!
//! Pure maud templates over the view-models assembled by
//! [`routes`](crate::routes). Rendering takes a settled [`RouteOutcome`]
//! and produces a full document; it performs no I/O and issues no
//! queries, so every markup decision is testable from a view-model
//! literal.
//!
//! ## Rendered Pages
//!
//! - **Home** (`/index.html`): hero, featured listings grid, about,
//!   contact, footer
//! - **Listings index** (`/listings/index.html`): full card grid with
//!   contact header
//! - **Listing detail** (`/listings/{slug}/index.html`): formatted
//!   figures plus the listing body
//! - **Node pages** (catch-all URIs): title and body for pages, posts,
//!   and generically-rendered types
//! - **Not found**: fixed document emitted for absent nodes
//!
//! CMS body content arrives as HTML and is emitted with `PreEscaped`;
//! everything else goes through maud's automatic escaping.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! templating. The stylesheet is embedded at compile time from
//! `static/style.css`.

use crate::config::SiteIdentity;
use crate::mapper::{
    AboutSection, ContactSection, FooterSection, HeroSection, ListingCard, MenuItem,
};
use crate::resolver::NodeViewModel;
use crate::routes::{HomePage, ListingDetailPage, ListingIndexPage, NodePage, PageView};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS: &str = include_str!("../static/style.css");

/// Render a settled page view to a complete HTML document string.
pub fn render_page(site: &SiteIdentity, view: &PageView) -> String {
    let markup = match view {
        PageView::Home(page) => render_home(site, page),
        PageView::ListingIndex(page) => render_listing_index(site, page),
        PageView::ListingDetail(page) => render_listing_detail(site, page),
        PageView::Node(page) => render_node(site, page),
    };
    markup.into_string()
}

/// Render the fixed not-found document.
pub fn render_not_found(site: &SiteIdentity) -> String {
    let content = html! {
        (site_header(site, &[], None))
        main.not-found {
            h1 { "Page Not Found" }
            p { "The page you are looking for does not exist or has been moved." }
            a.button href="/" { "Back to Home" }
        }
    };
    base_document(&format!("Not Found | {}", site.name), content).into_string()
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the site header with brand, navigation, and optional phone
fn site_header(site: &SiteIdentity, menu: &[MenuItem], phone: Option<&str>) -> Markup {
    html! {
        header.site-header {
            a.brand href="/" {
                span.brand-name { (site.name) }
                span.brand-descriptor { (site.descriptor) }
            }
            nav.site-nav {
                ul {
                    @for item in menu {
                        li { a href=(item.href) { (item.label) } }
                    }
                }
            }
            @if let Some(phone) = phone {
                a.header-phone href={ "tel:" (phone) } { (phone) }
            }
        }
    }
}

/// Renders the shared footer section plus the footer menu
fn site_footer(site: &SiteIdentity, footer: &FooterSection, menu: &[MenuItem]) -> Markup {
    html! {
        footer.site-footer {
            div.footer-brand {
                span.brand-name { (site.name) }
                p.footer-tagline { (footer.tagline) }
            }
            @if !footer.service_areas.is_empty() {
                div.footer-areas {
                    h3 { "Service Areas" }
                    ul {
                        @for area in &footer.service_areas {
                            li { (area) }
                        }
                    }
                }
            }
            @if !menu.is_empty() {
                nav.footer-nav {
                    ul {
                        @for item in menu {
                            li { a href=(item.href) { (item.label) } }
                        }
                    }
                }
            }
            div.footer-legal {
                @if !footer.license_number.is_empty() {
                    span.license { "License #" (footer.license_number) }
                }
                @if !footer.website.is_empty() {
                    a href=(footer.website) { (footer.website) }
                }
            }
        }
    }
}

fn hero_section(hero: &HeroSection) -> Markup {
    html! {
        section.hero {
            img.hero-image src=(hero.image_url) alt="";
            div.hero-copy {
                h1 { (hero.headline) }
                p.subheadline { (hero.subheadline) }
                div.hero-ctas {
                    a.button.primary href="/listings" { (hero.primary_cta) }
                    a.button.secondary href="#contact" { (hero.secondary_cta) }
                }
                @let badges: Vec<&String> = [&hero.badge_one, &hero.badge_two, &hero.badge_three]
                    .into_iter()
                    .filter_map(|b| b.as_ref())
                    .collect();
                @if !badges.is_empty() {
                    ul.hero-badges {
                        @for badge in badges {
                            li { (badge) }
                        }
                    }
                }
            }
        }
    }
}

fn about_section(about: &AboutSection) -> Markup {
    html! {
        section.about {
            h2 { (about.heading) }
            p.intro { (about.intro) }
            div.feature-grid {
                @for feature in &about.features {
                    div.feature {
                        h3 { (feature.title) }
                        p { (feature.description) }
                    }
                }
            }
            div.about-world {
                h3 { (about.world_title) }
                p { (about.world_body) }
            }
            div.about-stats {
                div.stat {
                    span.stat-value { (about.stat_left_value) }
                    span.stat-label { (about.stat_left_label) }
                }
                div.stat {
                    span.stat-value { (about.stat_right_value) }
                    span.stat-label { (about.stat_right_label) }
                }
                @if let Some(percent) = about.satisfaction_percent {
                    div.stat.satisfaction {
                        span.stat-value { (percent) "%" }
                        @if let Some(caption) = &about.satisfaction_caption {
                            span.stat-label { (caption) }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the contact section. The form is presentational only; the
/// generated site has no submission backend.
fn contact_section(contact: &ContactSection) -> Markup {
    html! {
        section.contact #contact {
            h2 { "Get In Touch" }
            div.contact-details {
                @if !contact.phone.is_empty() {
                    p.phone { a href={ "tel:" (contact.phone) } { (contact.phone) } }
                }
                @if !contact.email.is_empty() {
                    p.email { a href={ "mailto:" (contact.email) } { (contact.email) } }
                }
                @if !contact.service_area_text.is_empty() {
                    p.service-area { (contact.service_area_text) }
                }
                @if !contact.service_area_note.is_empty() {
                    p.service-area-note { (contact.service_area_note) }
                }
                div.hours {
                    @if !contact.hours_weekday.is_empty() {
                        p { (contact.hours_weekday) }
                    }
                    @if !contact.hours_weekend.is_empty() {
                        p { (contact.hours_weekend) }
                    }
                }
            }
            form.contact-form action="#" method="post" {
                input type="text" name="name" placeholder="Name" required;
                input type="email" name="email" placeholder="Email" required;
                textarea name="message" placeholder="How can we help?" {}
                button type="submit" { "Send Message" }
            }
        }
    }
}

fn listing_card(card: &ListingCard) -> Markup {
    let inner = html! {
        @if let Some(url) = &card.image_url {
            img.card-image src=(url) alt=(card.address) loading="lazy";
        }
        @if let Some(status) = &card.status {
            span.status-badge { (status) }
        }
        div.card-body {
            @if !card.price.is_empty() {
                span.price { (card.price) }
            }
            span.address { (card.address) }
            ul.card-figures {
                li { (card.beds) " bd" }
                li { (card.baths) " ba" }
                @if !card.sqft.is_empty() {
                    li { (card.sqft) " sqft" }
                }
            }
            @if let Some(neighborhood) = &card.neighborhood {
                span.neighborhood { (neighborhood) }
            }
        }
    };
    html! {
        @if let Some(href) = &card.href {
            a.listing-card href=(href) { (inner) }
        } @else {
            div.listing-card { (inner) }
        }
    }
}

fn listing_grid(listings: &[ListingCard]) -> Markup {
    html! {
        @if listings.is_empty() {
            p.no-listings { "No current listings. Check back soon." }
        } @else {
            div.listing-grid {
                @for card in listings {
                    (listing_card(card))
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home(site: &SiteIdentity, page: &HomePage) -> Markup {
    let content = html! {
        (site_header(site, &page.header_menu, Some(&page.contact.phone)))
        main.home-page {
            (hero_section(&page.hero))
            section.featured-listings {
                h2 { "Featured Listings" }
                (listing_grid(&page.listings))
                a.button.secondary href="/listings" { "View All Listings" }
            }
            (about_section(&page.about))
            (contact_section(&page.contact))
        }
        (site_footer(site, &page.footer, &page.footer_menu))
    };
    base_document(&format!("{} | {}", site.name, site.descriptor), content)
}

fn render_listing_index(site: &SiteIdentity, page: &ListingIndexPage) -> Markup {
    let content = html! {
        (site_header(site, &page.header_menu, page.contact_phone.as_deref()))
        main.listings-page {
            h1 { "Current Listings" }
            (listing_grid(&page.listings))
            @if let Some(email) = &page.contact_email {
                p.listings-contact {
                    "Questions about a property? "
                    a href={ "mailto:" (email) } { (email) }
                }
            }
        }
    };
    base_document(&format!("Listings | {}", site.name), content)
}

fn render_listing_detail(site: &SiteIdentity, page: &ListingDetailPage) -> Markup {
    let listing = &page.listing;
    let content = html! {
        (site_header(site, &page.header_menu, None))
        main.listing-detail {
            @if let Some(url) = &listing.image_url {
                img.detail-image src=(url) alt=(listing.address);
            }
            h1 { (listing.title) }
            p.address { (listing.address) }
            @if let Some(status) = &listing.status {
                span.status-badge { (status) }
            }
            ul.detail-figures {
                @if !listing.price.is_empty() {
                    li.price { (listing.price) }
                }
                li { (listing.beds) " beds" }
                li { (listing.baths) " baths" }
                @if !listing.sqft.is_empty() {
                    li { (listing.sqft) " sqft" }
                }
            }
            @if let Some(neighborhood) = &listing.neighborhood {
                p.neighborhood { (neighborhood) }
            }
            @if let Some(content) = &listing.content {
                div.listing-body { (PreEscaped(content.clone())) }
            }
            @if let Some(special) = &listing.special_content {
                div.listing-special { (PreEscaped(special.clone())) }
            }
            a.button href="/listings" { "Back to Listings" }
        }
    };
    base_document(&format!("{} | {}", listing.title, site.name), content)
}

fn render_node(site: &SiteIdentity, page: &NodePage) -> Markup {
    let node: &NodeViewModel = &page.node;
    let content = html! {
        (site_header(site, &page.header_menu, None))
        main.node-page {
            article {
                h1 { (node.title) }
                @if let Some(body) = &node.content {
                    div.node-body { (PreEscaped(body.clone())) }
                }
            }
        }
    };
    base_document(&format!("{} | {}", node.title, site.name), content)
}
