//! View-model mapping and normalization.
//!
//! Pure, total transformations from the wire shapes in [`node`](crate::node)
//! to UI-ready view-models. Three rules hold for everything in this module:
//!
//! - **No I/O.** Mapping is a pure function of its input.
//! - **Total.** No input — including an entirely empty field bag — errors.
//!   Every output field has a defined fallback.
//! - **One fallback table per section.** Each section view-model has a
//!   single `fallback()` constructor enumerating its hand-authored defaults
//!   in one place, used by the orchestrator when the whole field group is
//!   absent from the backend. Per-field defaults (applied when the group
//!   exists but a field is null) live in the section's `from_raw`.
//!
//! ## Formatting rules
//!
//! - Numeric-looking strings (square footage, price) strip non-digits,
//!   parse, and re-render with `,` grouping. An empty stripped string
//!   returns the raw value unchanged — the mapper never invents a `0`.
//! - Price gets a `$` prefix only when the source is a clean JSON number.
//!   String sources get grouping only; no currency symbol is invented.
//! - The about feature list scans four indexed title/description slots and
//!   includes a slot iff either field is non-empty, in index order.
//! - Multi-line service-area text splits on line breaks, trims, and drops
//!   empty lines, preserving order.
//! - Image URLs try the wrapped node, the direct field, then the first
//!   edge; the hero falls back to the bundled placeholder reference.

use crate::node::{
    RawAbout, RawContact, RawFooter, RawHero, RawImageRef, RawListing, RawMenuItem,
};
use serde_json::Value;

/// Bundled placeholder used when no hero image shape resolves.
pub const PLACEHOLDER_IMAGE: &str = "/assets/agent-hero.png";

/// Hero CTA fallbacks are fixed literals, not empty strings.
const DEFAULT_PRIMARY_CTA: &str = "View Current Listings";
const DEFAULT_SECONDARY_CTA: &str = "Schedule Consultation";

// ============================================================================
// Formatting helpers
// ============================================================================

/// Group the digits of a raw backend string with `,` separators.
///
/// Strips every non-digit character first. If nothing remains, the raw
/// value is returned unchanged — `""` stays `""`, never `"0"`. Leading
/// zeros are dropped by the integer parse (`"007"` → `"7"`).
pub fn group_digits(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return raw.to_string();
    }
    match digits.parse::<u64>() {
        Ok(n) => insert_separators(&n.to_string()),
        // Too many digits for u64: group the digit run as-is
        Err(_) => insert_separators(&digits),
    }
}

/// Format a raw quantity value (square footage): numbers are grouped,
/// strings go through [`group_digits`], anything else is empty.
pub fn format_quantity(value: &Value) -> String {
    match value {
        Value::Number(n) => insert_separators(&integral_string(n)),
        Value::String(s) => group_digits(s),
        _ => String::new(),
    }
}

/// Format a raw price value. A clean JSON number earns the `$` prefix;
/// a string is only digit-grouped (no currency symbol invented); null
/// or anything else is empty.
pub fn format_price(value: &Value) -> String {
    match value {
        Value::Number(n) => format!("${}", insert_separators(&integral_string(n))),
        Value::String(s) => group_digits(s),
        _ => String::new(),
    }
}

/// Integral decimal rendering of a JSON number (prices and square
/// footage are whole units; a fractional part is truncated).
fn integral_string(n: &serde_json::Number) -> String {
    if let Some(u) = n.as_u64() {
        u.to_string()
    } else if let Some(i) = n.as_i64() {
        i.to_string()
    } else {
        (n.as_f64().unwrap_or(0.0).trunc() as i64).to_string()
    }
}

/// Insert `,` separators into a decimal digit string every three digits
/// from the right. A leading `-` is preserved.
fn insert_separators(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("{}{}", sign, out)
}

/// Split a multi-line free-text field into trimmed, non-empty lines,
/// preserving order. Handles both `\n` and `\r\n`.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve an image URL from the three wire shapes in fixed precedence:
/// wrapped node, direct field, first edge. `None` when nothing resolves.
pub fn image_url(image: Option<&RawImageRef>) -> Option<String> {
    let image = image?;
    if let Some(url) = image.node.as_ref().and_then(|n| n.source_url.clone()) {
        return Some(url);
    }
    if let Some(url) = image.source_url.clone() {
        return Some(url);
    }
    image
        .edges
        .first()
        .and_then(|edge| edge.node.as_ref())
        .and_then(|n| n.source_url.clone())
}

/// Whole-number display for bath counts (`2.0` → `"2"`, `2.5` → `"2.5"`).
fn format_count(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn or_empty(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// `Some` only for non-empty strings; mirrors backend fields where an
/// empty string means "unset".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

// ============================================================================
// Menus
// ============================================================================

/// A navigation entry with its resolved target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub href: String,
}

/// Map raw menu item nodes, preferring the internal path over the
/// absolute URL, defaulting to `"#"` when neither is present.
pub fn map_menu_items(nodes: Vec<RawMenuItem>) -> Vec<MenuItem> {
    nodes
        .into_iter()
        .map(|node| {
            let href = non_empty(node.path)
                .or_else(|| non_empty(node.url))
                .unwrap_or_else(|| "#".to_string());
            MenuItem {
                id: node.id,
                label: or_empty(node.label),
                href,
            }
        })
        .collect()
}

// ============================================================================
// Hero
// ============================================================================

/// Hero section view-model.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroSection {
    pub headline: String,
    pub subheadline: String,
    pub primary_cta: String,
    pub secondary_cta: String,
    pub image_url: String,
    pub badge_one: Option<String>,
    pub badge_two: Option<String>,
    pub badge_three: Option<String>,
}

impl HeroSection {
    /// Build from the raw group. The hero has no whole-section default:
    /// an absent group behaves like an empty one, with the CTA literals
    /// and the placeholder image as the only non-empty fallbacks.
    pub fn from_raw(raw: Option<&RawHero>) -> Self {
        let empty = RawHero::default();
        let raw = raw.unwrap_or(&empty);
        Self {
            headline: or_empty(raw.headline.clone()),
            subheadline: or_empty(raw.subheadline.clone()),
            primary_cta: raw
                .primary_cta_text
                .clone()
                .unwrap_or_else(|| DEFAULT_PRIMARY_CTA.to_string()),
            secondary_cta: raw
                .secondary_cta_text
                .clone()
                .unwrap_or_else(|| DEFAULT_SECONDARY_CTA.to_string()),
            image_url: image_url(raw.hero_image.as_ref())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            badge_one: non_empty(raw.badge_one_label.clone()),
            badge_two: non_empty(raw.badge_two_label.clone()),
            badge_three: non_empty(raw.badge_three_label.clone()),
        }
    }
}

// ============================================================================
// About
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutFeature {
    pub title: String,
    pub description: String,
}

/// About section view-model.
#[derive(Debug, Clone, PartialEq)]
pub struct AboutSection {
    pub heading: String,
    pub intro: String,
    pub features: Vec<AboutFeature>,
    pub world_title: String,
    pub world_body: String,
    pub stat_left_value: String,
    pub stat_left_label: String,
    pub stat_right_value: String,
    pub stat_right_label: String,
    /// Passed through unvalidated — the backend owns the range.
    pub satisfaction_percent: Option<f64>,
    pub satisfaction_caption: Option<String>,
}

impl AboutSection {
    pub fn from_raw(raw: &RawAbout) -> Self {
        let slots = [
            (&raw.feature1_title, &raw.feature1_description),
            (&raw.feature2_title, &raw.feature2_description),
            (&raw.feature3_title, &raw.feature3_description),
            (&raw.feature4_title, &raw.feature4_description),
        ];
        let features = slots
            .into_iter()
            .filter(|(title, description)| {
                title.as_deref().is_some_and(|t| !t.is_empty())
                    || description.as_deref().is_some_and(|d| !d.is_empty())
            })
            .map(|(title, description)| AboutFeature {
                title: or_empty(title.clone()),
                description: or_empty(description.clone()),
            })
            .collect();
        Self {
            heading: or_empty(raw.heading.clone()),
            intro: or_empty(raw.intro.clone()),
            features,
            world_title: or_empty(raw.world_title.clone()),
            world_body: or_empty(raw.world_body.clone()),
            stat_left_value: or_empty(raw.stat_left_value.clone()),
            stat_left_label: or_empty(raw.stat_left_label.clone()),
            stat_right_value: or_empty(raw.stat_right_value.clone()),
            stat_right_label: or_empty(raw.stat_right_label.clone()),
            satisfaction_percent: raw.satisfaction_percent,
            satisfaction_caption: non_empty(raw.satisfaction_caption.clone()),
        }
    }

    /// Hand-authored section default, used when the backend carries no
    /// about group at all.
    pub fn fallback() -> Self {
        Self {
            heading: "Why Work With Us?".to_string(),
            intro: "Local expertise, market knowledge, and an unwavering commitment \
                    to every transaction."
                .to_string(),
            features: vec![
                AboutFeature {
                    title: "Top Homes".to_string(),
                    description: "Consistently finding the best homes on the market".to_string(),
                },
                AboutFeature {
                    title: "Quick Response".to_string(),
                    description: "Fast response to client inquiries".to_string(),
                },
                AboutFeature {
                    title: "Client Focused".to_string(),
                    description: "Personalized service tailored to your needs and goals"
                        .to_string(),
                },
                AboutFeature {
                    title: "Market Expert".to_string(),
                    description: "Deep knowledge of local neighborhoods and market trends"
                        .to_string(),
                },
            ],
            world_title: "Rooted in the Neighborhood".to_string(),
            world_body: "Living and working here means knowing the character of every \
                         street, from historic districts to new developments. That local \
                         knowledge gives our clients a distinct advantage in finding the \
                         right home or investment property."
                .to_string(),
            stat_left_value: "1000's".to_string(),
            stat_left_label: "of homes toured".to_string(),
            stat_right_value: "10,000's".to_string(),
            stat_right_label: "of doors knocked".to_string(),
            satisfaction_percent: Some(98.0),
            satisfaction_caption: Some("Based on post-transaction surveys".to_string()),
        }
    }
}

// ============================================================================
// Contact
// ============================================================================

/// Contact section view-model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSection {
    pub phone: String,
    pub email: String,
    pub service_area_text: String,
    pub service_area_note: String,
    pub hours_weekday: String,
    pub hours_weekend: String,
}

impl ContactSection {
    pub fn from_raw(raw: &RawContact) -> Self {
        Self {
            phone: or_empty(raw.phone.clone()),
            email: or_empty(raw.email.clone()),
            service_area_text: or_empty(raw.service_area_text.clone()),
            service_area_note: or_empty(raw.service_area_note.clone()),
            hours_weekday: or_empty(raw.hours_weekday.clone()),
            hours_weekend: or_empty(raw.hours_weekend.clone()),
        }
    }

    /// Hand-authored section default.
    pub fn fallback() -> Self {
        Self {
            phone: "(555) 012-3456".to_string(),
            email: "hello@hearthsiderealty.example".to_string(),
            service_area_text: "Serving the greater metro area".to_string(),
            service_area_note: "Not sure about your area? Reach out — we travel.".to_string(),
            hours_weekday: "Mon–Fri: 9am–6pm".to_string(),
            hours_weekend: "Sat–Sun: by appointment".to_string(),
        }
    }
}

// ============================================================================
// Footer
// ============================================================================

/// Footer section view-model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterSection {
    pub tagline: String,
    pub license_number: String,
    pub website: String,
    pub service_areas: Vec<String>,
}

impl FooterSection {
    pub fn from_raw(raw: &RawFooter) -> Self {
        Self {
            tagline: or_empty(raw.footer_tagline.clone()),
            license_number: or_empty(raw.footer_license_number.clone()),
            website: or_empty(raw.footer_website.clone()),
            service_areas: split_lines(raw.footer_service_areas.as_deref().unwrap_or("")),
        }
    }

    /// Hand-authored section default.
    pub fn fallback() -> Self {
        Self {
            tagline: "Your trusted real estate professionals, dedicated to helping you \
                      find the perfect home or sell your property with confidence."
                .to_string(),
            license_number: "123456789".to_string(),
            website: String::new(),
            service_areas: vec![
                "North End".to_string(),
                "Riverside".to_string(),
                "Old Town".to_string(),
                "Lakeview".to_string(),
                "Downtown".to_string(),
                "Westgate".to_string(),
            ],
        }
    }
}

// ============================================================================
// Listings
// ============================================================================

/// A listing as shown on card grids. The price is passed through raw —
/// only the detail page formats it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCard {
    pub id: String,
    pub price: String,
    pub address: String,
    pub beds: u32,
    pub baths: String,
    pub sqft: String,
    pub image_url: Option<String>,
    pub status: Option<String>,
    pub neighborhood: Option<String>,
    pub href: Option<String>,
}

/// Map a raw listing node to its card view-model.
pub fn map_listing_card(node: &RawListing) -> ListingCard {
    let fields = node.listing_fields.clone().unwrap_or_default();
    ListingCard {
        id: node.id.clone(),
        price: match &fields.price {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        },
        address: or_empty(fields.address),
        beds: fields.beds.unwrap_or(0),
        baths: format_count(fields.baths.unwrap_or(0.0)),
        sqft: format_quantity(fields.sqft.as_ref().unwrap_or(&Value::String(String::new()))),
        image_url: image_url(node.featured_image.as_ref()),
        status: non_empty(fields.status),
        neighborhood: first_neighborhood(node),
        href: node
            .slug
            .as_deref()
            .filter(|slug| !slug.is_empty())
            .map(|slug| format!("/listings/{}", slug)),
    }
}

/// A listing as shown on its detail page, with fully formatted figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDetail {
    pub id: String,
    pub title: String,
    pub price: String,
    pub address: String,
    pub beds: u32,
    pub baths: String,
    pub sqft: String,
    pub status: Option<String>,
    pub image_url: Option<String>,
    pub neighborhood: Option<String>,
    pub content: Option<String>,
    pub special_content: Option<String>,
}

/// Map a raw listing node to its detail view-model.
pub fn map_listing_detail(node: &RawListing) -> ListingDetail {
    let fields = node.listing_fields.clone().unwrap_or_default();
    ListingDetail {
        id: node.id.clone(),
        title: or_empty(node.title.clone()),
        price: format_price(fields.price.as_ref().unwrap_or(&Value::Null)),
        address: or_empty(fields.address),
        beds: fields.beds.unwrap_or(0),
        baths: format_count(fields.baths.unwrap_or(0.0)),
        sqft: format_quantity(fields.sqft.as_ref().unwrap_or(&Value::String(String::new()))),
        status: non_empty(fields.status),
        image_url: image_url(node.featured_image.as_ref()),
        neighborhood: first_neighborhood(node),
        content: non_empty(node.content.clone()),
        special_content: non_empty(fields.special_content),
    }
}

/// Only the first neighborhood term is surfaced.
fn first_neighborhood(node: &RawListing) -> Option<String> {
    node.neighborhoods
        .as_ref()
        .and_then(|terms| terms.nodes.first())
        .and_then(|term| non_empty(term.name.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // =========================================================================
    // Numeric formatting
    // =========================================================================

    #[test]
    fn group_digits_inserts_separators() {
        assert_eq!(group_digits("1234567"), "1,234,567");
        assert_eq!(group_digits("2500"), "2,500");
        assert_eq!(group_digits("950"), "950");
    }

    #[test]
    fn group_digits_strips_non_digits_first() {
        assert_eq!(group_digits("2,500 sq ft"), "2,500");
        assert_eq!(group_digits("$675000"), "675,000");
    }

    #[test]
    fn group_digits_empty_stays_empty_not_zero() {
        assert_eq!(group_digits(""), "");
        assert_eq!(group_digits("TBD"), "TBD");
    }

    #[test]
    fn group_digits_drops_leading_zeros() {
        assert_eq!(group_digits("007"), "7");
    }

    #[test]
    fn format_price_number_gets_currency_symbol() {
        assert_eq!(format_price(&json!(2500000)), "$2,500,000");
        assert_eq!(format_price(&json!(950)), "$950");
    }

    #[test]
    fn format_price_string_is_grouped_without_symbol() {
        assert_eq!(format_price(&json!("675000")), "675,000");
        assert_eq!(format_price(&json!("Contact for pricing")), "Contact for pricing");
    }

    #[test]
    fn format_price_null_is_empty() {
        assert_eq!(format_price(&Value::Null), "");
    }

    #[test]
    fn format_quantity_handles_numbers_and_strings() {
        assert_eq!(format_quantity(&json!(2500)), "2,500");
        assert_eq!(format_quantity(&json!("1234567")), "1,234,567");
        assert_eq!(format_quantity(&json!("")), "");
    }

    #[test]
    fn mapping_is_idempotent() {
        // Pure function, no hidden state: same input, same output.
        assert_eq!(group_digits("1234567"), group_digits("1234567"));
        assert_eq!(format_price(&json!(2500000)), format_price(&json!(2500000)));
    }

    // =========================================================================
    // Line splitting
    // =========================================================================

    #[test]
    fn split_lines_trims_and_drops_empties() {
        let areas = split_lines("North End\r\n  Riverside  \n\n\nOld Town\n");
        assert_eq!(areas, vec!["North End", "Riverside", "Old Town"]);
    }

    #[test]
    fn split_lines_preserves_order() {
        assert_eq!(split_lines("b\na\nc"), vec!["b", "a", "c"]);
    }

    // =========================================================================
    // Image URL precedence
    // =========================================================================

    fn image_ref(value: serde_json::Value) -> RawImageRef {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn image_url_prefers_wrapped_node() {
        let image = image_ref(json!({
            "node": {"sourceUrl": "/node.jpg"},
            "sourceUrl": "/direct.jpg",
            "edges": [{"node": {"sourceUrl": "/edge.jpg"}}],
        }));
        assert_eq!(image_url(Some(&image)).as_deref(), Some("/node.jpg"));
    }

    #[test]
    fn image_url_falls_back_to_direct_field() {
        let image = image_ref(json!({
            "sourceUrl": "/direct.jpg",
            "edges": [{"node": {"sourceUrl": "/edge.jpg"}}],
        }));
        assert_eq!(image_url(Some(&image)).as_deref(), Some("/direct.jpg"));
    }

    #[test]
    fn image_url_falls_back_to_first_edge() {
        let image = image_ref(json!({
            "edges": [{"node": {"sourceUrl": "/edge.jpg"}}, {"node": {"sourceUrl": "/x.jpg"}}],
        }));
        assert_eq!(image_url(Some(&image)).as_deref(), Some("/edge.jpg"));
    }

    #[test]
    fn image_url_none_when_nothing_resolves() {
        assert_eq!(image_url(None), None);
        assert_eq!(image_url(Some(&image_ref(json!({})))), None);
    }

    #[test]
    fn hero_uses_placeholder_when_no_image_shape_resolves() {
        let hero = HeroSection::from_raw(None);
        assert_eq!(hero.image_url, PLACEHOLDER_IMAGE);
    }

    // =========================================================================
    // Menus
    // =========================================================================

    fn menu_item(id: &str, path: Option<&str>, url: Option<&str>) -> RawMenuItem {
        RawMenuItem {
            id: id.to_string(),
            label: Some(format!("label-{}", id)),
            url: url.map(str::to_string),
            path: path.map(str::to_string),
        }
    }

    #[test]
    fn menu_prefers_internal_path_over_url() {
        let items = map_menu_items(vec![menu_item(
            "a",
            Some("/listings/"),
            Some("https://cms.example.com/listings/"),
        )]);
        assert_eq!(items[0].href, "/listings/");
    }

    #[test]
    fn menu_falls_back_to_url_then_hash() {
        let items = map_menu_items(vec![
            menu_item("a", None, Some("https://example.com/")),
            menu_item("b", Some(""), Some("")),
            menu_item("c", None, None),
        ]);
        assert_eq!(items[0].href, "https://example.com/");
        assert_eq!(items[1].href, "#");
        assert_eq!(items[2].href, "#");
    }

    // =========================================================================
    // Hero
    // =========================================================================

    #[test]
    fn hero_cta_fallbacks_are_fixed_literals() {
        let hero = HeroSection::from_raw(None);
        assert_eq!(hero.primary_cta, "View Current Listings");
        assert_eq!(hero.secondary_cta, "Schedule Consultation");
        assert_eq!(hero.headline, "");
    }

    #[test]
    fn hero_uses_backend_values_when_present() {
        let raw: RawHero = serde_json::from_value(json!({
            "headline": "Find your place",
            "primaryCtaText": "Browse",
            "badgeTwoLabel": "Top Rated",
        }))
        .unwrap();
        let hero = HeroSection::from_raw(Some(&raw));
        assert_eq!(hero.headline, "Find your place");
        assert_eq!(hero.primary_cta, "Browse");
        assert_eq!(hero.secondary_cta, "Schedule Consultation");
        assert_eq!(hero.badge_one, None);
        assert_eq!(hero.badge_two.as_deref(), Some("Top Rated"));
    }

    // =========================================================================
    // About feature list
    // =========================================================================

    #[test]
    fn feature_list_keeps_index_order_and_skips_empty_slots() {
        let raw: RawAbout = serde_json::from_value(json!({
            "feature3Title": "Third",
            "feature1Description": "first description",
        }))
        .unwrap();
        let about = AboutSection::from_raw(&raw);
        assert_eq!(about.features.len(), 2);
        assert_eq!(about.features[0].title, "");
        assert_eq!(about.features[0].description, "first description");
        assert_eq!(about.features[1].title, "Third");
    }

    #[test]
    fn feature_list_only_slot_two_populated() {
        let raw: RawAbout = serde_json::from_value(json!({
            "feature2Title": "Quick Response",
        }))
        .unwrap();
        let about = AboutSection::from_raw(&raw);
        assert_eq!(about.features.len(), 1);
        assert_eq!(about.features[0].title, "Quick Response");
    }

    #[test]
    fn empty_about_bag_is_total() {
        let about = AboutSection::from_raw(&RawAbout::default());
        assert_eq!(about.heading, "");
        assert!(about.features.is_empty());
        assert_eq!(about.satisfaction_percent, None);
    }

    #[test]
    fn satisfaction_percent_is_not_clamped() {
        let raw: RawAbout =
            serde_json::from_value(json!({"satisfactionPercent": 140.0})).unwrap();
        let about = AboutSection::from_raw(&raw);
        assert_eq!(about.satisfaction_percent, Some(140.0));
    }

    // =========================================================================
    // Section fallbacks
    // =========================================================================

    #[test]
    fn about_fallback_has_four_features() {
        let about = AboutSection::fallback();
        assert_eq!(about.features.len(), 4);
        assert!(!about.heading.is_empty());
    }

    #[test]
    fn contact_and_footer_fallbacks_are_complete() {
        let contact = ContactSection::fallback();
        assert!(!contact.phone.is_empty());
        assert!(!contact.email.is_empty());
        let footer = FooterSection::fallback();
        assert!(!footer.tagline.is_empty());
        assert!(!footer.service_areas.is_empty());
    }

    // =========================================================================
    // Listings
    // =========================================================================

    fn sample_listing() -> RawListing {
        serde_json::from_value(json!({
            "id": "bGlzdGluZzox",
            "title": "Oak Ridge Drive",
            "slug": "oak-ridge-drive",
            "content": "<p>Tour copy</p>",
            "listingFields": {
                "price": "675000",
                "address": "42 Oak Ridge Dr",
                "beds": 4,
                "baths": 2.5,
                "sqft": "2500",
                "status": "For Sale",
                "specialContent": "<p>Corner lot</p>",
            },
            "featuredImage": {"node": {"sourceUrl": "/oak.jpg"}},
            "neighborhoods": {"nodes": [{"name": "Riverside"}, {"name": "Old Town"}]},
        }))
        .unwrap()
    }

    #[test]
    fn listing_card_passes_price_through_raw() {
        let card = map_listing_card(&sample_listing());
        assert_eq!(card.price, "675000");
        assert_eq!(card.sqft, "2,500");
        assert_eq!(card.beds, 4);
        assert_eq!(card.baths, "2.5");
        assert_eq!(card.href.as_deref(), Some("/listings/oak-ridge-drive"));
    }

    #[test]
    fn listing_card_surfaces_only_first_neighborhood() {
        let card = map_listing_card(&sample_listing());
        assert_eq!(card.neighborhood.as_deref(), Some("Riverside"));
    }

    #[test]
    fn listing_card_from_empty_node_is_total() {
        let card = map_listing_card(&RawListing::default());
        assert_eq!(card.price, "");
        assert_eq!(card.beds, 0);
        assert_eq!(card.baths, "0");
        assert_eq!(card.sqft, "");
        assert_eq!(card.image_url, None);
        assert_eq!(card.href, None);
    }

    #[test]
    fn listing_detail_formats_price_and_sqft() {
        let detail = map_listing_detail(&sample_listing());
        assert_eq!(detail.price, "675,000");
        assert_eq!(detail.sqft, "2,500");
        assert_eq!(detail.special_content.as_deref(), Some("<p>Corner lot</p>"));
    }

    #[test]
    fn listing_detail_numeric_price_gets_symbol() {
        let mut node = sample_listing();
        node.listing_fields.as_mut().unwrap().price = Some(json!(2500000));
        let detail = map_listing_detail(&node);
        assert_eq!(detail.price, "$2,500,000");
    }
}
