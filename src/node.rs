//! Wire-shape types for CMS query results.
//!
//! Everything the backend returns is denormalized and partially optional:
//! field groups are identity-less bags of nullable scalars attached to a
//! content node, and the node itself is polymorphic over a type tag
//! (`__typename`). These types mirror the wire exactly — every field is
//! an `Option` — so shape drift between CMS edits never fails
//! deserialization. Normalization and defaulting happen later, in
//! [`mapper`](crate::mapper).
//!
//! The one piece of logic here is [`ContentNode`], the tagged union over
//! the closed-but-extensible set of node types. The `Generic` arm is the
//! required fallback: an unrecognized type tag degrades to a generic
//! rendering, it never errors.

use serde::Deserialize;
use serde_json::Value;

/// A content node as returned by the type-discovery query, discriminated
/// by its `__typename` tag.
///
/// `Listing` is constructed from the listing-by-slug query rather than
/// discovery (the discovery selection carries no listing fields); it is
/// part of the union so every node shape the system understands is
/// enumerated in one place.
#[derive(Debug, Clone)]
pub enum ContentNode {
    Page {
        title: Option<String>,
        content: Option<String>,
    },
    Post {
        title: Option<String>,
        content: Option<String>,
    },
    Listing(Box<RawListing>),
    /// Fallback arm for any type tag without a declared template.
    Generic {
        type_tag: String,
        title: Option<String>,
        name: Option<String>,
        content: Option<String>,
    },
}

impl ContentNode {
    /// Build a node from a type-discovery result. `None` means the backend
    /// returned no node for the URI (the not-found case).
    ///
    /// Total over its input: a missing or unrecognized `__typename` falls
    /// into the `Generic` arm rather than failing.
    pub fn from_discovery(node: &Value) -> Option<ContentNode> {
        if node.is_null() {
            return None;
        }
        let tag = node["__typename"].as_str().unwrap_or("");
        let title = string_field(node, "title");
        let content = string_field(node, "content");
        match tag {
            "Page" => Some(ContentNode::Page { title, content }),
            "Post" => Some(ContentNode::Post { title, content }),
            _ => Some(ContentNode::Generic {
                type_tag: if tag.is_empty() {
                    "Unknown".to_string()
                } else {
                    tag.to_string()
                },
                title,
                name: string_field(node, "name"),
                content,
            }),
        }
    }

    /// The type tag this node was discriminated on.
    pub fn type_tag(&self) -> &str {
        match self {
            ContentNode::Page { .. } => "Page",
            ContentNode::Post { .. } => "Post",
            ContentNode::Listing(_) => "Listing",
            ContentNode::Generic { type_tag, .. } => type_tag,
        }
    }
}

fn string_field(node: &Value, key: &str) -> Option<String> {
    node[key].as_str().map(str::to_string)
}

/// The four field groups attached to the home page node.
///
/// A `None` group means the backend carries no content for that section;
/// the orchestrator substitutes the section's hand-authored default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawHomeGroups {
    pub hero: Option<RawHero>,
    pub about: Option<RawAbout>,
    pub contact: Option<RawContact>,
    pub footer: Option<RawFooter>,
}

/// Hero field group.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawHero {
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub primary_cta_text: Option<String>,
    pub secondary_cta_text: Option<String>,
    pub badge_one_label: Option<String>,
    pub badge_two_label: Option<String>,
    pub badge_three_label: Option<String>,
    pub hero_image: Option<RawImageRef>,
}

/// About field group. Features arrive as four indexed title/description
/// slots, not as a list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAbout {
    pub heading: Option<String>,
    pub intro: Option<String>,
    pub world_title: Option<String>,
    pub world_body: Option<String>,
    pub feature1_title: Option<String>,
    pub feature1_description: Option<String>,
    pub feature2_title: Option<String>,
    pub feature2_description: Option<String>,
    pub feature3_title: Option<String>,
    pub feature3_description: Option<String>,
    pub feature4_title: Option<String>,
    pub feature4_description: Option<String>,
    pub stat_left_value: Option<String>,
    pub stat_left_label: Option<String>,
    pub stat_right_value: Option<String>,
    pub stat_right_label: Option<String>,
    pub satisfaction_percent: Option<f64>,
    pub satisfaction_caption: Option<String>,
}

/// Contact field group.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawContact {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub service_area_text: Option<String>,
    pub service_area_note: Option<String>,
    pub hours_weekday: Option<String>,
    pub hours_weekend: Option<String>,
}

/// Footer field group. `footer_service_areas` is a single multi-line
/// text field, split into a list by the mapper.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawFooter {
    pub footer_tagline: Option<String>,
    pub footer_license_number: Option<String>,
    pub footer_website: Option<String>,
    pub footer_service_areas: Option<String>,
}

/// A listing node with its field group and relations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawListing {
    pub id: String,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub listing_fields: Option<RawListingFields>,
    pub featured_image: Option<RawImageRef>,
    pub neighborhoods: Option<RawTermConnection>,
}

/// Listing field group. `price` and `sqft` are raw backend values that
/// may be strings with non-numeric characters or plain numbers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawListingFields {
    pub price: Option<Value>,
    pub address: Option<String>,
    pub beds: Option<u32>,
    pub baths: Option<f64>,
    pub sqft: Option<Value>,
    pub status: Option<String>,
    pub special_content: Option<String>,
}

/// Taxonomy term connection (e.g. neighborhoods). Only the first term is
/// ever surfaced.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTermConnection {
    pub nodes: Vec<RawTerm>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTerm {
    pub name: Option<String>,
}

/// An image reference, which the backend serves in one of three shapes:
/// a wrapped node, a direct field, or a connection of edges. The mapper
/// tries them in that fixed order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawImageRef {
    pub node: Option<RawImage>,
    pub source_url: Option<String>,
    pub edges: Vec<RawImageEdge>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawImage {
    pub source_url: Option<String>,
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawImageEdge {
    pub node: Option<RawImage>,
}

/// A menu item as returned by the menu-by-slug query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMenuItem {
    pub id: String,
    pub label: Option<String>,
    pub url: Option<String>,
    pub path: Option<String>,
}
