//! Template resolution for nodes fetched by URI.
//!
//! The catch-all route only knows a URI; the node behind it declares its
//! own type. Resolution runs the type-discovery query, then dispatches on
//! the returned tag:
//!
//! ```text
//! __typename  →  template      →  follow-up query
//! "Page"         Template::Page    PAGE_BY_URI
//! "Post"         Template::Post    POST_BY_URI
//! anything else  Template::Generic (discovery data is enough)
//! null node      NotFound
//! ```
//!
//! Dispatch is a total match with the generic arm required by the type
//! system: a content type added on the backend after this binary shipped
//! renders as a generic node, it never errors. This is what keeps the
//! route surface forward-compatible without a release.

use crate::client::{ClientError, CmsClient};
use crate::node::ContentNode;
use crate::queries::{NODE_TYPE, Operation, PAGE_BY_URI, POST_BY_URI};
use serde_json::json;

/// The declared template states. Anything outside the closed set lands
/// on `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Page,
    Post,
    Generic,
}

impl Template {
    /// Total dispatch over the type tag. Never fails.
    pub fn for_tag(tag: &str) -> Template {
        match tag {
            "Page" => Template::Page,
            "Post" => Template::Post,
            _ => Template::Generic,
        }
    }

    /// The follow-up query for this template, when it has one. The
    /// generic template renders straight from the discovery result.
    pub fn operation(self) -> Option<&'static Operation> {
        match self {
            Template::Page => Some(&PAGE_BY_URI),
            Template::Post => Some(&POST_BY_URI),
            Template::Generic => None,
        }
    }
}

/// A resolved node ready for the generic/page/post rendering path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeViewModel {
    pub title: String,
    pub content: Option<String>,
    pub template: Template,
    pub type_tag: String,
}

/// Outcome of resolving a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Rendered(NodeViewModel),
    NotFound,
}

/// Resolve a URI: discover the node's type, dispatch to its template,
/// and run the template's own query when it has one.
///
/// Query failures propagate (the node is this route's primary data);
/// an absent node is `NotFound`; an unrecognized type tag is rendered
/// generically, never an error.
pub async fn resolve_uri(client: &CmsClient, uri: &str) -> Result<Resolution, ClientError> {
    let data = client.query(&NODE_TYPE, json!({ "uri": uri })).await?;
    let Some(node) = ContentNode::from_discovery(&data["nodeByUri"]) else {
        return Ok(Resolution::NotFound);
    };
    let template = Template::for_tag(node.type_tag());

    let view = match template.operation() {
        Some(operation) => {
            let follow_up = client.query(operation, json!({ "uri": uri })).await?;
            // page(...) / post(...) keyed by the operation's root field
            let root = match template {
                Template::Page => &follow_up["page"],
                _ => &follow_up["post"],
            };
            if root.is_null() {
                // Discovery saw the node but the template query missed
                // (e.g. deleted between queries): fall back to the
                // discovery data rather than erroring.
                view_from_node(&node, template)
            } else {
                NodeViewModel {
                    title: root["title"].as_str().unwrap_or("Untitled").to_string(),
                    content: root["content"].as_str().map(str::to_string),
                    template,
                    type_tag: node.type_tag().to_string(),
                }
            }
        }
        None => view_from_node(&node, template),
    };
    Ok(Resolution::Rendered(view))
}

/// Build the view straight from discovery data: title falls back to
/// name, then the type tag, then a fixed literal.
fn view_from_node(node: &ContentNode, template: Template) -> NodeViewModel {
    let (title, content) = match node {
        ContentNode::Page { title, content } | ContentNode::Post { title, content } => {
            (title.clone(), content.clone())
        }
        ContentNode::Listing(listing) => (listing.title.clone(), listing.content.clone()),
        ContentNode::Generic {
            title,
            name,
            content,
            type_tag,
        } => (
            title
                .clone()
                .or_else(|| name.clone())
                .or_else(|| Some(type_tag.clone())),
            content.clone(),
        ),
    };
    NodeViewModel {
        title: title.unwrap_or_else(|| "Untitled".to_string()),
        content: content.filter(|c| !c.is_empty()),
        template,
        type_tag: node.type_tag().to_string(),
    }
}
