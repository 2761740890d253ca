//! Query operations against the content API.
//!
//! Each operation pairs a GraphQL document with its cache policy. The
//! policy is declared here as data, not decided inside the client, so the
//! whole cache-merge behavior of the system reads as one table:
//!
//! | Operation | Policy |
//! |-----------|--------|
//! | `HomePage`, `HomeContact`, `NodeType` | [`CachePolicy::ByUriArgument`] |
//! | everything else | [`CachePolicy::ByFullArguments`] |
//!
//! `ByUriArgument` reproduces the backend's denormalized store semantics
//! for the resolve-by-URI lookup: all operations resolving the same URI
//! share one cache slot keyed by the `uri` argument alone, and a new
//! result unconditionally replaces the stored node, whatever its field
//! selection. Resolved node shapes change across CMS edits, so a
//! structural merge would let stale fields bleed through.

/// How the client derives a cache key for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Key by the `uri` variable alone, ignoring every other argument
    /// and the field selection. All by-URI lookups share slots.
    ByUriArgument,
    /// Key by operation name plus the full serialized variables.
    ByFullArguments,
}

/// A named query operation with its document and cache policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
    pub cache_policy: CachePolicy,
}

/// Home page content node with all four field groups.
pub static HOME_PAGE: Operation = Operation {
    name: "HomePage",
    document: r#"
query HomePage($uri: String! = "/") {
  nodeByUri(uri: $uri) {
    ... on Page {
      hero: acfHero {
        headline
        subheadline
        primaryCtaText
        secondaryCtaText
        badgeOneLabel
        badgeTwoLabel
        badgeThreeLabel
        heroImage { node { sourceUrl altText } }
      }
      about: acfHomeAbout {
        heading
        intro
        worldTitle
        worldBody
        feature1Title
        feature1Description
        feature2Title
        feature2Description
        feature3Title
        feature3Description
        feature4Title
        feature4Description
        statLeftValue
        statLeftLabel
        statRightValue
        statRightLabel
        satisfactionPercent
        satisfactionCaption
      }
      contact: acfHomeContact {
        phone
        email
        serviceAreaText
        serviceAreaNote
        hoursWeekday
        hoursWeekend
      }
      footer: acfFooter {
        footerTagline
        footerLicenseNumber
        footerWebsite
        footerServiceAreas
      }
    }
  }
}
"#,
    cache_policy: CachePolicy::ByUriArgument,
};

/// Contact group only, fetched by the listings index for the header.
pub static HOME_CONTACT: Operation = Operation {
    name: "HomeContact",
    document: r#"
query HomeContact($uri: String! = "/") {
  nodeByUri(uri: $uri) {
    ... on Page {
      contact: acfHomeContact {
        phone
        email
      }
    }
  }
}
"#,
    cache_policy: CachePolicy::ByUriArgument,
};

/// A bounded page of listings with card fields.
pub static LISTINGS: Operation = Operation {
    name: "Listings",
    document: r#"
fragment ListingCard on Listing {
  id
  slug
  listingFields: acfListingFields { price address beds baths sqft status }
  featuredImage { node { sourceUrl altText } }
  neighborhoods: terms(where: { taxonomies: [NEIGHBORHOOD] }) { nodes { name } }
}
query Listings($first: Int = 4) {
  listings(first: $first) { nodes { ...ListingCard } }
}
"#,
    cache_policy: CachePolicy::ByFullArguments,
};

/// A single listing with full detail fields.
pub static LISTING_BY_SLUG: Operation = Operation {
    name: "ListingBySlug",
    document: r#"
query ListingBySlug($slug: ID!) {
  listing(id: $slug, idType: SLUG) {
    id
    title
    slug
    content
    listingFields: acfListingFields { price address beds baths sqft status specialContent }
    featuredImage { node { sourceUrl altText } }
    neighborhoods: terms(where: { taxonomies: [NEIGHBORHOOD] }) { nodes { name } }
  }
}
"#,
    cache_policy: CachePolicy::ByFullArguments,
};

/// Slug enumeration for pre-generating listing detail routes.
pub static LISTING_SLUGS: Operation = Operation {
    name: "ListingSlugs",
    document: r#"
query ListingSlugs($first: Int = 100) {
  listings(first: $first) { nodes { slug } }
}
"#,
    cache_policy: CachePolicy::ByFullArguments,
};

/// A named menu slot with its ordered items.
pub static MENU_BY_SLUG: Operation = Operation {
    name: "MenuBySlug",
    document: r#"
query MenuBySlug($slug: ID!) {
  menu(id: $slug, idType: SLUG) {
    id
    menuItems(first: 100) { nodes { id label url path } }
  }
}
"#,
    cache_policy: CachePolicy::ByFullArguments,
};

/// Type-discovering lookup for the catch-all route: the `__typename` tag
/// drives template dispatch, and the inline fragments carry enough for
/// the declared templates to render without a second round trip when the
/// node turns out generic.
pub static NODE_TYPE: Operation = Operation {
    name: "NodeType",
    document: r#"
query NodeType($uri: String!) {
  nodeByUri(uri: $uri) {
    __typename
    ... on Post { title content }
    ... on Page { title content }
  }
}
"#,
    cache_policy: CachePolicy::ByUriArgument,
};

/// Page template query.
pub static PAGE_BY_URI: Operation = Operation {
    name: "PageByUri",
    document: r#"
query PageByUri($uri: ID!) {
  page(id: $uri, idType: URI) {
    title
    content
  }
}
"#,
    cache_policy: CachePolicy::ByFullArguments,
};

/// Post template query.
pub static POST_BY_URI: Operation = Operation {
    name: "PostByUri",
    document: r#"
query PostByUri($uri: ID!) {
  post(id: $uri, idType: URI) {
    title
    content
  }
}
"#,
    cache_policy: CachePolicy::ByFullArguments,
};
