//! Canonical post locations.

use std::fmt;

use serde::Serialize;

/// Name of the route that serves a single post.
pub const POST_ROUTE: &str = "post_single";

/// Where a post lives: its category's slug followed by its own.
///
/// Mapping this onto a URL is the router's job; [`PostLocation::route_name`]
/// and [`PostLocation::route_args`] are what it needs for that.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PostLocation {
    pub category_slug: String,
    pub post_slug: String,
}

impl PostLocation {
    pub fn new(category_slug: impl Into<String>, post_slug: impl Into<String>) -> Self {
        PostLocation {
            category_slug: category_slug.into(),
            post_slug: post_slug.into(),
        }
    }

    pub fn route_name(&self) -> &'static str {
        POST_ROUTE
    }

    /// Named route arguments, in route order.
    pub fn route_args(&self) -> [(&'static str, &str); 2] {
        [
            ("slug", self.category_slug.as_str()),
            ("post_slug", self.post_slug.as_str()),
        ]
    }
}

impl fmt::Display for PostLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category_slug, self.post_slug)
    }
}
