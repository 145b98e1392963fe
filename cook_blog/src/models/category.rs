use std::fmt;

use butane::db::ConnectionMethods;
use butane::prelude::*;
use butane::{model, AutoPk, ForeignKey, FromSql, ToSql};
use serde::{Deserialize, Serialize};

use super::{refers_to, Post};
use crate::validate::{self, Validate, ValidationError, CATEGORY_NAME_MAX, CATEGORY_SLUG_MAX};
use crate::{Error, Result};

/// A node in the category forest.
///
/// Siblings are ordered by name. The parent link is only changed through
/// [`Category::move_to`], which refuses to create cycles; see [`crate::tree`]
/// for traversal.
#[model]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Category {
    pub id: AutoPk<i64>,
    pub name: String,
    pub slug: String,
    pub(crate) parent: Option<ForeignKey<Category>>,
}

impl Category {
    /// A new root category.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Category {
            id: AutoPk::uninitialized(),
            name: name.into(),
            slug: slug.into(),
            parent: None,
        }
    }

    /// A new category below `parent`, which must already be saved.
    pub fn child_of(
        parent: &Category,
        name: impl Into<String>,
        slug: impl Into<String>,
    ) -> Result<Self> {
        parent.saved_id()?;
        let mut category = Category::new(name, slug);
        category.parent = Some(parent.into());
        Ok(category)
    }

    /// Primary key, or [`Error::NotSaved`] for a category never saved.
    pub fn saved_id(&self) -> Result<i64> {
        (*self.id).ok_or(Error::NotSaved("category"))
    }

    /// Primary key of the parent, `None` for roots.
    pub fn parent_id(&self) -> Option<i64> {
        self.parent
            .as_ref()
            .and_then(|fk| i64::from_sql(fk.pk().to_sql()).ok())
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Posts filed under this category (not its descendants), oldest first.
    pub fn posts(&self, conn: &impl ConnectionMethods) -> Result<Vec<Post>> {
        let posts = Post::query()
            .filter(refers_to("category", self.saved_id()?))
            .order_asc("id")
            .load(conn)?;
        Ok(posts)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Validate for Category {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate::required("name", &self.name, CATEGORY_NAME_MAX)?;
        validate::slug("slug", &self.slug, CATEGORY_SLUG_MAX)
    }
}
