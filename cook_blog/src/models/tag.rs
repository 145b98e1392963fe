use std::fmt;

use butane::db::ConnectionMethods;
use butane::prelude::*;
use butane::query::{BoolExpr, Expr};
use butane::{model, AutoPk, ToSql};
use serde::{Deserialize, Serialize};

use super::Post;
use crate::validate::{self, Validate, ValidationError, TAG_NAME_MAX, TAG_SLUG_MAX};
use crate::{Error, Result};

/// A label attachable to any number of posts.
#[model]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Tag {
    pub id: AutoPk<i64>,
    pub name: String,
    pub slug: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Tag {
            id: AutoPk::uninitialized(),
            name: name.into(),
            slug: slug.into(),
        }
    }

    /// Primary key, or [`Error::NotSaved`] for a tag never saved.
    pub fn saved_id(&self) -> Result<i64> {
        (*self.id).ok_or(Error::NotSaved("tag"))
    }

    /// Posts carrying this tag, oldest first.
    pub fn posts(&self, conn: &impl ConnectionMethods) -> Result<Vec<Post>> {
        let tagged = Post::fields().tags().contains(BoolExpr::Eq(
            Tag::PKCOL,
            Expr::Val(self.saved_id()?.to_sql()),
        ));
        let posts = Post::query().filter(tagged).order_asc("id").load(conn)?;
        Ok(posts)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Validate for Tag {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate::required("name", &self.name, TAG_NAME_MAX)?;
        validate::slug("slug", &self.slug, TAG_SLUG_MAX)
    }
}
