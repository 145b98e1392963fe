use std::fmt;

use butane::db::ConnectionMethods;
use butane::prelude::*;
use butane::query::BoolExpr;
use butane::{model, AutoPk, ForeignKey, Many, ToSql};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{refers_to, Category, Comment, Recipe, Tag, User};
use crate::location::PostLocation;
use crate::validate::{
    self, Validate, ValidationError, POST_IMAGE_MAX, POST_SLUG_MAX, POST_TITLE_MAX,
};
use crate::{Error, Result};

/// Directory, relative to the media root, that post images are uploaded into.
pub const UPLOAD_DIR: &str = "articles";

/// Join table backing [`Post::tags`], with columns `owner` (post) and `has` (tag).
pub const POST_TAGS_TABLE: &str = "Post_tags_Many";

/// An article, usually a recipe write-up.
#[model]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Post {
    pub id: AutoPk<i64>,
    pub author: ForeignKey<User>,
    pub title: String,
    pub slug: String,
    /// Path of the uploaded image, see [`Post::upload_path`].
    pub image: String,
    pub text: String,
    pub category: Option<ForeignKey<Category>>,
    pub tags: Many<Tag>,
    #[serde(skip_deserializing, default = "Utc::now")]
    create_at: DateTime<Utc>,
}

impl Post {
    /// A new uncategorised post by `author`, who must already be saved.
    /// `image` is the uploaded file name; it is stored under [`UPLOAD_DIR`].
    pub fn new(
        author: &User,
        title: impl Into<String>,
        slug: impl Into<String>,
        image: &str,
        text: impl Into<String>,
    ) -> Result<Self> {
        author.saved_id()?;
        Ok(Post {
            id: AutoPk::uninitialized(),
            author: author.into(),
            title: title.into(),
            slug: slug.into(),
            image: Post::upload_path(image),
            text: text.into(),
            category: None,
            tags: Many::default(),
            create_at: Utc::now(),
        })
    }

    /// Storage path for an uploaded image file.
    pub fn upload_path(file_name: &str) -> String {
        format!("{UPLOAD_DIR}/{}", file_name.trim_start_matches('/'))
    }

    /// Primary key, or [`Error::NotSaved`] for a post never saved.
    pub fn saved_id(&self) -> Result<i64> {
        (*self.id).ok_or(Error::NotSaved("post"))
    }

    /// When the post was first created. Never changes afterwards.
    pub fn create_at(&self) -> DateTime<Utc> {
        self.create_at
    }

    /// File the post under `category`, or take it out of any category.
    pub fn set_category(&mut self, category: Option<&Category>) -> Result<()> {
        self.category = match category {
            Some(category) => {
                category.saved_id()?;
                Some(category.into())
            }
            None => None,
        };
        Ok(())
    }

    /// Canonical location of the post: its category's slug, then its own.
    ///
    /// Fails with [`Error::MissingCategory`] when the post is uncategorised,
    /// for example after its category was deleted.
    pub fn location(&self, conn: &impl ConnectionMethods) -> Result<PostLocation> {
        let category = self
            .category
            .as_ref()
            .ok_or_else(|| Error::MissingCategory {
                post: self.slug.clone(),
            })?
            .load(conn)?;
        Ok(self.location_in(category))
    }

    /// [`Post::location`] for an already loaded category.
    pub fn location_in(&self, category: &Category) -> PostLocation {
        PostLocation::new(&category.slug, &self.slug)
    }

    /// Every recipe attached to this post, in storage order.
    pub fn recipes(&self, conn: &impl ConnectionMethods) -> Result<Vec<Recipe>> {
        let recipes = Recipe::query()
            .filter(refers_to("post", self.saved_id()?))
            .order_asc("id")
            .load(conn)?;
        Ok(recipes)
    }

    /// Comments left on this post, oldest first.
    pub fn comments(&self, conn: &impl ConnectionMethods) -> Result<Vec<Comment>> {
        let comments = Comment::query()
            .filter(refers_to("post", self.saved_id()?))
            .order_asc("id")
            .load(conn)?;
        Ok(comments)
    }

    /// Tags attached to this post.
    pub fn load_tags(&self, conn: &impl ConnectionMethods) -> Result<Vec<Tag>> {
        Ok(self.tags.load(conn)?.cloned().collect())
    }

    /// Attach `tag`. Both must already be saved.
    ///
    /// Only the link row is written; other unsaved edits to the post stay
    /// unsaved. Returns `false`, changing nothing, when the pair is already
    /// linked in storage.
    pub fn add_tag(&mut self, conn: &impl ConnectionMethods, tag: &Tag) -> Result<bool> {
        let post_id = self.saved_id()?;
        let tag_id = tag.saved_id()?;
        if Post::is_linked(conn, post_id, tag_id)? {
            return Ok(false);
        }
        let (owner, has) = (post_id.to_sql(), tag_id.to_sql());
        conn.insert_only(
            POST_TAGS_TABLE,
            &self.tags.columns(),
            &[owner.as_ref(), has.as_ref()],
        )?;
        log::debug!("linked post {post_id} to tag {tag_id}");
        self.refresh_tags(conn, post_id)?;
        Ok(true)
    }

    /// Detach `tag` from this post only. Returns whether it was attached.
    ///
    /// Like [`Post::add_tag`], this touches the link row and nothing else.
    pub fn remove_tag(&mut self, conn: &impl ConnectionMethods, tag: &Tag) -> Result<bool> {
        let post_id = self.saved_id()?;
        let link = BoolExpr::AllOf(vec![
            refers_to("owner", post_id),
            refers_to("has", tag.saved_id()?),
        ]);
        let removed = conn.delete_where(POST_TAGS_TABLE, link)?;
        self.refresh_tags(conn, post_id)?;
        Ok(removed > 0)
    }

    fn is_linked(conn: &impl ConnectionMethods, post_id: i64, tag_id: i64) -> Result<bool> {
        let linked = Post::query()
            .filter(BoolExpr::AllOf(vec![
                refers_to(Post::PKCOL, post_id),
                Post::fields().tags().contains(refers_to(Tag::PKCOL, tag_id)),
            ]))
            .limit(1)
            .load(conn)?;
        Ok(!linked.is_empty())
    }

    // The tag cache on `self` is stale after a link changes. Swap in the
    // stored tag list and leave the other fields alone.
    fn refresh_tags(&mut self, conn: &impl ConnectionMethods, post_id: i64) -> Result<()> {
        self.tags = Post::get(conn, post_id)?.tags;
        Ok(())
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

impl Validate for Post {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate::required("title", &self.title, POST_TITLE_MAX)?;
        validate::slug("slug", &self.slug, POST_SLUG_MAX)?;
        validate::required("image", &self.image, POST_IMAGE_MAX)?;
        validate::required("text", &self.text, usize::MAX)
    }
}
