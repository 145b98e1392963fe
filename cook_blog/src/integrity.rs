//! What happens to dependent rows when an entity is deleted.
//!
//! | Deleted  | Dependent                 | Policy                         |
//! |----------|---------------------------|--------------------------------|
//! | User     | `Post::author`            | cascade                        |
//! | Post     | `Comment::post`           | cascade                        |
//! | Post     | `Recipe::post`            | set null                       |
//! | Post     | tag links                 | removed                        |
//! | Category | `Post::category`          | set null                       |
//! | Category | child `Category::parent`  | set null (children become roots) |
//! | Tag      | tag links                 | removed                        |
//!
//! Every function here runs in a single transaction, so either the whole
//! delete happens or none of it does. Recipes and comments have no
//! dependents and can be deleted directly with `DataObjectOpsSync::delete`.

use butane::db::ConnectionMethods;
use butane::prelude::*;

use crate::models::{refers_to, Category, Comment, Post, Tag, User, POST_TAGS_TABLE};
use crate::Result;

/// Rows touched by a delete, beyond the deleted entity itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    /// Posts deleted, including a directly deleted post.
    pub posts: usize,
    pub comments: usize,
    pub recipes_detached: usize,
    pub posts_uncategorised: usize,
    /// Child categories turned into roots.
    pub categories_orphaned: usize,
    pub tag_links: usize,
}

/// Delete a user together with all of their posts.
pub fn delete_user(conn: &mut impl BackendConnection, user: &User) -> Result<DeleteSummary> {
    let user_id = user.saved_id()?;
    let tx = conn.transaction()?;
    let mut summary = DeleteSummary::default();
    for post in user.posts(&tx)? {
        remove_post(&tx, &post, &mut summary)?;
    }
    user.delete(&tx)?;
    tx.commit()?;
    log::info!("deleted user {user_id}: {summary:?}");
    Ok(summary)
}

/// Delete a post and its comments; its recipes are kept but detached.
pub fn delete_post(conn: &mut impl BackendConnection, post: &Post) -> Result<DeleteSummary> {
    let post_id = post.saved_id()?;
    let tx = conn.transaction()?;
    let mut summary = DeleteSummary::default();
    remove_post(&tx, post, &mut summary)?;
    tx.commit()?;
    log::info!("deleted post {post_id}: {summary:?}");
    Ok(summary)
}

/// Delete a category. Its posts become uncategorised and its children
/// become roots; neither is deleted.
pub fn delete_category(
    conn: &mut impl BackendConnection,
    category: &Category,
) -> Result<DeleteSummary> {
    let category_id = category.saved_id()?;
    let tx = conn.transaction()?;
    let mut summary = DeleteSummary::default();
    for mut child in category.children(&tx)? {
        child.parent = None;
        child.save(&tx)?;
        summary.categories_orphaned += 1;
    }
    for mut post in category.posts(&tx)? {
        post.category = None;
        post.save(&tx)?;
        summary.posts_uncategorised += 1;
    }
    category.delete(&tx)?;
    tx.commit()?;
    log::info!("deleted category {category_id}: {summary:?}");
    Ok(summary)
}

/// Delete a tag, detaching it from every post.
pub fn delete_tag(conn: &mut impl BackendConnection, tag: &Tag) -> Result<DeleteSummary> {
    let tag_id = tag.saved_id()?;
    let tx = conn.transaction()?;
    let summary = DeleteSummary {
        tag_links: tx.delete_where(POST_TAGS_TABLE, refers_to("has", tag_id))?,
        ..Default::default()
    };
    tag.delete(&tx)?;
    tx.commit()?;
    log::info!("deleted tag {tag_id}: {summary:?}");
    Ok(summary)
}

fn remove_post(
    conn: &impl ConnectionMethods,
    post: &Post,
    summary: &mut DeleteSummary,
) -> Result<()> {
    let post_id = post.saved_id()?;
    summary.comments += Comment::query()
        .filter(refers_to("post", post_id))
        .delete(conn)?;
    for mut recipe in post.recipes(conn)? {
        recipe.post = None;
        recipe.save(conn)?;
        summary.recipes_detached += 1;
    }
    summary.tag_links += conn.delete_where(POST_TAGS_TABLE, refers_to("owner", post_id))?;
    post.delete(conn)?;
    summary.posts += 1;
    Ok(())
}

