//! Persisted entities.
//!
//! Leaves first: [`User`], [`Tag`] and [`Category`] stand alone, [`Post`]
//! refers to all three, and [`Recipe`] and [`Comment`] refer to [`Post`].

mod category;
mod comment;
mod post;
mod recipe;
mod tag;
mod user;

pub use category::Category;
pub use comment::Comment;
pub use post::{Post, POST_TAGS_TABLE, UPLOAD_DIR};
pub use recipe::Recipe;
pub use tag::Tag;
pub use user::User;

use butane::query::{BoolExpr, Expr};
use butane::ToSql;

/// Filter matching rows whose foreign key `column` refers to `pk`.
pub(crate) fn refers_to(column: &'static str, pk: i64) -> BoolExpr {
    BoolExpr::Eq(column, Expr::Val(pk.to_sql()))
}
