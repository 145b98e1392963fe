//! Error type for cook_blog operations.

use thiserror::Error as ThisError;

use crate::validate::ValidationError;

/// Errors returned by the content schema.
#[allow(missing_docs)]
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("database error: {0}")]
    Db(#[from] butane::Error),
    /// The canonical location of a post needs its category.
    #[error("post `{post}` has no category")]
    MissingCategory { post: String },
    /// The named object has no primary key yet.
    #[error("{0} must be saved before it can be referenced")]
    NotSaved(&'static str),
    #[error("cannot move category `{category}` under `{parent}`: it is the category itself or one of its descendants")]
    InvalidMove { category: String, parent: String },
    /// Following parent links from the given category id never reached a root.
    #[error("category tree contains a cycle through category {0}")]
    TreeCycle(i64),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for cook_blog operations.
pub type Result<T> = std::result::Result<T, Error>;
