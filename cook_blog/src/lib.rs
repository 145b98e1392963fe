//! Data model for a blog and recipe publishing site.
//!
//! Categories form a name-ordered forest, posts belong to an author and at
//! most one category, carry any number of tags, and own recipes and comments.
//! The models are [butane] models; [`integrity`] spells out what happens to
//! dependent rows when something is deleted.
//!
//! ```no_run
//! use butane::prelude::*;
//! use cook_blog::models::{Category, Post, User};
//!
//! # fn main() -> cook_blog::Result<()> {
//! let conn = cook_blog::config::establish_connection()?;
//! let mut author = User::new("alice", "alice@example.com");
//! author.save(&conn)?;
//! let mut desserts = Category::new("Desserts", "desserts");
//! desserts.save(&conn)?;
//! let mut post = Post::new(&author, "Apple Pie", "apple-pie", "pie.jpg", "Sweet.")?;
//! post.set_category(Some(&desserts))?;
//! post.save(&conn)?;
//! assert_eq!(post.location(&conn)?.to_string(), "desserts/apple-pie");
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
pub mod integrity;
pub mod location;
pub mod models;
pub mod tree;
pub mod validate;

pub use error::{Error, Result};
pub use location::PostLocation;
