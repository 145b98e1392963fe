use std::fmt;

use butane::db::ConnectionMethods;
use butane::prelude::*;
use butane::{model, AutoPk};
use serde::{Deserialize, Serialize};

use super::{refers_to, Post};
use crate::validate::{self, Validate, ValidationError, USERNAME_MAX, USER_EMAIL_MAX};
use crate::{Error, Result};

/// The author of posts.
///
/// Authentication lives elsewhere; this model only carries what posts need
/// to refer to.
#[model]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[table = "auth_user"]
pub struct User {
    pub id: AutoPk<i64>,
    pub username: String,
    pub email: String,
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        User {
            id: AutoPk::uninitialized(),
            username: username.into(),
            email: email.into(),
        }
    }

    /// Primary key, or [`Error::NotSaved`] for a user never saved.
    pub fn saved_id(&self) -> Result<i64> {
        (*self.id).ok_or(Error::NotSaved("user"))
    }

    /// Posts written by this user, oldest first.
    pub fn posts(&self, conn: &impl ConnectionMethods) -> Result<Vec<Post>> {
        let posts = Post::query()
            .filter(refers_to("author", self.saved_id()?))
            .order_asc("id")
            .load(conn)?;
        Ok(posts)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}

impl Validate for User {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate::required("username", &self.username, USERNAME_MAX)?;
        validate::max_length("email", &self.email, USER_EMAIL_MAX)
    }
}
