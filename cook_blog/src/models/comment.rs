use butane::{model, AutoPk, ForeignKey};
use serde::{Deserialize, Serialize};

use super::Post;
use crate::validate::{
    self, Validate, ValidationError, COMMENT_EMAIL_MAX, COMMENT_MESSAGE_MAX, COMMENT_NAME_MAX,
    COMMENT_WEBSITE_MAX,
};
use crate::Result;

/// A reader's comment. Deleted together with its post.
#[model]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Comment {
    pub id: AutoPk<i64>,
    pub name: String,
    pub email: String,
    pub website: String,
    pub message: String,
    pub post: ForeignKey<Post>,
}

impl Comment {
    /// A comment on `post`, which must already be saved.
    pub fn new(
        post: &Post,
        name: impl Into<String>,
        email: impl Into<String>,
        website: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self> {
        post.saved_id()?;
        Ok(Comment {
            id: AutoPk::uninitialized(),
            name: name.into(),
            email: email.into(),
            website: website.into(),
            message: message.into(),
            post: post.into(),
        })
    }
}

impl Validate for Comment {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate::required("name", &self.name, COMMENT_NAME_MAX)?;
        validate::required("email", &self.email, COMMENT_EMAIL_MAX)?;
        validate::required("website", &self.website, COMMENT_WEBSITE_MAX)?;
        validate::required("message", &self.message, COMMENT_MESSAGE_MAX)
    }
}
