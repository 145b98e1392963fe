use butane::{model, AutoPk, ForeignKey};
use serde::{Deserialize, Serialize};

use super::Post;
use crate::validate::{self, Validate, ValidationError, RECIPE_NAME_MAX, RECIPE_SERVES_MAX};
use crate::Result;

/// A recipe, usually shown inside a post.
///
/// Times are in minutes. A recipe outlives its post: deleting the post only
/// clears [`Recipe::post`].
#[model]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Recipe {
    pub id: AutoPk<i64>,
    pub name: String,
    /// Free text, e.g. "4-6 people".
    pub serves: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub ingredients: String,
    pub directions: String,
    pub post: Option<ForeignKey<Post>>,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        serves: impl Into<String>,
        ingredients: impl Into<String>,
        directions: impl Into<String>,
    ) -> Self {
        Recipe {
            id: AutoPk::uninitialized(),
            name: name.into(),
            serves: serves.into(),
            prep_time: 0,
            cook_time: 0,
            ingredients: ingredients.into(),
            directions: directions.into(),
            post: None,
        }
    }

    /// Attach the recipe to a saved post, or detach it.
    pub fn set_post(&mut self, post: Option<&Post>) -> Result<()> {
        self.post = match post {
            Some(post) => {
                post.saved_id()?;
                Some(post.into())
            }
            None => None,
        };
        Ok(())
    }

    pub fn total_time(&self) -> u32 {
        self.prep_time.saturating_add(self.cook_time)
    }
}

impl Validate for Recipe {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate::required("name", &self.name, RECIPE_NAME_MAX)?;
        validate::required("serves", &self.serves, RECIPE_SERVES_MAX)?;
        validate::required("ingredients", &self.ingredients, usize::MAX)?;
        validate::required("directions", &self.directions, usize::MAX)
    }
}
