#![allow(dead_code)] // shared by several test files, not all use every helper
use butane::db::Connection;
use butane::prelude::*;
use cook_blog::models::{Category, Post, Recipe, Tag, User};

pub fn create_author(conn: &Connection, username: &str) -> User {
    let mut user = User::new(username, format!("{username}@example.com"));
    user.save(conn).unwrap();
    user
}

pub fn create_category(conn: &Connection, name: &str, parent: Option<&Category>) -> Category {
    let slug = cook_blog::validate::slugify(name);
    let mut category = match parent {
        Some(parent) => Category::child_of(parent, name, slug).unwrap(),
        None => Category::new(name, slug),
    };
    category.save(conn).unwrap();
    category
}

pub fn create_tag(conn: &Connection, name: &str) -> Tag {
    let mut tag = Tag::new(name, cook_blog::validate::slugify(name));
    tag.save(conn).unwrap();
    tag
}

pub fn create_post(
    conn: &Connection,
    author: &User,
    title: &str,
    category: Option<&Category>,
) -> Post {
    let slug = cook_blog::validate::slugify(title);
    let mut post = Post::new(
        author,
        title,
        slug,
        "cover.jpg",
        format!("All about {title}."),
    )
    .unwrap();
    post.set_category(category).unwrap();
    post.save(conn).unwrap();
    post
}

pub fn create_recipe(conn: &Connection, name: &str, post: Option<&Post>) -> Recipe {
    let mut recipe = Recipe::new(name, "4", "flour, butter, apples", "Mix and bake.");
    recipe.set_post(post).unwrap();
    recipe.save(conn).unwrap();
    recipe
}

/// Sets up a small dessert blog:
/// - categories "Desserts" > "Pies", and "Drinks"
/// - "Apple Pie" in Desserts with the recipe "Pie Filling"
/// - "Lemonade" in Drinks
pub fn setup_blog(conn: &Connection) -> (User, Category, Post) {
    let author = create_author(conn, "alice");
    let desserts = create_category(conn, "Desserts", None);
    create_category(conn, "Pies", Some(&desserts));
    let drinks = create_category(conn, "Drinks", None);

    let pie = create_post(conn, &author, "Apple Pie", Some(&desserts));
    create_recipe(conn, "Pie Filling", Some(&pie));
    create_post(conn, &author, "Lemonade", Some(&drinks));
    (author, desserts, pie)
}
