use butane::db::Connection;
use butane::prelude::*;
use cook_blog::integrity::{delete_category, delete_tag};
use cook_blog::models::{Category, Comment, Post, Recipe, Tag};
use cook_blog::{Error, PostLocation};
use cook_blog_test_helper::*;
use pretty_assertions::assert_eq;

mod common;
use common::{create_author, create_category, create_post, create_recipe, create_tag, setup_blog};

fn names_of(tags: Vec<Tag>) -> Vec<String> {
    tags.into_iter().map(|t| t.name).collect()
}

fn apple_pie_location(mut conn: Connection) {
    let (_author, desserts, pie) = setup_blog(&conn);

    let location = pie.location(&conn).unwrap();
    assert_eq!(location, PostLocation::new("desserts", "apple-pie"));
    assert_eq!(location.to_string(), "desserts/apple-pie");
    assert_eq!(pie.location_in(&desserts).to_string(), "desserts/apple-pie");

    let recipes = pie.recipes(&conn).unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].name, "Pie Filling");

    delete_category(&mut conn, &desserts).unwrap();
    let pie = Post::get(&conn, pie.saved_id().unwrap()).unwrap();
    assert!(pie.category.is_none());
    let err = pie.location(&conn).unwrap_err();
    assert!(
        matches!(&err, Error::MissingCategory { post } if post == "apple-pie"),
        "{err:?}"
    );
}
blog_test!(apple_pie_location);

fn location_after_reload(conn: Connection) {
    let (_author, _desserts, pie) = setup_blog(&conn);
    let reloaded = Post::get(&conn, pie.saved_id().unwrap()).unwrap();
    assert_eq!(reloaded.location(&conn).unwrap().to_string(), "desserts/apple-pie");
}
blog_test!(location_after_reload);

fn display_uses_name_or_title(conn: Connection) {
    let author = create_author(&conn, "alice");
    let category = create_category(&conn, "Desserts", None);
    let tag = create_tag(&conn, "Autumn");
    let post = create_post(&conn, &author, "Apple Pie", Some(&category));

    assert_eq!(author.to_string(), "alice");
    assert_eq!(category.to_string(), "Desserts");
    assert_eq!(tag.to_string(), "Autumn");
    assert_eq!(post.to_string(), "Apple Pie");
}
blog_test!(display_uses_name_or_title);

fn recipes_in_storage_order(conn: Connection) {
    let author = create_author(&conn, "alice");
    let pie = create_post(&conn, &author, "Apple Pie", None);
    let stew = create_post(&conn, &author, "Stew", None);
    create_recipe(&conn, "Crust", Some(&pie));
    create_recipe(&conn, "Beef Stew", Some(&stew));
    create_recipe(&conn, "Filling", Some(&pie));
    create_recipe(&conn, "Loose Recipe", None);

    let names: Vec<String> = pie
        .recipes(&conn)
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Crust", "Filling"]);
    assert_eq!(stew.recipes(&conn).unwrap().len(), 1);
}
blog_test!(recipes_in_storage_order);

fn recipe_times_default_to_zero(conn: Connection) {
    let mut recipe = create_recipe(&conn, "Pie Filling", None);
    assert_eq!((recipe.prep_time, recipe.cook_time), (0, 0));

    recipe.prep_time = 20;
    recipe.cook_time = 45;
    recipe.save(&conn).unwrap();
    let stored = butane::find!(Recipe, name == "Pie Filling", &conn).unwrap();
    assert_eq!(stored.total_time(), 65);
    assert!(stored.post.is_none());
}
blog_test!(recipe_times_default_to_zero);

fn comments_listed_per_post(conn: Connection) {
    let (author, _desserts, pie) = setup_blog(&conn);
    let other = create_post(&conn, &author, "Scones", None);
    for (post, name) in [(&pie, "bob"), (&other, "carol"), (&pie, "dave")] {
        let mut comment = Comment::new(
            post,
            name,
            format!("{name}@example.com"),
            "https://example.com",
            "Lovely!",
        )
        .unwrap();
        comment.save(&conn).unwrap();
    }

    let names: Vec<String> = pie
        .comments(&conn)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["bob", "dave"]);
}
blog_test!(comments_listed_per_post);

fn tags_link_once(conn: Connection) {
    let (author, _desserts, mut pie) = setup_blog(&conn);
    let autumn = create_tag(&conn, "Autumn");
    let baking = create_tag(&conn, "Baking");
    let mut scones = create_post(&conn, &author, "Scones", None);

    assert!(pie.add_tag(&conn, &autumn).unwrap());
    assert!(pie.add_tag(&conn, &baking).unwrap());
    assert!(!pie.add_tag(&conn, &autumn).unwrap());
    assert!(scones.add_tag(&conn, &baking).unwrap());

    let pie = Post::get(&conn, pie.saved_id().unwrap()).unwrap();
    let mut tag_names: Vec<String> = pie
        .load_tags(&conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    tag_names.sort();
    assert_eq!(tag_names, vec!["Autumn", "Baking"]);

    let titles: Vec<String> = baking
        .posts(&conn)
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["Apple Pie", "Scones"]);
}
blog_test!(tags_link_once);

fn remove_tag_from_one_post(conn: Connection) {
    let (author, _desserts, mut pie) = setup_blog(&conn);
    let baking = create_tag(&conn, "Baking");
    let mut scones = create_post(&conn, &author, "Scones", None);
    pie.add_tag(&conn, &baking).unwrap();
    scones.add_tag(&conn, &baking).unwrap();

    assert!(pie.remove_tag(&conn, &baking).unwrap());
    assert!(!pie.remove_tag(&conn, &baking).unwrap());
    assert!(pie.load_tags(&conn).unwrap().is_empty());

    let titles: Vec<String> = baking
        .posts(&conn)
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["Scones"]);
}
blog_test!(remove_tag_from_one_post);

fn tag_link_checked_in_storage(mut conn: Connection) {
    let (_author, _desserts, pie) = setup_blog(&conn);
    let autumn = create_tag(&conn, "Autumn");
    let pie_id = pie.saved_id().unwrap();
    let mut first = Post::get(&conn, pie_id).unwrap();
    let mut second = Post::get(&conn, pie_id).unwrap();
    assert!(second.load_tags(&conn).unwrap().is_empty());

    assert!(first.add_tag(&conn, &autumn).unwrap());
    assert!(!second.add_tag(&conn, &autumn).unwrap());
    assert_eq!(names_of(second.load_tags(&conn).unwrap()), vec!["Autumn"]);

    let summary = delete_tag(&mut conn, &autumn).unwrap();
    assert_eq!(summary.tag_links, 1);
}
blog_test!(tag_link_checked_in_storage);

fn tag_changes_leave_other_edits_unsaved(conn: Connection) {
    let (_author, _desserts, mut pie) = setup_blog(&conn);
    let autumn = create_tag(&conn, "Autumn");
    pie.title = "Grandma's Apple Pie".to_string();

    assert!(pie.add_tag(&conn, &autumn).unwrap());
    assert_eq!(pie.title, "Grandma's Apple Pie");
    assert_eq!(names_of(pie.load_tags(&conn).unwrap()), vec!["Autumn"]);
    let stored = Post::get(&conn, pie.saved_id().unwrap()).unwrap();
    assert_eq!(stored.title, "Apple Pie");

    assert!(pie.remove_tag(&conn, &autumn).unwrap());
    assert_eq!(pie.title, "Grandma's Apple Pie");
    assert!(pie.load_tags(&conn).unwrap().is_empty());
}
blog_test!(tag_changes_leave_other_edits_unsaved);

fn unsaved_references_rejected(conn: Connection) {
    let author = create_author(&conn, "alice");
    let mut post = create_post(&conn, &author, "Apple Pie", None);

    let category = Category::new("Desserts", "desserts");
    assert!(matches!(
        post.set_category(Some(&category)),
        Err(Error::NotSaved("category"))
    ));
    let tag = Tag::new("Autumn", "autumn");
    assert!(matches!(
        post.add_tag(&conn, &tag),
        Err(Error::NotSaved("tag"))
    ));
    let unsaved_author = cook_blog::models::User::new("bob", "bob@example.com");
    assert!(matches!(
        Post::new(&unsaved_author, "Scones", "scones", "s.jpg", "Tea time."),
        Err(Error::NotSaved("user"))
    ));
}
blog_test!(unsaved_references_rejected);

fn create_at_survives_updates(conn: Connection) {
    let author = create_author(&conn, "alice");
    let mut post = create_post(&conn, &author, "Apple Pie", None);
    let created = post.create_at();

    post.title = "Grandma's Apple Pie".to_string();
    post.save(&conn).unwrap();

    let stored = Post::get(&conn, post.saved_id().unwrap()).unwrap();
    assert_eq!(stored.title, "Grandma's Apple Pie");
    assert_eq!(stored.create_at(), created);
    assert_eq!(stored.image, "articles/cover.jpg");
}
blog_test!(create_at_survives_updates);

fn category_and_author_listings(conn: Connection) {
    let (author, desserts, _pie) = setup_blog(&conn);
    let bob = create_author(&conn, "bob");
    create_post(&conn, &bob, "Brownies", Some(&desserts));

    let titles = |posts: Vec<Post>| posts.into_iter().map(|p| p.title).collect::<Vec<_>>();
    assert_eq!(
        titles(desserts.posts(&conn).unwrap()),
        vec!["Apple Pie", "Brownies"]
    );
    assert_eq!(
        titles(author.posts(&conn).unwrap()),
        vec!["Apple Pie", "Lemonade"]
    );
}
blog_test!(category_and_author_listings);

fn post_serializes_to_json(conn: Connection) {
    let (_author, _desserts, pie) = setup_blog(&conn);
    let json = serde_json::to_value(&pie).unwrap();
    assert_eq!(json["title"], "Apple Pie");
    assert_eq!(json["slug"], "apple-pie");
    assert_eq!(json["image"], "articles/cover.jpg");

    let location = serde_json::to_value(pie.location(&conn).unwrap()).unwrap();
    assert_eq!(
        location,
        serde_json::json!({"category_slug": "desserts", "post_slug": "apple-pie"})
    );
}
blog_test!(post_serializes_to_json);

fn deserializing_ignores_create_at(conn: Connection) {
    let (_author, _desserts, pie) = setup_blog(&conn);
    let mut json = serde_json::to_value(&pie).unwrap();
    json["create_at"] = serde_json::json!("2000-01-01T00:00:00Z");

    let copy: Post = serde_json::from_value(json).unwrap();
    assert_eq!(copy.title, "Apple Pie");
    assert!(copy.create_at() >= pie.create_at());
}
blog_test!(deserializing_ignores_create_at);
