mod common;

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use serial_test::serial;

use common::{create_recipe, register_user, sample_recipe, send, test_app, test_pool, App};

async fn create_tagged_recipe(app: &App, token: &str, title: &str, tags: &[&str]) {
    let mut payload = sample_recipe(title);
    payload["tags"] = json!(tags.iter().map(|n| json!({ "name": n })).collect::<Vec<_>>());
    create_recipe(app, token, payload).await;
}

#[tokio::test]
#[serial]
async fn auth_is_required_for_tag_endpoints() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);

    let (status, _) = send(&app, Method::GET, "/api/tags/", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/tags/1",
        None,
        Some(json!({ "name": "Renamed" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn tags_list_in_name_descending_order() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);
    let token = register_user(&app, "user@example.com").await;

    create_tagged_recipe(&app, &token, "One", &["Breakfast", "Vegan", "Dessert"]).await;

    let (status, body) = send(&app, Method::GET, "/api/tags/", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Vegan", "Dessert", "Breakfast"]);
}

#[tokio::test]
#[serial]
async fn tags_list_is_scoped_to_the_authenticated_user() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);
    let token = register_user(&app, "user@example.com").await;
    let other_token = register_user(&app, "other@example.com").await;

    create_tagged_recipe(&app, &other_token, "Theirs", &["Fruity"]).await;
    create_tagged_recipe(&app, &token, "Mine", &["Comfort"]).await;

    let (status, body) = send(&app, Method::GET, "/api/tags/", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Comfort");
}

#[tokio::test]
#[serial]
async fn rename_updates_an_owned_tag() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);
    let token = register_user(&app, "user@example.com").await;

    create_tagged_recipe(&app, &token, "Dinner", &["After work"]).await;
    let (_, tags) = send(&app, Method::GET, "/api/tags/", Some(&token), None).await;
    let id = tags[0]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/tags/{id}"),
        Some(&token),
        Some(json!({ "name": "Weeknight" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": id, "name": "Weeknight" }));
}

#[tokio::test]
#[serial]
async fn rename_requires_a_name() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);
    let token = register_user(&app, "user@example.com").await;

    create_tagged_recipe(&app, &token, "Dinner", &["Spicy"]).await;
    let (_, tags) = send(&app, Method::GET, "/api/tags/", Some(&token), None).await;
    let id = tags[0]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/tags/{id}"),
        Some(&token),
        Some(json!({ "name": "  " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "name");
}

#[tokio::test]
#[serial]
async fn rename_without_a_name_key_is_a_validation_error() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);
    let token = register_user(&app, "user@example.com").await;

    create_tagged_recipe(&app, &token, "Dinner", &["Keeper"]).await;
    let (_, tags) = send(&app, Method::GET, "/api/tags/", Some(&token), None).await;
    let id = tags[0]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/tags/{id}"),
        Some(&token),
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "body");

    let (_, tags) = send(&app, Method::GET, "/api/tags/", Some(&token), None).await;
    assert_eq!(tags[0]["name"], "Keeper");
}

#[tokio::test]
#[serial]
async fn foreign_tag_is_not_found_for_update_and_delete() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);
    let owner = register_user(&app, "owner@example.com").await;
    let intruder = register_user(&app, "intruder@example.com").await;

    create_tagged_recipe(&app, &owner, "Dinner", &["Secret"]).await;
    let (_, tags) = send(&app, Method::GET, "/api/tags/", Some(&owner), None).await;
    let id = tags[0]["id"].as_i64().unwrap();
    let uri = format!("/api/tags/{id}");

    let (status, _) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(&intruder),
        Some(json!({ "name": "Stolen" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&intruder), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, tags) = send(&app, Method::GET, "/api/tags/", Some(&owner), None).await;
    assert_eq!(tags[0]["name"], "Secret");
}

#[tokio::test]
#[serial]
async fn delete_removes_the_tag_but_not_the_recipe() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);
    let token = register_user(&app, "user@example.com").await;

    create_tagged_recipe(&app, &token, "Dinner", &["Fleeting"]).await;
    let (_, tags) = send(&app, Method::GET, "/api/tags/", Some(&token), None).await;
    let id = tags[0]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/tags/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, json!(null));

    let (_, tags) = send(&app, Method::GET, "/api/tags/", Some(&token), None).await;
    assert_eq!(tags, json!([]));

    let (_, recipes) = send(&app, Method::GET, "/api/recipes/", Some(&token), None).await;
    assert_eq!(recipes.as_array().unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn assigned_only_excludes_unassigned_tags() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);
    let token = register_user(&app, "user@example.com").await;

    create_tagged_recipe(&app, &token, "Tagged meal", &["Used"]).await;
    // Leave an orphan tag behind by clearing the channel on a second recipe
    let mut payload = sample_recipe("Untagged meal");
    payload["tags"] = json!([{ "name": "Orphan" }]);
    let created = create_recipe(&app, &token, payload).await;
    let id = created["id"].as_i64().unwrap();
    send(
        &app,
        Method::PATCH,
        &format!("/api/recipes/{id}"),
        Some(&token),
        Some(json!({ "tags": [] })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/tags/?assigned_only=1",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Used"]);

    // Disabled filter still returns both
    let (_, body) = send(
        &app,
        Method::GET,
        "/api/tags/?assigned_only=0",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
#[serial]
async fn assigned_only_deduplicates_shared_tags() {
    let Some(db) = test_pool().await else { return };
    let app = test_app(db);
    let token = register_user(&app, "user@example.com").await;

    create_tagged_recipe(&app, &token, "Pancakes", &["Breakfast"]).await;
    create_tagged_recipe(&app, &token, "Porridge", &["Breakfast"]).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/tags/?assigned_only=1",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Breakfast");
}
