//! Integration tests for the cat and breed endpoints

mod common;

use axum::http::StatusCode;
use cattery_shared::Role;
use serde_json::json;

async fn seed_breed(app: &common::TestApp, name: &str) {
    let admin = app.token("root@x.com", Role::Admin);
    let (status, _) = app
        .post_auth("/breeds", &json!({ "name": name }), &admin)
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_cat_owned_by_caller() {
    let app = common::TestApp::new();
    seed_breed(&app, "Siamese").await;
    let ann = app.token("ann@x.com", Role::User);

    let (status, cat) = app
        .post_auth(
            "/cats",
            &json!({"name": " Tom ", "age": 3, "breed": "Siamese"}),
            &ann,
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(cat["name"], "Tom");
    assert_eq!(cat["breed"], "Siamese");
    assert_eq!(cat["owner_email"], "ann@x.com");
}

#[tokio::test]
async fn test_create_cat_unknown_breed() {
    let app = common::TestApp::new();
    let ann = app.token("ann@x.com", Role::User);

    let (status, body) = app
        .post_auth("/cats", &json!({"name": "Tom", "age": 3, "breed": "Dragon"}), &ann)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Breed not found");
}

#[tokio::test]
async fn test_owner_can_update_and_delete() {
    let app = common::TestApp::new();
    seed_breed(&app, "Siamese").await;
    seed_breed(&app, "Persian").await;
    let ann = app.token("ann@x.com", Role::User);

    let (_, cat) = app
        .post_auth("/cats", &json!({"name": "Tom", "age": 3, "breed": "Siamese"}), &ann)
        .await;
    let uri = format!("/cats/{}", cat["id"]);

    let (status, updated) = app
        .patch_auth(&uri, &json!({"age": 4, "breed": "Persian"}), &ann)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["age"], 4);
    assert_eq!(updated["breed"], "Persian");
    assert_eq!(updated["name"], "Tom");
    assert_eq!(updated["owner_email"], "ann@x.com");

    let (status, _) = app.delete_auth(&uri, &ann).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get_auth(&uri, &ann).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = app.get_auth("/cats", &ann).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_non_owner_cannot_touch_cat() {
    let app = common::TestApp::new();
    seed_breed(&app, "Siamese").await;
    let ann = app.token("ann@x.com", Role::User);
    let bob = app.token("bob@x.com", Role::User);

    let (_, cat) = app
        .post_auth("/cats", &json!({"name": "Tom", "age": 3, "breed": "Siamese"}), &ann)
        .await;
    let uri = format!("/cats/{}", cat["id"]);

    let (status, _) = app.get_auth(&uri, &bob).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.patch_auth(&uri, &json!({"name": "Jerry"}), &bob).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.delete_auth(&uri, &bob).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unchanged) = app.get_auth(&uri, &ann).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged["name"], "Tom");
}

#[tokio::test]
async fn test_admin_sees_every_cat() {
    let app = common::TestApp::new();
    seed_breed(&app, "Siamese").await;
    let ann = app.token("ann@x.com", Role::User);
    let bob = app.token("bob@x.com", Role::User);
    let admin = app.token("root@x.com", Role::Admin);

    app.post_auth("/cats", &json!({"name": "Tom", "age": 3, "breed": "Siamese"}), &ann)
        .await;
    app.post_auth("/cats", &json!({"name": "Kit", "age": 1, "breed": "Siamese"}), &bob)
        .await;

    let (_, mine) = app.get_auth("/cats", &ann).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let (status, all) = app.get_auth("/cats", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_cat_routes_require_token() {
    let app = common::TestApp::new();

    let (status, body) = app.get("/cats").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Invalid or missing token");
}

#[tokio::test]
async fn test_invalid_age_rejected() {
    let app = common::TestApp::new();
    seed_breed(&app, "Siamese").await;
    let ann = app.token("ann@x.com", Role::User);

    let (status, body) = app
        .post_auth("/cats", &json!({"name": "Tom", "age": -2, "breed": "Siamese"}), &ann)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "age");
}

#[tokio::test]
async fn test_breed_creation_is_admin_only() {
    let app = common::TestApp::new();
    let ann = app.token("ann@x.com", Role::User);

    let (status, _) = app
        .post_auth("/breeds", &json!({"name": "Persian"}), &ann)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    seed_breed(&app, "Persian").await;
    let (status, breeds) = app.get_auth("/breeds", &ann).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(breeds[0]["name"], "Persian");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_cat_lifecycle_postgres() {
    let app = common::TestApp::postgres().await;
    app.cleanup().await;

    let body = json!({"name": "Ann", "email": "ann@x.com", "password": "secret1"});
    app.post("/auth/register", &body).await;
    seed_breed(&app, "Siamese").await;
    let ann = app.token("ann@x.com", Role::User);

    let (status, cat) = app
        .post_auth("/cats", &json!({"name": "Tom", "age": 3, "breed": "Siamese"}), &ann)
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/cats/{}", cat["id"]);
    let (status, _) = app.delete_auth(&uri, &ann).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    app.cleanup().await;
}
