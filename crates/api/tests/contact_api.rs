//! HTTP-level integration tests for contact submissions and triage.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, create_user, get, get_auth, post_json, put_json_auth, token_for,
};
use folio_core::roles::ROLE_USER;
use serde_json::json;
use sqlx::PgPool;

fn submission(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "email": "Client@Example.com",
        "subject": "Wedding in June",
        "message": "Are you available on the 14th?",
        "projectType": "wedding",
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submit_and_triage(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/contact", submission("Ada")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["status"], "new");
    assert_eq!(created["email"], "client@example.com");
    assert_eq!(created["project_type"], "wedding");
    let id = created["id"].as_i64().unwrap();

    post_json(app.clone(), "/api/contact", submission("Grace")).await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/contact/{id}"),
        json!({ "status": "read" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "read");

    let json = body_json(get_auth(app.clone(), "/api/contact", &token).await).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let json = body_json(get_auth(app, "/api/contact?status=new", &token).await).await;
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Grace");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_submissions_are_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mut bad_email = submission("Ada");
    bad_email["email"] = json!("not-an-email");
    let response = post_json(app.clone(), "/api/contact", bad_email).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let mut long = submission("Ada");
    long["message"] = json!("x".repeat(5_001));
    let response = post_json(app, "/api/contact", long).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn triage_requires_admin(pool: PgPool) {
    let user = create_user(&pool, "visitor", ROLE_USER).await;
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/contact").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app.clone(), "/api/contact", &token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(
        app.clone(),
        "/api/contact/99999",
        json!({ "status": "replied" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(app, "/api/contact/1", json!({ "status": "archived" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
