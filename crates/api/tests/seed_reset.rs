//! Bulk reset used by `folio-seed --reset`.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use common::{admin_token, jpeg, multipart_request, post_json};
use folio_api::maintenance::{reset_content, ResetSummary};
use folio_db::repositories::{ContactRepo, GearRepo, PostRepo};
use folio_storage::{InMemoryMediaStore, MediaLifecycle};
use sqlx::PgPool;

const POST_FIELDS: &[(&str, &str)] = &[
    ("title", "Harbour at Dawn"),
    ("category", "landscape"),
    ("story", "Fog rolling in."),
    ("location", "Brixham"),
    ("shot_date", "2024-03-01"),
];

#[sqlx::test(migrations = "../db/migrations")]
async fn reset_deletes_owned_media(pool: PgPool) {
    let token = admin_token(&pool).await;
    let store = Arc::new(InMemoryMediaStore::new("/api/media"));
    let app = common::build_test_app_with_store(pool.clone(), store.clone());

    let response = multipart_request(
        app.clone(),
        Method::POST,
        "/api/posts",
        POST_FIELDS,
        Some(&jpeg("media", 10)),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let gear = [("name", "Profoto B10"), ("type", "lighting")];
    let response = multipart_request(
        app.clone(),
        Method::POST,
        "/api/gear",
        &gear,
        Some(&jpeg("image", 6)),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let external = [
        ("name", "Gitzo Mountaineer"),
        ("type", "tripod"),
        ("image_url", "https://cdn.example.com/gitzo.jpg"),
    ];
    let response =
        multipart_request(app.clone(), Method::POST, "/api/gear", &external, None, Some(&token))
            .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    post_json(
        app,
        "/api/contact",
        serde_json::json!({ "name": "Ada", "email": "ada@example.com", "message": "Hi" }),
    )
    .await;
    assert_eq!(store.len().await, 2);

    let summary = reset_content(&pool, &MediaLifecycle::new(store.clone()))
        .await
        .unwrap();

    assert_eq!(
        summary,
        ResetSummary {
            posts: 1,
            gear: 2,
            messages: 1,
            media_released: 2,
        }
    );
    assert!(store.is_empty().await);
    assert!(PostRepo::delete_all(&pool).await.unwrap().is_empty());
    assert!(GearRepo::delete_all(&pool).await.unwrap().is_empty());
    assert_eq!(ContactRepo::delete_all(&pool).await.unwrap(), 0);
}

/// Backend failures are logged and do not stop the rows from being removed.
#[sqlx::test(migrations = "../db/migrations")]
async fn reset_survives_failing_deletes(pool: PgPool) {
    let token = admin_token(&pool).await;
    let store = Arc::new(InMemoryMediaStore::new("/api/media"));
    let app = common::build_test_app_with_store(pool.clone(), store.clone());

    let response = multipart_request(
        app,
        Method::POST,
        "/api/posts",
        POST_FIELDS,
        Some(&jpeg("media", 10)),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    store.set_fail_deletes(true);
    let summary = reset_content(&pool, &MediaLifecycle::new(store.clone()))
        .await
        .unwrap();

    assert_eq!(summary.posts, 1);
    assert_eq!(summary.media_released, 1);
    assert_eq!(store.len().await, 1);
    assert!(PostRepo::delete_all(&pool).await.unwrap().is_empty());
}
