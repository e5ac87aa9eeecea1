use sqlx::PgPool;

/// Connect, migrate, verify every table exists.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    folio_db::health_check(&pool).await.unwrap();

    let tables = ["users", "posts", "gear", "contact_messages", "media_blobs"];
    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// A media key is only stored alongside its locator.
#[sqlx::test(migrations = "./migrations")]
async fn test_media_key_requires_url(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO posts (title, category, story, location, shot_date, media_key)
         VALUES ('t', 'c', 's', 'l', '2024-01-01', 'images/ab/x.jpg')",
    )
    .execute(&pool)
    .await;

    let err = result.unwrap_err();
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("ck_posts_media_key_has_url"));
}
