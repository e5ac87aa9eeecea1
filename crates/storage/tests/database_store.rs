//! Database backend against a real Postgres.

use assert_matches::assert_matches;
use folio_storage::{DatabaseMediaStore, MediaStore, MediaUpload, StorageError};
use sqlx::PgPool;

const MAX: usize = 1024 * 1024;

#[sqlx::test(migrations = "../db/migrations")]
async fn store_retrieve_delete(pool: PgPool) {
    let store = DatabaseMediaStore::new(pool, "/api/media");

    let upload = MediaUpload::new("a.webp", Some("image/webp".into()), vec![4; 20], MAX).unwrap();
    let stored = store.store(upload).await.unwrap();
    assert_eq!(stored.locator, format!("/api/media/{}", stored.key));

    let retrieved = store.retrieve(&stored.key).await.unwrap();
    assert_eq!(retrieved.data.len(), 20);
    assert_eq!(retrieved.content_type, "image/webp");

    store.delete(&stored.key).await.unwrap();
    store.delete(&stored.key).await.unwrap();
    assert_matches!(
        store.retrieve(&stored.key).await,
        Err(StorageError::NotFound(_))
    );
}
