//! Repository for the `gear` table.

use folio_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::gear::{CreateGear, Gear, UpdateGear};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, gear_type, brand, model, description, image_url, media_key, \
                       specs, purchase_date, in_use, created_at, updated_at";

/// Provides CRUD operations for gear items.
pub struct GearRepo;

impl GearRepo {
    /// Insert a new gear item, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateGear) -> Result<Gear, sqlx::Error> {
        let query = format!(
            "INSERT INTO gear (name, gear_type, brand, model, description, image_url, media_key,
                               specs, purchase_date, in_use)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gear>(&query)
            .bind(&input.name)
            .bind(&input.gear_type)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.media_key)
            .bind(Json(&input.specs))
            .bind(input.purchase_date)
            .bind(input.in_use)
            .fetch_one(pool)
            .await
    }

    /// Find a gear item by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Gear>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gear WHERE id = $1");
        sqlx::query_as::<_, Gear>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List gear, optionally restricted to one type, ordered by type then name.
    pub async fn list(pool: &PgPool, gear_type: Option<&str>) -> Result<Vec<Gear>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gear
             WHERE ($1::text IS NULL OR gear_type = $1)
             ORDER BY gear_type ASC, name ASC, id ASC"
        );
        sqlx::query_as::<_, Gear>(&query)
            .bind(gear_type)
            .fetch_all(pool)
            .await
    }

    /// Update a gear item. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGear,
    ) -> Result<Option<Gear>, sqlx::Error> {
        let query = format!(
            "UPDATE gear SET
                name = COALESCE($2, name),
                gear_type = COALESCE($3, gear_type),
                brand = COALESCE($4, brand),
                model = COALESCE($5, model),
                description = COALESCE($6, description),
                image_url = COALESCE($7, image_url),
                media_key = CASE WHEN $12 THEN NULL ELSE COALESCE($8, media_key) END,
                specs = COALESCE($9, specs),
                purchase_date = COALESCE($10, purchase_date),
                in_use = COALESCE($11, in_use),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gear>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.gear_type)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.media_key)
            .bind(input.specs.as_ref().map(Json))
            .bind(input.purchase_date)
            .bind(input.in_use)
            .bind(input.detach_media)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a gear item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gear WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every gear item, returning one entry per deleted row with the
    /// media key it owned.
    pub async fn delete_all(pool: &PgPool) -> Result<Vec<Option<String>>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<String>>("DELETE FROM gear RETURNING media_key")
            .fetch_all(pool)
            .await
    }
}
