//! Gear inventory entity model and DTOs.

use chrono::NaiveDate;
use folio_core::gear::GearSpecs;
use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `gear` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Gear {
    pub id: DbId,
    pub name: String,
    pub gear_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub media_key: Option<String>,
    pub specs: Json<GearSpecs>,
    pub purchase_date: Option<NaiveDate>,
    pub in_use: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a gear item.
#[derive(Debug, Clone)]
pub struct CreateGear {
    pub name: String,
    pub gear_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub media_key: Option<String>,
    pub specs: GearSpecs,
    pub purchase_date: Option<NaiveDate>,
    pub in_use: bool,
}

/// DTO for patching a gear item. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateGear {
    pub name: Option<String>,
    pub gear_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub media_key: Option<String>,
    pub specs: Option<GearSpecs>,
    pub purchase_date: Option<NaiveDate>,
    pub in_use: Option<bool>,
    /// Clear `media_key`. Set when `image_url` now points somewhere the
    /// storage backend does not own.
    pub detach_media: bool,
}
