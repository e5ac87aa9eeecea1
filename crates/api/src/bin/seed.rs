//! Populate a database with an admin account and sample portfolio content.
//!
//! ```text
//! folio-seed            # add the admin (if absent) and sample content
//! folio-seed --reset    # wipe posts, gear and messages first
//! ```
//!
//! Sample media points at external URLs. `--reset` connects the configured
//! storage backend so blobs owned by the removed rows are deleted too.

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use folio_api::auth::password::hash_password;
use folio_api::maintenance::reset_content;
use folio_api::telemetry;
use folio_core::gear::GearSpecs;
use folio_core::roles::ROLE_ADMIN;
use folio_db::models::gear::CreateGear;
use folio_db::models::post::CreatePost;
use folio_db::models::user::CreateUser;
use folio_db::repositories::{GearRepo, PostRepo, UserRepo};
use folio_db::DbPool;
use folio_storage::{MediaLifecycle, StorageConfig};

const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
const DEFAULT_ADMIN_USERNAME: &str = "admin";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init("folio_seed=info,folio_api=info,folio_storage=info");

    let reset = std::env::args().skip(1).any(|arg| arg == "--reset");

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = folio_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    folio_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    if reset {
        let store = folio_storage::connect(&StorageConfig::from_env(), &pool)
            .await
            .context("Failed to initialise media storage")?;
        reset_content(&pool, &MediaLifecycle::new(store)).await?;
    }

    seed_admin(&pool).await?;

    for post in sample_posts()? {
        let created = PostRepo::create(&pool, &post).await?;
        tracing::info!(post_id = created.id, title = %created.title, "Post seeded");
    }

    for item in sample_gear() {
        let created = GearRepo::create(&pool, &item).await?;
        tracing::info!(gear_id = created.id, name = %created.name, "Gear seeded");
    }

    pool.close().await;
    tracing::info!("Seeding complete");
    Ok(())
}

/// Create the admin account from `SEED_ADMIN_EMAIL` / `SEED_ADMIN_PASSWORD`
/// unless a user with that email already exists.
async fn seed_admin(pool: &DbPool) -> anyhow::Result<()> {
    let email = std::env::var("SEED_ADMIN_EMAIL")
        .unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.into())
        .trim()
        .to_lowercase();

    if UserRepo::find_by_email(pool, &email).await?.is_some() {
        tracing::info!(%email, "Admin already exists, skipping");
        return Ok(());
    }

    let password = std::env::var("SEED_ADMIN_PASSWORD")
        .context("SEED_ADMIN_PASSWORD must be set to create the admin account")?;
    let password_hash =
        hash_password(&password).map_err(|e| anyhow!("Failed to hash admin password: {e}"))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: DEFAULT_ADMIN_USERNAME.into(),
            email,
            password_hash,
            role: ROLE_ADMIN.into(),
        },
    )
    .await?;
    tracing::info!(user_id = user.id, email = %user.email, "Admin created");
    Ok(())
}

fn date(y: i32, m: u32, d: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| anyhow!("invalid date {y}-{m}-{d}"))
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

fn specs(pairs: &[(&str, &str)]) -> GearSpecs {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn post(
    title: &str,
    post_type: &str,
    category: &str,
    location: &str,
    shot_date: NaiveDate,
    camera: &str,
    media_url: &str,
    post_tags: &[&str],
    featured: bool,
) -> CreatePost {
    CreatePost {
        title: title.into(),
        post_type: post_type.into(),
        category: category.into(),
        story: format!("{title}, shot in {location}."),
        location: location.into(),
        shot_date,
        shot_time: None,
        camera: Some(camera.into()),
        lens: None,
        iso: None,
        aperture: None,
        shutter_speed: None,
        media_url: Some(media_url.into()),
        media_key: None,
        tags: tags(post_tags),
        featured,
    }
}

fn sample_posts() -> anyhow::Result<Vec<CreatePost>> {
    Ok(vec![
        post(
            "Golden Hour over the Caldera",
            "photo",
            "landscape",
            "Santorini, Greece",
            date(2024, 8, 15)?,
            "Sony A7R IV",
            "https://images.unsplash.com/photo-1570077188670-e3a8d69ac5ff?w=800",
            &["sunset", "architecture", "travel"],
            true,
        ),
        post(
            "First Look",
            "photo",
            "events",
            "Tuscany, Italy",
            date(2024, 6, 20)?,
            "Canon EOS R5",
            "https://images.unsplash.com/photo-1519741497674-611481863552?w=800",
            &["wedding", "documentary"],
            false,
        ),
        post(
            "Night Alleys",
            "video",
            "commercial",
            "Tokyo, Japan",
            date(2024, 9, 10)?,
            "Sony FX3",
            "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf?w=800",
            &["cinematic", "street"],
            true,
        ),
        post(
            "Dawn in the Dolomites",
            "photo",
            "landscape",
            "Dolomites, Italy",
            date(2024, 7, 5)?,
            "Sony A7R IV",
            "https://images.unsplash.com/photo-1464822759023-fed622ff2c3b?w=800",
            &["mountains", "sunrise"],
            false,
        ),
        post(
            "Street Musician",
            "photo",
            "portraits",
            "Lisbon, Portugal",
            date(2024, 5, 12)?,
            "Leica M10",
            "https://images.unsplash.com/photo-1511671782779-c97d3d27a1d4?w=800",
            &["street", "portrait", "music"],
            false,
        ),
    ])
}

fn gear(
    name: &str,
    gear_type: &str,
    brand: &str,
    model: &str,
    description: &str,
    gear_specs: &[(&str, &str)],
) -> CreateGear {
    CreateGear {
        name: name.into(),
        gear_type: gear_type.into(),
        brand: Some(brand.into()),
        model: Some(model.into()),
        description: Some(description.into()),
        image_url: None,
        media_key: None,
        specs: specs(gear_specs),
        purchase_date: None,
        in_use: true,
    }
}

fn sample_gear() -> Vec<CreateGear> {
    vec![
        gear(
            "Sony A7R IV",
            "camera",
            "Sony",
            "A7R IV",
            "High-resolution body for landscape and commercial work.",
            &[("megapixels", "61MP"), ("sensor", "Full Frame")],
        ),
        gear(
            "Canon EOS R5",
            "camera",
            "Canon",
            "EOS R5",
            "Fast autofocus for weddings and events.",
            &[("megapixels", "45MP"), ("videoResolution", "8K")],
        ),
        gear(
            "Sony 24-70mm f/2.8 GM",
            "lens",
            "Sony",
            "24-70mm f/2.8 GM",
            "The everyday zoom.",
            &[("focalLength", "24-70mm"), ("mount", "Sony E")],
        ),
        gear(
            "Canon RF 85mm f/1.2",
            "lens",
            "Canon",
            "RF 85mm f/1.2",
            "Portrait lens.",
            &[("focalLength", "85mm"), ("aperture", "f/1.2")],
        ),
        gear(
            "Profoto B10",
            "lighting",
            "Profoto",
            "B10",
            "Battery strobe for location shoots.",
            &[("power", "250Ws")],
        ),
        gear(
            "Gitzo Mountaineer",
            "tripod",
            "Gitzo",
            "GT2545T",
            "Carbon travel tripod.",
            &[("maxHeight", "156cm")],
        ),
    ]
}
