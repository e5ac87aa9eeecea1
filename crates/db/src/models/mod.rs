//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches

pub mod contact;
pub mod gear;
pub mod media_blob;
pub mod post;
pub mod stats;
pub mod user;
