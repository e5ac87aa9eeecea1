//! Domain building blocks shared by every Folio crate.
//!
//! Nothing in here touches the network, the database, or the filesystem:
//! only constants, validation rules, and small pure helpers.

pub mod contact;
pub mod error;
pub mod gear;
pub mod media;
pub mod pagination;
pub mod post;
pub mod roles;
pub mod storage;
pub mod types;
