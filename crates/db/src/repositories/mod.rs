//! One repository struct per table. Every method takes the pool explicitly.

pub mod contact_repo;
pub mod gear_repo;
pub mod media_blob_repo;
pub mod post_repo;
pub mod stats_repo;
pub mod user_repo;

pub use contact_repo::ContactRepo;
pub use gear_repo::GearRepo;
pub use media_blob_repo::MediaBlobRepo;
pub use post_repo::PostRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
