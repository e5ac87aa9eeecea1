pub mod auth;
pub mod contact;
pub mod gear;
pub mod media;
pub mod posts;
pub mod stats;
