//! Query parameter types for list endpoints.

use serde::Deserialize;

/// `GET /posts` parameters. Values are clamped by the handler.
#[derive(Debug, Default, Deserialize)]
pub struct PostListParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
}

/// `GET /gear` parameters.
#[derive(Debug, Deserialize)]
pub struct GearListParams {
    #[serde(rename = "type")]
    pub gear_type: Option<String>,
}

/// `GET /contact` parameters.
#[derive(Debug, Deserialize)]
pub struct ContactListParams {
    pub status: Option<String>,
}
