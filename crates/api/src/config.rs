use folio_core::media::DEFAULT_MAX_UPLOAD_BYTES;
use folio_storage::StorageConfig;

use crate::auth::jwt::JwtConfig;

/// Origins allowed when `CORS_ORIGINS` is not set.
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Deployment name reported by `/api/health` (default: `development`).
    pub environment: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` plus
    /// `FRONTEND_URL` when set.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`, uploads can be slow).
    pub request_timeout_secs: u64,
    /// Largest accepted upload in bytes (default: 100 MiB).
    pub max_upload_bytes: usize,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// Media storage backend selection and settings.
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                       |
    /// |------------------------|-----------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                     |
    /// | `PORT`                 | `5000`                                        |
    /// | `APP_ENV`              | `development`                                 |
    /// | `CORS_ORIGINS`         | `http://localhost:3000,http://localhost:3001` |
    /// | `FRONTEND_URL`         | --                                            |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                                         |
    /// | `MAX_UPLOAD_BYTES`     | `104857600`                                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let mut cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
        );
        if let Ok(frontend) = std::env::var("FRONTEND_URL") {
            let frontend = frontend.trim().trim_end_matches('/').to_string();
            if !frontend.is_empty() && !cors_origins.contains(&frontend) {
                cors_origins.push(frontend);
            }
        }

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            host,
            port,
            environment,
            cors_origins,
            request_timeout_secs,
            max_upload_bytes,
            jwt: JwtConfig::from_env(),
            storage: StorageConfig::from_env(),
        }
    }
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_origins;

    #[test]
    fn origins_are_trimmed() {
        assert_eq!(
            parse_origins(" http://a.test/ ,, https://b.test"),
            vec!["http://a.test", "https://b.test"]
        );
        assert!(parse_origins("").is_empty());
    }
}
