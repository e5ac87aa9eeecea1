//! S3 and S3-compatible object storage backend.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use folio_core::media::{content_type_for_extension, file_extension, MediaKind};
use folio_core::storage::{join_locator, new_media_key, validate_media_key, StorageBackend};

use crate::config::S3Config;
use crate::{MediaStore, MediaUpload, Result, RetrievedMedia, StorageError, StoredMedia};

/// Stores media as objects in a single bucket.
///
/// The key handed back to callers is the full object key, prefix included,
/// so deletes never need to know the prefix.
pub struct S3MediaStore {
    client: Client,
    bucket: String,
    prefix: Option<String>,
    public_base_url: String,
}

impl S3MediaStore {
    /// Build a client from the shared AWS config chain, overridden by any
    /// endpoint or static credentials in `config`.
    ///
    /// Fails when the prefix would produce object keys that `retrieve` and
    /// `delete` reject.
    pub async fn connect(config: &S3Config) -> Result<Self> {
        validate_prefix(config.prefix.as_deref())?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        if let (Some(id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                id,
                secret,
                None,
                None,
                "folio-static",
            ));
        }

        let shared = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.force_path_style)
            .build();

        tracing::info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = config.endpoint.as_deref().unwrap_or("aws"),
            "S3 media store configured",
        );

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            prefix: config.prefix.clone(),
            public_base_url: public_base_url(config),
        })
    }

    fn object_key(&self, key: &str) -> String {
        object_key(self.prefix.as_deref(), key)
    }
}

/// Prepend the configured prefix, if any.
fn object_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}/{key}"),
        _ => key.to_string(),
    }
}

/// Check that keys built on `prefix` stay valid media keys.
///
/// Probes with the longest key shape [`new_media_key`] generates.
fn validate_prefix(prefix: Option<&str>) -> Result<()> {
    let Some(prefix) = prefix.filter(|p| !p.is_empty()) else {
        return Ok(());
    };
    let sample = object_key(Some(prefix), &new_media_key(MediaKind::Video, "webm"));
    validate_media_key(&sample).map_err(|_| {
        StorageError::Config(format!(
            "S3_PREFIX '{prefix}' must be slash-separated segments of letters, digits, '.', '_' or '-'"
        ))
    })
}

/// Base URL objects are publicly reachable under.
fn public_base_url(config: &S3Config) -> String {
    if let Some(url) = &config.public_base_url {
        return url.clone();
    }
    match &config.endpoint {
        Some(endpoint) if config.force_path_style => {
            format!("{}/{}", endpoint.trim_end_matches('/'), config.bucket)
        }
        _ => format!("https://{}.s3.{}.amazonaws.com", config.bucket, config.region),
    }
}

fn object_store_error<E>(err: E) -> StorageError
where
    E: std::error::Error,
{
    StorageError::ObjectStore(DisplayErrorContext(err).to_string())
}

#[async_trait]
impl MediaStore for S3MediaStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::S3
    }

    async fn store(&self, upload: MediaUpload) -> Result<StoredMedia> {
        let key = self.object_key(&new_media_key(upload.kind, &upload.extension));
        let size_bytes = upload.data.len() as u64;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(&upload.content_type)
            .body(ByteStream::from(upload.data))
            .send()
            .await
            .map_err(object_store_error)?;

        Ok(StoredMedia {
            locator: join_locator(&self.public_base_url, &key),
            key,
            size_bytes,
        })
    }

    async fn retrieve(&self, key: &str) -> Result<RetrievedMedia> {
        validate_media_key(key)?;

        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                let missing = err
                    .as_service_error()
                    .map(|e| e.is_no_such_key())
                    .unwrap_or(false);
                if missing {
                    return Err(StorageError::NotFound(key.to_string()));
                }
                return Err(object_store_error(err));
            }
        };

        let content_type = output
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| {
                let ext = file_extension(key).unwrap_or_default();
                content_type_for_extension(&ext).to_string()
            });
        let data = output
            .body
            .collect()
            .await
            .map_err(object_store_error)?
            .into_bytes()
            .to_vec();

        Ok(RetrievedMedia { data, content_type })
    }

    async fn delete(&self, key: &str) -> Result<()> {
        validate_media_key(key)?;
        // S3 reports success for keys that do not exist.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(object_store_error)?;
        Ok(())
    }
}
