use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;

use crate::config::Config;
use crate::services::{BoxError, ObjectStorage};

/// One S3-compatible bucket. Each submission kind that stores objects gets
/// its own instance.
#[derive(Clone)]
pub struct S3Service {
    client: Option<Client>,
    endpoint: String,
    bucket: String,
}

impl S3Service {
    /// Missing credentials or bucket name leave the service unconfigured:
    /// startup continues and every call fails.
    pub async fn new(config: &Config, bucket: &str) -> Self {
        let endpoint = config.s3_endpoint.trim_end_matches('/').to_string();
        if !config.s3_configured() || bucket.is_empty() {
            tracing::warn!(bucket, "S3 credentials incomplete; bucket uploads will fail");
            return Self { client: None, endpoint, bucket: bucket.to_string() };
        }

        let credentials = Credentials::new(
            config.s3_access_key.clone(),
            config.s3_secret_key.clone(),
            None,
            None,
            "static",
        );

        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.s3_region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(endpoint.clone())
            .load()
            .await;

        // Path-style addressing keeps object URLs as endpoint/bucket/key.
        let s3_config = aws_sdk_s3::config::Builder::from(&shared_config)
            .force_path_style(true)
            .build();

        Self {
            client: Some(Client::from_conf(s3_config)),
            endpoint,
            bucket: bucket.to_string(),
        }
    }

    fn client(&self) -> Result<&Client, BoxError> {
        self.client
            .as_ref()
            .ok_or_else(|| format!("S3 bucket '{}' is not configured", self.bucket).into())
    }

    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }

    fn key_for(&self, url: &str) -> Result<String, BoxError> {
        key_from_url(url, &self.bucket)
            .ok_or_else(|| format!("URL does not point into bucket '{}': {}", self.bucket, url).into())
    }
}

/// Object key for a stored URL: everything after `/{bucket}/`, minus any
/// query string. A bare key is returned unchanged.
pub fn key_from_url(url: &str, bucket: &str) -> Option<String> {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let marker = format!("/{}/", bucket);

    if let Some(pos) = without_query.find(&marker) {
        let key = &without_query[pos + marker.len()..];
        return (!key.is_empty()).then(|| key.to_string());
    }
    if !without_query.contains("://") && !without_query.is_empty() {
        return Some(without_query.trim_start_matches('/').to_string());
    }
    None
}

#[async_trait]
impl ObjectStorage for S3Service {
    async fn put(&self, bytes: Vec<u8>, content_type: &str, path: &str) -> Result<String, BoxError> {
        let client = self.client()?;
        client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(bytes.into())
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                tracing::error!(bucket = %self.bucket, key = path, error = ?err, "S3 upload failed");
                format!("S3 upload failed: {}", err)
            })?;

        Ok(self.object_url(path))
    }

    async fn delete(&self, url: &str) -> Result<(), BoxError> {
        let client = self.client()?;
        let key = self.key_for(url)?;
        client
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| format!("S3 delete failed: {}", e.into_service_error()))?;
        Ok(())
    }

    async fn presign_get(&self, url: &str, ttl: Duration) -> Result<String, BoxError> {
        let client = self.client()?;
        let key = self.key_for(url)?;
        let presigning = PresigningConfig::expires_in(ttl)?;

        let request = client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .presigned(presigning)
            .await
            .map_err(|e| format!("S3 presign failed: {}", e))?;

        Ok(request.uri().to_string())
    }
}
