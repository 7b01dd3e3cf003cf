use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use crate::entities::submission::MediaKind;
use crate::models::submission_model::UploadedFile;
use crate::services::imagekit_service::public_id_from_url;
use crate::services::{BoxError, ImageCdn, ObjectStorage};

/// Lifetime of read URLs minted for bucket-backed media.
pub const PRESIGN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub url: String,
    pub filename: String,
}

/// Routes each media kind to its backing store.
#[derive(Clone)]
pub struct MediaStorage {
    cdn: Arc<dyn ImageCdn>,
    gif_bucket: Arc<dyn ObjectStorage>,
    video_bucket: Arc<dyn ObjectStorage>,
}

impl MediaStorage {
    pub fn new(
        cdn: Arc<dyn ImageCdn>,
        gif_bucket: Arc<dyn ObjectStorage>,
        video_bucket: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self { cdn, gif_bucket, video_bucket }
    }

    fn bucket(&self, kind: MediaKind) -> Option<&Arc<dyn ObjectStorage>> {
        match kind {
            MediaKind::Image => None,
            MediaKind::Gif => Some(&self.gif_bucket),
            MediaKind::Video => Some(&self.video_bucket),
        }
    }

    pub async fn store(&self, kind: MediaKind, file: UploadedFile) -> Result<StoredObject, BoxError> {
        let url = match self.bucket(kind) {
            None => {
                let name = cdn_file_name(&file.filename, Utc::now().timestamp());
                self.cdn.put(file.bytes, &name).await?
            }
            Some(bucket) => {
                let key = bucket_key(kind, &file.filename, Uuid::now_v7());
                bucket.put(file.bytes, &file.content_type, &key).await?
            }
        };

        Ok(StoredObject { url, filename: file.filename })
    }

    pub async fn discard(&self, kind: MediaKind, url: &str) -> Result<(), BoxError> {
        match self.bucket(kind) {
            None => {
                let public_id = public_id_from_url(url)
                    .ok_or_else(|| format!("Cannot derive CDN id from {}", url))?;
                self.cdn.delete(&public_id).await
            }
            Some(bucket) => bucket.delete(url).await,
        }
    }

    /// URL handed to readers. Bucket objects get a fresh presigned link;
    /// when minting fails the stored URL is returned instead.
    pub async fn retrieval_url(&self, kind: MediaKind, url: &str) -> String {
        let Some(bucket) = self.bucket(kind) else {
            return url.to_string();
        };

        match bucket.presign_get(url, PRESIGN_TTL).await {
            Ok(signed) => signed,
            Err(e) => {
                tracing::warn!(kind = kind.as_str(), url, error = %e, "presign failed; serving stored URL");
                url.to_string()
            }
        }
    }
}

fn split_name(filename: &str) -> (&str, String) {
    let path = Path::new(filename);
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("upload");
    (stem, ext)
}

/// `{stem}_{unix}{ext}`
pub fn cdn_file_name(original: &str, unix: i64) -> String {
    let (stem, ext) = split_name(original);
    format!("{}_{}{}", stem, unix, ext)
}

/// `gifs/{id}{ext}` or `videos/{id}{ext}`
pub fn bucket_key(kind: MediaKind, original: &str, id: Uuid) -> String {
    let (_, ext) = split_name(original);
    let folder = match kind {
        MediaKind::Video => "videos",
        _ => "gifs",
    };
    format!("{}/{}{}", folder, id, ext)
}
