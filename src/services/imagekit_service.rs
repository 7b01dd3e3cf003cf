use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::services::{BoxError, ImageCdn};

const UPLOAD_ENDPOINT: &str = "https://upload.imagekit.io/api/v1/files/upload";
const FILES_ENDPOINT: &str = "https://api.imagekit.io/v1/files";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileDetails {
    file_id: String,
    name: String,
}

/// ImageKit-backed CDN for image submissions.
#[derive(Clone)]
pub struct ImageKitService {
    client: Client,
    private_key: String,
    folder: String,
}

impl ImageKitService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            private_key: config.imagekit_private_key.clone(),
            folder: config.imagekit_upload_folder.clone(),
        }
    }

    fn ensure_configured(&self) -> Result<(), BoxError> {
        if self.private_key.is_empty() {
            return Err("ImageKit is not configured".into());
        }
        Ok(())
    }

    async fn find_file_id(&self, name: &str) -> Result<Option<String>, BoxError> {
        let search = format!("name = \"{}\"", name);
        let response = self
            .client
            .get(FILES_ENDPOINT)
            .basic_auth(&self.private_key, None::<&str>)
            .query(&[("searchQuery", search.as_str()), ("path", self.folder.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("ImageKit lookup failed: {}", error_text).into());
        }

        let files = response.json::<Vec<FileDetails>>().await?;
        Ok(files.into_iter().find(|f| f.name == name).map(|f| f.file_id))
    }
}

/// CDN identifier for a delivery URL: its last path segment without query
/// or fragment.
pub fn public_id_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .filter(|segment| !segment.contains(':'))
        .map(str::to_string)
}

#[async_trait]
impl ImageCdn for ImageKitService {
    async fn put(&self, bytes: Vec<u8>, filename: &str) -> Result<String, BoxError> {
        self.ensure_configured()?;

        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("fileName", filename.to_string())
            .text("folder", self.folder.clone())
            .text("useUniqueFileName", "false");

        let response = self
            .client
            .post(UPLOAD_ENDPOINT)
            .basic_auth(&self.private_key, None::<&str>)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("ImageKit upload failed: {}", error_text).into());
        }

        Ok(response.json::<UploadResponse>().await?.url)
    }

    async fn delete(&self, public_id: &str) -> Result<(), BoxError> {
        self.ensure_configured()?;

        let Some(file_id) = self.find_file_id(public_id).await? else {
            return Err(format!("ImageKit file not found: {}", public_id).into());
        };

        let response = self
            .client
            .delete(format!("{}/{}", FILES_ENDPOINT, file_id))
            .basic_auth(&self.private_key, None::<&str>)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("ImageKit delete failed: {}", error_text).into());
        }
        Ok(())
    }
}
