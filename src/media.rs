//! Image uploads to the hosted media store.
//!
//! The admin panel never serves images itself: a picked file is posted to an
//! unsigned upload endpoint and only the returned public URL is stored with
//! the post.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, multipart};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::types::ImageUrl;
use crate::models::config::MediaConfig;

/// Failures while pushing an image to the media host.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("media host configuration is missing")]
    MissingConfiguration,
    #[error("media host request failed: {0}")]
    Request(String),
    #[error("media host rejected the upload ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("media host returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// An image picked in the blog form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A store that accepts binary images and hands back public URLs.
#[async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> Result<ImageUrl, UploadError>;
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Cloudinary-style unsigned upload client.
///
/// Sends `file` and `upload_preset` as multipart fields and reads
/// `secure_url` from the JSON response.
pub struct CloudinaryHost {
    config: MediaConfig,
    client: Client,
}

impl CloudinaryHost {
    pub fn new(config: MediaConfig) -> Result<Self, UploadError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| UploadError::Request(e.to_string()))?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: MediaConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn build_form(image: ImageUpload, preset: &str) -> Result<multipart::Form, UploadError> {
        let mut part = multipart::Part::bytes(image.bytes).file_name(image.file_name);
        if let Some(content_type) = image.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| UploadError::Request(format!("invalid content type: {e}")))?;
        }

        Ok(multipart::Form::new()
            .part("file", part)
            .text("upload_preset", preset.to_string()))
    }
}

#[async_trait]
impl MediaHost for CloudinaryHost {
    async fn upload(&self, image: ImageUpload) -> Result<ImageUrl, UploadError> {
        let (Some(url), Some(preset)) = (
            self.config.upload_url.as_deref(),
            self.config.upload_preset.as_deref(),
        ) else {
            log::error!("Missing media host config: upload_url or upload_preset is not set");
            return Err(UploadError::MissingConfiguration);
        };

        let form = Self::build_form(image, preset)?;

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(UploadError::Rejected { status, body });
        }

        let payload: UploadResponse = response
            .json()
            .await
            .map_err(|e| UploadError::InvalidResponse(e.to_string()))?;

        ImageUrl::new(payload.secure_url).map_err(|e| UploadError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
pub mod test {
    use std::sync::Mutex;

    use super::*;

    /// In-memory media host that records uploaded file names.
    #[derive(Default)]
    pub struct TestMediaHost {
        uploads: Mutex<Vec<String>>,
        fail: bool,
    }

    impl TestMediaHost {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn uploads(&self) -> Vec<String> {
            self.uploads.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MediaHost for TestMediaHost {
        async fn upload(&self, image: ImageUpload) -> Result<ImageUrl, UploadError> {
            if self.fail {
                return Err(UploadError::Request("connection refused".to_string()));
            }
            let url = format!("https://media.example.com/{}", image.file_name);
            self.uploads.lock().unwrap().push(image.file_name);
            ImageUrl::new(url).map_err(|e| UploadError::InvalidResponse(e.to_string()))
        }
    }

    #[actix_web::test]
    async fn upload_without_configuration_fails_before_any_request() {
        let host = CloudinaryHost::new(MediaConfig::default()).unwrap();
        let image = ImageUpload {
            file_name: "cover.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![1, 2, 3],
        };

        let err = host.upload(image).await.unwrap_err();
        assert!(matches!(err, UploadError::MissingConfiguration));
    }

    #[test]
    fn rejects_malformed_content_type() {
        let image = ImageUpload {
            file_name: "cover.png".to_string(),
            content_type: Some("not a mime".to_string()),
            bytes: vec![1],
        };

        assert!(CloudinaryHost::build_form(image, "preset").is_err());
    }
}
