//! Image CDN client.
//!
//! Uploads use the CDN's unsigned preset (no credentials in the request);
//! deletes hit the authenticated destroy endpoint with a SHA-256-signed
//! form. The upload response carries the CDN's own resource identifier,
//! which is stored alongside the delivery URL so deletes never have to
//! parse a URL. [`public_id_from_url`] remains as the fallback for legacy
//! documents that only stored the URL.

use secrecy::ExposeSecret;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::ImageCdnConfig;

/// Errors from the image CDN boundary.
#[derive(Debug, Error)]
pub enum ImageError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the CDN's response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A freshly uploaded image.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    pub url: String,
    pub public_id: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Client for the image CDN.
#[derive(Clone)]
pub struct ImageClient {
    client: reqwest::Client,
    base_url: String,
    cloud_name: String,
    upload_preset: String,
    api_key: String,
    api_secret: secrecy::SecretString,
}

impl ImageClient {
    /// Default CDN API endpoint.
    const DEFAULT_BASE_URL: &'static str = "https://api.cloudinary.com/v1_1";

    #[must_use]
    pub fn new(config: &ImageCdnConfig) -> Self {
        Self::with_base_url(config, Self::DEFAULT_BASE_URL)
    }

    /// Client against an explicit endpoint (tests point this at an
    /// unreachable address to exercise the best-effort delete path).
    #[must_use]
    pub fn with_base_url(config: &ImageCdnConfig, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            cloud_name: config.cloud_name.clone(),
            upload_preset: config.upload_preset.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        }
    }

    /// Upload an image through the unsigned preset.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError`] if the CDN rejects the upload.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: String,
    ) -> Result<UploadedImage, ImageError> {
        let url = format!("{}/{}/image/upload", self.base_url, self.cloud_name);

        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ImageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| ImageError::Parse(e.to_string()))?;

        Ok(UploadedImage {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }

    /// Delete an image by its CDN identifier.
    ///
    /// `invalidate=true` also purges the CDN edge cache. A "not found"
    /// result counts as success; the image is gone either way.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError`] if the CDN is unreachable or refuses the
    /// delete.
    pub async fn destroy(&self, public_id: &str) -> Result<(), ImageError> {
        let url = format!("{}/{}/image/destroy", self.base_url, self.cloud_name);

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign_destroy(public_id, &timestamp);

        let form = [
            ("public_id", public_id),
            ("invalidate", "true"),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.api_key.as_str()),
            ("signature", signature.as_str()),
        ];

        let response = self.client.post(&url).form(&form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ImageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let destroyed: DestroyResponse = response
            .json()
            .await
            .map_err(|e| ImageError::Parse(e.to_string()))?;

        match destroyed.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(ImageError::Parse(format!(
                "unexpected destroy result: {other}"
            ))),
        }
    }

    /// SHA-256 signature over the sorted destroy parameters plus the secret.
    fn sign_destroy(&self, public_id: &str, timestamp: &str) -> String {
        let payload = format!(
            "invalidate=true&public_id={public_id}&timestamp={timestamp}{}",
            self.api_secret.expose_secret()
        );
        hex::encode(Sha256::digest(payload.as_bytes()))
    }
}

/// Derive a CDN identifier from a delivery URL.
///
/// Delivery URLs embed a `v<digits>` version segment; everything after it,
/// minus the file extension, is the identifier. Returns `None` when no
/// version segment is present. Only used for legacy documents whose image
/// entries never stored the identifier.
#[must_use]
pub fn public_id_from_url(url: &str) -> Option<String> {
    let parts: Vec<&str> = url.split('/').collect();
    let version_index = parts.iter().position(|part| {
        part.len() > 1 && part.starts_with('v') && part[1..].chars().all(|c| c.is_ascii_digit())
    })?;

    let tail = parts.get(version_index + 1..)?;
    if tail.is_empty() {
        return None;
    }

    let mut segments: Vec<&str> = tail.to_vec();
    let last = segments.last_mut()?;
    *last = last.split('.').next().unwrap_or(last);

    Some(segments.join("/"))
}
