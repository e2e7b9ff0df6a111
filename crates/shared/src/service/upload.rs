use crate::{
    abstract_trait::UploadServiceTrait,
    domain::responses::{ApiResponse, UploadResponse},
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use tracing::{error, info};
use uuid::Uuid;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const UPLOADS_ROUTE: &str = "/uploads";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Webp,
    Gif,
}

impl ImageKind {
    /// Sniffs the magic bytes.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageKind::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageKind::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageKind::Gif)
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(ImageKind::Webp)
        } else {
            None
        }
    }

    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(ImageKind::Png),
            "image/jpeg" | "image/jpg" => Some(ImageKind::Jpeg),
            "image/webp" => Some(ImageKind::Webp),
            "image/gif" => Some(ImageKind::Gif),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Jpeg => "jpg",
            ImageKind::Webp => "webp",
            ImageKind::Gif => "gif",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Webp => "image/webp",
            ImageKind::Gif => "image/gif",
        }
    }
}

fn check_image(content_type: Option<&str>, bytes: &[u8]) -> Result<ImageKind, ServiceError> {
    if bytes.is_empty() {
        return Err(ServiceError::validation("The uploaded file is empty"));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ServiceError::validation("Images must be 5 MB or smaller"));
    }

    let unsupported =
        || ServiceError::validation("Only PNG, JPEG, WEBP and GIF images are allowed");

    if content_type.is_some_and(|declared| ImageKind::from_content_type(declared).is_none()) {
        return Err(unsupported());
    }

    ImageKind::detect(bytes).ok_or_else(unsupported)
}

pub struct UploadService {
    dir: PathBuf,
    tracer: ServiceTracer,
}

impl UploadService {
    pub async fn new(dir: impl Into<PathBuf>, registry: Arc<Mutex<Registry>>) -> Self {
        Self {
            dir: dir.into(),
            tracer: ServiceTracer::new("upload_service", registry).await,
        }
    }

    async fn write(&self, kind: ImageKind, bytes: Vec<u8>) -> Result<UploadResponse, ServiceError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            error!("❌ Failed to create upload dir {}: {e}", self.dir.display());
            ServiceError::Internal(format!("Failed to prepare upload directory: {e}"))
        })?;

        let filename = format!("{}.{}", Uuid::new_v4(), kind.extension());
        let path = self.dir.join(&filename);
        let size = bytes.len() as u64;

        tokio::fs::write(&path, bytes).await.map_err(|e| {
            error!("❌ Failed to write {}: {e}", path.display());
            ServiceError::Internal(format!("Failed to store upload: {e}"))
        })?;

        info!("🖼️ Stored upload {filename} ({size} bytes)");

        Ok(UploadResponse {
            url: format!("{UPLOADS_ROUTE}/{filename}"),
            filename,
            content_type: kind.content_type().to_string(),
            size,
        })
    }
}

#[async_trait]
impl UploadServiceTrait for UploadService {
    async fn store_image(
        &self,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<ApiResponse<UploadResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start(
            "StoreImage",
            vec![
                KeyValue::new("component", "upload"),
                KeyValue::new("upload.size", bytes.len() as i64),
            ],
        );

        let result = match check_image(content_type, &bytes) {
            Ok(kind) => self
                .write(kind, bytes)
                .await
                .map(|stored| ApiResponse::success("Image uploaded", stored)),
            Err(e) => Err(e),
        };

        self.tracer
            .record(&tracing_ctx, Method::Post, result, "Image uploaded")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn magic_bytes_decide_the_kind() {
        assert_eq!(ImageKind::detect(PNG_HEADER), Some(ImageKind::Png));
        assert_eq!(ImageKind::detect(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::detect(b"GIF89a...."), Some(ImageKind::Gif));
        assert_eq!(ImageKind::detect(b"RIFF\0\0\0\0WEBPVP8 "), Some(ImageKind::Webp));
        assert_eq!(ImageKind::detect(b"%PDF-1.7"), None);
    }

    #[test]
    fn declared_type_must_be_an_image() {
        assert!(check_image(Some("image/png"), PNG_HEADER).is_ok());
        assert!(check_image(Some("application/pdf"), PNG_HEADER).is_err());
        assert!(check_image(None, b"plain text").is_err());
    }

    #[test]
    fn oversized_and_empty_files_are_rejected() {
        let mut big = PNG_HEADER.to_vec();
        big.resize(MAX_IMAGE_BYTES + 1, 0);
        assert!(matches!(
            check_image(None, &big),
            Err(ServiceError::Validation(_))
        ));
        assert!(check_image(None, &[]).is_err());
    }

    #[tokio::test]
    async fn stored_file_lands_in_the_upload_dir() {
        let dir = std::env::temp_dir().join(format!("medsupply-upload-{}", Uuid::new_v4()));
        let registry = Arc::new(Mutex::new(Registry::default()));
        let service = UploadService::new(dir.clone(), registry).await;

        let response = service
            .store_image(Some("image/png"), PNG_HEADER.to_vec())
            .await
            .unwrap();

        assert!(response.data.url.starts_with("/uploads/"));
        assert!(response.data.filename.ends_with(".png"));
        assert!(dir.join(&response.data.filename).exists());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
