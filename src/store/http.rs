/// HTTP photo store client
///
/// Talks to the store's list, upload and health endpoints:
/// - GET  list   → JSON array of references, in display order
/// - POST upload → multipart field `photo`, answers `{success, filename?, error?}`
/// - GET  health → any 2xx means online

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

use super::{PhotoStore, SlideshowError};
use crate::state::data::{PhotoUpload, StoredPhoto};
use crate::state::settings::{normalize_base_url, Settings};

/// Multipart field the store reads the file from
const UPLOAD_FIELD: &str = "photo";

/// Body of the upload endpoint's answer
#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,
    filename: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpPhotoStore {
    client: Client,
    base_url: String,
    list_path: String,
    upload_path: String,
    health_path: String,
}

impl HttpPhotoStore {
    pub fn new(settings: &Settings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("⚠️  Failed to configure HTTP client ({e}), using defaults");
                Client::new()
            });

        let base_url = normalize_base_url(&settings.server_url);
        log::info!("🌐 Photo store at {base_url}");

        Self {
            client,
            base_url,
            list_path: settings.list_path.clone(),
            upload_path: settings.upload_path.clone(),
            health_path: settings.health_path.clone(),
        }
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an absolute URL for an endpoint path or a server-relative reference
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Turn a non-2xx upload answer into a `StoreError`, keeping the server's message
    async fn store_failure(response: Response) -> SlideshowError {
        let status = response.status();
        let message = response
            .json::<UploadResponse>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| format!("server answered {status}"));
        SlideshowError::Store(message)
    }
}

#[async_trait]
impl PhotoStore for HttpPhotoStore {
    async fn list(&self) -> Result<Vec<String>, SlideshowError> {
        let url = self.resolve(&self.list_path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| SlideshowError::Fetch(e.to_string()))?;

        let references: Vec<String> = response
            .json()
            .await
            .map_err(|e| SlideshowError::Fetch(format!("invalid photo list: {e}")))?;

        log::debug!("📋 Store lists {} photos", references.len());
        Ok(references)
    }

    async fn store(&self, upload: PhotoUpload) -> Result<StoredPhoto, SlideshowError> {
        if !upload.is_image() {
            return Err(SlideshowError::UnsupportedType(upload.media_type));
        }

        let PhotoUpload {
            file_name,
            media_type,
            bytes,
        } = upload;

        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(&media_type)
            .map_err(|_| SlideshowError::UnsupportedType(media_type.clone()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(self.resolve(&self.upload_path))
            .multipart(form)
            .send()
            .await
            .map_err(|e| SlideshowError::Store(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::store_failure(response).await);
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| SlideshowError::Store(format!("invalid upload response: {e}")))?;

        if !body.success {
            return Err(SlideshowError::Store(
                body.error
                    .unwrap_or_else(|| "upload rejected by store".to_string()),
            ));
        }

        Ok(StoredPhoto {
            reference: body.filename.unwrap_or(file_name),
        })
    }

    async fn fetch(&self, reference: &str) -> Result<Vec<u8>, SlideshowError> {
        let response = self
            .client
            .get(self.resolve(reference))
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| SlideshowError::Fetch(format!("{reference}: {e}")))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SlideshowError::Fetch(format!("{reference}: {e}")))?;

        Ok(bytes.to_vec())
    }

    async fn online(&self) -> bool {
        match self.client.get(self.resolve(&self.health_path)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                log::debug!("Health check failed: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Serve `router` on an ephemeral port and return a store pointed at it
    async fn spawn_store(router: Router) -> HttpPhotoStore {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let settings = Settings {
            server_url: format!("http://{addr}"),
            ..Settings::default()
        };
        HttpPhotoStore::new(&settings)
    }

    fn png(name: &str) -> PhotoUpload {
        PhotoUpload::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn test_resolve_references() {
        let store = HttpPhotoStore::new(&Settings {
            server_url: "frame.local:8000/".to_string(),
            ..Settings::default()
        });

        assert_eq!(store.base_url(), "http://frame.local:8000");
        assert_eq!(
            store.resolve("/static/photos/a.jpg"),
            "http://frame.local:8000/static/photos/a.jpg"
        );
        assert_eq!(store.resolve("photos"), "http://frame.local:8000/photos");
        assert_eq!(store.resolve("https://cdn/x.jpg"), "https://cdn/x.jpg");
    }

    #[tokio::test]
    async fn test_list_returns_store_order() {
        let store = spawn_store(Router::new().route(
            "/photos",
            get(|| async { Json(vec!["/static/photos/b.jpg", "/static/photos/a.jpg"]) }),
        ))
        .await;

        let references = store.list().await.unwrap();
        assert_eq!(references, vec!["/static/photos/b.jpg", "/static/photos/a.jpg"]);
    }

    #[tokio::test]
    async fn test_list_non_success_is_fetch_error() {
        let store = spawn_store(Router::new().route(
            "/photos",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        ))
        .await;

        assert!(matches!(store.list().await, Err(SlideshowError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_list_unreachable_is_fetch_error() {
        let store = HttpPhotoStore::new(&Settings {
            server_url: "http://127.0.0.1:9".to_string(),
            ..Settings::default()
        });

        assert!(matches!(store.list().await, Err(SlideshowError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_store_sends_photo_field() {
        let store = spawn_store(Router::new().route(
            "/upload",
            post(|headers: HeaderMap, body: Bytes| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let body = String::from_utf8_lossy(&body);
                let ok = content_type.starts_with("multipart/form-data")
                    && body.contains("name=\"photo\"")
                    && body.contains("filename=\"sunset.png\"");
                Json(json!({ "success": ok, "filename": "sunset.png" }))
            }),
        ))
        .await;

        let stored = store.store(png("sunset.png")).await.unwrap();
        assert_eq!(stored.reference, "sunset.png");
    }

    #[tokio::test]
    async fn test_store_rejects_non_image_without_request() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let store = spawn_store(Router::new().route(
            "/upload",
            post(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(json!({ "success": true }))
                }
            }),
        ))
        .await;

        let notes = PhotoUpload::new("notes.txt", "text/plain", b"hello".to_vec());
        let result = store.store(notes).await;

        assert_eq!(
            result,
            Err(SlideshowError::UnsupportedType("text/plain".to_string()))
        );
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_rejection_carries_server_message() {
        let store = spawn_store(Router::new().route(
            "/upload",
            post(|| async { Json(json!({ "success": false, "error": "No selected file" })) }),
        ))
        .await;

        assert_eq!(
            store.store(png("a.png")).await,
            Err(SlideshowError::Store("No selected file".to_string()))
        );
    }

    #[tokio::test]
    async fn test_store_http_error_carries_server_message() {
        let store = spawn_store(Router::new().route(
            "/upload",
            post(|| async {
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    Json(json!({ "success": false, "error": "File too large" })),
                )
            }),
        ))
        .await;

        assert_eq!(
            store.store(png("big.png")).await,
            Err(SlideshowError::Store("File too large".to_string()))
        );
    }

    #[tokio::test]
    async fn test_store_http_error_without_body_reports_status() {
        let store = spawn_store(Router::new().route(
            "/upload",
            post(|| async { StatusCode::BAD_GATEWAY }),
        ))
        .await;

        match store.store(png("a.png")).await {
            Err(SlideshowError::Store(message)) => assert!(message.contains("502")),
            other => panic!("expected store error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_and_online() {
        let store = spawn_store(
            Router::new()
                .route("/static/photos/a.jpg", get(|| async { vec![1u8, 2, 3] }))
                .route("/online", get(|| async { "Success" })),
        )
        .await;

        assert_eq!(store.fetch("/static/photos/a.jpg").await.unwrap(), vec![1, 2, 3]);
        assert!(matches!(
            store.fetch("/static/photos/missing.jpg").await,
            Err(SlideshowError::Fetch(_))
        ));
        assert!(store.online().await);
    }
}
