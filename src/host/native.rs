//! Native host for desktop shells embedding the suite.
//!
//! Fetches with libcurl, materializes object URLs in an in-memory
//! payload table, and turns anchor clicks on object URLs into writes
//! under a download directory. Remote hrefs and new-tab opens are
//! handed to the system URL opener. No share sheet.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::capability::PlatformSignals;
use crate::error::{FetchError, HostError, ShareError};

use super::{AnchorSpec, FilePayload, HostRuntime, ObjectUrl};

const OBJECT_URL_PREFIX: &str = "blob:aurastream/";

pub struct NativeHost {
    download_dir: PathBuf,
    blobs: Mutex<HashMap<u64, FilePayload>>,
    next_blob_id: AtomicU64,
}

impl NativeHost {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            blobs: Mutex::new(HashMap::new()),
            next_blob_id: AtomicU64::new(1),
        }
    }

    /// Buffered GET. Follows redirects; sends no credentials and sets no
    /// timeout. Runs on the current thread; `fetch` wraps it in
    /// `spawn_blocking`.
    fn fetch_blocking(url: &str) -> Result<Vec<u8>, FetchError> {
        let mut body: Vec<u8> = Vec::new();
        let mut status_line = String::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)
            .map_err(|e| FetchError::Network(e.to_string()))?;
        easy.follow_location(true)
            .map_err(|e| FetchError::Network(e.to_string()))?;
        easy.max_redirections(10)
            .map_err(|e| FetchError::Network(e.to_string()))?;

        {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    if let Ok(s) = str::from_utf8(data) {
                        let s = s.trim_end();
                        // Keep the last status line in a redirect chain.
                        if s.starts_with("HTTP/") {
                            status_line = s.to_string();
                        }
                    }
                    true
                })
                .map_err(|e| FetchError::Network(e.to_string()))?;
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(|e| FetchError::Network(e.to_string()))?;
            transfer
                .perform()
                .map_err(|e| FetchError::Network(e.to_string()))?;
        }

        let status = easy
            .response_code()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(FetchError::Http {
                status,
                status_text: reason_phrase(&status_line),
            });
        }
        Ok(body)
    }

    fn blob_id(url: &str) -> Option<u64> {
        url.strip_prefix(OBJECT_URL_PREFIX)?.parse().ok()
    }
}

/// Extracts the reason phrase from a status line
/// (`"HTTP/1.1 404 Not Found"` → `"Not Found"`).
fn reason_phrase(status_line: &str) -> String {
    status_line
        .splitn(3, ' ')
        .nth(2)
        .unwrap_or("")
        .to_string()
}

impl HostRuntime for NativeHost {
    fn signals(&self) -> PlatformSignals {
        PlatformSignals {
            user_agent: "AuraStream/desktop".to_string(),
            max_touch_points: 0,
            supports_download_attribute: true,
            supports_share: false,
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let url = url.to_string();
        tokio::task::spawn_blocking(move || Self::fetch_blocking(&url))
            .await
            .map_err(|e| FetchError::Network(format!("fetch task failed: {}", e)))?
    }

    fn create_object_url(&self, payload: &FilePayload) -> ObjectUrl {
        let id = self.next_blob_id.fetch_add(1, Ordering::Relaxed);
        self.blobs.lock().unwrap().insert(id, payload.clone());
        ObjectUrl(format!("{}{}", OBJECT_URL_PREFIX, id))
    }

    fn revoke_object_url(&self, url: &ObjectUrl) {
        if let Some(id) = Self::blob_id(url.as_str()) {
            self.blobs.lock().unwrap().remove(&id);
        }
    }

    fn click_anchor(&self, anchor: &AnchorSpec) -> Result<(), HostError> {
        match Self::blob_id(&anchor.href) {
            Some(id) => {
                let payload = self
                    .blobs
                    .lock()
                    .unwrap()
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| HostError(format!("unknown object URL: {}", anchor.href)))?;
                let path = self.download_dir.join(&anchor.download);
                std::fs::write(&path, &payload.bytes)
                    .map_err(|e| HostError(format!("write {} failed: {}", path.display(), e)))?;
                tracing::info!("saved {} ({} bytes)", path.display(), payload.bytes.len());
                Ok(())
            }
            // Remote href: hand the link to the OS, like a browser that
            // ignores a cross-origin download hint.
            None => open::that(&anchor.href)
                .map_err(|e| HostError(format!("open {} failed: {}", anchor.href, e))),
        }
    }

    fn open_in_new_tab(&self, url: &str) -> Result<(), HostError> {
        open::that(url).map_err(|e| HostError(format!("open {} failed: {}", url, e)))
    }

    fn can_share_files(&self, _files: &[FilePayload]) -> bool {
        false
    }

    async fn share_files(&self, _files: &[FilePayload]) -> Result<(), ShareError> {
        Err(ShareError::Failed("no share sheet on this host".to_string()))
    }
}
