//! Download request construction.

use std::fmt;

use crate::error::ResolveError;

/// Mime type assumed when the caller does not supply one.
pub const DEFAULT_MIME_TYPE: &str = "image/png";

/// Callback invoked when a request resolves successfully.
pub type SuccessCallback = Box<dyn FnOnce() + Send>;
/// Callback invoked when every applicable strategy has been exhausted.
pub type ErrorCallback = Box<dyn FnOnce(ResolveError) + Send>;

/// One asset to materialize as a saved (or shared) file.
///
/// Completion is observed only through the callbacks: exactly one fires
/// per request, or neither if the process is torn down mid-flight.
pub struct DownloadRequest {
    /// Absolute URL of the asset, cross-origin in the common case.
    pub source_url: String,
    /// Suggested local filename. Filesystem safety is the caller's
    /// concern; see [`crate::filename::sanitize_filename`].
    pub filename: String,
    /// Payload mime type for share hand-offs; `image/png` when `None`.
    pub mime_type: Option<String>,
    pub on_success: Option<SuccessCallback>,
    pub on_error: Option<ErrorCallback>,
}

impl DownloadRequest {
    pub fn new(source_url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            filename: filename.into(),
            mime_type: None,
            on_success: None,
            on_error: None,
        }
    }

    /// Sets the payload mime type.
    pub fn mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }

    pub fn on_success(mut self, cb: impl FnOnce() + Send + 'static) -> Self {
        self.on_success = Some(Box::new(cb));
        self
    }

    pub fn on_error(mut self, cb: impl FnOnce(ResolveError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(cb));
        self
    }

    /// Mime type to tag payloads with.
    pub(crate) fn effective_mime(&self) -> &str {
        self.mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE)
    }
}

impl fmt::Debug for DownloadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadRequest")
            .field("source_url", &self.source_url)
            .field("filename", &self.filename)
            .field("mime_type", &self.mime_type)
            .finish_non_exhaustive()
    }
}
