//! Host runtime seam.
//!
//! Everything the resolver needs from the outside world — platform
//! signals, asset fetch, object-URL lifecycle, anchor synthesis, new
//! browsing contexts, the share sheet — goes through this trait, so the
//! decision tree can be driven deterministically by tests.

mod native;

pub use native::NativeHost;

use crate::capability::PlatformSignals;
use crate::error::{FetchError, HostError, ShareError};

/// A local file payload: bytes plus the name and mime type they carry
/// into a save or share.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FilePayload {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// Handle to a temporary object URL minted by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectUrl(pub String);

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An off-screen anchor to synthesize, click, and detach.
#[derive(Debug, Clone)]
pub struct AnchorSpec {
    pub href: String,
    /// Value for the anchor's `download` attribute (suggested filename).
    pub download: String,
    pub target: Option<&'static str>,
    pub rel: Option<&'static str>,
}

impl AnchorSpec {
    /// Anchor at a locally materialized object URL.
    pub fn for_object_url(url: &ObjectUrl, filename: &str) -> Self {
        Self {
            href: url.as_str().to_string(),
            download: filename.to_string(),
            target: None,
            rel: None,
        }
    }

    /// Anchor pointing straight at the remote URL. Cross-origin
    /// `download` hints may be ignored by the browser.
    pub fn for_remote(url: &str, filename: &str) -> Self {
        Self {
            href: url.to_string(),
            download: filename.to_string(),
            target: Some("_blank"),
            rel: Some("noopener noreferrer"),
        }
    }
}

/// Platform primitives the resolver drives.
///
/// `fetch` attaches no credentials and imposes no timeout; a hung fetch
/// hangs that one resolution and nothing else.
#[allow(async_fn_in_trait)]
pub trait HostRuntime {
    /// Raw signals for capability detection, read fresh per call.
    fn signals(&self) -> PlatformSignals;

    /// Fetches the asset bytes. Non-OK responses are [`FetchError::Http`].
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// Mints a temporary object URL referencing a local payload.
    fn create_object_url(&self, payload: &FilePayload) -> ObjectUrl;

    /// Releases an object URL minted by [`Self::create_object_url`].
    fn revoke_object_url(&self, url: &ObjectUrl);

    /// Synthesizes an off-screen anchor, clicks it, and detaches it.
    fn click_anchor(&self, anchor: &AnchorSpec) -> Result<(), HostError>;

    /// Opens a URL in a new browsing context.
    fn open_in_new_tab(&self, url: &str) -> Result<(), HostError>;

    /// Whether the share sheet accepts the given file payloads
    /// (not just text/URLs).
    fn can_share_files(&self, files: &[FilePayload]) -> bool;

    /// Hands files to the native share sheet.
    async fn share_files(&self, files: &[FilePayload]) -> Result<(), ShareError>;
}
