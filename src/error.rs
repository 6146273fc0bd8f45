//! Error types for the resolver and its host runtime seam.
//!
//! Typed errors stay internal so the fallback chain can classify them;
//! callers only ever see [`ResolveError`], whose message is always a
//! plain string.

use std::fmt;

/// Error from fetching asset bytes.
#[derive(Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, aborted read).
    Network(String),
    /// Response arrived but with a non-OK status.
    Http { status: u32, status_text: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "{}", msg),
            FetchError::Http { status, status_text } => {
                if status_text.is_empty() {
                    write!(f, "HTTP {}", status)
                } else {
                    write!(f, "HTTP {} {}", status, status_text)
                }
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Error from the native share sheet.
#[derive(Debug)]
pub enum ShareError {
    /// The user dismissed the share sheet. Not a failure.
    Cancelled,
    /// The share action itself threw.
    Failed(String),
}

impl fmt::Display for ShareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareError::Cancelled => write!(f, "share cancelled by user"),
            ShareError::Failed(msg) => write!(f, "share failed: {}", msg),
        }
    }
}

impl std::error::Error for ShareError {}

/// Error from a host primitive (anchor click, new browsing context).
#[derive(Debug)]
pub struct HostError(pub String);

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for HostError {}

/// Normalized error surfaced through a request's `on_error` callback.
///
/// Fires only when the terminal strategy for the platform has itself
/// failed; everything recoverable is handled by falling back.
#[derive(Debug)]
pub struct ResolveError {
    message: String,
}

impl ResolveError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ResolveError {}

impl From<FetchError> for ResolveError {
    fn from(e: FetchError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ShareError> for ResolveError {
    fn from(e: ShareError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<HostError> for ResolveError {
    fn from(e: HostError) -> Self {
        Self::new(e.to_string())
    }
}
