//! Asset download resolution.
//!
//! Resolves a [`DownloadRequest`] into the most reliable save/share
//! action the current platform offers: share sheet on mobile, blob save
//! where the anchor `download` attribute is honored, direct link or a
//! new tab when it is not. Strategies run top to bottom, first viable
//! branch wins, and only the terminal branch's failure reaches
//! `on_error` — a branch ending in "open a tab" counts as success,
//! because giving the user a way to obtain the file is the point.

mod attempt;
mod strategies;

pub use attempt::{Attempt, Delivery};

use crate::capability::PlatformCapability;
use crate::config::SaverConfig;
use crate::error::ResolveError;
use crate::host::HostRuntime;
use crate::request::DownloadRequest;

/// Download resolver over a host runtime.
pub struct Resolver<H> {
    host: H,
    config: SaverConfig,
}

impl<H: HostRuntime> Resolver<H> {
    /// Creates a resolver with default pacing.
    pub fn new(host: H) -> Self {
        Self::with_config(host, SaverConfig::default())
    }

    pub fn with_config(host: H, config: SaverConfig) -> Self {
        Self { host, config }
    }

    /// The host, for call sites that need direct access.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Resolves a request, firing exactly one of its callbacks.
    ///
    /// Fire-and-notify: the returned future yields `()`; completion is
    /// observed through the request's callbacks.
    pub async fn resolve(&self, mut request: DownloadRequest) {
        let on_success = request.on_success.take();
        let on_error = request.on_error.take();
        match self.resolve_request(&request).await {
            Ok(delivery) => {
                tracing::info!("resolved {} via {:?}", request.source_url, delivery);
                if let Some(cb) = on_success {
                    cb();
                }
            }
            Err(err) => {
                tracing::warn!("resolution failed for {}: {}", request.source_url, err);
                if let Some(cb) = on_error {
                    cb(err);
                }
            }
        }
    }

    /// Awaitable form of [`Self::resolve`] for async call sites; reports
    /// which strategy completed. Callbacks on the request are not
    /// consulted.
    pub async fn resolve_request(
        &self,
        request: &DownloadRequest,
    ) -> Result<Delivery, ResolveError> {
        // Recomputed per call: detection is cheap and the device class
        // cannot change mid-session.
        let caps = PlatformCapability::from_signals(&self.host.signals());
        self.run_decision(&caps, request).await
    }

    async fn run_decision(
        &self,
        caps: &PlatformCapability,
        request: &DownloadRequest,
    ) -> Result<Delivery, ResolveError> {
        let url = request.source_url.as_str();
        let filename = request.filename.as_str();
        let mime = request.effective_mime();

        if caps.is_mobile() && caps.supports_share {
            match strategies::try_share(&self.host, url, filename, mime).await {
                Attempt::Succeeded(delivery) => return Ok(delivery),
                Attempt::Skipped => tracing::debug!("share sheet declined for {}", url),
                Attempt::Failed(e) => tracing::warn!("share failed for {}: {}", url, e),
            }
        }

        if caps.is_ios {
            return match strategies::blob_save(&self.host, url, filename, mime, self.config.revoke_grace()).await {
                Ok(()) => Ok(Delivery::BlobSaved),
                Err(e) => {
                    tracing::warn!("blob save failed for {}: {}; opening tab for manual save", url, e);
                    self.host.open_in_new_tab(url)?;
                    Ok(Delivery::OpenedTab)
                }
            };
        }

        if caps.supports_download_attribute {
            return match strategies::blob_save(&self.host, url, filename, mime, self.config.revoke_grace()).await {
                Ok(()) => Ok(Delivery::BlobSaved),
                Err(e) => {
                    tracing::warn!("blob save failed for {}: {}; falling back to direct link", url, e);
                    strategies::direct_link(&self.host, url, filename)?;
                    Ok(Delivery::DirectLink)
                }
            };
        }

        self.host.open_in_new_tab(url)?;
        Ok(Delivery::OpenedTab)
    }

    /// Resolves requests strictly in order with a fixed pause between
    /// dispatches, so back-to-back saves do not trip browser popup or
    /// rate-limit heuristics.
    ///
    /// `on_progress(completed, total)` fires after each successful item;
    /// `on_error` fires per failing item without advancing the count, and
    /// the batch continues regardless.
    pub async fn resolve_batch<P, E>(
        &self,
        requests: Vec<DownloadRequest>,
        mut on_progress: P,
        mut on_error: E,
    ) where
        P: FnMut(usize, usize),
        E: FnMut(&ResolveError, &DownloadRequest),
    {
        let total = requests.len();
        let mut completed = 0usize;
        for (index, mut request) in requests.into_iter().enumerate() {
            let on_success_cb = request.on_success.take();
            let on_error_cb = request.on_error.take();
            match self.resolve_request(&request).await {
                Ok(delivery) => {
                    completed += 1;
                    tracing::info!("batch item {} resolved via {:?}", request.source_url, delivery);
                    if let Some(cb) = on_success_cb {
                        cb();
                    }
                    on_progress(completed, total);
                }
                Err(err) => {
                    tracing::warn!("batch item {} failed: {}", request.source_url, err);
                    on_error(&err, &request);
                    if let Some(cb) = on_error_cb {
                        cb(err);
                    }
                }
            }
            if index + 1 < total {
                tokio::time::sleep(self.config.batch_delay()).await;
            }
        }
    }
}
