//! Strategy implementations: share hand-off, blob save, direct link.

use std::time::Duration;

use crate::error::{HostError, ResolveError, ShareError};
use crate::host::{AnchorSpec, FilePayload, HostRuntime};

use super::attempt::{Attempt, Delivery};

/// Fetches the asset and hands it to the native share sheet.
///
/// Never surfaces an error: a declined or crashed share falls through to
/// the next strategy. The share-capability probe runs on the materialized
/// files, so the fetch has to happen first.
pub(super) async fn try_share<H: HostRuntime>(
    host: &H,
    url: &str,
    filename: &str,
    mime: &str,
) -> Attempt {
    let bytes = match host.fetch(url).await {
        Ok(bytes) => bytes,
        Err(e) => return Attempt::Failed(ResolveError::from(e)),
    };
    let files = vec![FilePayload::new(filename, mime, bytes)];
    if !host.can_share_files(&files) {
        return Attempt::Skipped;
    }
    match host.share_files(&files).await {
        Ok(()) => Attempt::Succeeded(Delivery::Shared),
        Err(ShareError::Cancelled) => Attempt::Skipped,
        Err(e @ ShareError::Failed(_)) => Attempt::Failed(ResolveError::from(e)),
    }
}

/// Fetches the asset, materializes it as a temporary object URL, and
/// triggers a save through a synthesized anchor.
///
/// Once minted, the object URL is revoked on every exit path; the grace
/// delay lets the save start before the URL goes away.
pub(super) async fn blob_save<H: HostRuntime>(
    host: &H,
    url: &str,
    filename: &str,
    mime: &str,
    revoke_grace: Duration,
) -> Result<(), ResolveError> {
    let bytes = host.fetch(url).await?;
    let payload = FilePayload::new(filename, mime, bytes);
    let object_url = host.create_object_url(&payload);
    let clicked = host.click_anchor(&AnchorSpec::for_object_url(&object_url, filename));
    tokio::time::sleep(revoke_grace).await;
    host.revoke_object_url(&object_url);
    clicked.map_err(ResolveError::from)
}

/// Fires an anchor straight at the remote URL. Anything past the click
/// is unobservable at this layer.
pub(super) fn direct_link<H: HostRuntime>(
    host: &H,
    url: &str,
    filename: &str,
) -> Result<(), HostError> {
    host.click_anchor(&AnchorSpec::for_remote(url, filename))
}
