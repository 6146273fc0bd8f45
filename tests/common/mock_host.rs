//! Scriptable host runtime that records every primitive the resolver
//! drives: fetches, anchor clicks, opened tabs, share calls, and the
//! object-URL ledger for leak checks.

use std::collections::HashSet;
use std::sync::Mutex;

use aura_saver::capability::PlatformSignals;
use aura_saver::error::{FetchError, HostError, ShareError};
use aura_saver::host::{AnchorSpec, FilePayload, HostRuntime, ObjectUrl};

const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1";
const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Mobile Safari/537.36";
const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Canned fetch behavior, applied to every fetch.
#[derive(Clone)]
pub enum FetchOutcome {
    Bytes(Vec<u8>),
    Http(u32, &'static str),
    NetworkError(&'static str),
}

/// Canned share-sheet behavior.
#[derive(Clone, Copy)]
pub enum ShareOutcome {
    Accepted,
    Cancelled,
    Crashed(&'static str),
}

#[derive(Default)]
struct Recorded {
    fetches: Vec<String>,
    anchors: Vec<AnchorSpec>,
    opened_tabs: Vec<String>,
    share_calls: usize,
    can_share_calls: usize,
    created_urls: usize,
    revoked_urls: usize,
    live_urls: HashSet<String>,
    next_url_id: u64,
}

pub struct MockHost {
    signals: PlatformSignals,
    fetch_outcome: FetchOutcome,
    share_outcome: ShareOutcome,
    can_share_files: bool,
    click_fails: bool,
    open_fails_for: Vec<String>,
    state: Mutex<Recorded>,
}

impl MockHost {
    fn with_signals(signals: PlatformSignals) -> Self {
        Self {
            signals,
            fetch_outcome: FetchOutcome::Bytes(vec![0x89, b'P', b'N', b'G']),
            share_outcome: ShareOutcome::Accepted,
            can_share_files: false,
            click_fails: false,
            open_fails_for: Vec::new(),
            state: Mutex::new(Recorded::default()),
        }
    }

    pub fn desktop_chrome() -> Self {
        Self::with_signals(PlatformSignals {
            user_agent: DESKTOP_UA.to_string(),
            max_touch_points: 0,
            supports_download_attribute: true,
            supports_share: false,
        })
    }

    pub fn ios_safari() -> Self {
        Self::with_signals(PlatformSignals {
            user_agent: IPHONE_UA.to_string(),
            max_touch_points: 5,
            supports_download_attribute: true,
            supports_share: false,
        })
    }

    pub fn android_chrome() -> Self {
        Self::with_signals(PlatformSignals {
            user_agent: ANDROID_UA.to_string(),
            max_touch_points: 5,
            supports_download_attribute: true,
            supports_share: false,
        })
    }

    /// Old desktop engine: anchor `download` not honored, no share sheet.
    pub fn legacy_browser() -> Self {
        Self::with_signals(PlatformSignals {
            user_agent: DESKTOP_UA.to_string(),
            max_touch_points: 0,
            supports_download_attribute: false,
            supports_share: false,
        })
    }

    /// Enables the share sheet with the given behavior.
    pub fn with_share(mut self, outcome: ShareOutcome) -> Self {
        self.signals.supports_share = true;
        self.can_share_files = true;
        self.share_outcome = outcome;
        self
    }

    /// Share sheet present, but the runtime claims it cannot take files.
    pub fn with_unshareable_files(mut self) -> Self {
        self.signals.supports_share = true;
        self.can_share_files = false;
        self
    }

    pub fn with_fetch(mut self, outcome: FetchOutcome) -> Self {
        self.fetch_outcome = outcome;
        self
    }

    /// Every anchor click fails.
    pub fn with_failing_clicks(mut self) -> Self {
        self.click_fails = true;
        self
    }

    /// Opening the given URL in a new tab fails.
    pub fn with_failing_open(mut self, url: &str) -> Self {
        self.open_fails_for.push(url.to_string());
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.state.lock().unwrap().fetches.len()
    }

    pub fn anchors(&self) -> Vec<AnchorSpec> {
        self.state.lock().unwrap().anchors.clone()
    }

    pub fn opened_tabs(&self) -> Vec<String> {
        self.state.lock().unwrap().opened_tabs.clone()
    }

    pub fn share_calls(&self) -> usize {
        self.state.lock().unwrap().share_calls
    }

    pub fn can_share_calls(&self) -> usize {
        self.state.lock().unwrap().can_share_calls
    }

    pub fn created_object_urls(&self) -> usize {
        self.state.lock().unwrap().created_urls
    }

    pub fn revoked_object_urls(&self) -> usize {
        self.state.lock().unwrap().revoked_urls
    }

    /// Object URLs minted but not yet revoked (leak check).
    pub fn live_object_urls(&self) -> usize {
        self.state.lock().unwrap().live_urls.len()
    }
}

impl HostRuntime for MockHost {
    fn signals(&self) -> PlatformSignals {
        self.signals.clone()
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.state.lock().unwrap().fetches.push(url.to_string());
        match &self.fetch_outcome {
            FetchOutcome::Bytes(bytes) => Ok(bytes.clone()),
            FetchOutcome::Http(status, text) => Err(FetchError::Http {
                status: *status,
                status_text: text.to_string(),
            }),
            FetchOutcome::NetworkError(msg) => Err(FetchError::Network(msg.to_string())),
        }
    }

    fn create_object_url(&self, _payload: &FilePayload) -> ObjectUrl {
        let mut state = self.state.lock().unwrap();
        state.next_url_id += 1;
        let url = format!("blob:mock/{}", state.next_url_id);
        state.created_urls += 1;
        state.live_urls.insert(url.clone());
        ObjectUrl(url)
    }

    fn revoke_object_url(&self, url: &ObjectUrl) {
        let mut state = self.state.lock().unwrap();
        if state.live_urls.remove(url.as_str()) {
            state.revoked_urls += 1;
        }
    }

    fn click_anchor(&self, anchor: &AnchorSpec) -> Result<(), HostError> {
        self.state.lock().unwrap().anchors.push(anchor.clone());
        if self.click_fails {
            return Err(HostError("anchor click rejected".to_string()));
        }
        Ok(())
    }

    fn open_in_new_tab(&self, url: &str) -> Result<(), HostError> {
        if self.open_fails_for.iter().any(|u| u == url) {
            return Err(HostError("popup blocked".to_string()));
        }
        self.state.lock().unwrap().opened_tabs.push(url.to_string());
        Ok(())
    }

    fn can_share_files(&self, _files: &[FilePayload]) -> bool {
        self.state.lock().unwrap().can_share_calls += 1;
        self.can_share_files
    }

    async fn share_files(&self, _files: &[FilePayload]) -> Result<(), ShareError> {
        self.state.lock().unwrap().share_calls += 1;
        match self.share_outcome {
            ShareOutcome::Accepted => Ok(()),
            ShareOutcome::Cancelled => Err(ShareError::Cancelled),
            ShareOutcome::Crashed(msg) => Err(ShareError::Failed(msg.to_string())),
        }
    }
}
