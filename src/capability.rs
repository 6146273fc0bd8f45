//! Platform capability detection.
//!
//! The host reports raw signals (user-agent, touch points, feature
//! flags); the device class is derived from them on every resolve call.
//! Nothing is cached — the signals are cheap to read and the device
//! class cannot change mid-session.

/// Raw signals reported by the host runtime.
#[derive(Debug, Clone, Default)]
pub struct PlatformSignals {
    /// Full user-agent string.
    pub user_agent: String,
    /// Touch-point count; distinguishes iPads running desktop-mode UAs.
    pub max_touch_points: u32,
    /// True if the runtime honors the anchor `download` attribute.
    pub supports_download_attribute: bool,
    /// True if a share sheet able to receive file payloads exists.
    pub supports_share: bool,
}

/// Device class and feature support derived from [`PlatformSignals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCapability {
    pub is_ios: bool,
    pub is_android: bool,
    pub supports_download_attribute: bool,
    pub supports_share: bool,
}

impl PlatformCapability {
    /// Derives the capability set from host signals.
    ///
    /// iPadOS 13+ reports a desktop Macintosh user-agent; the touch-point
    /// count is the only reliable tell for those devices.
    pub fn from_signals(signals: &PlatformSignals) -> Self {
        let ua = signals.user_agent.as_str();
        let is_ios = ua.contains("iPhone")
            || ua.contains("iPad")
            || ua.contains("iPod")
            || (ua.contains("Macintosh") && signals.max_touch_points > 1);
        let is_android = ua.contains("Android");
        Self {
            is_ios,
            is_android,
            supports_download_attribute: signals.supports_download_attribute,
            supports_share: signals.supports_share,
        }
    }

    /// True for either mobile device class.
    pub fn is_mobile(&self) -> bool {
        self.is_ios || self.is_android
    }
}
