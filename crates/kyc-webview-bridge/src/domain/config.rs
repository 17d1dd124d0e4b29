//! Bridge configuration types.
//!
//! [`BridgeConfig`] is the single source of truth for one session's runtime
//! settings.  Build it once, validate it, and hand it to
//! [`crate::infrastructure::BridgeSession::attach`], which wraps it in an
//! `Arc` and shares it with the channel pumps.
//!
//! There is no file or environment loading here: the bridge persists
//! nothing, and the embedder owns whatever configuration story it wants.

use thiserror::Error;

/// Default verification flow loaded when the embedder does not override it.
pub const DEFAULT_TARGET_URL: &str = "https://demo.legitimuz.com/teste-kyc/";

/// Per-channel inbound queue bound.  A full queue drops the newest payload
/// with a diagnostic rather than blocking the page side.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 128;

/// Errors produced by [`BridgeConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The target URL is empty or not an http(s) URL.
    #[error("invalid target URL: {0:?}")]
    InvalidTargetUrl(String),

    /// The per-channel queue capacity is zero.
    #[error("channel capacity must be non-zero")]
    ZeroChannelCapacity,
}

/// All runtime configuration for one bridge session.
///
/// # Example
///
/// ```rust
/// use kyc_webview_bridge::domain::BridgeConfig;
///
/// // Defaults load the demo verification flow with the camera permission
/// // auto-granted (the KYC flow cannot run without it):
/// let config = BridgeConfig::default();
/// assert!(config.auto_grant_media_capture);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    /// The page the session loads after instrumentation is installed.
    pub target_url: String,

    /// Auto-grant camera/microphone capture requests from the loaded page.
    ///
    /// The verification flow requires camera access, so this defaults to
    /// `true` — but it is an explicit, overridable policy, not a hardcoded
    /// grant.  Set it to `false` to deny capture requests instead.
    pub auto_grant_media_capture: bool,

    /// Surface JS dialog text (`alert`/`confirm`) to the log callback before
    /// auto-acknowledging the dialog.
    pub surface_dialogs: bool,

    /// Install the console-capture script (document-start).  Disabling this
    /// skips console mirroring and the global error handlers; the message
    /// relay is always installed.
    pub console_capture: bool,

    /// Bound of each per-channel inbound queue.
    pub channel_capacity: usize,

    /// Settings the session applies to the webview before loading.
    pub webview: WebViewPreferences,
}

impl BridgeConfig {
    /// Checks the config for values that cannot produce a working session.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the target URL is empty or non-http(s),
    /// or the channel capacity is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.target_url.starts_with("http://") || self.target_url.starts_with("https://")) {
            return Err(ConfigError::InvalidTargetUrl(self.target_url.clone()));
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }
        Ok(())
    }
}

impl Default for BridgeConfig {
    /// Returns a config suitable for exercising the demo verification flow
    /// without any external setup.
    ///
    /// | Field                    | Default                 |
    /// |--------------------------|-------------------------|
    /// | target_url               | the demo KYC flow       |
    /// | auto_grant_media_capture | `true`                  |
    /// | surface_dialogs          | `true`                  |
    /// | console_capture          | `true`                  |
    /// | channel_capacity         | 128                     |
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            auto_grant_media_capture: true,
            surface_dialogs: true,
            console_capture: true,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            webview: WebViewPreferences::default(),
        }
    }
}

/// Webview settings the session applies before the load begins.
///
/// These mirror what the verification flow needs from its embedder: media
/// that plays inline without a user gesture (the liveness check autoplays
/// the camera preview), and optional remote inspectability for debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebViewPreferences {
    /// Play media inline rather than in a fullscreen player.
    pub inline_media_playback: bool,
    /// Allow media to start without a user gesture.
    pub autoplay_without_gesture: bool,
    /// Expose the page to the platform's remote web inspector.
    pub inspectable: bool,
}

impl Default for WebViewPreferences {
    fn default() -> Self {
        Self {
            inline_media_playback: true,
            autoplay_without_gesture: true,
            inspectable: false,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_the_demo_flow() {
        let config = BridgeConfig::default();
        assert_eq!(config.target_url, DEFAULT_TARGET_URL);
    }

    #[test]
    fn test_default_auto_grants_media_capture() {
        // The KYC flow cannot run without the camera; the default policy
        // grants capture requests.
        let config = BridgeConfig::default();
        assert!(config.auto_grant_media_capture);
    }

    #[test]
    fn test_default_validates() {
        assert_eq!(BridgeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_empty_target_url_fails_validation() {
        let config = BridgeConfig {
            target_url: String::new(),
            ..BridgeConfig::default()
        };

        let result = config.validate();

        assert_eq!(result, Err(ConfigError::InvalidTargetUrl(String::new())));
    }

    #[test]
    fn test_non_http_target_url_fails_validation() {
        let config = BridgeConfig {
            target_url: "file:///etc/passwd".to_string(),
            ..BridgeConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTargetUrl(_))
        ));
    }

    #[test]
    fn test_zero_channel_capacity_fails_validation() {
        let config = BridgeConfig {
            channel_capacity: 0,
            ..BridgeConfig::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::ZeroChannelCapacity));
    }

    #[test]
    fn test_default_webview_preferences_allow_inline_autoplay() {
        let prefs = WebViewPreferences::default();
        assert!(prefs.inline_media_playback);
        assert!(prefs.autoplay_without_gesture);
        assert!(!prefs.inspectable, "inspection is opt-in");
    }
}
