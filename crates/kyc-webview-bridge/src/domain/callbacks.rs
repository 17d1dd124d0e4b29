//! The subscriber surface: four optional callback slots.
//!
//! External collaborators (typically the UI layer) observe the bridge
//! exclusively through these callbacks.  Each slot is optional; an absent
//! slot silently drops its event class.  All slots must be registered
//! *before* the page load begins — the bridge does not buffer or replay
//! events for late subscribers.
//!
//! # Why boxed closures instead of a trait?
//!
//! The original host wired one closure per concern, and downstream UI code
//! rarely wants all four.  Optional boxed closures keep partial
//! subscription cheap and avoid forcing a four-method trait impl on every
//! consumer.  The closures must be `Send + Sync` because the channel pumps
//! invoke them from Tokio tasks.

use std::fmt;

use kyc_core::{ConsoleLevel, VerificationEvent};

/// Callback invoked with the name of a successful step.
pub type SuccessHandler = Box<dyn Fn(&str) + Send + Sync>;
/// Callback invoked with the name of a failed step.
pub type ErrorHandler = Box<dyn Fn(&str) + Send + Sync>;
/// Callback invoked with each full verification event.
pub type EventHandler = Box<dyn Fn(&VerificationEvent) + Send + Sync>;
/// Callback invoked with each mirrored console entry.
pub type LogHandler = Box<dyn Fn(&str, ConsoleLevel) + Send + Sync>;

/// The four optional subscription points of a bridge session.
///
/// # Example
///
/// ```rust
/// use kyc_webview_bridge::domain::BridgeCallbacks;
///
/// let callbacks = BridgeCallbacks::new()
///     .on_success(|name| println!("success: {name}"))
///     .on_error(|name| eprintln!("error: {name}"));
/// assert!(callbacks.has_any());
/// ```
#[derive(Default)]
pub struct BridgeCallbacks {
    on_success: Option<SuccessHandler>,
    on_error: Option<ErrorHandler>,
    on_event: Option<EventHandler>,
    on_log: Option<LogHandler>,
}

impl BridgeCallbacks {
    /// Creates an empty set — every event class is dropped until a slot is
    /// registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the success-notification callback.
    pub fn on_success(mut self, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(handler));
        self
    }

    /// Registers the error-notification callback.
    pub fn on_error(mut self, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(handler));
        self
    }

    /// Registers the verification-event callback.
    pub fn on_event(mut self, handler: impl Fn(&VerificationEvent) + Send + Sync + 'static) -> Self {
        self.on_event = Some(Box::new(handler));
        self
    }

    /// Registers the console-log callback.
    pub fn on_log(mut self, handler: impl Fn(&str, ConsoleLevel) + Send + Sync + 'static) -> Self {
        self.on_log = Some(Box::new(handler));
        self
    }

    /// `true` when at least one slot is registered.
    pub fn has_any(&self) -> bool {
        self.on_success.is_some()
            || self.on_error.is_some()
            || self.on_event.is_some()
            || self.on_log.is_some()
    }

    /// Invokes the success callback, if registered.
    pub fn emit_success(&self, name: &str) {
        if let Some(handler) = &self.on_success {
            handler(name);
        }
    }

    /// Invokes the error callback, if registered.
    pub fn emit_error(&self, name: &str) {
        if let Some(handler) = &self.on_error {
            handler(name);
        }
    }

    /// Invokes the verification-event callback, if registered.
    pub fn emit_event(&self, event: &VerificationEvent) {
        if let Some(handler) = &self.on_event {
            handler(event);
        }
    }

    /// Invokes the console-log callback, if registered.
    pub fn emit_log(&self, content: &str, level: ConsoleLevel) {
        if let Some(handler) = &self.on_log {
            handler(content, level);
        }
    }
}

impl fmt::Debug for BridgeCallbacks {
    /// Shows which slots are bound without trying to print the closures.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeCallbacks")
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_event", &self.on_event.is_some())
            .field("on_log", &self.on_log.is_some())
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
