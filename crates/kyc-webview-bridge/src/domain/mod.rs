//! Domain layer for kyc-webview-bridge.
//!
//! Pure business-logic types with no dependencies on I/O, async runtimes, or
//! webview frameworks.
//!
//! # What belongs in the domain layer?
//!
//! - Configuration structures ([`BridgeConfig`], [`WebViewPreferences`])
//! - The subscriber surface ([`BridgeCallbacks`])
//! - Dialog and permission request/decision types
//! - Error types that describe business-logic failures ([`ConfigError`])
//!
//! # What does NOT belong here?
//!
//! - Any `tokio` type, channel, or task handle
//! - The webview trait (that is an infrastructure seam)

pub mod callbacks;
pub mod config;
pub mod interaction;

pub use callbacks::BridgeCallbacks;
pub use config::{BridgeConfig, ConfigError, WebViewPreferences};
pub use interaction::{
    DialogKind, DialogResponse, MediaCaptureKind, PermissionDecision, PermissionRequest,
};
