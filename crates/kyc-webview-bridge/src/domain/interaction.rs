//! Page-interaction types: JS dialogs and media-capture permissions.
//!
//! The page can stall on two kinds of host decisions: a JavaScript dialog
//! (`alert`/`confirm`) and a media-capture permission request.  These types
//! describe the request and the host's answer; the policy that produces the
//! answer lives in [`crate::application::permissions`].

use serde::{Deserialize, Serialize};

// ── JavaScript dialogs ────────────────────────────────────────────────────────

/// The kind of blocking JavaScript dialog the page presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogKind {
    /// `window.alert(text)` — acknowledgement only.
    Alert,
    /// `window.confirm(text)` — expects a yes/no answer.
    Confirm,
}

/// The host's answer to a JavaScript dialog.
///
/// The page blocks until this is delivered, so the bridge always answers
/// immediately instead of forwarding the dialog to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogResponse {
    /// The dialog was dismissed (alerts).
    Dismissed,
    /// The dialog was answered affirmatively (confirms).
    Confirmed,
}

// ── Media-capture permissions ─────────────────────────────────────────────────

/// What the page asked to capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaCaptureKind {
    Camera,
    Microphone,
    CameraAndMicrophone,
}

/// A media-capture permission request originating from the loaded page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRequest {
    /// Security origin of the requesting frame (e.g., `https://demo.example`).
    pub origin: String,
    /// The devices requested.
    pub kind: MediaCaptureKind,
}

/// The host's answer to a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionDecision {
    Grant,
    Deny,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
