//! Message types for the page → host channel protocol.
//!
//! The page side speaks loosely-shaped JSON: several legacy payload shapes
//! coexist on the same channel (a bare string, an object with an `event`
//! field, an object with `name`/`status`/arbitrary extras).  Rather than
//! forcing one schema on the page, the host accepts every documented shape
//! and normalizes at the classification boundary.
//!
//! # Message flow
//!
//! ```text
//! Page → Host:  JSON payload on a channel  →  RawMessage  →  classify()  →  DomainEvent
//! Host hooks:   page load finished/failed  →  DomainEvent (synthesized, no RawMessage)
//! ```
//!
//! # Why keep `RawMessage.payload` as a `serde_json::Value`?
//!
//! The payload shape varies *by design* — the bridge must tolerate multiple
//! legacy shapes on the same channel, plus unknown future fields on
//! verification events.  A `Value` carries the payload verbatim to the one
//! place allowed to probe it: [`crate::protocol::classify`].  Everywhere
//! else handles the typed [`DomainEvent`] instead.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::channel::Channel;

// ── Inbound raw message ───────────────────────────────────────────────────────

/// One inbound payload, as posted by the client script on a named channel.
///
/// Produced by the session's channel plumbing and consumed exactly once by
/// the classifier.  The channel is already parsed (unknown names are dropped
/// before a `RawMessage` exists); the payload is carried verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMessage {
    /// The channel the payload arrived on.
    pub channel: Channel,
    /// The JSON payload, shape-unchecked until classification.
    pub payload: Value,
}

// ── Console levels ────────────────────────────────────────────────────────────

/// Severity of a mirrored console entry.
///
/// The page tags entries with the console method name (`"log"`, `"error"`,
/// `"warn"`, `"info"`, `"debug"`); [`ConsoleLevel::from_tag`] maps those tags
/// onto this enum with `Log` as the fallback for anything unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleLevel {
    Debug,
    Info,
    Warn,
    Error,
    Log,
}

impl ConsoleLevel {
    /// Maps a console-method tag onto a level.
    ///
    /// The lookup is fixed: `error→Error`, `warn→Warn`, `info→Info`,
    /// `debug→Debug`, anything else → `Log`.  An unknown tag is not an
    /// error — pages ship new console methods faster than hosts update.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "error" => ConsoleLevel::Error,
            "warn" => ConsoleLevel::Warn,
            "info" => ConsoleLevel::Info,
            "debug" => ConsoleLevel::Debug,
            _ => ConsoleLevel::Log,
        }
    }

    /// The lowercase tag for this level, as used in log output.
    pub fn as_tag(&self) -> &'static str {
        match self {
            ConsoleLevel::Debug => "debug",
            ConsoleLevel::Info => "info",
            ConsoleLevel::Warn => "warn",
            ConsoleLevel::Error => "error",
            ConsoleLevel::Log => "log",
        }
    }
}

impl std::fmt::Display for ConsoleLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

// ── Verification events ───────────────────────────────────────────────────────

/// A verification SDK event relayed from the page.
///
/// The page posts these as objects with at least a `name`; `status` and
/// `refId` are optional, and any further fields are preserved verbatim in
/// `extra` so that new SDK fields survive the bridge without a host update.
///
/// # Serde representation
///
/// ```json
/// {"name":"facial-capture","status":"success","refId":"abc-123","attempt":2}
/// ```
///
/// `refId` keeps its wire spelling via `#[serde(rename)]`; the `extra` map is
/// flattened into the same object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationEvent {
    /// The event name assigned by the page (e.g., `"facial-capture"`).
    pub name: String,

    /// `"success"`, `"error"`, or any other marker the page chose.
    ///
    /// Normalized to `"unknown"` when the page omitted the field or sent a
    /// non-string value.  Kept as a `String` rather than an enum so that
    /// intermediate statuses (`"pending"`, `"retry"`, …) pass through intact.
    pub status: String,

    /// Back-office reference identifier, when the page supplied one.
    #[serde(rename = "refId", skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,

    /// Every payload field other than `name`, `status`, and `refId`,
    /// preserved verbatim for forward compatibility.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── Domain events ─────────────────────────────────────────────────────────────

/// The normalized output of classification.
///
/// Every well-formed [`RawMessage`] maps deterministically onto one of these
/// variants (a tagged verification event additionally derives a legacy
/// `Success`/`Error` twin).  The two page-lifecycle variants are synthesized
/// by host hooks and never produced by classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum DomainEvent {
    /// The page reported a named step as successful.
    Success {
        /// The event name as reported by the page.
        name: String,
    },

    /// The page reported a named step as failed.
    Error {
        /// The event name as reported by the page.
        name: String,
    },

    /// A full verification SDK event with status and extra fields preserved.
    Verification(VerificationEvent),

    /// One mirrored console entry (or a synthesized uncaught-error entry).
    ConsoleLog {
        level: ConsoleLevel,
        content: String,
    },

    /// Synthesized by the host when the page finished loading.
    PageLoaded,

    /// Synthesized by the host when the page load failed.
    PageLoadFailed {
        /// Human-readable failure reason from the webview.
        reason: String,
    },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
