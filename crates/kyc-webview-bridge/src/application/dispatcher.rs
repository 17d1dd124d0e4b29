//! Domain-event dispatch onto the subscriber callbacks.
//!
//! The functions here are pure translation: no queues, no tasks, no shared
//! state.  The infrastructure layer calls [`process_raw`] from the channel
//! pumps and [`dispatch`] from the lifecycle hooks; both can also be called
//! directly in tests without any runtime.
//!
//! # Dispatch table
//!
//! | event | callback |
//! |---|---|
//! | `Success{name}` | `on_success(name)` |
//! | `Error{name}` | `on_error(name)` |
//! | `Verification(event)` | `on_event(&event)` |
//! | `ConsoleLog{level, content}` | `on_log(content, level)` |
//! | `PageLoaded` | `on_success("page_loaded")` |
//! | `PageLoadFailed{reason}` | `on_error("navigation_failed")`, reason logged |
//!
//! Absent callbacks drop their event class silently; that is the contract,
//! not an error.

use tracing::{debug, warn};

use kyc_core::protocol::classify::classify;
use kyc_core::{DomainEvent, RawMessage};

use crate::domain::callbacks::BridgeCallbacks;

/// Name of the synthetic success event fired when the page finishes loading.
pub const PAGE_LOADED_EVENT: &str = "page_loaded";

/// Name of the synthetic error event fired when the page load fails.
pub const NAVIGATION_FAILED_EVENT: &str = "navigation_failed";

/// Invokes the callback matching one domain event.
pub fn dispatch(event: &DomainEvent, callbacks: &BridgeCallbacks) {
    match event {
        DomainEvent::Success { name } => callbacks.emit_success(name),
        DomainEvent::Error { name } => callbacks.emit_error(name),
        DomainEvent::Verification(event) => callbacks.emit_event(event),
        DomainEvent::ConsoleLog { level, content } => callbacks.emit_log(content, *level),
        DomainEvent::PageLoaded => {
            debug!("page load finished");
            callbacks.emit_success(PAGE_LOADED_EVENT);
        }
        DomainEvent::PageLoadFailed { reason } => {
            warn!("page load failed: {reason}");
            callbacks.emit_error(NAVIGATION_FAILED_EVENT);
        }
    }
}

/// Classifies one raw message and dispatches every resulting event, in
/// classification order.
///
/// Malformed payloads classify to nothing, so this is a no-op for them —
/// the classifier already logged the diagnostic.
pub fn process_raw(message: &RawMessage, callbacks: &BridgeCallbacks) {
    for event in classify(message) {
        dispatch(&event, callbacks);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
