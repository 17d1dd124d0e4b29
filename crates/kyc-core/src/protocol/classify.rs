//! Classification of raw channel payloads into domain events.
//!
//! This module is the single place allowed to probe the shape of a
//! [`RawMessage`] payload.  Classification is *channel-first*: the channel
//! selects the accepted payload shapes, and the payload is then validated
//! and narrowed against those shapes exactly once.
//!
//! The functions here have no I/O side effects beyond `tracing`
//! diagnostics, no async, and no shared state.  Classifying the same
//! message twice yields identical results.
//!
//! # Failure policy
//!
//! Every branch has a fallthrough that *discards* rather than throws: a
//! malformed payload on a known channel produces no events and a `warn`
//! diagnostic.  Nothing in this module can fail the session.
//!
//! # Translation directions
//!
//! ```text
//! Page → Host:  RawMessage ──classify()──> Vec<DomainEvent> (0, 1, or 2 events)
//! ```
//!
//! A tagged verification event is the one case that yields two events: the
//! full [`DomainEvent::Verification`] plus a derived legacy
//! `Success`/`Error` twin for subscribers that predate the event channel.

use serde_json::Value;
use tracing::warn;

use crate::domain::heuristic::{classify_by_name, NameVerdict};
use crate::protocol::channel::Channel;
use crate::protocol::messages::{ConsoleLevel, DomainEvent, RawMessage, VerificationEvent};

/// Legacy prefix that smuggled console output through the success channel
/// before a dedicated `consoleLog` channel existed.
const LOG_PREFIX: &str = "LOG:";

/// Status value substituted when a verification event has no usable status.
const STATUS_UNKNOWN: &str = "unknown";

// ── Public API ────────────────────────────────────────────────────────────────

/// Classifies one raw message into zero, one, or two domain events.
///
/// The mapping per channel:
///
/// | channel | well-formed payload | result |
/// |---|---|---|
/// | `consoleLog` | `{type, content}` | one [`DomainEvent::ConsoleLog`] |
/// | `legitimuzEvent` | `{name, ...}` | [`DomainEvent::Verification`] + derived legacy twin |
/// | `onSuccess` | string \| `{event}` | one [`DomainEvent::Success`] (or `ConsoleLog` for `"LOG:"` strings) |
/// | `onError` | string \| `{event}` | one [`DomainEvent::Error`] |
///
/// Malformed payloads yield an empty vector and a `tracing` diagnostic.
/// This function is pure with respect to its inputs — feeding the same
/// message twice yields two identical results.
pub fn classify(message: &RawMessage) -> Vec<DomainEvent> {
    match message.channel {
        Channel::ConsoleLog => classify_console_log(&message.payload)
            .into_iter()
            .collect(),
        Channel::LegitimuzEvent => classify_verification(&message.payload),
        Channel::OnSuccess | Channel::OnError => {
            classify_notification(message.channel, &message.payload)
                .into_iter()
                .collect()
        }
    }
}

// ── Per-channel classification ────────────────────────────────────────────────

/// `consoleLog`: requires an object with string `type` and `content` fields.
fn classify_console_log(payload: &Value) -> Option<DomainEvent> {
    let entry = match payload.as_object() {
        Some(obj) => obj,
        None => {
            warn!("consoleLog payload is not an object; dropped: {payload}");
            return None;
        }
    };

    let tag = entry.get("type").and_then(Value::as_str);
    let content = entry.get("content").and_then(Value::as_str);

    match (tag, content) {
        (Some(tag), Some(content)) => Some(DomainEvent::ConsoleLog {
            level: ConsoleLevel::from_tag(tag),
            content: content.to_string(),
        }),
        _ => {
            warn!("consoleLog payload missing string type/content; dropped: {payload}");
            None
        }
    }
}

/// `legitimuzEvent`: requires an object with a string `name` field.
///
/// Emits the full verification event first, then exactly one derived legacy
/// notification:
///
/// - `status == "success"` → `Success{name}`
/// - `status == "error"` → `Error{name}`
/// - anything else (including the substituted `"unknown"`) → the
///   name-substring fallback in [`crate::domain::heuristic`]
fn classify_verification(payload: &Value) -> Vec<DomainEvent> {
    let fields = match payload.as_object() {
        Some(obj) => obj,
        None => {
            warn!("legitimuzEvent payload is not an object; dropped: {payload}");
            return Vec::new();
        }
    };

    let name = match fields.get("name").and_then(Value::as_str) {
        Some(name) => name.to_string(),
        None => {
            warn!("legitimuzEvent payload has no string name; dropped: {payload}");
            return Vec::new();
        }
    };

    // A missing or non-string status is normalized, not rejected — untagged
    // events are a documented legacy shape.
    let status = fields
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or(STATUS_UNKNOWN)
        .to_string();

    let ref_id = fields
        .get("refId")
        .and_then(Value::as_str)
        .map(str::to_string);

    // Preserve every field we did not extract, verbatim.
    let extra: serde_json::Map<String, Value> = fields
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "name" | "status" | "refId"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let derived = match status.as_str() {
        "success" => DomainEvent::Success { name: name.clone() },
        "error" => DomainEvent::Error { name: name.clone() },
        _ => match classify_by_name(&name) {
            NameVerdict::Success => DomainEvent::Success { name: name.clone() },
            NameVerdict::Error => DomainEvent::Error { name: name.clone() },
        },
    };

    vec![
        DomainEvent::Verification(VerificationEvent {
            name,
            status,
            ref_id,
            extra,
        }),
        derived,
    ]
}

/// `onSuccess` / `onError`: a bare string, or the alternate legacy object
/// shape `{event: string}`.
///
/// On the success channel only, a string carrying the legacy `"LOG:"` prefix
/// is routed to `ConsoleLog` instead of `Success` — never both.
fn classify_notification(channel: Channel, payload: &Value) -> Option<DomainEvent> {
    let name = match payload {
        Value::String(name) => name.as_str(),
        Value::Object(fields) => match fields.get("event").and_then(Value::as_str) {
            Some(name) => name,
            None => {
                warn!("{channel} object payload has no string event field; dropped: {payload}");
                return None;
            }
        },
        other => {
            warn!("{channel} payload is neither string nor object; dropped: {other}");
            return None;
        }
    };

    if channel == Channel::OnSuccess {
        if let Some(smuggled) = name.strip_prefix(LOG_PREFIX) {
            return Some(DomainEvent::ConsoleLog {
                level: ConsoleLevel::Log,
                content: smuggled.to_string(),
            });
        }
        return Some(DomainEvent::Success {
            name: name.to_string(),
        });
    }

    Some(DomainEvent::Error {
        name: name.to_string(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(channel: Channel, payload: Value) -> RawMessage {
        RawMessage { channel, payload }
    }

    // ── consoleLog channel ────────────────────────────────────────────────────

    #[test]
    fn test_console_log_well_formed_payload_maps_level_and_content() {
        // Arrange
        let msg = raw(Channel::ConsoleLog, json!({"type": "warn", "content": "x"}));

        // Act
        let events = classify(&msg);

        // Assert
        assert_eq!(
            events,
            vec![DomainEvent::ConsoleLog {
                level: ConsoleLevel::Warn,
                content: "x".to_string(),
            }]
        );
    }

    #[test]
    fn test_console_log_unrecognized_type_falls_back_to_log_level() {
        let msg = raw(
            Channel::ConsoleLog,
            json!({"type": "verbose", "content": "hello"}),
        );

        let events = classify(&msg);

        assert_eq!(
            events,
            vec![DomainEvent::ConsoleLog {
                level: ConsoleLevel::Log,
                content: "hello".to_string(),
            }]
        );
    }

    #[test]
    fn test_console_log_missing_content_is_dropped() {
        let msg = raw(Channel::ConsoleLog, json!({"type": "error"}));
        assert!(classify(&msg).is_empty());
    }

    #[test]
    fn test_console_log_non_object_payload_is_dropped() {
        let msg = raw(Channel::ConsoleLog, json!("just a string"));
        assert!(classify(&msg).is_empty());
    }

    #[test]
    fn test_console_log_non_string_fields_are_dropped() {
        let msg = raw(Channel::ConsoleLog, json!({"type": 3, "content": "x"}));
        assert!(classify(&msg).is_empty());
    }

    // ── legitimuzEvent channel ────────────────────────────────────────────────

    #[test]
    fn test_tagged_success_event_yields_verification_plus_derived_success() {
        // Arrange
        let msg = raw(
            Channel::LegitimuzEvent,
            json!({"name": "scan", "status": "success"}),
        );

        // Act
        let events = classify(&msg);

        // Assert: the full event comes first, the legacy twin second
        assert_eq!(events.len(), 2);
        match &events[0] {
            DomainEvent::Verification(event) => {
                assert_eq!(event.name, "scan");
                assert_eq!(event.status, "success");
                assert_eq!(event.ref_id, None);
                assert!(event.extra.is_empty());
            }
            other => panic!("expected Verification, got {:?}", other),
        }
        assert_eq!(
            events[1],
            DomainEvent::Success {
                name: "scan".to_string()
            }
        );
    }

    #[test]
    fn test_tagged_error_event_yields_verification_plus_derived_error() {
        let msg = raw(
            Channel::LegitimuzEvent,
            json!({"name": "ocr", "status": "error"}),
        );

        let events = classify(&msg);

        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            DomainEvent::Error {
                name: "ocr".to_string()
            }
        );
    }

    #[test]
    fn test_untagged_event_with_fail_substring_derives_error() {
        // Heuristic fallback: "face-failure" contains "fail".
        let msg = raw(Channel::LegitimuzEvent, json!({"name": "face-failure"}));

        let events = classify(&msg);

        assert_eq!(events.len(), 2);
        match &events[0] {
            DomainEvent::Verification(event) => {
                assert_eq!(event.status, "unknown", "missing status must normalize");
            }
            other => panic!("expected Verification, got {:?}", other),
        }
        assert_eq!(
            events[1],
            DomainEvent::Error {
                name: "face-failure".to_string()
            }
        );
    }

    #[test]
    fn test_untagged_event_without_failure_markers_derives_success() {
        let msg = raw(Channel::LegitimuzEvent, json!({"name": "ok-step"}));

        let events = classify(&msg);

        assert_eq!(
            events[1],
            DomainEvent::Success {
                name: "ok-step".to_string()
            }
        );
    }

    #[test]
    fn test_non_string_status_normalizes_to_unknown() {
        let msg = raw(
            Channel::LegitimuzEvent,
            json!({"name": "ok-step", "status": 7}),
        );

        let events = classify(&msg);

        match &events[0] {
            DomainEvent::Verification(event) => assert_eq!(event.status, "unknown"),
            other => panic!("expected Verification, got {:?}", other),
        }
    }

    #[test]
    fn test_intermediate_status_passes_through_and_heuristic_decides_the_twin() {
        // A status that is neither "success" nor "error" is preserved on the
        // verification event; the legacy twin falls back to the name policy.
        let msg = raw(
            Channel::LegitimuzEvent,
            json!({"name": "liveness", "status": "pending"}),
        );

        let events = classify(&msg);

        match &events[0] {
            DomainEvent::Verification(event) => assert_eq!(event.status, "pending"),
            other => panic!("expected Verification, got {:?}", other),
        }
        assert_eq!(
            events[1],
            DomainEvent::Success {
                name: "liveness".to_string()
            }
        );
    }

    #[test]
    fn test_ref_id_and_extra_fields_are_preserved() {
        // Arrange: refId plus two fields this host has never heard of
        let msg = raw(
            Channel::LegitimuzEvent,
            json!({
                "name": "scan",
                "status": "success",
                "refId": "ref-42",
                "attempt": 3,
                "sdkVersion": "9.1"
            }),
        );

        // Act
        let events = classify(&msg);

        // Assert
        match &events[0] {
            DomainEvent::Verification(event) => {
                assert_eq!(event.ref_id.as_deref(), Some("ref-42"));
                assert_eq!(event.extra.get("attempt"), Some(&json!(3)));
                assert_eq!(event.extra.get("sdkVersion"), Some(&json!("9.1")));
                assert!(
                    !event.extra.contains_key("name"),
                    "extracted fields must not be duplicated into extra"
                );
            }
            other => panic!("expected Verification, got {:?}", other),
        }
    }

    #[test]
    fn test_event_without_name_is_dropped() {
        let msg = raw(Channel::LegitimuzEvent, json!({"status": "success"}));
        assert!(classify(&msg).is_empty());
    }

    #[test]
    fn test_event_with_non_object_payload_is_dropped() {
        let msg = raw(Channel::LegitimuzEvent, json!(["name", "scan"]));
        assert!(classify(&msg).is_empty());
    }

    // ── onSuccess channel ─────────────────────────────────────────────────────

    #[test]
    fn test_success_bare_string_yields_success_event() {
        let msg = raw(Channel::OnSuccess, json!("document-approved"));

        let events = classify(&msg);

        assert_eq!(
            events,
            vec![DomainEvent::Success {
                name: "document-approved".to_string()
            }]
        );
    }

    #[test]
    fn test_success_legacy_object_shape_yields_success_event() {
        let msg = raw(Channel::OnSuccess, json!({"event": "document-approved"}));

        let events = classify(&msg);

        assert_eq!(
            events,
            vec![DomainEvent::Success {
                name: "document-approved".to_string()
            }]
        );
    }

    #[test]
    fn test_success_log_prefixed_string_routes_to_console_not_success() {
        // The legacy smuggling convention: "LOG:" strings carry console
        // output, not a success notification.
        let msg = raw(Channel::OnSuccess, json!("LOG:page booted"));

        let events = classify(&msg);

        assert_eq!(
            events,
            vec![DomainEvent::ConsoleLog {
                level: ConsoleLevel::Log,
                content: "page booted".to_string(),
            }]
        );
    }

    #[test]
    fn test_success_numeric_payload_is_dropped_without_panicking() {
        let msg = raw(Channel::OnSuccess, json!(42));
        assert!(classify(&msg).is_empty());
    }

    #[test]
    fn test_success_object_without_event_field_is_dropped() {
        let msg = raw(Channel::OnSuccess, json!({"name": "wrong-shape"}));
        assert!(classify(&msg).is_empty());
    }

    // ── onError channel ───────────────────────────────────────────────────────

    #[test]
    fn test_error_bare_string_yields_error_event() {
        let msg = raw(Channel::OnError, json!("camera-denied"));

        let events = classify(&msg);

        assert_eq!(
            events,
            vec![DomainEvent::Error {
                name: "camera-denied".to_string()
            }]
        );
    }

    #[test]
    fn test_error_legacy_object_shape_yields_error_event() {
        let msg = raw(Channel::OnError, json!({"event": "camera-denied"}));

        let events = classify(&msg);

        assert_eq!(
            events,
            vec![DomainEvent::Error {
                name: "camera-denied".to_string()
            }]
        );
    }

    #[test]
    fn test_error_log_prefix_is_not_special_on_the_error_channel() {
        // The smuggling convention existed only on the success channel; an
        // error name that happens to start with "LOG:" stays an error.
        let msg = raw(Channel::OnError, json!("LOG:not-smuggled"));

        let events = classify(&msg);

        assert_eq!(
            events,
            vec![DomainEvent::Error {
                name: "LOG:not-smuggled".to_string()
            }]
        );
    }

    // ── Determinism ───────────────────────────────────────────────────────────

    #[test]
    fn test_classification_is_idempotent() {
        // Classifying the same message twice yields identical results — there
        // is no hidden state in the classifier.
        let msg = raw(
            Channel::LegitimuzEvent,
            json!({"name": "scan", "status": "success", "refId": "r1"}),
        );

        let first = classify(&msg);
        let second = classify(&msg);

        assert_eq!(first, second);
    }
}
