//! The fixed set of named inbound channels from page script to host.
//!
//! A *channel* is the unit of registration with the underlying webview
//! message-passing facility: the host registers each name once per bridge
//! session, and the injected client script posts payloads to those names.
//! The set is closed — a payload arriving on any other name is dropped at
//! the session boundary with a diagnostic, never classified.
//!
//! # Wire names
//!
//! The camel-case wire names are a compatibility surface shared with the
//! verification page and must not be renamed:
//!
//! | variant | wire name |
//! |---|---|
//! | [`Channel::OnSuccess`] | `onSuccess` |
//! | [`Channel::OnError`] | `onError` |
//! | [`Channel::LegitimuzEvent`] | `legitimuzEvent` |
//! | [`Channel::ConsoleLog`] | `consoleLog` |

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A named inbound conduit the client script posts to.
///
/// Channels are registered once per bridge session and are immutable for
/// that session's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Direct success notifications (`notifySuccessToNative`) and the legacy
    /// `"LOG:"`-prefixed console smuggling strings.
    OnSuccess,
    /// Direct error notifications (`notifyErrorToNative`).
    OnError,
    /// Verification SDK events relayed from the page's `message` listener.
    LegitimuzEvent,
    /// Mirrored console output and synthesized uncaught-error entries.
    ConsoleLog,
}

impl Channel {
    /// All channels, in the order they are registered with the webview.
    pub const ALL: [Channel; 4] = [
        Channel::OnSuccess,
        Channel::OnError,
        Channel::LegitimuzEvent,
        Channel::ConsoleLog,
    ];

    /// The wire name the client script uses when posting to this channel.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Channel::OnSuccess => "onSuccess",
            Channel::OnError => "onError",
            Channel::LegitimuzEvent => "legitimuzEvent",
            Channel::ConsoleLog => "consoleLog",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Error returned when a channel name is not part of the fixed set.
///
/// Carries the offending name so the caller can include it in a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown channel name: {0:?}")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    /// Parses a wire name back into a [`Channel`].
    ///
    /// Matching is exact and case-sensitive — the wire names are a fixed
    /// contract, so `"onsuccess"` is just as unknown as `"telemetry"`.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "onSuccess" => Ok(Channel::OnSuccess),
            "onError" => Ok(Channel::OnError),
            "legitimuzEvent" => Ok(Channel::LegitimuzEvent),
            "consoleLog" => Ok(Channel::ConsoleLog),
            other => Err(UnknownChannel(other.to_string())),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_are_the_fixed_contract() {
        assert_eq!(Channel::OnSuccess.wire_name(), "onSuccess");
        assert_eq!(Channel::OnError.wire_name(), "onError");
        assert_eq!(Channel::LegitimuzEvent.wire_name(), "legitimuzEvent");
        assert_eq!(Channel::ConsoleLog.wire_name(), "consoleLog");
    }

    #[test]
    fn test_every_wire_name_parses_back_to_its_channel() {
        for channel in Channel::ALL {
            let parsed: Channel = channel.wire_name().parse().unwrap();
            assert_eq!(parsed, channel);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected_with_the_offending_name() {
        let err = Channel::from_str("telemetry").unwrap_err();
        assert_eq!(err, UnknownChannel("telemetry".to_string()));
    }

    #[test]
    fn test_parsing_is_case_sensitive() {
        // The wire names are camel-case by contract; a lowercased variant is
        // not a known channel.
        assert!(Channel::from_str("onsuccess").is_err());
        assert!(Channel::from_str("CONSOLELOG").is_err());
    }

    #[test]
    fn test_all_contains_each_channel_exactly_once() {
        let mut names: Vec<&str> = Channel::ALL.iter().map(Channel::wire_name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 4, "the channel set is fixed at four names");
    }

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(Channel::LegitimuzEvent.to_string(), "legitimuzEvent");
    }
}
