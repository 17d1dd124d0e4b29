//! kyc-webview-bridge library crate.
//!
//! This crate provides the host side of the KYC webview message bridge: it
//! owns the named inbound channels, classifies and normalizes page payloads,
//! and dispatches domain events to registered callbacks.  The embedding UI
//! (screens, status widgets, permission prompts) is a pure subscriber — it
//! registers callbacks and otherwise never touches the bridge internals.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Verification page (JSON payloads on named channels)
//!         ↓
//! [kyc-webview-bridge]
//!   ├── domain/           Pure types: BridgeConfig, BridgeCallbacks,
//!   │                     dialog & permission types
//!   ├── application/      Translation: DomainEvent → callback dispatch,
//!   │                     permission & dialog policy
//!   └── infrastructure/
//!         ├── webview/    WebViewPage trait — the seam to the embedder
//!         └── session/    BridgeSession: per-page-load lifetime, channel
//!                         pumps (tokio mpsc), lifecycle hooks, teardown
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no external dependencies (no I/O, no async, no frameworks).
//! - `application` depends on `domain` and `kyc-core` only.
//! - `infrastructure` depends on all other layers plus `tokio`.
//!
//! # Session lifecycle
//!
//! One [`infrastructure::BridgeSession`] per page load.  Callbacks are bound
//! at attach time and die with the session; a new load means a new session.
//! After [`infrastructure::BridgeSession::close`], stray posts from the old
//! page are dropped silently — a destroyed session never delivers events
//! into a dangling host context.

/// Domain layer: pure business-logic types (no I/O).
pub mod domain;

/// Application layer: event dispatch and interaction policy.
pub mod application;

/// Infrastructure layer: the webview seam and the bridge session.
pub mod infrastructure;
