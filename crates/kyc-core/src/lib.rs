//! # kyc-core
//!
//! Shared library for the KYC webview bridge containing the inbound channel
//! taxonomy, the payload classification rules, and the client scripts that
//! are injected into the verification page.
//!
//! This crate is used by the host bridge crate (`kyc-webview-bridge`) and by
//! any embedder that wants to classify page messages without running a full
//! bridge session.  It has zero dependencies on OS APIs, UI frameworks, or
//! async runtimes.
//!
//! # Architecture overview (for beginners)
//!
//! The bridge connects an embedded web page (a third-party identity
//! verification flow) to native host code.  The page posts JSON payloads on a
//! small set of *named channels*; the host normalizes each payload into a
//! typed *domain event* and hands it to registered callbacks.
//!
//! This crate (`kyc-core`) is the shared foundation.  It defines:
//!
//! - **`protocol`** – What travels over the channels.  [`Channel`] is the
//!   fixed channel set, [`RawMessage`] is one inbound payload, and
//!   [`classify`] turns a raw message into zero or more [`DomainEvent`]s.
//!
//! - **`domain`** – Pure policy with no serialization concerns.  The one
//!   piece that matters is the name-substring heuristic used to label
//!   untagged verification events as success or error.
//!
//! - **`script`** – The JavaScript sources injected into the page: a console
//!   capture layer installed at document-start and a message relay installed
//!   at document-end.

// Declare the three top-level modules.  Rust will look for each in a
// subdirectory with the same name (e.g., src/protocol/mod.rs).
pub mod domain;
pub mod protocol;
pub mod script;

// Re-export the most-used types at the crate root so callers can write
// `kyc_core::DomainEvent` instead of `kyc_core::protocol::messages::DomainEvent`.
pub use domain::heuristic::{classify_by_name, NameVerdict};
pub use protocol::channel::{Channel, UnknownChannel};
pub use protocol::classify::classify;
pub use protocol::messages::{ConsoleLevel, DomainEvent, RawMessage, VerificationEvent};
pub use script::{InjectionTime, UserScript};
