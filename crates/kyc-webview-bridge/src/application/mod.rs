//! Application layer for kyc-webview-bridge.
//!
//! Orchestrates the business logic: it knows *what* happens to a classified
//! event or a blocking page request, but delegates *how* payloads arrive to
//! the infrastructure layer.
//!
//! # Responsibilities
//!
//! - Mapping [`kyc_core::DomainEvent`]s onto the registered callbacks
//! - Running classification + dispatch for one raw message
//! - The media-capture permission policy and JS dialog auto-acknowledgement
//!
//! # What does NOT belong here?
//!
//! - Channel queues, pump tasks, or anything `tokio` (infrastructure)
//! - Payload shape probing (that is `kyc-core`'s classifier)

pub mod dispatcher;
pub mod permissions;

pub use dispatcher::{dispatch, process_raw, NAVIGATION_FAILED_EVENT, PAGE_LOADED_EVENT};
pub use permissions::{decide_media_permission, dialog_response};
