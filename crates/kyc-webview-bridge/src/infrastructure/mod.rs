//! Infrastructure layer for kyc-webview-bridge.
//!
//! Everything runtime-facing lives here: the seam to the embedding webview
//! and the per-page-load bridge session with its channel pumps.
//!
//! # Responsibilities
//!
//! - Defining the [`WebViewPage`] trait the embedder implements
//! - Registering the channel set and installing the client scripts, in order
//! - Running one bounded queue + pump task per channel (Tokio)
//! - Synthesizing the page-lifecycle events and answering blocking requests
//! - Tearing a session down so stale pages cannot deliver events
//!
//! # What does NOT belong here?
//!
//! - Payload classification (that is `kyc-core`)
//! - Callback mapping and interaction policy (application layer)

pub mod session;
pub mod webview;

// Re-export the primary entry points so embedders can name them concisely.
pub use session::{BridgeSession, ChannelPost};
pub use webview::WebViewPage;
