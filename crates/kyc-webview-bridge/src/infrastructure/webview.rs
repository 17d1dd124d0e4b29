//! The seam between the bridge and the embedding webview.
//!
//! The bridge never talks to a concrete webview API.  Instead the embedder
//! implements [`WebViewPage`] over whatever widget it renders (a WebKit
//! view, a wry window, a test double) and hands it to
//! [`crate::infrastructure::BridgeSession::attach`], which drives the
//! methods in a fixed setup order:
//!
//! 1. [`WebViewPage::apply_preferences`]
//! 2. [`WebViewPage::register_channel`] — once per channel in
//!    [`kyc_core::Channel::ALL`] order
//! 3. [`WebViewPage::install_script`] — in [`kyc_core::script::bundle`] order
//! 4. [`WebViewPage::begin_load`] — last, so no early event is lost
//!
//! The inbound direction never goes through this trait: the embedder keeps
//! the [`ChannelPost`] handles it received in `register_channel` and posts
//! page payloads through them.

use kyc_core::{Channel, UserScript};

use crate::domain::config::WebViewPreferences;
use crate::infrastructure::session::ChannelPost;

/// One embeddable page, as the bridge sees it.
///
/// Implementations are driven from the thread that owns the webview; the
/// bridge calls every method before the page starts loading and never
/// again afterwards.
#[cfg_attr(test, mockall::automock)]
pub trait WebViewPage {
    /// Applies media/inspection settings before anything loads.
    fn apply_preferences(&mut self, preferences: &WebViewPreferences);

    /// Registers one named inbound channel.
    ///
    /// The embedder must arrange for page posts on `channel`'s wire name to
    /// be forwarded through `post` (e.g., by binding a script message
    /// handler under that name).
    fn register_channel(&mut self, channel: Channel, post: ChannelPost);

    /// Installs one client script with its injection time and frame scope.
    fn install_script(&mut self, script: &UserScript);

    /// Starts loading the verification page.
    ///
    /// # Errors
    ///
    /// Returns an error if the load cannot even be issued (bad URL, widget
    /// already destroyed).  Asynchronous load failures are reported later
    /// through [`crate::infrastructure::BridgeSession::page_load_failed`].
    fn begin_load(&mut self, url: &str) -> anyhow::Result<()>;
}
