//! The bridge session: instrumentation and callback bindings scoped to one
//! page-load lifetime.
//!
//! A [`BridgeSession`] is created when a page load begins and is torn down
//! when the page is destroyed or superseded by a new load.  Nothing
//! survives across sessions: channels, pumps, and callback bindings all die
//! with the session, and a new load means a fresh `attach`.
//!
//! # Inbound flow
//!
//! ```text
//! page post ──> ChannelPost::post ──> bounded mpsc ──> pump task
//!                                                        │ classify()
//!                                                        │ dispatch()
//!                                                        ▼
//!                                              registered callbacks
//! ```
//!
//! Each channel gets its own bounded queue and its own pump task, which
//! gives per-channel FIFO delivery with no ordering promise *between*
//! channels — exactly the guarantee the protocol documents.  Posting is
//! fire-and-forget: a full queue or a closed session drops the payload with
//! a diagnostic and never blocks or errors back toward the page.
//!
//! # Teardown
//!
//! [`BridgeSession::close`] flips the shared `active` flag and aborts the
//! pumps.  `ChannelPost` handles still held by the embedder go inert: a
//! stray post from the old page is dropped before it can reach a callback,
//! so a destroyed session never delivers into a dangling host context.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use kyc_core::script;
use kyc_core::{Channel, ConsoleLevel, DomainEvent, RawMessage};

use crate::application::dispatcher::{dispatch, process_raw};
use crate::application::permissions::{decide_media_permission, dialog_response};
use crate::domain::callbacks::BridgeCallbacks;
use crate::domain::config::BridgeConfig;
use crate::domain::interaction::{
    DialogKind, DialogResponse, PermissionDecision, PermissionRequest,
};
use crate::infrastructure::webview::WebViewPage;

// ── Inbound post handle ───────────────────────────────────────────────────────

/// Fire-and-forget handle for posting page payloads onto one channel.
///
/// The embedder receives one of these per channel in
/// [`WebViewPage::register_channel`] and calls [`ChannelPost::post`] from
/// its message-handler glue.  The handle is cheap to clone and safe to keep
/// after the session closes — posts into a closed session are dropped
/// silently.
#[derive(Debug, Clone)]
pub struct ChannelPost {
    channel: Channel,
    tx: mpsc::Sender<Value>,
    active: Arc<AtomicBool>,
    session: Uuid,
}

impl ChannelPost {
    /// The channel this handle posts to.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Posts one payload, fire-and-forget.
    ///
    /// Never blocks and never reports back to the caller: a closed session
    /// or a full queue drops the payload with a diagnostic.  Delivery order
    /// for payloads posted through the same handle is preserved.
    pub fn post(&self, payload: Value) {
        if !self.active.load(Ordering::Relaxed) {
            debug!(
                "session {}: {} post after close; dropped",
                self.session, self.channel
            );
            return;
        }
        if let Err(err) = self.tx.try_send(payload) {
            warn!(
                "session {}: {} queue unavailable; payload dropped: {err}",
                self.session, self.channel
            );
        }
    }
}

// ── Bridge session ────────────────────────────────────────────────────────────

/// One bridge session, bound to exactly one underlying page load.
///
/// Created with [`BridgeSession::attach`]; torn down with
/// [`BridgeSession::close`] or by dropping.  Requires a running Tokio
/// runtime (the channel pumps are spawned tasks).
pub struct BridgeSession {
    id: Uuid,
    config: Arc<BridgeConfig>,
    callbacks: Arc<BridgeCallbacks>,
    /// Shared liveness flag; cleared exactly once at teardown.
    active: Arc<AtomicBool>,
    /// Set by the first load-finished/load-failed hook; later hooks are
    /// ignored so each load settles at most once.
    load_settled: AtomicBool,
    posts: HashMap<Channel, mpsc::Sender<Value>>,
    pumps: Vec<JoinHandle<()>>,
}

impl BridgeSession {
    /// Wires a webview and starts the page load.
    ///
    /// Performs the one-time setup in the documented order: preferences,
    /// channel registration (handing the embedder a [`ChannelPost`] per
    /// channel), client-script installation (console capture first when
    /// enabled), and only then the load — so no early page event is lost.
    ///
    /// Callbacks must be fully registered on `callbacks` before this call;
    /// events fired before a subscriber exists are lost by contract.
    ///
    /// # Errors
    ///
    /// Returns an error when the config fails validation or the webview
    /// refuses to begin the load.
    pub fn attach(
        webview: &mut dyn WebViewPage,
        config: BridgeConfig,
        callbacks: BridgeCallbacks,
    ) -> anyhow::Result<Self> {
        config.validate().context("bridge config rejected")?;

        let id = Uuid::new_v4();
        let config = Arc::new(config);
        let callbacks = Arc::new(callbacks);
        let active = Arc::new(AtomicBool::new(true));

        debug!("session {id}: attaching with {callbacks:?}");

        webview.apply_preferences(&config.webview);

        // One bounded queue + pump per channel.  The sender side is split:
        // one clone stays with the session (for `post`), one goes to the
        // embedder inside the ChannelPost.
        let mut posts = HashMap::with_capacity(Channel::ALL.len());
        let mut pumps = Vec::with_capacity(Channel::ALL.len());
        for channel in Channel::ALL {
            let (tx, rx) = mpsc::channel::<Value>(config.channel_capacity);
            posts.insert(channel, tx.clone());
            pumps.push(spawn_pump(
                id,
                channel,
                rx,
                Arc::clone(&callbacks),
                Arc::clone(&active),
            ));
            webview.register_channel(
                channel,
                ChannelPost {
                    channel,
                    tx,
                    active: Arc::clone(&active),
                    session: id,
                },
            );
        }

        for user_script in script::bundle(config.console_capture) {
            debug!("session {id}: installing {} script", user_script.name);
            webview.install_script(&user_script);
        }

        webview
            .begin_load(&config.target_url)
            .with_context(|| format!("session {id}: failed to begin loading {}", config.target_url))?;

        info!("session {id}: load started for {}", config.target_url);

        Ok(Self {
            id,
            config,
            callbacks,
            active,
            load_settled: AtomicBool::new(false),
            posts,
            pumps,
        })
    }

    /// This session's identifier, as used in its log lines.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// `false` once the session has been closed.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Posts one payload by channel wire name.
    ///
    /// Convenience for embedders whose message glue receives `(name,
    /// payload)` pairs instead of keeping per-channel [`ChannelPost`]
    /// handles.  An unknown name is dropped with a diagnostic — the channel
    /// set is closed.
    pub fn post(&self, channel_name: &str, payload: Value) {
        if !self.active.load(Ordering::Relaxed) {
            debug!(
                "session {}: {channel_name} post after close; dropped",
                self.id
            );
            return;
        }
        let channel = match Channel::from_str(channel_name) {
            Ok(channel) => channel,
            Err(err) => {
                warn!("session {}: {err}; payload dropped", self.id);
                return;
            }
        };
        if let Some(tx) = self.posts.get(&channel) {
            if let Err(err) = tx.try_send(payload) {
                warn!(
                    "session {}: {channel} queue unavailable; payload dropped: {err}",
                    self.id
                );
            }
        }
    }

    // ── Page lifecycle hooks ──────────────────────────────────────────────────

    /// Reports that the page finished loading.
    ///
    /// Synthesizes [`DomainEvent::PageLoaded`] (surfaced to subscribers as
    /// `on_success("page_loaded")`) exactly once per load; duplicate hook
    /// invocations are ignored.
    pub fn page_load_finished(&self) {
        if !self.active.load(Ordering::Relaxed) {
            return;
        }
        if self.load_settled.swap(true, Ordering::Relaxed) {
            debug!("session {}: duplicate load-finished hook ignored", self.id);
            return;
        }
        info!("session {}: page finished loading", self.id);
        dispatch(&DomainEvent::PageLoaded, &self.callbacks);
    }

    /// Reports that the page load failed.
    ///
    /// Synthesizes [`DomainEvent::PageLoadFailed`] carrying the underlying
    /// reason (surfaced as `on_error("navigation_failed")`).  Recoverable:
    /// the caller may retry by attaching a new session.
    pub fn page_load_failed(&self, reason: &str) {
        if !self.active.load(Ordering::Relaxed) {
            return;
        }
        if self.load_settled.swap(true, Ordering::Relaxed) {
            debug!("session {}: duplicate load-failed hook ignored", self.id);
            return;
        }
        dispatch(
            &DomainEvent::PageLoadFailed {
                reason: reason.to_string(),
            },
            &self.callbacks,
        );
    }

    // ── Blocking page requests ────────────────────────────────────────────────

    /// Answers a JavaScript dialog from the page.
    ///
    /// Surfaces the dialog text as an info-level log entry (when
    /// [`BridgeConfig::surface_dialogs`] is set), then auto-acknowledges so
    /// the page never blocks: alerts are dismissed, confirms affirmed.
    pub fn handle_dialog(&self, kind: DialogKind, text: &str) -> DialogResponse {
        if self.active.load(Ordering::Relaxed) && self.config.surface_dialogs {
            self.callbacks.emit_log(text, ConsoleLevel::Info);
        }
        info!("session {}: auto-acknowledged {kind:?} dialog", self.id);
        dialog_response(kind)
    }

    /// Answers a media-capture permission request from the page.
    ///
    /// Applies the explicit [`BridgeConfig::auto_grant_media_capture`]
    /// policy.
    pub fn decide_media_permission(&self, request: &PermissionRequest) -> PermissionDecision {
        decide_media_permission(&self.config, request)
    }

    // ── Teardown ──────────────────────────────────────────────────────────────

    /// Tears the session down.
    ///
    /// Unregisters the channel queues, stops the pumps, and invalidates the
    /// outstanding [`ChannelPost`] handles.  Idempotent; also runs on drop.
    pub fn close(&mut self) {
        if self.active.swap(false, Ordering::Relaxed) {
            self.posts.clear();
            for pump in self.pumps.drain(..) {
                pump.abort();
            }
            info!("session {}: closed", self.id);
        }
    }
}

impl Drop for BridgeSession {
    fn drop(&mut self) {
        self.close();
    }
}

// ── Pump task ─────────────────────────────────────────────────────────────────

/// Spawns the pump draining one channel's queue.
///
/// Runs until the queue closes or the session goes inactive.  Each received
/// payload goes through classify + dispatch inline, which preserves FIFO
/// order within the channel.
fn spawn_pump(
    session: Uuid,
    channel: Channel,
    mut rx: mpsc::Receiver<Value>,
    callbacks: Arc<BridgeCallbacks>,
    active: Arc<AtomicBool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if !active.load(Ordering::Relaxed) {
                break;
            }
            process_raw(&RawMessage { channel, payload }, &callbacks);
        }
        debug!("session {session}: {channel} pump ended");
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
