//! Client scripts injected into the verification page.
//!
//! Two scripts instrument the page so host-relevant activity becomes
//! observable without altering page behavior:
//!
//! 1. **Console capture** — wraps the console logging methods and installs
//!    global error/rejection handlers.  Must run at *document-start* so that
//!    logs emitted by the page's own bootstrap code are not lost.
//! 2. **Message relay** — subscribes to the page's `message` events and
//!    defines the `notifySuccessToNative` / `notifyErrorToNative` globals.
//!    Runs at *document-end*; it only needs to exist before the page's
//!    event-driven code fires.
//!
//! Both scripts must be installed into **every frame**, not just the main
//! frame, so embedded sub-frames are instrumented too.
//!
//! # Posting contract
//!
//! Each script is self-contained and posts through a guarded helper that
//! supports two host bindings: WebKit-style named message handlers
//! (`window.webkit.messageHandlers.<channel>.postMessage(payload)`) and a
//! generic single-endpoint binding
//! (`window.ipc.postMessage(JSON.stringify({channel, payload}))`).  When no
//! binding is present the helper does nothing — the scripts never throw into
//! page code.
//!
//! # Irreversibility
//!
//! Console capture replaces the console methods for the lifetime of the page
//! context.  There is no uninstall: a bridge session ends by discarding the
//! page, not by unpatching it.

use serde::{Deserialize, Serialize};

// ── Script metadata ───────────────────────────────────────────────────────────

/// When an injected script runs relative to document parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjectionTime {
    /// Before any page script executes.
    DocumentStart,
    /// After the document is parsed, before `load` fires.
    DocumentEnd,
}

/// One script to install into the page, with its injection constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct UserScript {
    /// Short identifier used in host log lines.
    pub name: &'static str,
    /// The JavaScript source.
    pub source: String,
    /// When the script must run.
    pub injection_time: InjectionTime,
    /// Whether to inject into sub-frames as well as the main frame.
    /// Always `true` for the bridge scripts.
    pub all_frames: bool,
}

// ── Script sources ────────────────────────────────────────────────────────────

/// The guarded channel-posting helper shared by both scripts.
///
/// Declared as a local function inside each script's closure so the scripts
/// stay independent of installation order.
const POST_HELPER_JS: &str = r#"
    function postToHost(channel, payload) {
        try {
            if (window.webkit && window.webkit.messageHandlers && window.webkit.messageHandlers[channel]) {
                window.webkit.messageHandlers[channel].postMessage(payload);
            } else if (window.ipc && typeof window.ipc.postMessage === 'function') {
                window.ipc.postMessage(JSON.stringify({ channel: channel, payload: payload }));
            }
        } catch (e) {
            // No host binding, or the host is gone; nothing to deliver to.
        }
    }
"#;

/// Builds the console-capture script (document-start, every frame).
///
/// After invoking the original console method, all arguments are serialized
/// (objects as JSON text, primitives via `String`, space-joined) and posted
/// as `{type, content}` on the `consoleLog` channel.  The global handlers
/// synthesize entries tagged `error`:
///
/// - uncaught errors → `"UNCAUGHT ERROR: <msg> at <file>:<line>"`
/// - unhandled rejections → `"UNHANDLED PROMISE: <reason>"`
pub fn console_capture_script() -> UserScript {
    let source = format!(
        r#"(function () {{
    if (window.__kycConsoleCaptureInstalled) {{ return; }}
    window.__kycConsoleCaptureInstalled = true;
{POST_HELPER_JS}
    function serializeArg(arg) {{
        if (typeof arg === 'object' && arg !== null) {{
            try {{ return JSON.stringify(arg); }} catch (e) {{ return String(arg); }}
        }}
        return String(arg);
    }}

    ['log', 'error', 'warn', 'info', 'debug'].forEach(function (method) {{
        var original = console[method];
        console[method] = function () {{
            original.apply(console, arguments);
            var content = Array.prototype.map.call(arguments, serializeArg).join(' ');
            postToHost('consoleLog', {{ type: method, content: content }});
        }};
    }});

    window.onerror = function (message, source, line) {{
        postToHost('consoleLog', {{
            type: 'error',
            content: 'UNCAUGHT ERROR: ' + message + ' at ' + source + ':' + line
        }});
    }};

    window.addEventListener('unhandledrejection', function (event) {{
        postToHost('consoleLog', {{
            type: 'error',
            content: 'UNHANDLED PROMISE: ' + event.reason
        }});
    }});
}})();"#
    );

    UserScript {
        name: "console-capture",
        source,
        injection_time: InjectionTime::DocumentStart,
        all_frames: true,
    }
}

/// Builds the message-relay script (document-end, every frame).
///
/// Forwards any `message` event whose data is an object carrying a `name`
/// field, verbatim, on the `legitimuzEvent` channel.  The presence check on
/// `name` is a deliberate heuristic sniff, not a schema check — unknown
/// future fields must pass through.  Also defines the two direct notifier
/// globals for pages that report without the messaging primitive.
pub fn message_relay_script() -> UserScript {
    let source = format!(
        r#"(function () {{
{POST_HELPER_JS}
    window.addEventListener('message', function (event) {{
        var eventData = event.data;
        if (eventData && typeof eventData === 'object' && eventData.name) {{
            console.log('Detected verification event:', eventData.name, 'Status:', eventData.status);
            postToHost('legitimuzEvent', eventData);
        }}
    }});

    window.notifySuccessToNative = function (eventName) {{
        postToHost('onSuccess', eventName);
    }};

    window.notifyErrorToNative = function (eventName) {{
        postToHost('onError', eventName);
    }};
}})();"#
    );

    UserScript {
        name: "message-relay",
        source,
        injection_time: InjectionTime::DocumentEnd,
        all_frames: true,
    }
}

/// Returns the session's scripts in mandatory install order.
///
/// Console capture (when enabled) comes first because it must be installed
/// at document-start; the relay follows.  Installing in any other order can
/// lose early console output.
pub fn bundle(console_capture: bool) -> Vec<UserScript> {
    let mut scripts = Vec::with_capacity(2);
    if console_capture {
        scripts.push(console_capture_script());
    }
    scripts.push(message_relay_script());
    scripts
}

// ── Tests ─────────────────────────────────────────────────────────────────────
