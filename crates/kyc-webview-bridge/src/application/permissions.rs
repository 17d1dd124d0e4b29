//! Media-capture permission policy and JS dialog auto-acknowledgement.
//!
//! Both policies exist because the verification page blocks on host
//! decisions the host has no user to forward them to: the liveness check
//! requests the camera, and stray `alert`/`confirm` calls would otherwise
//! hang the flow.  The answers are pure functions of the config and the
//! request, kept here so the session code stays free of policy.

use tracing::info;

use crate::domain::config::BridgeConfig;
use crate::domain::interaction::{
    DialogKind, DialogResponse, PermissionDecision, PermissionRequest,
};

/// Decides a media-capture permission request.
///
/// Grants camera/microphone capture when
/// [`BridgeConfig::auto_grant_media_capture`] is set (the default — the KYC
/// flow cannot run without the camera) and denies otherwise.  The flag is
/// the embedder's explicit opt-out; there is no unconditional grant.
pub fn decide_media_permission(
    config: &BridgeConfig,
    request: &PermissionRequest,
) -> PermissionDecision {
    if config.auto_grant_media_capture {
        info!(
            "granting {:?} capture for {}",
            request.kind, request.origin
        );
        PermissionDecision::Grant
    } else {
        info!(
            "denying {:?} capture for {} (auto-grant disabled)",
            request.kind, request.origin
        );
        PermissionDecision::Deny
    }
}

/// The fixed answer for a blocking JavaScript dialog.
///
/// Alerts are dismissed, confirms are answered affirmatively, so the page
/// never waits on user interaction the host does not forward.
pub fn dialog_response(kind: DialogKind) -> DialogResponse {
    match kind {
        DialogKind::Alert => DialogResponse::Dismissed,
        DialogKind::Confirm => DialogResponse::Confirmed,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interaction::MediaCaptureKind;

    fn camera_request() -> PermissionRequest {
        PermissionRequest {
            origin: "https://demo.legitimuz.com".to_string(),
            kind: MediaCaptureKind::Camera,
        }
    }

    #[test]
    fn test_default_config_grants_capture() {
        let config = BridgeConfig::default();

        let decision = decide_media_permission(&config, &camera_request());

        assert_eq!(decision, PermissionDecision::Grant);
    }

    #[test]
    fn test_disabled_flag_denies_capture() {
        let config = BridgeConfig {
            auto_grant_media_capture: false,
            ..BridgeConfig::default()
        };

        let decision = decide_media_permission(&config, &camera_request());

        assert_eq!(decision, PermissionDecision::Deny);
    }

    #[test]
    fn test_alerts_are_dismissed() {
        assert_eq!(dialog_response(DialogKind::Alert), DialogResponse::Dismissed);
    }

    #[test]
    fn test_confirms_are_answered_affirmatively() {
        assert_eq!(
            dialog_response(DialogKind::Confirm),
            DialogResponse::Confirmed
        );
    }
}
