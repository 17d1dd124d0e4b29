//! Name-substring fallback for untagged verification events.
//!
//! Some pages post verification events without a `status` field.  The bridge
//! still owes its legacy subscribers a success-or-error notification for
//! every event, so a best-effort textual policy fills the gap: an event name
//! containing `"error"` or `"fail"` is treated as an error, anything else as
//! a success.
//!
//! The policy is isolated in this module so it can be swapped out or
//! disabled without touching the rest of the classifier.

/// The verdict of the name-based fallback policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameVerdict {
    /// The name does not look like a failure report.
    Success,
    /// The name contains a failure marker substring.
    Error,
}

/// Labels an untagged event name as success or error by substring match.
///
/// Matching is **case-sensitive** and purely textual: the name is scanned
/// for the substrings `"error"` and `"fail"`, nothing more.
///
/// # Known limitation
///
/// Substring matching is not semantic classification.  A name like
/// `"failsafe-check"` contains `"fail"` and is therefore labelled an error
/// even though the step may have succeeded.  This mirrors the historical
/// behavior that downstream consumers rely on; do not "fix" it here without
/// migrating those consumers.
///
/// # Examples
///
/// ```rust
/// use kyc_core::domain::heuristic::{classify_by_name, NameVerdict};
///
/// assert_eq!(classify_by_name("facial-capture"), NameVerdict::Success);
/// assert_eq!(classify_by_name("face-failure"), NameVerdict::Error);
/// ```
pub fn classify_by_name(name: &str) -> NameVerdict {
    if name.contains("error") || name.contains("fail") {
        NameVerdict::Error
    } else {
        NameVerdict::Success
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_are_success() {
        assert_eq!(classify_by_name("ok-step"), NameVerdict::Success);
        assert_eq!(classify_by_name("facial-capture"), NameVerdict::Success);
        assert_eq!(classify_by_name(""), NameVerdict::Success);
    }

    #[test]
    fn test_error_substring_is_error() {
        assert_eq!(classify_by_name("ocr-error"), NameVerdict::Error);
        assert_eq!(classify_by_name("error"), NameVerdict::Error);
    }

    #[test]
    fn test_fail_substring_is_error() {
        assert_eq!(classify_by_name("face-failure"), NameVerdict::Error);
        assert_eq!(classify_by_name("upload-failed"), NameVerdict::Error);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        // Upper-cased markers do not match; this is the historical behavior.
        assert_eq!(classify_by_name("FAIL"), NameVerdict::Success);
        assert_eq!(classify_by_name("Error-step"), NameVerdict::Success);
    }

    #[test]
    fn test_failsafe_misfire_is_preserved() {
        // Documented limitation: "failsafe-check" contains "fail" and is
        // labelled an error even though nothing failed.
        assert_eq!(classify_by_name("failsafe-check"), NameVerdict::Error);
    }
}
