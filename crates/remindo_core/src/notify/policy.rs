//! Process-wide notification presentation policy.
//!
//! # Responsibility
//! - Hold the alert/sound/badge flags applied when a notification fires.
//! - Install the flags exactly once per process.
//!
//! # Invariants
//! - Re-installing the same policy is idempotent.
//! - Installing a conflicting policy after the first install is rejected.
//! - Reads never block and fall back to the default before any install.

use log::info;
use once_cell::sync::OnceCell;

static POLICY: OnceCell<PresentationPolicy> = OnceCell::new();

/// How a delivered notification is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationPolicy {
    pub alert: bool,
    pub sound: bool,
    pub badge: bool,
}

impl Default for PresentationPolicy {
    fn default() -> Self {
        Self {
            alert: true,
            sound: true,
            badge: true,
        }
    }
}

/// Installs the process-wide presentation policy.
///
/// # Invariants
/// - Calling this repeatedly with an equal policy is idempotent.
/// - Calling this with a different policy after the first install is
///   rejected with a human-readable error string.
pub fn install_presentation_policy(policy: PresentationPolicy) -> Result<(), String> {
    let mut first_install = false;
    let active = POLICY.get_or_init(|| {
        first_install = true;
        policy
    });

    if *active != policy {
        return Err(format!(
            "presentation policy already installed with {}; refusing to switch to {}",
            flags(active),
            flags(&policy)
        ));
    }

    if first_install {
        info!(
            "event=policy_init module=notify status=ok {}",
            flags(&policy)
        );
    }
    Ok(())
}

/// Returns the active policy, or the default when none was installed.
pub fn presentation_policy() -> PresentationPolicy {
    POLICY.get().copied().unwrap_or_default()
}

fn flags(policy: &PresentationPolicy) -> String {
    format!(
        "alert={} sound={} badge={}",
        policy.alert, policy.sound, policy.badge
    )
}

#[cfg(test)]
mod tests {
    use super::{install_presentation_policy, presentation_policy, PresentationPolicy};

    #[test]
    fn default_policy_enables_every_surface() {
        let policy = PresentationPolicy::default();
        assert!(policy.alert);
        assert!(policy.sound);
        assert!(policy.badge);
    }

    // The install gate is process-global, so the idempotent and conflict
    // cases must run inside one test.
    #[test]
    fn install_is_idempotent_for_equal_policy_and_rejects_conflicts() {
        let policy = PresentationPolicy::default();

        install_presentation_policy(policy).expect("first install should succeed");
        install_presentation_policy(policy).expect("equal policy should be idempotent");
        assert_eq!(presentation_policy(), policy);

        let conflicting = PresentationPolicy {
            sound: false,
            ..policy
        };
        let error = install_presentation_policy(conflicting)
            .expect_err("conflicting policy should be rejected");
        assert!(error.contains("refusing to switch"));

        assert_eq!(presentation_policy(), policy);
    }
}
