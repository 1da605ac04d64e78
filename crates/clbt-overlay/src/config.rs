#![forbid(unsafe_code)]

//! Coordinator policy flags.
//!
//! [`CoordinatorConfig`] holds the live flags; [`ConfigPatch`] is a partial
//! update merged into it. With the `policy-config` feature a patch can be
//! loaded from JSON, which is how page scripts reconfigure the coordinator:
//!
//! ```json
//! { "allowModalOverOverlay": false, "debugMode": true }
//! ```

/// Live coordinator policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CoordinatorConfig {
    /// Modals of different groups may be open at the same time.
    pub allow_multiple_modals: bool,
    /// Non-priority modals may open while an overlay is active.
    pub allow_modal_over_overlay: bool,
    /// Log a state snapshot after every mutation.
    pub debug_mode: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            allow_multiple_modals: true,
            allow_modal_over_overlay: true,
            debug_mode: false,
        }
    }
}

impl CoordinatorConfig {
    /// Merge every field set in `patch`.
    pub fn apply(&mut self, patch: ConfigPatch) {
        if let Some(v) = patch.allow_multiple_modals {
            self.allow_multiple_modals = v;
        }
        if let Some(v) = patch.allow_modal_over_overlay {
            self.allow_modal_over_overlay = v;
        }
        if let Some(v) = patch.debug_mode {
            self.debug_mode = v;
        }
    }
}

/// Partial configuration update. Unset fields leave the live value alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Deserialize),
    serde(rename_all = "camelCase", deny_unknown_fields)
)]
pub struct ConfigPatch {
    pub allow_multiple_modals: Option<bool>,
    pub allow_modal_over_overlay: Option<bool>,
    pub debug_mode: Option<bool>,
}

impl ConfigPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn allow_multiple_modals(mut self, allow: bool) -> Self {
        self.allow_multiple_modals = Some(allow);
        self
    }

    #[must_use]
    pub fn allow_modal_over_overlay(mut self, allow: bool) -> Self {
        self.allow_modal_over_overlay = Some(allow);
        self
    }

    #[must_use]
    pub fn debug_mode(mut self, debug: bool) -> Self {
        self.debug_mode = Some(debug);
        self
    }

    /// Parse a patch from a JSON object with camelCase keys.
    #[cfg(feature = "policy-config")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
