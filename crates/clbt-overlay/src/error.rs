#![forbid(unsafe_code)]

//! Coordinator error taxonomy.
//!
//! Every variant is an expected condition. The boolean operations on
//! [`OverlayCoordinator`](crate::OverlayCoordinator) log these and return
//! `false`; the `try_*` operations hand them back to the caller.

use thiserror::Error;

/// Why a coordinator operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// The identifier is not in the registry.
    #[error("unknown surface '{0}'")]
    UnknownSurface(String),
    /// The registry knows the identifier but the document has no element.
    #[error("element '{0}' is missing from the document")]
    MissingElement(&'static str),
    /// The surface is blocked until explicitly unblocked.
    #[error("surface '{0}' is blocked")]
    Blocked(&'static str),
    /// A stackable surface was opened below the current top of its sequence.
    #[error("surface '{id}' (order {order}) cannot open above '{top}' (order {top_order})")]
    OrderViolation {
        id: &'static str,
        order: u32,
        top: &'static str,
        top_order: u32,
    },
    /// A stackable sequence must start at its first step.
    #[error("surface '{id}' (order {order}) cannot start its sequence; first step is order {first}")]
    FirstStepRequired {
        id: &'static str,
        order: u32,
        first: u32,
    },
    /// A non-priority modal was opened while an overlay is active.
    #[error("modal '{0}' cannot open while an overlay is active")]
    ModalOverOverlay(&'static str),
    /// View toggling on a surface without internal views.
    #[error("surface '{0}' has no internal views")]
    NoInternalViews(&'static str),
    #[error("surface '{surface}' has no view named '{view}'")]
    UnknownView { surface: &'static str, view: String },
}

impl OverlayError {
    /// Whether this failure is logged at error level rather than warning.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::MissingElement(_))
    }
}
