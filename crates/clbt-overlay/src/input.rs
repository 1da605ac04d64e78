#![forbid(unsafe_code)]

//! Page-level input routed into the coordinator.

/// Input that can dismiss a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Escape was pressed: close the top modal, else the top overlay.
    Escape,
    /// The backdrop of `surface` was clicked.
    BackdropClick { surface: String },
}

impl InputEvent {
    /// Map a `KeyboardEvent.key` value to an input event.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" | "Esc" => Some(Self::Escape),
            _ => None,
        }
    }

    #[must_use]
    pub fn backdrop(surface: impl Into<String>) -> Self {
        Self::BackdropClick {
            surface: surface.into(),
        }
    }
}
