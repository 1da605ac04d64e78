#![forbid(unsafe_code)]

//! Backdrop click resolution.
//!
//! A click counts as a backdrop click when it lands on a surface's own
//! element (outside its content box) or on an element carrying one of
//! [`BACKDROP_CLASSES`] inside a surface. Clicks anywhere else are ignored.

use clbt_overlay::Registry;

/// Classes that mark a dedicated backdrop element inside a surface.
pub const BACKDROP_CLASSES: &[&str] = &["modal-backdrop", "overlay-backdrop"];

/// Whether a `className` attribute value contains a backdrop class.
#[must_use]
pub fn has_backdrop_class(class_name: &str) -> bool {
    class_name
        .split_ascii_whitespace()
        .any(|class| BACKDROP_CLASSES.contains(&class))
}

/// Surface whose backdrop was clicked, if any.
///
/// `target_id` and `class_name` describe the click target; `ancestor_ids`
/// yields the ids of its ancestors, nearest first.
pub fn resolve_backdrop<I, S>(
    registry: &Registry,
    target_id: &str,
    class_name: &str,
    ancestor_ids: I,
) -> Option<&'static str>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if let Some(desc) = registry.get(target_id) {
        return Some(desc.id);
    }
    if !has_backdrop_class(class_name) {
        return None;
    }
    ancestor_ids
        .into_iter()
        .find_map(|id| registry.get(id.as_ref()).map(|d| d.id))
}
