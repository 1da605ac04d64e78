#![forbid(unsafe_code)]

//! Validated, read-only table of surface descriptors.
//!
//! # Invariants
//!
//! 1. Identifiers are unique and non-empty.
//! 2. Stackable members of a group form a total order: no two share an
//!    `order` value.
//! 3. A surface declares a default view iff it declares views, and the
//!    default is one of them.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Duplicate id | Same id registered twice | `RegistryError::DuplicateSurface` |
//! | Ambiguous sequence | Two stackable members share an order | `RegistryError::AmbiguousOrder` |
//! | Bad default view | Default missing from `views` | `RegistryError::InvalidDefaultView` |
//! | Unknown lookup | Id not registered | `get()` returns `None` |

use ahash::{AHashMap, AHashSet};
use thiserror::Error;

use crate::descriptor::SurfaceDescriptor;

/// Errors raised while validating a registry at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("surface '{0}' is registered more than once")]
    DuplicateSurface(&'static str),
    #[error("surface '{surface}' has an empty {field}")]
    EmptyName {
        surface: &'static str,
        field: &'static str,
    },
    #[error(
        "stackable surfaces '{first}' and '{second}' in group '{group}' share order {order}"
    )]
    AmbiguousOrder {
        group: &'static str,
        first: &'static str,
        second: &'static str,
        order: u32,
    },
    #[error("surface '{surface}' has default view {view:?} that is not one of its views")]
    InvalidDefaultView {
        surface: &'static str,
        view: Option<&'static str>,
    },
    #[error("surface '{surface}' declares view '{view}' more than once")]
    DuplicateView {
        surface: &'static str,
        view: &'static str,
    },
}

/// Registry of every surface the coordinator may manage.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    surfaces: Vec<SurfaceDescriptor>,
    index: AHashMap<&'static str, usize>,
}

impl Registry {
    /// Validate `descriptors` and build the lookup table.
    pub fn new(
        descriptors: impl IntoIterator<Item = SurfaceDescriptor>,
    ) -> Result<Self, RegistryError> {
        let mut surfaces = Vec::new();
        let mut index = AHashMap::new();
        let mut sequence: AHashMap<(&'static str, u32), &'static str> = AHashMap::new();

        for desc in descriptors {
            if desc.id.is_empty() {
                return Err(RegistryError::EmptyName {
                    surface: desc.id,
                    field: "id",
                });
            }
            if desc.group.is_empty() {
                return Err(RegistryError::EmptyName {
                    surface: desc.id,
                    field: "group",
                });
            }
            if index.contains_key(desc.id) {
                return Err(RegistryError::DuplicateSurface(desc.id));
            }
            if desc.stackable {
                if let Some(&first) = sequence.get(&(desc.group, desc.order)) {
                    return Err(RegistryError::AmbiguousOrder {
                        group: desc.group,
                        first,
                        second: desc.id,
                        order: desc.order,
                    });
                }
                sequence.insert((desc.group, desc.order), desc.id);
            }
            validate_views(&desc)?;

            index.insert(desc.id, surfaces.len());
            surfaces.push(desc);
        }

        Ok(Self { surfaces, index })
    }

    /// Look up a descriptor by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SurfaceDescriptor> {
        self.index.get(id).map(|&i| &self.surfaces[i])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Every registered member of `group`, in registration order.
    pub fn group_members<'a>(
        &'a self,
        group: &'a str,
    ) -> impl Iterator<Item = &'a SurfaceDescriptor> + 'a {
        self.surfaces.iter().filter(move |d| d.group == group)
    }

    /// Lowest `order` among the stackable members of `group`.
    #[must_use]
    pub fn first_order(&self, group: &str) -> Option<u32> {
        self.group_members(group)
            .filter(|d| d.stackable)
            .map(|d| d.order)
            .min()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SurfaceDescriptor> {
        self.surfaces.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

fn validate_views(desc: &SurfaceDescriptor) -> Result<(), RegistryError> {
    let mut seen = AHashSet::new();
    for view in desc.views {
        if !seen.insert(view.name) {
            return Err(RegistryError::DuplicateView {
                surface: desc.id,
                view: view.name,
            });
        }
    }

    let valid = match desc.default_view {
        Some(name) => desc.view(name).is_some(),
        None => desc.views.is_empty(),
    };
    if valid {
        Ok(())
    } else {
        Err(RegistryError::InvalidDefaultView {
            surface: desc.id,
            view: desc.default_view,
        })
    }
}
