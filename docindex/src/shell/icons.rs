//! Icon library for the client shell.
//!
//! Icons are registered once before mounting; views refer to them through
//! the `font-awesome-icon` component by `(prefix, name)`.

use std::collections::BTreeSet;

/// Tag under which the icon component is registered.
pub const ICON_COMPONENT_TAG: &str = "font-awesome-icon";

/// A single icon definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IconDefinition {
    /// Style prefix, e.g. `fas` for solid icons.
    pub prefix: &'static str,
    pub name: &'static str,
}

/// The solid "circle arrow left" icon, used by the back button of the
/// document page.
pub const CIRCLE_ARROW_LEFT: IconDefinition = IconDefinition {
    prefix: "fas",
    name: "circle-arrow-left",
};

/// Icons available to views.
#[derive(Debug, Clone, Default)]
pub struct IconLibrary {
    icons: BTreeSet<IconDefinition>,
}

impl IconLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The icons the documents client ships with.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut library = Self::new();
        library.add(CIRCLE_ARROW_LEFT);
        library
    }

    /// Register an icon. Returns `false` if it was already registered.
    pub fn add(&mut self, icon: IconDefinition) -> bool {
        self.icons.insert(icon)
    }

    #[must_use]
    pub fn contains(&self, prefix: &str, name: &str) -> bool {
        self.icons
            .iter()
            .any(|icon| icon.prefix == prefix && icon.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}
