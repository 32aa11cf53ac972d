//! Client application shell: icons, mounting and the boot page.

pub mod app;
pub mod icons;
pub mod page;

pub use app::{AppShell, Navigation};
pub use icons::{CIRCLE_ARROW_LEFT, ICON_COMPONENT_TAG, IconDefinition, IconLibrary};
pub use page::ShellPage;
