//! The mounted client application.
//!
//! Mounting wires together the pieces the client needs: the session handle,
//! the route table and the icon library. Navigation then resolves paths to
//! views, falling back to `View::NotFound`.

use std::collections::BTreeMap;

use super::{ICON_COMPONENT_TAG, IconLibrary};
use crate::auth::AuthHandle;
use crate::router::{RouteTable, View};

/// Outcome of navigating to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub view: View,
    /// `None` when the path matched no route.
    pub route_name: Option<String>,
    pub params: BTreeMap<String, String>,
}

impl Navigation {
    const fn not_found() -> Self {
        Self {
            view: View::NotFound,
            route_name: None,
            params: BTreeMap::new(),
        }
    }
}

#[derive(Debug)]
pub struct AppShell {
    auth: AuthHandle,
    routes: RouteTable<View>,
    icons: IconLibrary,
}

impl AppShell {
    #[must_use]
    pub fn mount(auth: AuthHandle, routes: RouteTable<View>, icons: IconLibrary) -> Self {
        tracing::debug!(
            "mounting shell with {} routes and {} <{ICON_COMPONENT_TAG}> icons",
            routes.len(),
            icons.len()
        );
        Self {
            auth,
            routes,
            icons,
        }
    }

    /// Resolve `path` to the view to render.
    #[must_use]
    pub fn navigate(&self, path: &str) -> Navigation {
        match self.routes.resolve(path) {
            Some(matched) => Navigation {
                view: *matched.view,
                route_name: Some(matched.name.to_string()),
                params: matched.params,
            },
            None => {
                tracing::debug!("no route for {path}");
                Navigation::not_found()
            }
        }
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthHandle {
        &self.auth
    }

    #[must_use]
    pub const fn routes(&self) -> &RouteTable<View> {
        &self.routes
    }

    #[must_use]
    pub const fn icons(&self) -> &IconLibrary {
        &self.icons
    }
}
