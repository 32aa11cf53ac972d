//! Views of the documents client and the route table that selects them.

use std::fmt;

use super::table::{RouteDefinition, RouteTable, RouteTableError};

/// A renderable view of the client application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    DocumentsAll,
    DocumentsItem,
    CollaboratorsAll,
    Ping,
    /// Shown when no route matches. Never appears in a route table.
    NotFound,
}

impl View {
    /// Component name of the view, as the client bundle knows it.
    #[must_use]
    pub const fn component(self) -> &'static str {
        match self {
            Self::DocumentsAll => "DocumentsAll",
            Self::DocumentsItem => "DocumentsItem",
            Self::CollaboratorsAll => "CollaboratorsAll",
            Self::Ping => "Ping",
            Self::NotFound => "NotFound",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component())
    }
}

/// The client's route table.
///
/// Document pages live under `/documents/:docID`; the older `/docs/:docID`
/// form is not routed.
pub fn client_routes() -> Result<RouteTable<View>, RouteTableError> {
    RouteTable::new(client_route_definitions())
}

pub(crate) fn client_route_definitions() -> Vec<RouteDefinition<View>> {
    vec![
        RouteDefinition::new("/", "DocumentsAll", View::DocumentsAll),
        RouteDefinition::new("/documents/:docID", "DocumentsItem", View::DocumentsItem),
        RouteDefinition::new("/collaborators", "CollaboratorsAll", View::CollaboratorsAll),
        RouteDefinition::new("/ping", "ping", View::Ping),
    ]
}
