//! Client-side routing.
//!
//! A static, ordered table maps URL path patterns to views. Resolution is
//! a stateless scan: the first structurally matching pattern wins and its
//! parameter segments are returned by name.
//!
//! # Invariants
//! - Tables are validated when built and never change afterwards.
//! - Route names are unique within a table.

pub mod pattern;
pub mod table;
pub mod view;

pub use pattern::{PatternError, RoutePattern, Segment};
pub use table::{HrefError, RouteDefinition, RouteEntry, RouteMatch, RouteTable, RouteTableError};
pub use view::{View, client_routes};
