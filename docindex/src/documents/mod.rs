//! Documents served by the API.

pub mod model;
pub mod store;

pub use model::{Document, DocumentPatch, FieldProblem, NewDocument, ValidationError};
pub use store::{DocumentStore, StoreError};
