//! SQLite-backed document store.
//!
//! # Invariants
//!
//! - Every stored document passed validation when written.
//! - `doc_identifier` is unique (enforced by the schema as well as checked
//!   before writes).

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{Document, DocumentPatch, NewDocument, ValidationError};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS document (
        pk INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        author TEXT NOT NULL,
        doc_identifier TEXT NOT NULL UNIQUE,
        doc_code TEXT,
        compiled_url TEXT,
        source_url TEXT,
        abstract TEXT
    );
";

const COLUMNS: &str =
    "pk, title, author, doc_identifier, doc_code, compiled_url, source_url, abstract";

/// Errors that can occur in store operations.
#[derive(Debug)]
pub enum StoreError {
    /// A field broke its rules; nothing was written.
    Validation(ValidationError),
    /// Another document already uses this identifier.
    DuplicateIdentifier(String),
    /// The database operation failed.
    Sqlite(rusqlite::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "invalid document: {e}"),
            Self::DuplicateIdentifier(id) => {
                write!(f, "a document with identifier '{id}' already exists")
            }
            Self::Sqlite(e) => write!(f, "database error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Sqlite(e) => Some(e),
            Self::DuplicateIdentifier(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Sqlite(e)
    }
}

impl From<ValidationError> for StoreError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

/// The documents table.
pub struct DocumentStore {
    conn: Connection,
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl DocumentStore {
    /// Open (or create) the store at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the schema cannot be
    /// created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::bootstrap(conn)
    }

    /// A private store that lives as long as the value.
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// All documents, oldest first.
    pub fn list(&self) -> Result<Vec<Document>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM document ORDER BY pk ASC"))?;
        let rows = stmt.query_map([], map_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM document", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    pub fn get_by_identifier(&self, doc_identifier: &str) -> Result<Option<Document>, StoreError> {
        let document = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM document WHERE doc_identifier = ?1"),
                params![doc_identifier],
                map_row,
            )
            .optional()?;
        Ok(document)
    }

    /// Validate and insert a new document.
    ///
    /// # Errors
    /// Returns `StoreError::Validation` or `StoreError::DuplicateIdentifier`
    /// without writing anything, or `StoreError::Sqlite` if the insert fails.
    pub fn create(&mut self, new: NewDocument) -> Result<Document, StoreError> {
        new.validate()?;
        if self.get_by_identifier(&new.doc_identifier)?.is_some() {
            return Err(StoreError::DuplicateIdentifier(new.doc_identifier));
        }

        self.conn
            .execute(
                "INSERT INTO document
                    (title, author, doc_identifier, doc_code, compiled_url, source_url, abstract)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    new.title,
                    new.author,
                    new.doc_identifier,
                    new.doc_code,
                    new.compiled_url,
                    new.source_url,
                    new.r#abstract,
                ],
            )
            .map_err(|e| map_constraint(e, &new.doc_identifier))?;

        let pk = self.conn.last_insert_rowid();
        tracing::debug!("created document {} (pk {pk})", new.doc_identifier);

        Ok(Document {
            pk,
            title: new.title,
            author: new.author,
            doc_identifier: new.doc_identifier,
            doc_code: new.doc_code,
            compiled_url: new.compiled_url,
            source_url: new.source_url,
            r#abstract: new.r#abstract,
        })
    }

    /// Apply `patch` to the document with `doc_identifier`.
    ///
    /// Returns `Ok(None)` if no such document exists.
    ///
    /// # Errors
    /// Returns `StoreError::Validation` if the patched document is invalid,
    /// `StoreError::DuplicateIdentifier` if the patch renames it onto an
    /// existing identifier.
    pub fn update(
        &mut self,
        doc_identifier: &str,
        patch: DocumentPatch,
    ) -> Result<Option<Document>, StoreError> {
        let Some(mut document) = self.get_by_identifier(doc_identifier)? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(document));
        }

        document.apply(patch);
        document.validate()?;
        if document.doc_identifier != doc_identifier
            && self.get_by_identifier(&document.doc_identifier)?.is_some()
        {
            return Err(StoreError::DuplicateIdentifier(document.doc_identifier));
        }

        self.conn
            .execute(
                "UPDATE document
                 SET title = ?1, author = ?2, doc_identifier = ?3, doc_code = ?4,
                     compiled_url = ?5, source_url = ?6, abstract = ?7
                 WHERE pk = ?8",
                params![
                    document.title,
                    document.author,
                    document.doc_identifier,
                    document.doc_code,
                    document.compiled_url,
                    document.source_url,
                    document.r#abstract,
                    document.pk,
                ],
            )
            .map_err(|e| map_constraint(e, &document.doc_identifier))?;

        tracing::debug!("updated document {doc_identifier} (pk {})", document.pk);
        Ok(Some(document))
    }

    /// Delete the document with `doc_identifier`.
    ///
    /// Returns whether a document was removed.
    pub fn delete_by_identifier(&mut self, doc_identifier: &str) -> Result<bool, StoreError> {
        let removed = self.conn.execute(
            "DELETE FROM document WHERE doc_identifier = ?1",
            params![doc_identifier],
        )?;
        if removed > 0 {
            tracing::debug!("deleted document {doc_identifier}");
        }
        Ok(removed > 0)
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<Document> {
    Ok(Document {
        pk: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        doc_identifier: row.get(3)?,
        doc_code: row.get(4)?,
        compiled_url: row.get(5)?,
        source_url: row.get(6)?,
        r#abstract: row.get(7)?,
    })
}

/// Unique-constraint failures become `DuplicateIdentifier`; the pre-write
/// check makes this a race-only path.
fn map_constraint(error: rusqlite::Error, doc_identifier: &str) -> StoreError {
    match error {
        rusqlite::Error::SqliteFailure(ref failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StoreError::DuplicateIdentifier(doc_identifier.to_string())
        }
        other => StoreError::Sqlite(other),
    }
}
