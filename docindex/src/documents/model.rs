//! Document records and their field rules.

use serde::{Deserialize, Serialize};

pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_AUTHOR_LENGTH: usize = 100;
pub const MAX_IDENTIFIER_LENGTH: usize = 20;
pub const MAX_CODE_LENGTH: usize = 20;
pub const MAX_URL_LENGTH: usize = 100;

/// A stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub pk: i64,
    pub title: String,
    pub author: String,
    /// Public identifier, unique across documents.
    pub doc_identifier: String,
    pub doc_code: Option<String>,
    pub compiled_url: Option<String>,
    pub source_url: Option<String>,
    pub r#abstract: Option<String>,
}

/// Fields of a document to be created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewDocument {
    pub title: String,
    pub author: String,
    pub doc_identifier: String,
    #[serde(default)]
    pub doc_code: Option<String>,
    #[serde(default)]
    pub compiled_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub r#abstract: Option<String>,
}

/// A partial update. Absent (or null) fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DocumentPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub doc_identifier: Option<String>,
    #[serde(default)]
    pub doc_code: Option<String>,
    #[serde(default)]
    pub compiled_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub r#abstract: Option<String>,
}

impl DocumentPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.doc_identifier.is_none()
            && self.doc_code.is_none()
            && self.compiled_url.is_none()
            && self.source_url.is_none()
            && self.r#abstract.is_none()
    }
}

/// What is wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    Empty,
    TooLong { max: usize },
}

/// Error returned when a document field breaks its rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub problem: FieldProblem,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.problem {
            FieldProblem::Empty => write!(f, "{} must not be empty", self.field),
            FieldProblem::TooLong { max } => {
                write!(f, "{} must be at most {max} characters", self.field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn check_required(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError {
            field,
            problem: FieldProblem::Empty,
        });
    }
    check_length(field, value, max)
}

fn check_optional(field: &'static str, value: Option<&str>, max: usize) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |value| check_length(field, value, max))
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError {
            field,
            problem: FieldProblem::TooLong { max },
        });
    }
    Ok(())
}

/// Borrowed view of the bounded fields shared by new and stored documents.
struct FieldRefs<'a> {
    title: &'a str,
    author: &'a str,
    doc_identifier: &'a str,
    doc_code: Option<&'a str>,
    compiled_url: Option<&'a str>,
    source_url: Option<&'a str>,
}

fn check_fields(fields: &FieldRefs<'_>) -> Result<(), ValidationError> {
    check_required("title", fields.title, MAX_TITLE_LENGTH)?;
    check_required("author", fields.author, MAX_AUTHOR_LENGTH)?;
    check_required("doc_identifier", fields.doc_identifier, MAX_IDENTIFIER_LENGTH)?;
    check_optional("doc_code", fields.doc_code, MAX_CODE_LENGTH)?;
    check_optional("compiled_url", fields.compiled_url, MAX_URL_LENGTH)?;
    check_optional("source_url", fields.source_url, MAX_URL_LENGTH)
}

impl NewDocument {
    /// # Errors
    /// Returns the first field that breaks its rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_fields(&FieldRefs {
            title: &self.title,
            author: &self.author,
            doc_identifier: &self.doc_identifier,
            doc_code: self.doc_code.as_deref(),
            compiled_url: self.compiled_url.as_deref(),
            source_url: self.source_url.as_deref(),
        })
    }
}

impl Document {
    /// Apply the fields present in `patch`.
    pub fn apply(&mut self, patch: DocumentPatch) {
        let DocumentPatch {
            title,
            author,
            doc_identifier,
            doc_code,
            compiled_url,
            source_url,
            r#abstract,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(author) = author {
            self.author = author;
        }
        if let Some(doc_identifier) = doc_identifier {
            self.doc_identifier = doc_identifier;
        }
        if doc_code.is_some() {
            self.doc_code = doc_code;
        }
        if compiled_url.is_some() {
            self.compiled_url = compiled_url;
        }
        if source_url.is_some() {
            self.source_url = source_url;
        }
        if r#abstract.is_some() {
            self.r#abstract = r#abstract;
        }
    }

    /// # Errors
    /// Returns the first field that breaks its rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_fields(&FieldRefs {
            title: &self.title,
            author: &self.author,
            doc_identifier: &self.doc_identifier,
            doc_code: self.doc_code.as_deref(),
            compiled_url: self.compiled_url.as_deref(),
            source_url: self.source_url.as_deref(),
        })
    }
}
