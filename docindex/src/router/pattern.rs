//! Route pattern parsing and matching.
//!
//! A pattern is a URL path template such as `/documents/:docID`. Segments are
//! either literals, compared ASCII case-insensitively, or parameters, which
//! bind exactly one non-empty path segment.
//!
//! # Invariants
//!
//! - A parsed pattern always originated from a string starting with `/`.
//! - Parameter names are non-empty and unique within a pattern.
//! - No segment is empty. The root pattern `/` has zero segments.

use std::collections::BTreeMap;
use std::fmt;

/// Error returned when a route pattern is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern string is empty.
    Empty,
    /// The pattern does not start with `/`.
    MissingLeadingSlash(String),
    /// The pattern contains an empty segment (`//`).
    EmptySegment(String),
    /// A parameter segment has no name (a bare `:`).
    EmptyParameterName(String),
    /// A parameter name contains characters other than ASCII alphanumerics and `_`.
    InvalidParameterName { pattern: String, name: String },
    /// The same parameter name appears twice.
    DuplicateParameter { pattern: String, name: String },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "route pattern must not be empty"),
            Self::MissingLeadingSlash(pattern) => {
                write!(f, "route pattern '{pattern}' must start with '/'")
            }
            Self::EmptySegment(pattern) => {
                write!(f, "route pattern '{pattern}' contains an empty segment")
            }
            Self::EmptyParameterName(pattern) => {
                write!(f, "route pattern '{pattern}' has a parameter without a name")
            }
            Self::InvalidParameterName { pattern, name } => {
                write!(f, "route pattern '{pattern}' has an invalid parameter name '{name}'")
            }
            Self::DuplicateParameter { pattern, name } => {
                write!(f, "route pattern '{pattern}' declares parameter '{name}' twice")
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// One segment of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment (ASCII case-insensitive).
    Literal(String),
    /// Binds the path segment under this name.
    Param(String),
}

/// A parsed, validated route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern of the form `/literal/:param`.
    ///
    /// A single trailing slash is accepted and ignored (`/ping/` is `/ping`).
    ///
    /// # Errors
    ///
    /// Returns a `PatternError` describing the first problem found.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(PatternError::MissingLeadingSlash(pattern.to_string()));
        };
        if rest.starts_with('/') {
            return Err(PatternError::EmptySegment(pattern.to_string()));
        }
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for raw in rest.split('/') {
                segments.push(parse_segment(pattern, raw)?);
            }
        }

        let mut seen: Vec<&str> = Vec::new();
        for segment in &segments {
            if let Segment::Param(name) = segment {
                if seen.contains(&name.as_str()) {
                    return Err(PatternError::DuplicateParameter {
                        pattern: pattern.to_string(),
                        name: name.clone(),
                    });
                }
                seen.push(name);
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The pattern text as it was written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameters, in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match a normalized path (see [`normalize_path`]) against this pattern.
    ///
    /// Returns the bound parameters on success.
    #[must_use]
    pub fn matches(&self, path_segments: &[&str]) -> Option<BTreeMap<String, String>> {
        if path_segments.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, value) in self.segments.iter().zip(path_segments) {
            match segment {
                Segment::Literal(literal) => {
                    if !literal.eq_ignore_ascii_case(value) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if value.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), (*value).to_string());
                }
            }
        }
        Some(params)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_segment(pattern: &str, raw: &str) -> Result<Segment, PatternError> {
    if raw.is_empty() {
        return Err(PatternError::EmptySegment(pattern.to_string()));
    }
    let Some(name) = raw.strip_prefix(':') else {
        return Ok(Segment::Literal(raw.to_string()));
    };
    if name.is_empty() {
        return Err(PatternError::EmptyParameterName(pattern.to_string()));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(PatternError::InvalidParameterName {
            pattern: pattern.to_string(),
            name: name.to_string(),
        });
    }
    Ok(Segment::Param(name.to_string()))
}

/// Split a navigation target into path segments.
///
/// Drops the query string and fragment, the leading slash, and one trailing
/// slash. Returns `None` for paths that are not absolute.
#[must_use]
pub fn normalize_path(path: &str) -> Option<Vec<&str>> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let rest = path.strip_prefix('/')?;
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    if rest.is_empty() {
        return Some(Vec::new());
    }
    Some(rest.split('/').collect())
}
