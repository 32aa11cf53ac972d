//! Ordered route table and resolver.
//!
//! The table is built once from a list of definitions and is read-only
//! afterwards. Resolution scans entries in order and returns the first match.
//!
//! # Invariants
//!
//! - Every route name is unique within a table.
//! - Every entry's pattern parsed successfully.

use std::collections::BTreeMap;
use std::fmt;

use super::pattern::{PatternError, RoutePattern, Segment, normalize_path};

/// A route as written in a table literal, before validation.
#[derive(Debug, Clone)]
pub struct RouteDefinition<V> {
    pub path: String,
    pub name: String,
    pub view: V,
}

impl<V> RouteDefinition<V> {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: V) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view,
        }
    }
}

/// A validated table entry.
#[derive(Debug, Clone)]
pub struct RouteEntry<V> {
    pattern: RoutePattern,
    name: String,
    view: V,
}

impl<V> RouteEntry<V> {
    #[must_use]
    pub const fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }
}

/// The result of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, V> {
    pub name: &'a str,
    pub view: &'a V,
    pub params: BTreeMap<String, String>,
}

/// Error returned when a route table cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    /// A route's path is not a valid pattern.
    InvalidPattern { name: String, source: PatternError },
    /// A route has an empty name.
    EmptyName(String),
    /// Two routes share a name.
    DuplicateName(String),
}

impl fmt::Display for RouteTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { name, source } => {
                write!(f, "route '{name}' has an invalid path: {source}")
            }
            Self::EmptyName(path) => write!(f, "route for '{path}' has an empty name"),
            Self::DuplicateName(name) => write!(f, "duplicate route name: {name}"),
        }
    }
}

impl std::error::Error for RouteTableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            Self::EmptyName(_) | Self::DuplicateName(_) => None,
        }
    }
}

/// Characters a parameter value cannot carry through a built path: they
/// would end the segment, start the query or start the fragment.
const RESERVED_PARAM_CHARS: [char; 3] = ['/', '?', '#'];

/// Error returned when building a path for a named route fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HrefError {
    UnknownRoute(String),
    MissingParam { route: String, param: String },
    /// Parameter values must be non-empty and free of `/`, `?` and `#`.
    InvalidParam { route: String, param: String },
}

impl fmt::Display for HrefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRoute(name) => write!(f, "no route named '{name}'"),
            Self::MissingParam { route, param } => {
                write!(f, "route '{route}' requires parameter '{param}'")
            }
            Self::InvalidParam { route, param } => {
                write!(f, "invalid value for parameter '{param}' of route '{route}'")
            }
        }
    }
}

impl std::error::Error for HrefError {}

/// An ordered, immutable route table.
#[derive(Debug, Clone)]
pub struct RouteTable<V> {
    entries: Vec<RouteEntry<V>>,
}

impl<V> RouteTable<V> {
    /// Build a table, validating every pattern and name.
    ///
    /// # Errors
    ///
    /// Returns the first invalid pattern, empty name or duplicate name found,
    /// in definition order.
    pub fn new(definitions: Vec<RouteDefinition<V>>) -> Result<Self, RouteTableError> {
        let mut entries: Vec<RouteEntry<V>> = Vec::with_capacity(definitions.len());

        for definition in definitions {
            if definition.name.is_empty() {
                return Err(RouteTableError::EmptyName(definition.path));
            }
            if entries.iter().any(|entry| entry.name == definition.name) {
                return Err(RouteTableError::DuplicateName(definition.name));
            }
            let pattern = RoutePattern::parse(&definition.path).map_err(|source| {
                RouteTableError::InvalidPattern {
                    name: definition.name.clone(),
                    source,
                }
            })?;
            entries.push(RouteEntry {
                pattern,
                name: definition.name,
                view: definition.view,
            });
        }

        Ok(Self { entries })
    }

    /// Resolve a navigation target to the first matching route.
    ///
    /// Query strings and fragments are ignored. Returns `None` when no route
    /// matches or the path is not absolute.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_, V>> {
        let segments = normalize_path(path)?;
        self.entries.iter().find_map(|entry| {
            entry.pattern.matches(&segments).map(|params| RouteMatch {
                name: &entry.name,
                view: &entry.view,
                params,
            })
        })
    }

    /// Build the path for a named route.
    ///
    /// Values are inserted verbatim, matching what `resolve` hands back, so
    /// a built path always resolves to the same parameters. Extra parameters
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the route does not exist or a parameter is missing
    /// or unusable as a path segment.
    pub fn href(&self, name: &str, params: &BTreeMap<String, String>) -> Result<String, HrefError> {
        let entry = self
            .get(name)
            .ok_or_else(|| HrefError::UnknownRoute(name.to_string()))?;

        if entry.pattern.segments().is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in entry.pattern.segments() {
            path.push('/');
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Param(param) => {
                    let value = params.get(param).ok_or_else(|| HrefError::MissingParam {
                        route: name.to_string(),
                        param: param.clone(),
                    })?;
                    if value.is_empty() || value.contains(RESERVED_PARAM_CHARS) {
                        return Err(HrefError::InvalidParam {
                            route: name.to_string(),
                            param: param.clone(),
                        });
                    }
                    path.push_str(value);
                }
            }
        }
        Ok(path)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RouteEntry<V>> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    #[must_use]
    pub fn entries(&self) -> &[RouteEntry<V>] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
