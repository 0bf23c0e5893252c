//! # Field Paths
//!
//! Addresses a value inside a submitted record, e.g. `author[2].email`.
//! Nested sub-record validators report paths relative to their own root;
//! the containing validator prefixes them with the path of the field that
//! holds the sub-record.

use serde::{Serialize, Serializer};

/// One step in a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key.
    Field(String),
    /// A position in an ordered sequence.
    Index(usize),
}

/// Location of a value within a record. The empty path is the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The record root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path to a top-level field.
    pub fn field(name: impl Into<String>) -> Self {
        Self(vec![PathSegment::Field(name.into())])
    }

    /// Extend with an object key.
    pub fn key(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name.into()));
        Self(segments)
    }

    /// Extend with a sequence index.
    pub fn index(&self, idx: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(idx));
        Self(segments)
    }

    /// Place `self` underneath `prefix`.
    pub fn prefixed(&self, prefix: &FieldPath) -> Self {
        let mut segments = prefix.0.clone();
        segments.extend(self.0.iter().cloned());
        Self(segments)
    }

    /// Returns true for the record root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The path segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Name of the top-level field this path starts at, if any.
    pub fn top_level_field(&self) -> Option<&str> {
        match self.0.first() {
            Some(PathSegment::Field(name)) => Some(name),
            _ => None,
        }
    }

    /// Render as an RFC 6901 JSON Pointer (`/author/2/email`).
    pub fn to_json_pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.0 {
            out.push('/');
            match segment {
                PathSegment::Field(name) => {
                    out.push_str(&name.replace('~', "~0").replace('/', "~1"));
                }
                PathSegment::Index(idx) => out.push_str(&idx.to_string()),
            }
        }
        out
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_nested_path() {
        let path = FieldPath::field("author").index(2).key("email");
        assert_eq!(path.to_string(), "author[2].email");
    }

    #[test]
    fn root_displays_empty() {
        assert_eq!(FieldPath::root().to_string(), "");
        assert!(FieldPath::root().is_root());
    }

    #[test]
    fn prefixed_places_relative_path_under_prefix() {
        let relative = FieldPath::field("email");
        let prefix = FieldPath::field("contact").index(0);
        let full = relative.prefixed(&prefix);
        assert_eq!(full.to_string(), "contact[0].email");
        assert_eq!(full.top_level_field(), Some("contact"));
    }

    #[test]
    fn json_pointer_escapes_reserved_characters() {
        let path = FieldPath::field("a/b").key("c~d").index(1);
        assert_eq!(path.to_json_pointer(), "/a~1b/c~0d/1");
        assert_eq!(FieldPath::root().to_json_pointer(), "");
    }

    #[test]
    fn leading_index_has_no_dot() {
        let path = FieldPath::root().index(3).key("name");
        assert_eq!(path.to_string(), "[3].name");
    }

    #[test]
    fn serializes_as_display_string() {
        let path = FieldPath::field("science_keywords").index(1);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"science_keywords[1]\"");
    }
}
