use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Declared kind of a resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Annotation => "annotation",
        }
    }
}

/// A live handle on a type, produced by a loading context's resolver.
///
/// Tags are the fully qualified names of the annotations declared on the
/// type. Presence is all that is tracked; annotation arguments are not kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeHandle {
    pub name: String,
    pub kind: TypeKind,
    pub tags: BTreeSet<String>,
}

impl TypeHandle {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.as_str(), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_queried_by_presence() {
        let handle = TypeHandle::new("com.example.HelloService", TypeKind::Class)
            .with_tag("spark.annotations.SparkComponent");

        assert!(handle.has_tag("spark.annotations.SparkComponent"));
        assert!(!handle.has_tag("spark.annotations.SparkRoute"));
    }

    #[test]
    fn test_serializes_kind_in_lowercase() {
        let handle = TypeHandle::new("com.example.Marker", TypeKind::Annotation);
        let json = serde_json::to_value(&handle).unwrap();

        assert_eq!(json["kind"], "annotation");
        assert_eq!(json["name"], "com.example.Marker");
        assert_eq!(handle.to_string(), "annotation com.example.Marker");
    }
}
