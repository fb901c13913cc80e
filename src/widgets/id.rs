//! Stable identifiers for panels and snippets

use std::fmt;

/// Identifier for a reveal panel or a copyable snippet
///
/// Lesson authors name the blocks they care about (`"q1"`, `"dto"`); blocks
/// without a name fall back to their position in the lesson. Either way the
/// same block must map to the same id on every redraw.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetId {
    /// Author-assigned name
    Name(String),
    /// Position of the block within its lesson
    Index(usize),
}

impl From<&str> for WidgetId {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for WidgetId {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for WidgetId {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl From<usize> for WidgetId {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&WidgetId> for WidgetId {
    fn from(id: &WidgetId) -> Self {
        id.clone()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "#{}", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_and_indices_never_collide() {
        assert_ne!(WidgetId::from("0"), WidgetId::from(0));
    }

    #[test]
    fn test_display() {
        assert_eq!(WidgetId::from("dto").to_string(), "dto");
        assert_eq!(WidgetId::from(3).to_string(), "#3");
    }
}
