//! Link type between an annotation entity and its referenced data.
//!
//! # Responsibility
//! - Declare the relationship kinds a Representation/Feature can carry.
//! - Provide the canonical textual rendering used in diagnostics.
//!
//! # Invariants
//! - `as_str()` names are stable; serialized form uses the same names.
//! - Parsing text back into the enum is a persistence concern and does not
//!   live in this crate.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Relationship kind between an annotation entity and its data array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    /// Annotation applies to a tagged region of the referenced data.
    Tagged,
    /// Annotation applies to the referenced data as a whole.
    Untagged,
    /// Annotation applies per index position of the referenced data.
    Indexed,
}

impl LinkType {
    /// Canonical name used for rendering and serialization.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tagged => "Tagged",
            Self::Untagged => "Untagged",
            Self::Indexed => "Indexed",
        }
    }
}

impl Display for LinkType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "LinkType::{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::LinkType;

    #[test]
    fn renders_canonical_diagnostic_names() {
        assert_eq!(LinkType::Tagged.to_string(), "LinkType::Tagged");
        assert_eq!(LinkType::Untagged.to_string(), "LinkType::Untagged");
        assert_eq!(LinkType::Indexed.to_string(), "LinkType::Indexed");
    }

    #[test]
    fn as_str_matches_variant_names() {
        assert_eq!(LinkType::Tagged.as_str(), "Tagged");
        assert_eq!(LinkType::Untagged.as_str(), "Untagged");
        assert_eq!(LinkType::Indexed.as_str(), "Indexed");
    }
}
