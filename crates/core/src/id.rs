//! Product identifiers.

use serde::{Deserialize, Serialize};

/// Identifier of a catalog product.
///
/// Opaque and immutable. Construction never fails; use [`ProductRef::is_valid`]
/// to decide whether a reference can be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRef(String);

impl ProductRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A reference is resolvable when it carries a non-blank identifier.
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl core::fmt::Display for ProductRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ProductRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
