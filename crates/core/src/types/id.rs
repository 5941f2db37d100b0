//! Newtype IDs for type-safe entity references.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A product identifier assigned by the external catalog.
///
/// The catalog owns id generation; from the client's perspective the id is
/// an opaque string. The type is `Ord` so it can key an ordered cart map
/// and iterate deterministically.
///
/// # Example
///
/// ```
/// use greengrocer_core::ProductId;
///
/// let id = ProductId::new("prod-42");
/// assert_eq!(id.as_str(), "prod-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id and return its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display() {
        let id = ProductId::new("abc123");
        assert_eq!(id.to_string(), "abc123");
    }

    #[test]
    fn test_product_id_serde_transparent() {
        let id = ProductId::new("p1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"p1\"");

        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_product_id_ordering() {
        let a = ProductId::new("a");
        let b = ProductId::new("b");
        assert!(a < b);
    }
}
