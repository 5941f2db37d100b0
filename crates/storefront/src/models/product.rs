//! Product types.
//!
//! Products are owned by the external catalog; the storefront only reads
//! them and requests updates to `stock` at checkout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use greengrocer_core::ProductId;

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog-assigned product id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short display blurb.
    #[serde(default, rename = "shortDesc")]
    pub short_desc: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Units available in the catalog. Non-negative by construction.
    pub stock: u32,
}

impl Product {
    /// Whether any units are available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// A product to be created in the catalog (no id yet).
///
/// Only privileged users may create products; the catalog assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Short display blurb.
    #[serde(default, rename = "shortDesc")]
    pub short_desc: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Initial stock level.
    pub stock: u32,
}

/// Test fixtures shared across the crate's unit tests.
#[cfg(test)]
pub(crate) mod test_support {
    use super::{Decimal, Product, ProductId};

    pub(crate) fn sample_product(id: &str, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            short_desc: String::new(),
            description: String::new(),
            price: Decimal::new(999, 2),
            stock,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::test_support::sample_product;
    use super::*;

    #[test]
    fn test_in_stock() {
        assert!(sample_product("p1", 1).in_stock());
        assert!(!sample_product("p1", 0).in_stock());
    }

    #[test]
    fn test_product_wire_format() {
        let json = r#"{
            "id": "p1",
            "name": "Apples",
            "shortDesc": "Crisp",
            "description": "A bag of crisp apples",
            "price": "3.50",
            "stock": 12
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.short_desc, "Crisp");
        assert_eq!(product.stock, 12);
    }

    #[test]
    fn test_product_missing_optional_fields() {
        // Catalog entries without descriptions still deserialize
        let json = r#"{"id": "p2", "name": "Pears", "price": "1.00", "stock": 3}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.description.is_empty());
    }

    #[test]
    fn test_negative_stock_rejected() {
        let json = r#"{"id": "p3", "name": "Plums", "price": "1.00", "stock": -1}"#;
        let result: Result<Product, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
