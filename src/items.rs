//! Line Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::{Color, Product, ProductId, Size};

/// Swatch shown for a colour the embedded product no longer describes.
pub const FALLBACK_COLOR_HEX: &str = "#CCCCCC";

/// Identity key of a cart slot: product, size selector and colour selector.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    /// Product identifier
    pub product_id: ProductId,

    /// Size selector value
    pub size: String,

    /// Colour selector value
    pub color: String,
}

impl LineKey {
    /// Creates a line key.
    pub fn new(product_id: ProductId, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            product_id,
            size: size.into(),
            color: color.into(),
        }
    }

    /// Returns `true` when the triple identifies this key.
    pub fn matches(&self, product_id: &ProductId, size: &str, color: &str) -> bool {
        self.product_id == *product_id && self.size == size && self.color == color
    }
}

/// One distinct purchasable configuration in a cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product snapshot taken when the item was added
    pub product: Product,

    /// Number of units, at least one while the item exists
    pub quantity: u32,

    /// Selected size
    pub selected_size: String,

    /// Selected colour
    pub selected_color: String,
}

impl LineItem {
    /// Creates a new line item.
    pub fn new(
        product: Product,
        size: impl Into<String>,
        color: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            product,
            quantity,
            selected_size: size.into(),
            selected_color: color.into(),
        }
    }

    /// Returns the identity key of this item.
    pub fn key(&self) -> LineKey {
        LineKey::new(
            self.product.id.clone(),
            self.selected_size.clone(),
            self.selected_color.clone(),
        )
    }

    /// Returns `true` when this item occupies the given slot.
    pub fn is(&self, product_id: &ProductId, size: &str, color: &str) -> bool {
        self.product.id == *product_id
            && self.selected_size == size
            && self.selected_color == color
    }

    /// Unit price times quantity, using the embedded product price.
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }

    /// Resolves the selected size on the embedded product.
    pub fn size(&self) -> Option<&Size> {
        self.product.size(&self.selected_size)
    }

    /// Resolves the selected colour on the embedded product.
    pub fn color(&self) -> Option<&Color> {
        self.product.color(&self.selected_color)
    }

    /// Display name of the selected size, or the raw selector when unknown.
    pub fn size_name(&self) -> &str {
        self.size().map_or(&self.selected_size, |size| &size.name)
    }

    /// Display name of the selected colour, or the raw selector when unknown.
    pub fn color_name(&self) -> &str {
        self.color().map_or(&self.selected_color, |color| &color.name)
    }

    /// Swatch of the selected colour.
    pub fn color_hex(&self) -> &str {
        self.color()
            .map_or(FALLBACK_COLOR_HEX, |color| color.hex.as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::products::Color;

    use super::*;

    fn hoodie() -> Product {
        Product {
            id: ProductId::new("hoodie"),
            title: "Sudadera".to_string(),
            description: String::new(),
            price: Decimal::new(2999, 2),
            image_url: None,
            images: Vec::new(),
            sizes: vec![Size {
                id: "l".to_string(),
                name: "L".to_string(),
                available: true,
                is_child_size: false,
            }],
            colors: vec![Color {
                id: "gray".to_string(),
                name: "Gris".to_string(),
                hex: "#888888".to_string(),
            }],
            stock_quantity: 15,
            card_color: None,
        }
    }

    #[test]
    fn subtotal_multiplies_embedded_price() {
        let item = LineItem::new(hoodie(), "l", "gray", 3);

        assert_eq!(item.subtotal(), Decimal::new(8997, 2));
    }

    #[test]
    fn key_is_product_size_and_color() {
        let item = LineItem::new(hoodie(), "l", "gray", 1);

        assert_eq!(item.key(), LineKey::new(ProductId::new("hoodie"), "l", "gray"));
        assert!(
            item.key().matches(&ProductId::new("hoodie"), "l", "gray"),
            "key should match its own triple"
        );
        assert!(
            !item.is(&ProductId::new("hoodie"), "m", "gray"),
            "a different size is a different slot"
        );
    }

    #[test]
    fn option_names_resolve_against_the_snapshot() {
        let item = LineItem::new(hoodie(), "l", "gray", 1);

        assert_eq!(item.size_name(), "L");
        assert_eq!(item.color_name(), "Gris");
        assert_eq!(item.color_hex(), "#888888");
    }

    #[test]
    fn unknown_options_fall_back_to_selector_values() {
        let item = LineItem::new(hoodie(), "xxl", "teal", 1);

        assert_eq!(item.size_name(), "xxl");
        assert_eq!(item.color_name(), "teal");
        assert_eq!(item.color_hex(), FALLBACK_COLOR_HEX);
    }

    #[test]
    fn serializes_with_selected_field_names() {
        let item = LineItem::new(hoodie(), "l", "gray", 2);

        let value = serde_json::to_value(&item).ok();

        assert_eq!(
            value
                .as_ref()
                .and_then(|v| v.get("selectedSize"))
                .and_then(|v| v.as_str()),
            Some("l")
        );
        assert_eq!(
            value
                .as_ref()
                .and_then(|v| v.get("quantity"))
                .and_then(serde_json::Value::as_u64),
            Some(2)
        );
    }
}
