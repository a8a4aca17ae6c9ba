//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product identifier, as issued by the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Size option offered by a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    /// Selector value stored on line items
    pub id: String,

    /// Display name
    pub name: String,

    /// Whether the size can currently be ordered
    #[serde(default = "available_by_default")]
    pub available: bool,

    /// Child sizing rather than adult sizing
    #[serde(default)]
    pub is_child_size: bool,
}

/// Colour option offered by a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Selector value stored on line items
    pub id: String,

    /// Display name
    pub name: String,

    /// Swatch value, e.g. `#FFFFFF`
    pub hex: String,
}

/// Product
///
/// Once embedded in a line item a product is treated as an immutable snapshot:
/// later catalog edits never reach items already in a cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product title
    pub title: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Unit price in store currency units
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Legacy single image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Product images
    #[serde(default)]
    pub images: Vec<String>,

    /// Size options
    #[serde(default)]
    pub sizes: Vec<Size>,

    /// Colour options
    #[serde(default)]
    pub colors: Vec<Color>,

    /// Units in stock. Informational only, never decremented.
    #[serde(default)]
    pub stock_quantity: u32,

    /// Accent colour used on the product card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_color: Option<String>,
}

impl Product {
    /// Looks up a size option by its selector value.
    pub fn size(&self, id: &str) -> Option<&Size> {
        self.sizes.iter().find(|size| size.id == id)
    }

    /// Looks up a colour option by its selector value.
    pub fn color(&self, id: &str) -> Option<&Color> {
        self.colors.iter().find(|color| color.id == id)
    }

    /// Sizes that can currently be ordered.
    pub fn available_sizes(&self) -> impl Iterator<Item = &Size> {
        self.sizes.iter().filter(|size| size.available)
    }

    /// Returns the image shown first for this product.
    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(String::as_str)
            .or(self.image_url.as_deref())
    }
}

fn available_by_default() -> bool {
    true
}
