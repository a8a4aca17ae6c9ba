//! Cart

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::{
    items::{LineItem, LineKey},
    products::{Product, ProductId},
};

/// Ordered collection of line items for one browsing session.
///
/// Every mutation keeps two invariants: no two items share a [`LineKey`], and
/// every item has a quantity of at least one. Totals are recomputed on each
/// read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart from possibly unnormalised items.
    ///
    /// Items with a zero quantity are dropped and items sharing a key are
    /// merged into the first occurrence.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();

        for item in items {
            cart.absorb(item);
        }

        cart
    }

    /// Add `quantity` units of a product configuration.
    ///
    /// An existing slot with the same key has its quantity incremented;
    /// otherwise a new item is appended. Size and colour are not validated
    /// against the product's options, and a quantity of zero does nothing.
    pub fn add_item(&mut self, product: Product, size: &str, color: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(item) = self.find_mut(&product.id, size, color) {
            item.quantity = item.quantity.saturating_add(quantity);
            return;
        }

        self.items.push(LineItem::new(product, size, color, quantity));
    }

    /// Remove the item in the given slot. Removing an absent slot is a no-op.
    pub fn remove_item(&mut self, product_id: &ProductId, size: &str, color: &str) {
        self.items.retain(|item| !item.is(product_id, size, color));
    }

    /// Overwrite the quantity of the item in the given slot.
    ///
    /// A quantity of zero or less removes the item instead.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        size: &str,
        color: &str,
        quantity: i64,
    ) {
        if quantity <= 0 {
            self.remove_item(product_id, size, color);
            return;
        }

        if let Some(item) = self.find_mut(product_id, size, color) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Union this cart with `other`, summing quantities of shared slots.
    ///
    /// Items already present keep their position and product snapshot; items
    /// only found in `other` are appended in `other`'s order.
    pub fn merge(&mut self, other: Cart) {
        let mut positions: FxHashMap<LineKey, usize> = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| (item.key(), index))
            .collect();

        for item in other.items {
            let key = item.key();

            match positions.get(&key).and_then(|&i| self.items.get_mut(i)) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => {
                    positions.insert(key, self.items.len());
                    self.items.push(item);
                }
            }
        }
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consume the cart, returning its items.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Find the item occupying the given slot.
    pub fn get(&self, key: &LineKey) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|item| key.matches(&item.product.id, &item.selected_size, &item.selected_color))
    }

    /// Number of distinct slots.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of embedded unit price times quantity.
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    fn find_mut(
        &mut self,
        product_id: &ProductId,
        size: &str,
        color: &str,
    ) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|item| item.is(product_id, size, color))
    }

    fn absorb(&mut self, item: LineItem) {
        if item.quantity == 0 {
            return;
        }

        let LineItem {
            product,
            quantity,
            selected_size,
            selected_color,
        } = item;

        self.add_item(product, &selected_size, &selected_color, quantity);
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        Self::from_items(items)
    }
}
