//! Derived read models over raw cart and wishlist rows.
//!
//! Pure functions of their inputs: fetch the rows through the services,
//! then build a view. No caching or interior mutability here, so a view
//! is only as fresh as the rows it was built from.

use rust_decimal::Decimal;

use voltbay_core::{CartItem, RecordId, WishlistItem};

/// Aggregated cart totals for display.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItem>,
    /// Sum of line totals (unit price times quantity, floored at 1).
    pub subtotal: Decimal,
    /// Number of distinct lines, not summed quantities.
    pub item_count: usize,
}

impl CartView {
    /// Build the view from the user's cart rows.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let subtotal = items.iter().map(CartItem::line_total).sum();
        let item_count = items.len();
        Self {
            items,
            subtotal,
            item_count,
        }
    }

    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_items(Vec::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Subtotal as a display string, e.g. `$20.00`.
    #[must_use]
    pub fn subtotal_display(&self) -> String {
        format_price(self.subtotal)
    }
}

/// Wishlist membership and count for display.
#[derive(Debug, Clone, Default)]
pub struct WishlistView {
    pub items: Vec<WishlistItem>,
}

impl WishlistView {
    #[must_use]
    pub fn from_items(items: Vec<WishlistItem>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Is the product already wishlisted? Drives the heart-toggle state.
    #[must_use]
    pub fn contains(&self, product_id: &RecordId) -> bool {
        self.items.iter().any(|item| item.product_id == *product_id)
    }
}

/// Render a price with a dollar sign and exactly two decimal places.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::Map;

    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("valid decimal")
    }

    fn cart_item(id: &str, price: &str, quantity: u32) -> CartItem {
        CartItem {
            id: RecordId::new(id),
            user_id: RecordId::new("u1"),
            product_id: RecordId::new(format!("p-{id}")),
            name: "Test LP".to_owned(),
            price: dec(price),
            image: String::new(),
            quantity,
            selected_options: Map::new(),
        }
    }

    #[test]
    fn test_empty_cart() {
        let view = CartView::empty();
        assert!(view.is_empty());
        assert_eq!(view.item_count, 0);
        assert_eq!(view.subtotal, Decimal::ZERO);
        assert_eq!(view.subtotal_display(), "$0.00");
    }

    #[test]
    fn test_subtotal_sums_line_totals() {
        let view = CartView::from_items(vec![
            cart_item("c1", "10.00", 2),
            cart_item("c2", "24.99", 1),
        ]);
        assert_eq!(view.subtotal, dec("44.99"));
        assert_eq!(view.subtotal_display(), "$44.99");
    }

    #[test]
    fn test_item_count_is_line_count_not_quantity_sum() {
        let view = CartView::from_items(vec![
            cart_item("c1", "10.00", 5),
            cart_item("c2", "5.00", 3),
        ]);
        assert_eq!(view.item_count, 2);
    }

    #[test]
    fn test_zero_quantity_line_priced_as_one() {
        let view = CartView::from_items(vec![cart_item("c1", "9.99", 0)]);
        assert_eq!(view.subtotal, dec("9.99"));
    }

    #[test]
    fn test_wishlist_membership() {
        let item = WishlistItem {
            id: RecordId::new("w1"),
            user_id: RecordId::new("u1"),
            product_id: RecordId::new("p9"),
            name: "Test LP".to_owned(),
            price: dec("12.50"),
            image: String::new(),
            added_at: Utc::now(),
        };
        let view = WishlistView::from_items(vec![item]);
        assert_eq!(view.count(), 1);
        assert!(view.contains(&RecordId::new("p9")));
        assert!(!view.contains(&RecordId::new("p0")));
    }

    #[test]
    fn test_format_price_pads_decimals() {
        assert_eq!(format_price(dec("7")), "$7.00");
        assert_eq!(format_price(dec("7.5")), "$7.50");
    }
}
