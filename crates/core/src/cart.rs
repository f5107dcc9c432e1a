//! Cart

use std::slice;

use serde::{Deserialize, Serialize};

use crate::{
    ids::{ItemId, LineId},
    pricing,
};

/// One distinct purchasable item held in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Identifier assigned by the backend when the line was created.
    pub line_id: LineId,

    /// Catalog item this line refers to.
    pub item_id: ItemId,

    /// Display name of the catalog item.
    pub name: String,

    /// Catalog category, when the backend reports one.
    pub category: Option<String>,

    /// Point cost per unit, as of the last refresh.
    pub unit_point_price: u64,

    /// Number of units, never below 1.
    pub quantity: u32,
}

impl CartLine {
    /// Points for the whole line (`unit_point_price × quantity`).
    pub fn line_points(&self) -> u64 {
        self.unit_point_price
            .saturating_mul(u64::from(self.quantity))
    }
}

/// The cart as last reported by the backend.
///
/// Totals are never stored; they are derived from `lines` on every read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    /// Create a cart from the lines in server-reported order.
    pub fn new(lines: impl Into<Vec<CartLine>>) -> Self {
        Self {
            lines: lines.into(),
        }
    }

    /// A cart with no lines.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Lines in server-reported order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Find a line by its identifier.
    pub fn line(&self, line_id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.line_id == line_id)
    }

    /// Sum of quantities across all lines.
    pub fn total_item_count(&self) -> u64 {
        pricing::total_item_count(&self.lines)
    }

    /// Sum of `unit_point_price × quantity` across all lines.
    pub fn subtotal_points(&self) -> u64 {
        pricing::subtotal_points(&self.lines)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> slice::Iter<'_, CartLine> {
        self.lines.iter()
    }
}

impl<'a> IntoIterator for &'a CartState {
    type Item = &'a CartLine;
    type IntoIter = slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn two_line_cart() -> CartState {
        CartState::new([
            CartLine {
                line_id: LineId::new(1),
                item_id: ItemId::new(101),
                name: "Item A".to_string(),
                category: Some("snacks".to_string()),
                unit_point_price: 200,
                quantity: 2,
            },
            CartLine {
                line_id: LineId::new(2),
                item_id: ItemId::new(102),
                name: "Item B".to_string(),
                category: None,
                unit_point_price: 150,
                quantity: 1,
            },
        ])
    }

    #[test]
    fn totals_are_derived_from_lines() {
        let cart = two_line_cart();

        assert_eq!(cart.subtotal_points(), 550);
        assert_eq!(cart.total_item_count(), 3);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn empty_cart_has_zero_totals() {
        let cart = CartState::empty();

        assert!(cart.is_empty());
        assert_eq!(cart.subtotal_points(), 0);
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn finds_line_by_id() -> TestResult {
        let cart = two_line_cart();

        let line = cart.line(LineId::new(2)).ok_or("line 2 missing")?;

        assert_eq!(line.item_id, ItemId::new(102));
        assert!(cart.line(LineId::new(9)).is_none());

        Ok(())
    }

    #[test]
    fn serializes_ids_as_numbers() -> TestResult {
        let cart = two_line_cart();

        let yaml = serde_norway::to_string(&cart)?;

        assert!(yaml.contains("line_id: 1"), "unexpected yaml: {yaml}");
        assert!(yaml.contains("item_id: 102"), "unexpected yaml: {yaml}");

        Ok(())
    }
}
