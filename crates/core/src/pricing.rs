//! Pricing

use crate::cart::CartLine;

/// Calculates the point subtotal of a set of cart lines.
///
/// Each line contributes `unit_point_price × quantity`. The sum saturates at
/// `u64::MAX` rather than wrapping, and does not depend on line order.
pub fn subtotal_points<'a>(lines: impl IntoIterator<Item = &'a CartLine>) -> u64 {
    lines
        .into_iter()
        .fold(0_u64, |acc, line| acc.saturating_add(line.line_points()))
}

/// Total units across a set of cart lines.
pub fn total_item_count<'a>(lines: impl IntoIterator<Item = &'a CartLine>) -> u64 {
    lines
        .into_iter()
        .fold(0_u64, |acc, line| acc.saturating_add(u64::from(line.quantity)))
}

/// Points payable after a discount, floored at zero.
pub fn final_payable_points(subtotal: u64, discount: u64) -> u64 {
    subtotal.saturating_sub(discount)
}

#[cfg(test)]
mod tests {
    use crate::ids::{ItemId, LineId};

    use super::*;

    fn line(id: u64, price: u64, quantity: u32) -> CartLine {
        CartLine {
            line_id: LineId::new(id),
            item_id: ItemId::new(id * 10),
            name: format!("Item {id}"),
            category: None,
            unit_point_price: price,
            quantity,
        }
    }

    #[test]
    fn subtotal_multiplies_price_by_quantity() {
        let lines = [line(1, 200, 2), line(2, 150, 1)];

        assert_eq!(subtotal_points(&lines), 550);
        assert_eq!(total_item_count(&lines), 3);
    }

    #[test]
    fn subtotal_is_order_independent() {
        let mut lines = vec![line(1, 200, 2), line(2, 150, 1), line(3, 75, 4)];
        let forward = subtotal_points(&lines);

        lines.reverse();
        assert_eq!(subtotal_points(&lines), forward);

        lines.rotate_left(1);
        assert_eq!(subtotal_points(&lines), forward);
    }

    #[test]
    fn subtotal_of_nothing_is_zero() {
        let lines: [CartLine; 0] = [];

        assert_eq!(subtotal_points(&lines), 0);
        assert_eq!(total_item_count(&lines), 0);
    }

    #[test]
    fn subtotal_saturates() {
        let lines = [line(1, u64::MAX, 2), line(2, 1, 1)];

        assert_eq!(subtotal_points(&lines), u64::MAX);
    }

    #[test]
    fn payable_never_goes_negative() {
        assert_eq!(final_payable_points(1000, 100), 900);
        assert_eq!(final_payable_points(50, 100), 0);
    }
}
