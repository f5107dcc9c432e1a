//! Receipt

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::CartState,
    checkout::PurchaseQuote,
    coupons::AppliedCoupon,
    format::{format_number, format_points},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Printable view of a cart, its coupon and the resulting quote.
#[derive(Debug, Clone, Copy)]
pub struct CartReceipt<'a> {
    cart: &'a CartState,
    coupon: Option<&'a AppliedCoupon>,
}

impl<'a> CartReceipt<'a> {
    /// Create a receipt for a cart and optional coupon.
    pub fn new(cart: &'a CartState, coupon: Option<&'a AppliedCoupon>) -> Self {
        Self { cart, coupon }
    }

    /// Quote for the receipt's cart and coupon.
    pub fn quote(&self) -> PurchaseQuote {
        PurchaseQuote::new(self.cart, self.coupon)
    }

    /// Write the receipt table and summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        if self.cart.is_empty() {
            return writeln!(out, "Cart is empty").map_err(|_err| ReceiptError::IO);
        }

        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Category", "Unit", "Qty", "Line Total"]);

        for (idx, line) in self.cart.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                line.category.clone().unwrap_or_default(),
                format_points(line.unit_point_price),
                format_number(u64::from(line.quantity)),
                format_points(line.line_points()),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..6), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let quote = self.quote();

        writeln!(
            out,
            "Items:     {}",
            format_number(self.cart.total_item_count())
        )
        .map_err(|_err| ReceiptError::IO)?;

        writeln!(out, "Subtotal:  {}", format_points(quote.subtotal_points))
            .map_err(|_err| ReceiptError::IO)?;

        if let Some(coupon) = self.coupon {
            writeln!(
                out,
                "Coupon:    -{} ({} {})",
                format_points(quote.discount_points),
                coupon.code,
                coupon.name
            )
            .map_err(|_err| ReceiptError::IO)?;
        }

        writeln!(out, "Total:     {}", format_points(quote.final_payable_points))
            .map_err(|_err| ReceiptError::IO)
    }
}
