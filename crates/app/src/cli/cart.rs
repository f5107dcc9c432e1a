use std::io;

use clap::{Args, Subcommand};
use stepshop::{
    format::format_points,
    ids::{ItemId, LineId},
    receipt::CartReceipt,
};
use stepshop_app::{
    context::AppContext,
    domain::carts::{CartError, CartSnapshot},
};

use super::describe;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart and its totals
    Show,

    /// Add an item
    Add(AddArgs),

    /// Change a line's quantity
    Qty(QuantityArgs),

    /// Remove a line
    Remove(LineArgs),

    /// Remove every line
    Clear,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Item ID from `stepshop items`
    #[arg(long)]
    item: u64,

    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct QuantityArgs {
    /// Cart line ID
    #[arg(long)]
    line: u64,

    /// New quantity; values below 1 are ignored
    #[arg(long, allow_negative_numbers = true)]
    quantity: i64,
}

#[derive(Debug, Args)]
struct LineArgs {
    /// Cart line ID
    #[arg(long)]
    line: u64,
}

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Coupon code to apply before buying
    #[arg(long)]
    coupon: Option<String>,
}

pub(crate) async fn run(context: &AppContext, command: CartCommand) -> Result<(), String> {
    let carts = &context.carts;

    let snapshot = match command.command {
        CartSubcommand::Show => carts.load_cart().await.map(Some),
        CartSubcommand::Add(args) => carts.add_item(ItemId::new(args.item), args.quantity).await,
        CartSubcommand::Qty(args) => {
            carts
                .change_quantity(LineId::new(args.line), args.quantity)
                .await
        }
        CartSubcommand::Remove(args) => carts.remove_line(LineId::new(args.line)).await.map(Some),
        CartSubcommand::Clear => carts.clear_cart().await.map(Some),
    }
    .map_err(cart_failure)?;

    match snapshot {
        Some(snapshot) => print_cart(&snapshot),
        None => {
            println!("quantity must be at least 1; nothing changed");
            Ok(())
        }
    }
}

pub(crate) async fn checkout(context: &AppContext, args: CheckoutArgs) -> Result<(), String> {
    let carts = &context.carts;

    carts.load_cart().await.map_err(cart_failure)?;

    if let Some(code) = args.coupon {
        carts.apply_coupon(&code).await.map_err(cart_failure)?;
    }

    print_cart(&carts.snapshot().await)?;

    let outcome = carts.purchase().await.map_err(cart_failure)?;

    println!();
    println!("purchased {} lines", outcome.lines_purchased());
    println!("charged:   {}", format_points(outcome.points_charged()));

    if let Some(balance) = outcome.remaining_balance {
        println!("balance:   {}", format_points(balance));
    }

    if !outcome.cart_cleared {
        println!("note: the cart could not be cleared; run `stepshop cart show` to refresh");
    }

    Ok(())
}

fn print_cart(snapshot: &CartSnapshot) -> Result<(), String> {
    CartReceipt::new(&snapshot.cart, snapshot.coupon.as_ref())
        .write_to(io::stdout().lock())
        .map_err(|error| format!("failed to print cart: {error}"))
}

fn cart_failure(error: CartError) -> String {
    match &error {
        CartError::InsufficientPoints { balance, required } => format!(
            "not enough points: {} required, {} available",
            format_points(*required),
            format_points(*balance)
        ),
        CartError::PurchaseFailed {
            completed, total, ..
        } if *completed > 0 => format!(
            "purchase stopped after {completed} of {total} lines; the completed lines are not refunded: {}",
            describe(&error)
        ),
        _ => describe(&error),
    }
}
