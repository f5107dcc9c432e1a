use stepshop::format::{format_number, format_points};
use stepshop_app::context::AppContext;

use super::describe;

pub(crate) async fn items(context: &AppContext) -> Result<(), String> {
    let items = context
        .shop
        .list_items()
        .await
        .map_err(|error| format!("failed to list items: {}", describe(&error)))?;

    if items.is_empty() {
        println!("no items available");
        return Ok(());
    }

    for item in items {
        println!(
            "#{:<5} {:<32} {:>10}  {}",
            item.id,
            item.name,
            format_points(item.point_price),
            item.shop_name.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

pub(crate) async fn history(context: &AppContext) -> Result<(), String> {
    let purchases = context
        .shop
        .purchase_history()
        .await
        .map_err(|error| format!("failed to load history: {}", describe(&error)))?;

    if purchases.is_empty() {
        println!("no purchases yet");
        return Ok(());
    }

    for purchase in purchases {
        println!(
            "{}  {:<32} x{:<4} {:>10}",
            purchase.purchased_at,
            purchase.item_name,
            format_number(u64::from(purchase.quantity)),
            format_points(purchase.total_points)
        );
    }

    Ok(())
}
