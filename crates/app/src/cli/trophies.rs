use stepshop::format::{format_number, format_percent};
use stepshop_app::context::AppContext;

use super::describe;

pub(crate) async fn show(context: &AppContext) -> Result<(), String> {
    let board = context
        .trophies
        .load_user_trophies()
        .await
        .map_err(|error| format!("failed to load trophies: {}", describe(&error)))?;

    println!(
        "completed {} of {}",
        board.completed_count(),
        board.total()
    );

    for trophy in board.trophies() {
        let status = if trophy.is_completed() { "done" } else { "    " };

        println!(
            "[{status}] {:<32} {:>12} / {:<12} {:>5}",
            trophy.title,
            format_number(trophy.progress),
            format_number(trophy.target),
            format_percent(trophy.completion_ratio())
        );
    }

    Ok(())
}
