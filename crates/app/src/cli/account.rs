use clap::Args;
use stepshop::format::format_points;
use stepshop_app::{
    context::AppContext,
    gateway::models::{Credentials, Registration},
};

use super::describe;

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    /// Username for the new account
    #[arg(long)]
    new_username: String,

    /// Password for the new account
    #[arg(long)]
    new_password: String,

    #[arg(long)]
    gender: Option<String>,

    #[arg(long)]
    birth_year: Option<u16>,
}

pub(crate) fn me(context: &AppContext) -> Result<(), String> {
    let user = context
        .account
        .current_user()
        .ok_or_else(|| "not signed in".to_string())?;

    println!("user_id: {}", user.id);
    println!("username: {}", user.username);
    println!("points: {}", format_points(user.points));

    if let Some(created_at) = user.created_at {
        println!("member_since: {created_at}");
    }

    Ok(())
}

pub(crate) async fn register(context: &AppContext, args: RegisterArgs) -> Result<(), String> {
    let user = context
        .account
        .register(Registration {
            credentials: Credentials::new(args.new_username, args.new_password),
            gender: args.gender,
            birth_year: args.birth_year,
        })
        .await
        .map_err(|error| format!("registration failed: {}", describe(&error)))?;

    println!("registered {} (user_id {})", user.username, user.id);

    Ok(())
}
