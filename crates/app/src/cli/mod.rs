use std::error::Error;

use clap::{Parser, Subcommand};
use stepshop_app::{config::ClientConfig, context::AppContext, gateway::models::Credentials};

mod account;
mod cart;
mod shop;
mod trophies;

#[derive(Debug, Parser)]
#[command(name = "stepshop", about = "Stepshop client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: ClientConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the signed in user and balance
    Me,

    /// Create an account
    Register(account::RegisterArgs),

    /// List shop items
    Items,

    /// Show past purchases
    History,

    /// Inspect or change the cart
    Cart(cart::CartCommand),

    /// Buy everything in the cart
    Checkout(cart::CheckoutArgs),

    /// Show trophy progress
    Trophies,
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let context = AppContext::from_config(&self.config)
            .map_err(|error| format!("failed to start client: {}", describe(&error)))?;

        if self.command.needs_login() {
            sign_in(&context, &self.config).await?;
        }

        match self.command {
            Commands::Me => account::me(&context),
            Commands::Register(args) => account::register(&context, args).await,
            Commands::Items => shop::items(&context).await,
            Commands::History => shop::history(&context).await,
            Commands::Cart(command) => cart::run(&context, command).await,
            Commands::Checkout(args) => cart::checkout(&context, args).await,
            Commands::Trophies => trophies::show(&context).await,
        }
    }
}

impl Commands {
    fn needs_login(&self) -> bool {
        !matches!(self, Self::Register(_))
    }
}

async fn sign_in(context: &AppContext, config: &ClientConfig) -> Result<(), String> {
    let (Some(username), Some(password)) = (&config.username, &config.password) else {
        return Err("set STEPSHOP_USERNAME and STEPSHOP_PASSWORD to sign in".to_string());
    };

    context
        .account
        .login(Credentials::new(username.as_str(), password.as_str()))
        .await
        .map(drop)
        .map_err(|error| format!("login failed: {}", describe(&error)))
}

/// Render an error with its source chain.
pub(crate) fn describe(error: &(dyn Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
