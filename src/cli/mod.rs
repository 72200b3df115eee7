use clap::{Parser, Subcommand};
use esfiharia::config::{ApiConfig, LoggingConfig};

mod account;
mod checkout;
mod menu;
mod orders;
mod source;

#[derive(Debug, Parser)]
#[command(name = "esfiharia", about = "Esfiharia storefront and admin CLI", long_about = None)]
pub(crate) struct Cli {
    /// Logging output settings.
    #[command(flatten)]
    logging: LoggingConfig,

    /// Backend connection settings.
    #[command(flatten)]
    api: ApiConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse and manage the menu
    Menu(menu::MenuCommand),

    /// Place, track and manage orders
    Orders(orders::OrdersCommand),

    /// Sign up, log in and inspect the session
    Account(account::AccountCommand),

    /// Build a cart from menu ids and print the chat link for it
    Checkout(checkout::CheckoutArgs),
}

impl Cli {
    /// Load configuration from `.env`, the environment and CLI arguments.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Menu(command) => menu::run(command, &self.api).await,
            Commands::Orders(command) => orders::run(command, &self.api).await,
            Commands::Account(command) => account::run(command, &self.api).await,
            Commands::Checkout(args) => checkout::run(args, &self.api).await,
        }
    }
}
