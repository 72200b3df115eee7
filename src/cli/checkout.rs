use std::io::{self, Write};

use clap::Args;
use esfiharia::{
    cart::CartStore,
    catalog::MenuItemId,
    checkout::{Channel, ChannelError, CheckoutComposer, add_menu_items},
    config::{ApiConfig, CheckoutConfig},
    tables::write_cart,
};
use tracing::debug;

use super::source::MenuSourceArgs;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Menu item ids; repeat an id to order more than one
    #[arg(required = true, num_args = 1..)]
    items: Vec<MenuItemId>,

    #[command(flatten)]
    source: MenuSourceArgs,

    #[command(flatten)]
    checkout: CheckoutConfig,
}

/// Prints the checkout link for the customer to open.
#[derive(Debug)]
struct StdoutChannel;

impl Channel for StdoutChannel {
    fn open(&self, link: &str) -> Result<(), ChannelError> {
        writeln!(io::stdout(), "\n{link}").map_err(|error| ChannelError(error.to_string()))
    }
}

pub(crate) async fn run(args: CheckoutArgs, api: &ApiConfig) -> Result<(), String> {
    let composer = CheckoutComposer::new(&args.checkout).map_err(|error| error.to_string())?;
    let menu = args.source.service(api)?;
    let store = CartStore::default();

    let _subscription = store.subscribe(|cart| {
        debug!(lines = cart.len(), items = cart.line_count(), "cart changed");
    });

    add_menu_items(menu.as_ref(), &store, &args.items)
        .await
        .map_err(|error| format!("failed to build cart: {error}"))?;

    write_cart(io::stdout().lock(), &store.snapshot()).map_err(|error| error.to_string())?;

    composer
        .checkout(&store, &StdoutChannel)
        .map_err(|error| format!("checkout failed: {error}"))?;

    Ok(())
}
