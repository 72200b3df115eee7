use std::io::{self, Write};

use clap::{Args, Subcommand};
use esfiharia::{
    cart::CartStore,
    catalog::MenuItemId,
    checkout::add_menu_items,
    config::ApiConfig,
    orders::{
        CustomerDetails, Fulfilment, Order, OrderDraft, OrderId, OrderStatus, StatusFilter,
        filter_by_status,
    },
    prices::{STORE_CURRENCY, format_price, money_from_decimal},
    tables::{write_cart, write_orders},
};

use super::source::context;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders
    List(ListArgs),

    /// Show one order with its items
    Show(ShowArgs),

    /// Place an order for the given menu items and create its payment
    Place(PlaceArgs),

    /// Move an order to a new status (admin)
    Status(StatusArgs),

    /// Cancel one of your orders
    Cancel(CancelArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Only list orders in this status ("all" for every status)
    #[arg(long, default_value = "all")]
    status: StatusFilter,

    /// List your own orders instead of every order
    #[arg(long)]
    mine: bool,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Order id
    id: OrderId,

    /// Look the order up among your own orders
    #[arg(long)]
    mine: bool,
}

#[derive(Debug, Args)]
struct PlaceArgs {
    /// Customer name
    #[arg(long)]
    name: String,

    /// Contact phone
    #[arg(long)]
    phone: String,

    /// Deliver to this address instead of picking up
    #[arg(long)]
    address: Option<String>,

    /// Notes for the kitchen
    #[arg(long)]
    notes: Option<String>,

    /// Menu item ids; repeat an id to order more than one
    #[arg(required = true, num_args = 1..)]
    items: Vec<MenuItemId>,
}

#[derive(Debug, Args)]
struct StatusArgs {
    /// Order id
    id: OrderId,

    /// New status, e.g. in-preparation or em_preparacao
    status: OrderStatus,
}

#[derive(Debug, Args)]
struct CancelArgs {
    /// Order id
    id: OrderId,
}

pub(crate) async fn run(command: OrdersCommand, api: &ApiConfig) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List(args) => list(args, api).await,
        OrdersSubcommand::Show(args) => show(args, api).await,
        OrdersSubcommand::Place(args) => place(args, api).await,
        OrdersSubcommand::Status(args) => update_status(args, api).await,
        OrdersSubcommand::Cancel(args) => cancel(args.id, api).await,
    }
}

async fn list(args: ListArgs, api: &ApiConfig) -> Result<(), String> {
    let orders = context(api)?.orders;

    let all = if args.mine {
        orders.my_orders().await
    } else {
        orders.admin_orders().await
    }
    .map_err(|error| format!("failed to list orders: {error}"))?;

    write_orders(io::stdout().lock(), filter_by_status(&all, args.status))
        .map_err(|error| error.to_string())
}

async fn show(args: ShowArgs, api: &ApiConfig) -> Result<(), String> {
    let orders = context(api)?.orders;

    let order = if args.mine {
        orders.my_order(args.id).await
    } else {
        orders.admin_order(args.id).await
    }
    .map_err(|error| format!("failed to get order {}: {error}", args.id))?;

    write_order_details(&order).map_err(|error| error.to_string())
}

async fn place(args: PlaceArgs, api: &ApiConfig) -> Result<(), String> {
    let context = context(api)?;
    let store = CartStore::default();

    add_menu_items(context.menu.as_ref(), &store, &args.items)
        .await
        .map_err(|error| format!("failed to build cart: {error}"))?;

    let fulfilment = if args.address.is_some() {
        Fulfilment::Delivery
    } else {
        Fulfilment::Pickup
    };

    let draft = OrderDraft::from_cart(
        &store.snapshot(),
        CustomerDetails {
            name: args.name,
            phone: args.phone,
            address: args.address,
            fulfilment,
            notes: args.notes,
        },
    )
    .map_err(|error| format!("invalid order: {error}"))?;

    write_cart(io::stdout().lock(), &store.snapshot()).map_err(|error| error.to_string())?;

    let intent = context
        .orders
        .create_payment_intent(draft.into_input())
        .await
        .map_err(|error| format!("failed to place order: {error}"))?;

    let mut out = io::stdout().lock();

    writeln!(out, "order: {}", intent.order_id).map_err(|error| error.to_string())?;
    writeln!(out, "client_secret: {}", intent.client_secret).map_err(|error| error.to_string())?;

    Ok(())
}

async fn update_status(args: StatusArgs, api: &ApiConfig) -> Result<(), String> {
    let orders = context(api)?.orders;

    let current = orders
        .admin_order(args.id)
        .await
        .map_err(|error| format!("failed to get order {}: {error}", args.id))?;

    if let Some(status) = current
        .status
        .filter(|status| !status.admin_transitions().contains(&args.status))
    {
        return Err(format!(
            "order {} is {status}; it cannot be moved to {}",
            args.id, args.status
        ));
    }

    let updated = orders
        .update_status(args.id, args.status)
        .await
        .map_err(|error| format!("failed to update order {}: {error}", args.id))?;

    write_orders(io::stdout().lock(), [&updated]).map_err(|error| error.to_string())
}

async fn cancel(id: OrderId, api: &ApiConfig) -> Result<(), String> {
    let orders = context(api)?.orders;

    let current = orders
        .my_order(id)
        .await
        .map_err(|error| format!("failed to get order {id}: {error}"))?;

    if let Some(status) = current.status.filter(|status| !status.customer_can_cancel()) {
        return Err(format!("order {id} is {status} and can no longer be canceled"));
    }

    let canceled = orders
        .cancel_my_order(id)
        .await
        .map_err(|error| format!("failed to cancel order {id}: {error}"))?;

    write_orders(io::stdout().lock(), [&canceled]).map_err(|error| error.to_string())
}

fn write_order_details(order: &Order) -> io::Result<()> {
    let mut out = io::stdout().lock();

    write_orders(&mut out, [order]).map_err(io::Error::other)?;

    if let Some(address) = &order.address {
        writeln!(out, "address: {address}")?;
    }

    if let Some(notes) = &order.notes {
        writeln!(out, "notes: {notes}")?;
    }

    for item in &order.items {
        let name = item
            .menu_item_name
            .clone()
            .unwrap_or_else(|| format!("#{}", item.menu_item_id));

        let subtotal = item
            .subtotal
            .and_then(|subtotal| money_from_decimal(subtotal, STORE_CURRENCY).ok())
            .map(|subtotal| format_price(&subtotal))
            .unwrap_or_default();

        writeln!(out, "{}x {name} {subtotal}", item.quantity)?;
    }

    Ok(())
}
