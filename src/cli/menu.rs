use std::io::{self, Write};

use clap::{Args, Subcommand};
use esfiharia::{
    catalog::{CategoryFilter, MenuItemId, MenuItemInput, MenuItemUpdate, available},
    config::ApiConfig,
    tables::write_menu,
};
use rust_decimal::Decimal;

use super::source::{MenuSourceArgs, context};

#[derive(Debug, Args)]
pub(crate) struct MenuCommand {
    #[command(subcommand)]
    command: MenuSubcommand,
}

#[derive(Debug, Subcommand)]
enum MenuSubcommand {
    /// List menu items
    List(ListArgs),

    /// List menu categories
    Categories(MenuSourceArgs),

    /// Show one menu item
    Show(ShowArgs),

    /// Create a menu item (admin)
    Create(MenuFormArgs),

    /// Update fields of a menu item (admin)
    Update(UpdateArgs),

    /// Flip whether a menu item can be ordered (admin)
    Toggle(IdArgs),

    /// Delete a menu item (admin)
    Delete(IdArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Only list items in this category ("all" for every category)
    #[arg(long, default_value = "all")]
    category: CategoryFilter,

    /// Only list items that can be ordered
    #[arg(long)]
    available: bool,

    #[command(flatten)]
    source: MenuSourceArgs,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Menu item id
    id: MenuItemId,

    #[command(flatten)]
    source: MenuSourceArgs,
}

#[derive(Debug, Args)]
struct IdArgs {
    /// Menu item id
    id: MenuItemId,
}

#[derive(Debug, Args)]
struct MenuFormArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Unit price, e.g. 7.90
    #[arg(long)]
    price: Decimal,

    /// Description
    #[arg(long)]
    description: Option<String>,

    /// Category label
    #[arg(long)]
    category: Option<String>,

    /// Image location
    #[arg(long)]
    image_url: Option<String>,

    /// Create the item as not orderable
    #[arg(long)]
    unavailable: bool,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Menu item id
    id: MenuItemId,

    /// New display name
    #[arg(long)]
    name: Option<String>,

    /// New unit price
    #[arg(long)]
    price: Option<Decimal>,

    /// New description
    #[arg(long)]
    description: Option<String>,

    /// New category label
    #[arg(long)]
    category: Option<String>,

    /// New image location
    #[arg(long)]
    image_url: Option<String>,

    /// New availability
    #[arg(long)]
    available: Option<bool>,
}

pub(crate) async fn run(command: MenuCommand, api: &ApiConfig) -> Result<(), String> {
    match command.command {
        MenuSubcommand::List(args) => list(args, api).await,
        MenuSubcommand::Categories(source) => list_categories(&source, api).await,
        MenuSubcommand::Show(args) => show(args, api).await,
        MenuSubcommand::Create(args) => create(args, api).await,
        MenuSubcommand::Update(args) => update(args, api).await,
        MenuSubcommand::Toggle(args) => toggle(args.id, api).await,
        MenuSubcommand::Delete(args) => delete(args.id, api).await,
    }
}

async fn list(args: ListArgs, api: &ApiConfig) -> Result<(), String> {
    let items = args
        .source
        .service(api)?
        .list_items(args.category)
        .await
        .map_err(|error| format!("failed to list menu: {error}"))?;

    let rendered = if args.available {
        write_menu(io::stdout().lock(), available(&items))
    } else {
        write_menu(io::stdout().lock(), &items)
    };

    rendered.map_err(|error| error.to_string())
}

async fn list_categories(source: &MenuSourceArgs, api: &ApiConfig) -> Result<(), String> {
    let categories = source
        .service(api)?
        .categories()
        .await
        .map_err(|error| format!("failed to list categories: {error}"))?;

    let mut out = io::stdout().lock();

    for category in categories {
        writeln!(out, "{category}").map_err(|error| error.to_string())?;
    }

    Ok(())
}

async fn show(args: ShowArgs, api: &ApiConfig) -> Result<(), String> {
    let item = args
        .source
        .service(api)?
        .get_item(args.id)
        .await
        .map_err(|error| format!("failed to get menu item {}: {error}", args.id))?;

    let mut out = io::stdout().lock();

    write_menu(&mut out, [&item]).map_err(|error| error.to_string())?;

    if let Some(description) = &item.description {
        writeln!(out, "{description}").map_err(|error| error.to_string())?;
    }

    Ok(())
}

async fn create(args: MenuFormArgs, api: &ApiConfig) -> Result<(), String> {
    let input = MenuItemInput {
        name: args.name,
        description: args.description,
        price: args.price,
        category: args.category,
        available: !args.unavailable,
        image_url: args.image_url,
    };

    let created = context(api)?
        .menu
        .create_item(input)
        .await
        .map_err(|error| format!("failed to create menu item: {error}"))?;

    write_menu(io::stdout().lock(), [&created]).map_err(|error| error.to_string())
}

async fn update(args: UpdateArgs, api: &ApiConfig) -> Result<(), String> {
    let update = MenuItemUpdate {
        name: args.name,
        description: args.description,
        price: args.price,
        category: args.category,
        available: args.available,
        image_url: args.image_url,
    };

    if update == MenuItemUpdate::default() {
        return Err("nothing to update".to_string());
    }

    let updated = context(api)?
        .menu
        .update_item(args.id, update)
        .await
        .map_err(|error| format!("failed to update menu item {}: {error}", args.id))?;

    write_menu(io::stdout().lock(), [&updated]).map_err(|error| error.to_string())
}

async fn toggle(id: MenuItemId, api: &ApiConfig) -> Result<(), String> {
    let menu = context(api)?.menu;

    let item = menu
        .get_item(id)
        .await
        .map_err(|error| format!("failed to get menu item {id}: {error}"))?;

    let updated = menu
        .update_item(id, MenuItemUpdate::availability(!item.available))
        .await
        .map_err(|error| format!("failed to update menu item {id}: {error}"))?;

    write_menu(io::stdout().lock(), [&updated]).map_err(|error| error.to_string())
}

async fn delete(id: MenuItemId, api: &ApiConfig) -> Result<(), String> {
    context(api)?
        .menu
        .delete_item(id)
        .await
        .map_err(|error| format!("failed to delete menu item {id}: {error}"))?;

    writeln!(io::stdout(), "deleted menu item {id}").map_err(|error| error.to_string())
}
