use analytics::AnalyticsEngine;
use anyhow::Context;
use api_client::{DataStore, RestDataStore};
use chrono::{Local, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use configuration::{Config, OutputFormat};
use core_types::{BalanceSheetSide, BudgetCategoryType, Expense, HistoryDate, Id, Item};
use rust_decimal::Decimal;

mod commands;
mod logging;
mod render;

/// The main entry point for the patrimonio dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load PATRIMONIO_* overrides and RUST_LOG from a .env file, if there is one.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => configuration::load_config_from(path),
        None => configuration::load_config(),
    }
    .context("Failed to load configuration")?;

    // Held until exit so buffered file logs are flushed.
    let _guard = logging::init(&config.logging)?;

    let as_of = cli
        .as_of
        .or(config.dashboard.as_of)
        .unwrap_or_else(|| Local::now().date_naive());
    let format = cli.format.unwrap_or(config.dashboard.output);

    let store = RestDataStore::new(&config.data_store).context("Failed to build the data store client")?;
    tracing::debug!(%as_of, base_url = %store.base_url(), "Starting.");
    let engine = AnalyticsEngine::new(as_of);

    let output = run(cli.command, &store, &engine, &config, format).await?;
    println!("{output}");
    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Personal wealth dashboard: net worth, year-to-date performance, stock targets
/// and a zero-based monthly budget.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file to read instead of ./config.toml.
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Totals, net worth, YTD performance and allocation.
    Summary,
    /// Net worth per recorded period.
    History,
    /// History, YTD and statistics of one item.
    Item(ItemArgs),
    /// Record a valuation for an item.
    Record(RecordArgs),
    /// Add an item to a category.
    AddItem(AddItemArgs),
    /// Rename an item.
    RenameItem(RenameItemArgs),
    /// Remove an item from its category.
    RemoveItem(ItemArgs),
    /// Market value and target IRR of every stock position.
    Stocks,
    /// Update the current price of a stock position.
    StockPrice(StockPriceArgs),
    /// Show or edit the monthly budget.
    #[command(subcommand)]
    Budget(BudgetCommands),
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Assets,
    Liabilities,
}

impl From<SideArg> for BalanceSheetSide {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Assets => BalanceSheetSide::Assets,
            SideArg::Liabilities => BalanceSheetSide::Liabilities,
        }
    }
}

#[derive(Args)]
struct ItemArgs {
    #[arg(long, value_enum)]
    side: SideArg,
    #[arg(long)]
    category: Id,
    #[arg(long)]
    item: Id,
}

#[derive(Args)]
struct RecordArgs {
    #[arg(long, value_enum)]
    side: SideArg,
    #[arg(long)]
    category: Id,
    #[arg(long)]
    item: Id,
    /// Period of the valuation (YYYY-MM or YYYY-MM-DD). Defaults to the month of
    /// the evaluation date.
    #[arg(long)]
    date: Option<HistoryDate>,
    #[arg(long, allow_hyphen_values = true)]
    amount: Decimal,
}

#[derive(Args)]
struct RenameItemArgs {
    #[arg(long, value_enum)]
    side: SideArg,
    #[arg(long)]
    category: Id,
    #[arg(long)]
    item: Id,
    #[arg(long)]
    name: String,
}

#[derive(Args)]
struct AddItemArgs {
    #[arg(long, value_enum)]
    side: SideArg,
    #[arg(long)]
    category: Id,
    /// Id of the new item. Generated when omitted.
    #[arg(long)]
    id: Option<Id>,
    #[arg(long)]
    name: String,
    /// Period of the opening valuation (YYYY-MM or YYYY-MM-DD).
    #[arg(long)]
    date: HistoryDate,
    #[arg(long, allow_hyphen_values = true)]
    amount: Decimal,
}

#[derive(Args)]
struct StockPriceArgs {
    #[arg(long)]
    id: Id,
    #[arg(long)]
    price: Decimal,
}

#[derive(Subcommand)]
enum BudgetCommands {
    /// Categories, spending and the zero-based summary.
    Show,
    /// Set the monthly income.
    Income { amount: Decimal },
    /// Set a category's target.
    Target { category: Id, amount: Decimal },
    /// Record an expense against a category.
    Expense(ExpenseArgs),
    /// Add a category of the given type.
    AddCategory { kind: BudgetCategoryType },
    /// Remove a category.
    RemoveCategory { category: Id },
    /// Rename a category.
    RenameCategory { category: Id, name: String },
}

#[derive(Args)]
struct ExpenseArgs {
    #[arg(long)]
    category: Id,
    #[arg(long)]
    amount: Decimal,
    #[arg(long)]
    description: String,
    /// Date of the expense. Defaults to the evaluation date.
    #[arg(long)]
    date: Option<NaiveDate>,
}

// ==============================================================================
// Command Dispatch
// ==============================================================================

/// Ids for records created from the command line.
fn new_id() -> Id {
    Id::Number(Utc::now().timestamp_millis())
}

async fn run<D: DataStore + ?Sized>(
    command: Commands,
    store: &D,
    engine: &AnalyticsEngine,
    config: &Config,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let currency = config.dashboard.currency.as_str();

    match command {
        Commands::Summary => {
            let data = store.get_financial_data().await?;
            let report = engine.dashboard(&data.assets, &data.liabilities)?;
            render::dashboard(&report, format, currency)
        }
        Commands::History => {
            let data = store.get_financial_data().await?;
            let report = engine.net_worth_history(&data.assets, &data.liabilities);
            render::net_worth_history(&report, format, currency)
        }
        Commands::Item(args) => {
            let item =
                commands::fetch_item(store, args.side.into(), &args.category, &args.item).await?;
            render::item(&engine.item_report(&item)?, format, currency)
        }
        Commands::Record(args) => {
            let category = commands::record_value(
                store,
                args.side.into(),
                &args.category,
                &args.item,
                args.date
                    .unwrap_or_else(|| HistoryDate::month_of(engine.as_of())),
                args.amount,
            )
            .await?;
            let item = category
                .find_item(&args.item)
                .context("Saved category no longer holds the item")?;
            render::item(&engine.item_report(item)?, format, currency)
        }
        Commands::AddItem(args) => {
            let id = args.id.unwrap_or_else(new_id);
            let item = Item::new(id.clone(), &args.name, args.amount, args.date)?;
            let category =
                commands::add_item(store, args.side.into(), &args.category, item).await?;
            let item = category
                .find_item(&id)
                .context("Saved category no longer holds the item")?;
            render::item(&engine.item_report(item)?, format, currency)
        }
        Commands::RenameItem(args) => {
            let category = commands::rename_item(
                store,
                args.side.into(),
                &args.category,
                &args.item,
                &args.name,
            )
            .await?;
            let item = category
                .find_item(&args.item)
                .context("Saved category no longer holds the item")?;
            render::item(&engine.item_report(item)?, format, currency)
        }
        Commands::RemoveItem(args) => {
            let (removed, category) =
                commands::remove_item(store, args.side.into(), &args.category, &args.item).await?;
            Ok(format!(
                "Removed {} from {}; category total is now {}.",
                removed.name,
                category.label,
                render::money(category.amount, currency)
            ))
        }
        Commands::Stocks => {
            let stocks = store.get_stocks().await?;
            render::stocks(&engine.stocks(&stocks)?, format, currency)
        }
        Commands::StockPrice(args) => {
            let stock = commands::update_stock_price(store, &args.id, args.price).await?;
            render::stocks(&engine.stocks(&[stock])?, format, currency)
        }
        Commands::Budget(budget_command) => {
            let budget = match budget_command {
                BudgetCommands::Show => store.get_monthly_budget().await?,
                BudgetCommands::Income { amount } => {
                    commands::update_budget(store, |b| b.set_income(amount)).await?
                }
                BudgetCommands::Target { category, amount } => {
                    commands::update_budget(store, |b| b.set_target(&category, amount)).await?
                }
                BudgetCommands::Expense(args) => {
                    let expense = Expense {
                        id: new_id(),
                        description: args.description,
                        amount: args.amount,
                        category_id: args.category,
                        date: args.date.unwrap_or(engine.as_of()),
                    };
                    commands::update_budget(store, |b| b.add_expense(expense)).await?
                }
                BudgetCommands::AddCategory { kind } => {
                    commands::update_budget(store, |b| b.add_category(new_id(), kind)).await?
                }
                BudgetCommands::RemoveCategory { category } => {
                    commands::update_budget(store, |b| b.remove_category(&category).map(|_| ()))
                        .await?
                }
                BudgetCommands::RenameCategory { category, name } => {
                    commands::update_budget(store, |b| b.rename_category(&category, &name)).await?
                }
            };
            render::budget(&budget, &engine.budget(&budget), format, currency)
        }
    }
}
