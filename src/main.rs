use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expensio::auth::{AuthProvider, LocalAuthProvider};
use expensio::cli::{
    handle_auth_command, handle_expense_command, handle_screen_command, AuthCommands,
    ExpenseCommands, ScreenCommands,
};
use expensio::config::{ExpensioPaths, Settings};
use expensio::storage::JsonExpenseStore;

#[derive(Parser)]
#[command(
    name = "expensio",
    version,
    about = "Track personal expenses from the terminal",
    long_about = "Expensio records personal expenses and summarizes them: today, \
                  last-7-days and this-month totals, a searchable history, and \
                  spending by category for a chosen time range."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Auth(AuthCommands),

    #[command(flatten)]
    Expense(ExpenseCommands),

    #[command(flatten)]
    Screen(ScreenCommands),

    /// Show current configuration and paths
    Config,
}

/// Log to stderr; RUST_LOG wins over the configured level
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ExpensioPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_level);

    let store = JsonExpenseStore::open(paths.expenses_file())?;
    let auth = LocalAuthProvider::open(paths.users_file(), paths.session_file())?;
    let identity = auth.current_identity();

    match cli.command {
        Some(Commands::Auth(cmd)) => handle_auth_command(&auth, cmd)?,
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&store, identity.as_ref(), &settings, cmd)?
        }
        Some(Commands::Screen(cmd)) => {
            handle_screen_command(&store, identity.as_ref(), &settings, cmd)?
        }
        Some(Commands::Config) => {
            println!("Expensio Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Expenses file:   {}", paths.expenses_file().display());
            println!("Users file:      {}", paths.users_file().display());
            println!("Session file:    {}", paths.session_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Recent limit:     {}", settings.recent_limit);
            println!("  Default range:    {}", settings.default_range);
            println!("  Watch interval:   {} ms", settings.watch_interval_ms);
            println!("  Log level:        {}", settings.log_level);
            println!();
            match &identity {
                Some(identity) => println!("Signed in as {}", identity.email),
                None => println!("Not signed in"),
            }
        }
        None => {
            println!("Expensio - personal expense tracking");
            println!();
            println!("Run 'expensio --help' for usage information.");
            println!("Run 'expensio signup' to create an account.");
        }
    }

    Ok(())
}
