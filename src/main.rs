use anyhow::Result;
use clap::{Parser, Subcommand};

use finance_tracker::cli::{
    handle_ledger_command, handle_register, handle_report_command, print_default_tags,
    with_session, LedgerCommands, ReportCommands,
};
use finance_tracker::config::{FinancePaths, Settings};
use finance_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "finance",
    version,
    about = "Personal income and expense tracker",
    long_about = "Finance Tracker keeps a password-protected ledger of income and \
                  expenses per user, with tagged categories, a running balance, \
                  and income/expense breakdowns."
)]
struct Cli {
    /// User to act as
    #[arg(short, long, global = true, env = "FINANCE_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, database and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Register a new user
    Register {
        /// Username
        username: String,
    },

    /// List the suggested tags for each entry kind
    Tags,

    #[command(flatten)]
    Ledger(LedgerCommands),

    #[command(flatten)]
    Report(ReportCommands),
}

fn init_tracing() {
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "finance_tracker=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FinancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(&paths)?;
    let user = cli.user.as_deref();

    match cli.command {
        Some(Commands::Init) => {
            println!("Initialized Finance Tracker at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Database: {}", paths.database_file().display());
            println!();
            println!("Run 'finance register <username>' to create a user.");
        }
        Some(Commands::Config) => {
            println!("Finance Tracker Configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Database:       {}", paths.database_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Default breakdown: {}", settings.default_breakdown);
        }
        Some(Commands::Register { username }) => {
            handle_register(&storage, &settings, &username)?;
        }
        Some(Commands::Tags) => print_default_tags(),
        Some(Commands::Ledger(cmd)) => {
            with_session(&storage, &settings, user, |session| {
                handle_ledger_command(&storage, &settings, session, cmd)
            })?;
        }
        Some(Commands::Report(cmd)) => {
            with_session(&storage, &settings, user, |session| {
                handle_report_command(&storage, &settings, session, cmd)
            })?;
        }
        None => {
            println!("Finance Tracker - personal income and expense ledger");
            println!();
            println!("Run 'finance --help' for usage information.");
        }
    }

    Ok(())
}
