//! ReelDeal CLI - Record store and reporting tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed sample data into absent collections
//! rd-cli seed
//!
//! # Overwrite every collection with sample data
//! rd-cli seed --force
//!
//! # Change the admin password (read from stdin)
//! echo 'new-password' | rd-cli admin set-password -u admin
//!
//! # Print this month's sales summary as JSON
//! rd-cli analytics summary --range this-month
//!
//! # Export orders to CSV
//! rd-cli export orders --range this-week --out sales.csv
//! ```
//!
//! All commands work on the record store in `REELDEAL_DATA_DIR`
//! (default `./data`), or `--data-dir`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reeldeal_core::DateRange;

mod commands;

#[derive(Parser)]
#[command(name = "rd-cli")]
#[command(author, version, about = "ReelDeal CLI tools")]
struct Cli {
    /// Record store directory
    #[arg(long, global = true, env = "REELDEAL_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write sample records into the store
    Seed {
        /// Overwrite collections that already exist
        #[arg(long)]
        force: bool,
    },
    /// Manage the admin credential
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Sales reports
    Analytics {
        #[command(subcommand)]
        action: AnalyticsAction,
    },
    /// Export records
    Export {
        #[command(subcommand)]
        target: ExportTarget,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Replace the admin username and password (password read from stdin)
    SetPassword {
        /// Admin username
        #[arg(short, long, default_value = "admin")]
        username: String,
    },
}

#[derive(Subcommand)]
enum AnalyticsAction {
    /// Print revenue, order count, average and top products as JSON
    Summary {
        /// Date range (`today`, `this-week`, `this-month`, `this-quarter`)
        #[arg(short, long, default_value = "this-month")]
        range: DateRange,
    },
}

#[derive(Subcommand)]
enum ExportTarget {
    /// Write every stored order as CSV
    Orders {
        /// Date range used in the default file name
        #[arg(short, long, default_value = "this-month")]
        range: DateRange,

        /// Output file (defaults to `reeldeal-sales-{range}-{millis}.csv`)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let store = commands::open_store(&cli.data_dir);

    match cli.command {
        Commands::Seed { force } => {
            commands::seed::run(&store, force).await?;
        }
        Commands::Admin { action } => match action {
            AdminAction::SetPassword { username } => {
                let password = commands::admin::read_password(std::io::stdin().lock())?;
                commands::admin::set_password(&store, &username, &password).await?;
            }
        },
        Commands::Analytics { action } => match action {
            AnalyticsAction::Summary { range } => {
                commands::report::summary(&store, range, std::io::stdout().lock()).await?;
            }
        },
        Commands::Export { target } => match target {
            ExportTarget::Orders { range, out } => {
                commands::report::export_orders(&store, range, out).await?;
            }
        },
    }
    Ok(())
}
