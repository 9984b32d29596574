mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::habits::HabitsCommand;

#[derive(Parser)]
#[command(name = "studydesk")]
#[command(about = "Track your assignments and habits, synced to your remote collections")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new assignment
    Add {
        name: String,

        /// Class the assignment belongs to
        #[arg(short, long)]
        class: String,

        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: String,
    },
    /// Show the assignment list
    List {
        /// Order by due date instead of the order assignments were added
        #[arg(long)]
        by_due: bool,
    },
    /// Mark an assignment as completed
    Done {
        /// Assignment id (a unique prefix is enough)
        id: String,
    },
    /// Change an assignment's priority
    Priority {
        /// Assignment id (a unique prefix is enough)
        id: String,

        /// New priority: low, medium or high
        priority: String,
    },
    /// Remove an assignment
    Remove {
        /// Assignment id (a unique prefix is enough)
        id: String,
    },
    /// Export the assignment report
    Export {
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Fetch the remote collections once and keep the result locally
    Pull,
    /// Mirror the local lists to the remote collections
    Push,
    /// Watch the remote collections and repaint on every change
    Watch,
    /// Track daily habits
    Habits {
        #[command(subcommand)]
        command: Option<HabitsCommand>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Add { name, class, due } => commands::add::run(&name, &class, &due).await,
        Commands::List { by_due } => commands::list::run(by_due),
        Commands::Done { id } => commands::done::run(&id).await,
        Commands::Priority { id, priority } => commands::priority::run(&id, &priority).await,
        Commands::Remove { id } => commands::remove::run(&id).await,
        Commands::Export { out } => commands::export::run(out.as_deref()),
        Commands::Pull => commands::pull::run().await,
        Commands::Push => commands::push::run().await,
        Commands::Watch => commands::watch::run().await,
        Commands::Habits { command } => commands::habits::run(command).await,
    }
}

/// Core warnings (failed durable writes, failed mirror calls) land on
/// stderr so they never corrupt rendered tables. RUST_LOG overrides.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
