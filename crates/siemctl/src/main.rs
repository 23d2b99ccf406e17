//! SIEM Plus Console - terminal client for the SIEM Plus manager
//!
//! Authenticates against the manager API and renders agents, alerts,
//! detection rules, cases and dashboard statistics.

use clap::{Parser, Subcommand};
use siemctl::commands::{self, Console};
use siemctl::errors::EXIT_GENERAL_ERROR;
use siemctl::oplog::{ErrorDetails, LogEntry};
use siemctl::ui;
use std::time::Instant;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "siemctl")]
#[command(about = "SIEM Plus - security monitoring console", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Manager URL (overrides $SIEMPLUS_URL and the config file)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the manager
    Login {
        /// Operator email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,

        /// Password (prompted without echo when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// Show the logged-in operator
    Whoami,

    /// Security overview and key metrics
    Dashboard {
        /// Print the decoded payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// List endpoint agents
    Agents {
        /// Print the decoded payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// List alerts
    Alerts {
        /// Only this severity (critical, high, medium, low)
        #[arg(long)]
        severity: Option<String>,

        /// Only this status (open, investigating, resolved, false_positive)
        #[arg(long)]
        status: Option<String>,

        /// Print the decoded payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// List detection rules
    Rules {
        /// Print the decoded payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// List cases
    Cases {
        /// Print the decoded payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage response snapshots
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Remove all snapshots
    Clear,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let command = command_name(&cli.command);
    let started = Instant::now();
    let ts = LogEntry::now();
    let req_id = LogEntry::generate_req_id();

    let Cli { server, command: cmd } = cli;
    let result = run(server, cmd).await;

    let (exit_code, error) = match result {
        Ok(code) => (code, None),
        Err(e) => {
            ui::print_err(&format!("{:#}", e));
            (
                EXIT_GENERAL_ERROR,
                Some(ErrorDetails {
                    code: "unexpected".to_string(),
                    message: format!("{:#}", e),
                }),
            )
        }
    };

    let entry = LogEntry {
        ts,
        req_id,
        command: command.to_string(),
        exit_code,
        duration_ms: started.elapsed().as_millis() as u64,
        ok: exit_code == 0,
        error,
    };
    let _ = entry.write();

    std::process::exit(exit_code);
}

async fn run(server: Option<String>, command: Commands) -> anyhow::Result<i32> {
    let console = Console::init(server)?;

    match command {
        Commands::Login { email, password } => commands::login(&console, email, password).await,
        Commands::Logout => commands::logout(&console),
        Commands::Whoami => commands::whoami(&console),
        Commands::Dashboard { json } => commands::dashboard(&console, json).await,
        Commands::Agents { json } => commands::agents(&console, json).await,
        Commands::Alerts {
            severity,
            status,
            json,
        } => commands::alerts(&console, severity, status, json).await,
        Commands::Rules { json } => commands::rules(&console, json).await,
        Commands::Cases { json } => commands::cases(&console, json).await,
        Commands::Cache { action } => match action {
            CacheAction::Clear => commands::cache_clear(&console),
        },
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Login { .. } => "login",
        Commands::Logout => "logout",
        Commands::Whoami => "whoami",
        Commands::Dashboard { .. } => "dashboard",
        Commands::Agents { .. } => "agents",
        Commands::Alerts { .. } => "alerts",
        Commands::Rules { .. } => "rules",
        Commands::Cases { .. } => "cases",
        Commands::Cache { .. } => "cache",
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}
