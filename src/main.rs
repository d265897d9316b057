//! mouse-storage: store and recall named mouse positions per application,
//! window title and mode

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level as TraceLevel;
use tracing_subscriber::FmtSubscriber;

use mouse_storage::commands::host::{CliHost, HostArgs};
use mouse_storage::commands::{self, Env};
use mouse_storage::config;

#[derive(Parser)]
#[command(name = "mouse-storage")]
#[command(about = "Context-sensitive storage for named mouse positions", long_about = None)]
#[command(version)]
struct Cli {
    /// Storage root (defaults to $MOUSE_STORAGE_ROOT or the platform data directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    host: HostArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the cursor position under a name for the active context
    Store {
        /// Position name
        name: String,
    },

    /// Overwrite a stored position for the active context
    Update {
        /// Position name
        name: String,
    },

    /// Remove the best matching stored position
    Remove {
        /// Position name
        name: String,
    },

    /// Move the cursor to the best matching stored position
    Go {
        /// Position name
        name: String,
    },

    /// Set the reference point to the cursor position
    Reference,

    /// Show or change the manually set mode
    Mode {
        #[command(subcommand)]
        action: Option<ModeAction>,
    },

    /// List stored positions
    List {
        /// Only list positions with this name
        name: Option<String>,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ModeAction {
    /// Override the default mode
    Set { mode: String },
    /// Fall back to the default mode
    Clear,
    /// Print the current mode
    Show,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the settings
    Show,
    /// Change one setting (application-specific, title, default-mode, required-mode, relativity)
    Set { key: String, value: String },
}

fn init_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose {
        TraceLevel::DEBUG
    } else {
        match std::env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "warn".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => TraceLevel::TRACE,
            "debug" => TraceLevel::DEBUG,
            "info" => TraceLevel::INFO,
            "error" => TraceLevel::ERROR,
            _ => TraceLevel::WARN,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let root = config::storage_root(cli.root)?;
    let host = CliHost::new(cli.host);
    let mut env = Env::load(root, &host)?;

    let succeeded = match cli.command {
        Commands::Store { name } => commands::positions::store(&env, &name)?,
        Commands::Update { name } => commands::positions::update(&env, &name)?,
        Commands::Remove { name } => commands::positions::remove(&env, &name)?,
        Commands::Go { name } => commands::positions::go(&env, &name)?,

        Commands::Reference => {
            commands::reference::execute(&env)?;
            true
        }

        Commands::Mode { action } => {
            match action.unwrap_or(ModeAction::Show) {
                ModeAction::Set { mode } => commands::mode::set(&mut env, &mode)?,
                ModeAction::Clear => commands::mode::clear(&mut env)?,
                ModeAction::Show => println!("{}", commands::mode::show(&env)),
            }
            true
        }

        Commands::List { name } => {
            let output = commands::list::execute(&env.store, name.as_deref())?;
            println!("{}", output);
            true
        }

        Commands::Config { action } => {
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => println!("{}", commands::settings::show(&env)?),
                ConfigAction::Set { key, value } => {
                    commands::settings::set(&mut env, &key, &value)?
                }
            }
            true
        }
    };

    if !succeeded {
        std::process::exit(1);
    }

    Ok(())
}
