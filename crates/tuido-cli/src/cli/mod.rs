//! CLI entry and dispatch.
//!
//! Running with no subcommand launches the full-screen TUI. Subcommands are
//! headless one-shot operations against the same API and session store the
//! TUI uses.

use anyhow::{Context, Result};
use clap::Parser;
use tuido_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "tuido")]
#[command(version)]
#[command(about = "Terminal client for the todo API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        username: String,
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account (does not log in)
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Clear the stored session token
    Logout,
    /// Work with todos
    Todo {
        #[command(subcommand)]
        command: TodoCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum TodoCommands {
    /// List all todos
    List,
    /// Show a todo by id
    Show {
        #[arg(value_name = "TODO_ID")]
        id: String,
    },
    /// Edit a todo's title and/or description
    Edit {
        #[arg(value_name = "TODO_ID")]
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // default to the TUI
    let Some(command) = cli.command else {
        // stdout belongs to the alternate screen, so the TUI logs to a file
        let _guard = logging::init_tui(&config::paths::logs_dir())?;
        return tuido_tui::run(&config);
    };

    logging::init_headless()?;

    match command {
        Commands::Login { username, password } => {
            commands::auth::login(&config, username, password).await
        }
        Commands::Register {
            username,
            email,
            password,
        } => commands::auth::register(&config, username, email, password).await,
        Commands::Logout => commands::auth::logout(),

        Commands::Todo { command } => match command {
            TodoCommands::List => commands::todo::list(&config).await,
            TodoCommands::Show { id } => commands::todo::show(&config, &id).await,
            TodoCommands::Edit {
                id,
                title,
                description,
            } => commands::todo::edit(&config, &id, title, description).await,
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
