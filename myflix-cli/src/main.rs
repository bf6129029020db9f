//! myFlix CLI - browse the movie catalog and keep favorites from the terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{auth, config, favorites, movies, profile, users};

/// Environment variable holding the log filter (e.g. `MFX_LOG=debug`)
const LOG_ENV: &str = "MFX_LOG";

/// myFlix - movie catalog in your terminal
#[derive(Parser)]
#[command(name = "mfx", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Register {
        /// Username (prompted if omitted)
        #[arg(long, short)]
        username: Option<String>,
        /// Password (prompted if omitted)
        #[arg(long, short)]
        password: Option<String>,
        /// Email address
        #[arg(long, short)]
        email: Option<String>,
        /// Birthday (YYYY-MM-DD)
        #[arg(long, short)]
        birthday: Option<String>,
    },

    /// Log in and store the session
    Login {
        /// Username (prompted if omitted)
        #[arg(long, short)]
        username: Option<String>,
        /// Password (prompted if omitted)
        #[arg(long, short)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all movies
    Movies {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one movie by id or title
    Movie {
        /// Movie id
        #[arg(required_unless_present = "title", conflicts_with = "title")]
        id: Option<String>,
        /// Look up by title instead of id
        #[arg(long, short)]
        title: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a director
    Director {
        /// Director name
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a genre
    Genre {
        /// Genre name (case-insensitive)
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage favorite movies
    Favorites {
        #[command(subcommand)]
        command: favorites::FavoritesCommands,
    },

    /// Show, edit or delete your profile
    Profile {
        #[command(subcommand)]
        command: profile::ProfileCommands,
    },

    /// List all users
    Users {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one user
    User {
        /// User id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage client settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

/// Log to stderr so JSON output on stdout stays clean
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&commands::error_message(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Register { username, password, email, birthday } => {
            auth::register(username, password, email, birthday).await
        }
        Commands::Login { username, password } => auth::login(username, password).await,
        Commands::Logout => auth::logout(),
        Commands::Whoami { json } => auth::whoami(json),
        Commands::Movies { json } => movies::list(json).await,
        Commands::Movie { id, title, json } => movies::show(id, title, json).await,
        Commands::Director { name, json } => movies::director(&name, json).await,
        Commands::Genre { name, json } => movies::genre(&name, json).await,
        Commands::Favorites { command } => favorites::run(command).await,
        Commands::Profile { command } => profile::run(command).await,
        Commands::Users { json } => users::list(json).await,
        Commands::User { id, json } => users::show(&id, json).await,
        Commands::Config { command } => config::run(command),
    }
}
