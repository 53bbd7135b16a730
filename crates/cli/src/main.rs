//! User Registry CLI - database migrations, seeding, and user management.
//!
//! # Usage
//!
//! ```bash
//! # Create the users table
//! registry-cli migrate
//!
//! # Load users from a YAML file straight into the database
//! registry-cli seed users.yaml
//!
//! # Talk to a running server (REGISTRY_API_URL, default http://localhost:3333)
//! registry-cli users list
//! registry-cli users add --nome "Ana Souza" --email ana@example.com \
//!     --telefone "(11) 4000-0000" --cep 01001-000 --cpf 529.982.247-25
//! registry-cli users edit 1 --telefone "(11) 4000-1111"
//! registry-cli users delete 1
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Insert users from a YAML file
//! - `users` - List, add, edit, and delete users through the API

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use user_registry_core::UserId;

mod commands;

use commands::CommandError;
use commands::users::{EditArgs, NewUserArgs};

#[derive(Parser)]
#[command(name = "registry-cli")]
#[command(author, version, about = "User registry CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert users listed in a YAML file
    Seed {
        /// Path to the YAML file
        file: String,
    },
    /// Manage users through the registry API
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// Print the user list
    List,
    /// Register a new user
    Add(NewUserArgs),
    /// Change some fields of a user
    Edit {
        /// User id
        id: UserId,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Remove a user
    Delete {
        /// User id
        id: UserId,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so the rendered page owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file } => {
            commands::seed::users(&file).await?;
        }
        Commands::Users { action } => match action {
            UsersAction::List => commands::users::list().await?,
            UsersAction::Add(args) => commands::users::add(&args).await?,
            UsersAction::Edit { id, fields } => commands::users::edit(id, &fields).await?,
            UsersAction::Delete { id } => commands::users::delete(id).await?,
        },
    }
    Ok(())
}
