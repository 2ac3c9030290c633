//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `hostdiff` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use hostdiff::config::{Command, Opt};
use hostdiff::initialization::init_logger_with;
use hostdiff::storage::{delete_search, list_searches};
use hostdiff::{
    open_store, run_comparison, run_server, save_comparison, ApiCredentials, CompareRequest,
    Config,
};

#[tokio::main]
async fn main() {
    // Load API credentials from a .env file (if it exists)
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();
    // Credentials are loaded only by the subcommands that call the APIs
    let config = Config::from_opt(&opt, ApiCredentials::default());

    if let Err(e) = init_logger_with(config.log_level.clone().into(), config.log_format.clone()) {
        eprintln!("hostdiff error: Failed to initialize logger: {e}");
        process::exit(1);
    }

    if let Err(e) = run(opt.command, config).await {
        eprintln!("hostdiff error: {:#}", e);
        process::exit(1);
    }
}

async fn run(command: Command, mut config: Config) -> Result<()> {
    match command {
        Command::Serve { .. } => {
            config.credentials = ApiCredentials::from_env()?;
            run_server(&config).await
        }
        Command::Compare {
            legacy_query,
            new_query,
            virtual_hosts,
            fetch_all,
            save,
            overwrite,
        } => {
            config.credentials = ApiCredentials::from_env()?;
            let request = CompareRequest {
                legacy_query,
                new_query,
                virtual_hosts,
                fetch_all,
            };

            let result = run_comparison(&config, &request).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);

            if let Some(name) = save {
                let pool = open_store(&config.db_path).await?;
                let outcome = save_comparison(&pool, &name, &request, &result, overwrite)
                    .await
                    .context("Failed to save search")?;
                eprintln!("Saved as '{}' (id {})", name.trim(), outcome.id());
            }
            Ok(())
        }
        Command::List => {
            let pool = open_store(&config.db_path).await?;
            let searches = list_searches(&pool).await?;
            println!("{}", serde_json::to_string_pretty(&searches)?);
            Ok(())
        }
        Command::Delete { id } => {
            let pool = open_store(&config.db_path).await?;
            let deleted = delete_search(&pool, id).await?;
            if deleted == 0 {
                eprintln!("No saved search with id {id}");
            } else {
                eprintln!("Deleted saved search {id}");
            }
            Ok(())
        }
    }
}
