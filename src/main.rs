use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
#[allow(unused_imports)]
use tracing::*;
use tracing_subscriber::prelude::*;

use config::Configuration;
use operation::Operation;
use session::{Action, Session};

mod allocate;
mod config;
mod error;
mod json;
mod ledger;
mod model;
mod operation;
mod parsing;
mod print;
mod session;
mod shares;
mod shell;
mod storage;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    path: Option<PathBuf>,
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an empty ledger holding only Total
    New {
        #[arg(short, long)]
        force: bool,
    },
    /// List category ids and percentages
    List,
    /// Print the ledger as JSON
    Json(json::Command),
    /// Work on the ledger interactively
    Shell,
    #[command(flatten)]
    Operation(Operation),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    fn get_rust_log(verbose: u8) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| {
            match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
            .into()
        })
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(get_rust_log(cli.verbose)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let configuration = match &cli.config {
        Some(path) => Configuration::load(path)?,
        None => Configuration::default(),
    };

    let path = configuration
        .ledger_path(cli.path.as_ref())
        .ok_or_else(|| anyhow!("no ledger file, give --path or configure one"))?;
    let capacity = configuration.capacity;

    match cli.command {
        Commands::New { force } => {
            if path.exists() && !force {
                return Err(anyhow!(
                    "{} already exists, use --force to replace it",
                    path.display()
                ));
            }

            let mut session = Session::new(capacity, Some(path));
            session.execute(Action::Save(None))?;

            Ok(())
        }
        Commands::List => {
            let session = Session::open(&path, capacity)?;
            println!("{}", print::ids_and_names(session.ledger()));
            println!();
            println!("{}", print::names_and_percentages(session.ledger()));

            Ok(())
        }
        Commands::Json(cmd) => {
            let session = Session::open(&path, capacity)?;
            json::execute_command(session.ledger(), &cmd)
        }
        Commands::Shell => {
            let session = if path.exists() {
                Session::open(&path, capacity)?
            } else {
                info!("{} does not exist, starting a new ledger", path.display());
                Session::new(capacity, Some(path))
            };

            shell::run(session)?;

            Ok(())
        }
        Commands::Operation(operation) => {
            let mut session = Session::open(&path, capacity)?;
            let outcome = session.execute(operation.into_action())?;
            if let Some(text) = print::render(&outcome) {
                println!("{}", text);
            }
            if session.is_dirty() {
                session.execute(Action::Save(None))?;
            }

            Ok(())
        }
    }
}
