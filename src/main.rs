use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use rollcall::cli::args::{Cli, Commands};
use rollcall::cli::commands;
use rollcall::config::{Config, Paths};
use rollcall::logging;
use rollcall::presence::PresenceStore;
use rollcall::storage::Database;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let started = Instant::now();
    let cli = Cli::parse();
    let paths = Paths::default();

    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file.clone());
    let config = Config::load_from_path(&config_path)?;

    let level = if cli.verbose {
        logging::VERBOSE_LEVEL
    } else {
        config.logging.level.as_str()
    };
    logging::init(level);

    let db_path = match cli.db.clone() {
        Some(path) => path,
        None => {
            paths.ensure_dirs()?;
            paths.database.clone()
        }
    };
    let db = Database::open_at(&db_path)
        .with_context(|| format!("opening presence database {}", db_path.display()))?;
    let store = PresenceStore::with_database(db);

    let format = cli.output.unwrap_or(config.general.default_output);
    let gate = config.admin_gate();

    let output = match cli.command {
        Commands::Record(args) => commands::record(&store, args.command, format)?,
        Commands::Ingest { file } => commands::ingest(&store, file.as_deref(), format)?,
        Commands::Check(args) => commands::check(&store, &gate, &config.report, &args, format)?,
        Commands::Export(args) => {
            let dir = args.dir.clone().unwrap_or_else(|| paths.exports.clone());
            commands::export(&store, &gate, args.chat_id, args.requester, &dir, format)?
        }
        Commands::Chats => commands::chats(&store, format)?,
        Commands::Status => commands::status(&store, &db_path, started.elapsed(), format)?,
    };

    store.close()?;

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
