use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use configuration::{LogFormat, Settings};
use core_types::{Record, RecordKind};
use database::{connect, run_migrations, DbRepository};
use std::path::PathBuf;

/// The main entry point for the Gridiron stats application.
///
/// Runs on a single-threaded runtime: requests are handled one after another
/// against a single store file.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    let mut settings = configuration::load_config(cli.config.as_deref())
        .with_context(|| "Failed to load configuration")?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args, &mut settings).await,
        Commands::List(args) => {
            let _log_guard = configuration::init_tracing(&settings.logging)?;
            handle_list(args, &settings).await
        }
        Commands::Migrate => {
            let _log_guard = configuration::init_tracing(&settings.logging)?;
            handle_migrate(&settings).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Record American-football games, drives and plays through a small web app.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./gridiron.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web application.
    Serve(ServeArgs),
    /// Print the stored records.
    List(ListArgs),
    /// Create the record store if needed and apply the schema.
    Migrate,
}

#[derive(Args)]
struct ServeArgs {
    /// Address to listen on, overriding `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overriding `server.port`.
    #[arg(long)]
    port: Option<u16>,

    /// Log output style, overriding `logging.format`.
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Args)]
struct ListArgs {
    /// Only list one kind of record (game, drive or play).
    #[arg(long)]
    kind: Option<RecordKind>,

    /// Print JSON instead of tables.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs, settings: &mut Settings) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    if let Some(format) = args.log_format {
        settings.logging.format = format;
    }
    settings.validate()?;

    let _log_guard = configuration::init_tracing(&settings.logging)?;
    web_server::run_server(settings).await
}

async fn handle_list(args: ListArgs, settings: &Settings) -> anyhow::Result<()> {
    let db_repo = open_store(settings).await?;
    let records = match args.kind {
        Some(kind) => db_repo.get_records(kind).await?,
        None => db_repo.get_all_records().await?,
    };
    db_repo.close().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let kinds: Vec<RecordKind> = match args.kind {
        Some(kind) => vec![kind],
        None => RecordKind::ALL.to_vec(),
    };
    for kind in kinds {
        println!("{}\n{}\n", kind.title(), records_table(kind, &records));
    }
    Ok(())
}

async fn handle_migrate(settings: &Settings) -> anyhow::Result<()> {
    let db_repo = open_store(settings).await?;
    db_repo.close().await;
    tracing::info!(url = %settings.database.url, "Record store is up to date.");
    Ok(())
}

async fn open_store(settings: &Settings) -> anyhow::Result<DbRepository> {
    let db_pool = connect(&settings.database)
        .await
        .with_context(|| format!("Failed to open record store at {}", settings.database.url))?;
    run_migrations(&db_pool).await?;
    Ok(DbRepository::new(db_pool))
}

/// Builds a terminal table of the records of one kind.
fn records_table(kind: RecordKind, records: &[Record]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(kind.columns().to_vec());
    for record in records.iter().filter(|r| r.kind() == kind) {
        table.add_row(record.cells());
    }
    table
}
