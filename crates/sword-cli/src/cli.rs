//! sword - reverse engineer a relational schema into an entity model

mod logging;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use sword_driver_sqlite::SqliteMetadataSource;
use sword_model::{FkMode, ReaderOptions, RelationFetch, SchemaReader};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "sword")]
#[command(about = "Reverse engineer a relational schema into an entity model")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Which part of the database to read
#[derive(Args)]
struct ScopeArgs {
    /// Path to the SQLite database file
    database: String,

    /// Catalog to read
    #[arg(long)]
    catalog: Option<String>,

    /// Schema to read
    #[arg(long)]
    schema: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalogs and schemas the database exposes
    Scopes {
        /// Path to the SQLite database file
        database: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List the tables of the database
    Tables {
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Resolve entities, fields and relations of the database
    Inspect {
        #[command(flatten)]
        scope: ScopeArgs,

        /// YAML file with entity and column name overrides
        #[arg(long, env = "SWORD_NAMING_FILE")]
        naming_file: Option<PathBuf>,

        /// Keep foreign keys as scalar fields or resolve them as relations
        #[arg(long, default_value = "relation")]
        fk_mode: FkMode,

        /// Fetch strategy for to-one relations
        #[arg(long, default_value = "lazy")]
        fetch: RelationFetch,
    },
}

impl ScopeArgs {
    fn options(&self) -> ReaderOptions {
        let mut options = ReaderOptions::new();
        if let Some(catalog) = &self.catalog {
            options = options.with_catalog(catalog);
        }
        if let Some(schema) = &self.schema {
            options = options.with_schema(schema);
        }
        options
    }

    fn open(&self) -> anyhow::Result<SqliteMetadataSource> {
        open_database(&self.database)
    }
}

fn open_database(path: &str) -> anyhow::Result<SqliteMetadataSource> {
    SqliteMetadataSource::open(path).with_context(|| format!("Failed to open database '{}'", path))
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = if cli.verbose {
        logging::LoggingConfig::verbose()
    } else {
        logging::LoggingConfig::quiet()
    };
    logging::init(config)?;

    let rendered = match cli.command {
        Commands::Scopes { database, format } => {
            let source = open_database(&database)?;
            let scopes = SchemaReader::default()
                .list_scopes(&source)
                .await
                .context("Failed to list catalogs and schemas")?;
            output::render_scopes(&scopes, format)?
        }
        Commands::Tables { scope } => {
            let source = scope.open()?;
            let reader = SchemaReader::new(Default::default(), scope.options());
            let tables = reader
                .list_tables(&source)
                .await
                .context("Failed to list tables")?;
            output::render_tables(&tables, scope.format)?
        }
        Commands::Inspect {
            scope,
            naming_file,
            fk_mode,
            fetch,
        } => {
            let source = scope.open()?;
            let options = scope.options().with_fk_mode(fk_mode).with_fetch(fetch);
            let mut reader = SchemaReader::new(Default::default(), options);
            if let Some(path) = naming_file {
                reader = reader.with_override_file(path);
            }

            let schema = reader
                .read(&source)
                .await
                .context("Failed to read schema")?;
            tracing::info!(
                entities = schema.entities.len(),
                diagnostics = schema.diagnostics.len(),
                "schema read"
            );
            output::render_schema(&schema, scope.format)?
        }
    };

    println!("{}", rendered);
    Ok(())
}
