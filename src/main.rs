mod db;
mod extract;
mod fact;
mod format;
mod scrape;
mod storage;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use extract::{Site, SiteExtractor};
use format::{DefaultFormatter, FactFormatter, HoorayHeroesFormatter};
use scrape::Scraper;
use storage::DbStorage;

#[derive(Parser)]
#[command(name = "fact_scraper", about = "Scrape fun-fact pages into a local fact store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatterKind {
    Default,
    Hoorayheroes,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StorageKind {
    Db,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database schema
    Init {
        #[arg(long, default_value = db::DEFAULT_DB_PATH)]
        db: PathBuf,
    },
    /// Scrape one site and save (or delete) its facts
    Scrape {
        /// Source site
        #[arg(value_enum)]
        extractor: Site,
        /// Storage backend
        #[arg(long, value_enum, default_value_t = StorageKind::Db)]
        storage: StorageKind,
        /// Formatter override (defaults to the site's own formatter)
        #[arg(long, value_enum)]
        formatter: Option<FormatterKind>,
        /// Overwrite existing facts when identifiers already exist
        #[arg(long = "override")]
        override_existing: bool,
        /// Delete the extracted facts from storage instead of saving them
        #[arg(long)]
        delete: bool,
        #[arg(long, default_value = db::DEFAULT_DB_PATH)]
        db: PathBuf,
    },
    /// Show storage statistics
    Stats {
        #[arg(long, default_value = db::DEFAULT_DB_PATH)]
        db: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { db: path } => {
            let conn = db::connect(&path)?;
            db::init_schema(&conn)?;
            println!("Schema ready at {}", path.display());
            Ok(())
        }
        Commands::Scrape {
            extractor,
            storage,
            formatter,
            override_existing,
            delete,
            db: path,
        } => {
            if delete && override_existing {
                warn!("--override has no effect in delete mode; ignoring");
            }

            let formatter: Option<Box<dyn FactFormatter>> = formatter.map(|kind| match kind {
                FormatterKind::Default => Box::new(DefaultFormatter) as Box<dyn FactFormatter>,
                FormatterKind::Hoorayheroes => Box::new(HoorayHeroesFormatter::default()),
            });
            let extractor = match formatter {
                Some(f) => SiteExtractor::with_formatter(extractor, f),
                None => SiteExtractor::new(extractor),
            };

            let conn = db::connect(&path)?;
            db::init_schema(&conn)?;
            let storage = match storage {
                StorageKind::Db => DbStorage::new(conn, override_existing),
            };

            info!(
                "Running scraper (override={}, delete={})",
                override_existing, delete
            );
            Scraper::new(extractor, storage).scrape(delete).await
        }
        Commands::Stats { db: path } => {
            let conn = db::connect(&path)?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Facts:      {}", s.facts);
            println!("Categories: {}", s.categories);
            Ok(())
        }
    }
}
