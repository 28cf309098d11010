mod db;
mod products;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront-cli")]
#[command(about = "Storefront catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance: connectivity, migrations, catalog seeding
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Inspect products with prices resolved as the storefront shows them
    Products {
        #[command(subcommand)]
        command: ProductsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
    /// Load the catalog file and upsert every product
    Seed {
        /// Catalog YAML to load; defaults to `STOREFRONT_CATALOG_PATH`
        #[arg(long)]
        path: Option<PathBuf>,

        /// Validate and print what would be written; needs no database or `DATABASE_URL`
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Debug, Subcommand)]
enum ProductsCommands {
    /// List products with their current price and availability
    List {
        #[arg(long)]
        category: Option<String>,

        #[arg(long, default_value_t = 50)]
        limit: i64,
    },
    /// Show the full resolved view of one product
    Show {
        /// Internal product id
        id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("storefront-cli: run with --help to see available commands");
        return Ok(());
    };

    let settings = storefront_core::load_catalog_settings();
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Commands::Db {
        command: DbCommands::Seed {
            path,
            dry_run: true,
        },
    } = &command
    {
        let path = path.as_deref().unwrap_or(settings.catalog_path.as_path());
        return db::preview_seed(path, &settings.currency_symbol);
    }

    let config = storefront_core::load_app_config()?;
    let pool = storefront_db::connect_pool(
        &config.database_url,
        storefront_db::PoolConfig::from_app_config(&config),
    )
    .await?;

    match command {
        Commands::Db { command } => match command {
            DbCommands::Ping => db::run_ping(&pool).await,
            DbCommands::Migrate => db::run_migrate(&pool).await,
            DbCommands::Seed { path, .. } => {
                let path = path.unwrap_or_else(|| config.catalog_path.clone());
                db::run_seed(&pool, &path).await
            }
        },
        Commands::Products { command } => match command {
            ProductsCommands::List { category, limit } => {
                products::run_list(&pool, category.as_deref(), limit, &config.currency_symbol)
                    .await
            }
            ProductsCommands::Show { id } => {
                products::run_show(&pool, id, &config.currency_symbol).await
            }
        },
    }
}
