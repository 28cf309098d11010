use std::path::Path;

use chrono::Utc;
use storefront_core::{build_product_summary, load_catalog};

use crate::products::price_cell;

pub(crate) async fn run_ping(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    storefront_db::ping(pool).await?;
    println!("database reachable");
    Ok(())
}

pub(crate) async fn run_migrate(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let applied = storefront_db::run_migrations(pool).await?;
    if applied == 0 {
        println!("database schema is up to date");
    } else {
        println!("applied {applied} migration(s)");
    }
    Ok(())
}

/// Loads the catalog file and upserts every product by slug.
///
/// The whole file is validated before the first write, so a bad entry
/// leaves the table untouched.
pub(crate) async fn run_seed(pool: &sqlx::PgPool, path: &Path) -> anyhow::Result<()> {
    let catalog = load_catalog(path)?;
    tracing::info!(path = %path.display(), products = catalog.products.len(), "seeding catalog");

    let mut seeded = 0usize;
    for product in &catalog.products {
        let id = storefront_db::upsert_product(pool, product).await?;
        println!("  {id:<8}{}", product.slug);
        seeded += 1;
    }

    println!("seeded {seeded} product(s) from {}", path.display());
    Ok(())
}

/// Validates the catalog and prints what a seed would write.
pub(crate) fn preview_seed(path: &Path, currency_symbol: &str) -> anyhow::Result<()> {
    let catalog = load_catalog(path)?;
    let now = Utc::now();

    println!("dry run: {} product(s) in {}", catalog.products.len(), path.display());
    for product in &catalog.products {
        let summary = build_product_summary(product, now);
        println!(
            "  {:<32}{:<24}{}",
            summary.slug,
            price_cell(&summary.price, currency_symbol),
            summary.availability.label()
        );
    }
    Ok(())
}
