use chrono::Utc;
use storefront_core::{build_product_summary, build_product_view, format_amount, PriceDisplay};

/// Renders a price as `current` or `current (was original)` when on sale.
pub(crate) fn price_cell(price: &PriceDisplay, currency_symbol: &str) -> String {
    let current = format_amount(price.current_price(), currency_symbol);
    match price.struck_price() {
        Some(original) => format!(
            "{current} (was {})",
            format_amount(original, currency_symbol)
        ),
        None => current,
    }
}

pub(crate) async fn run_list(
    pool: &sqlx::PgPool,
    category: Option<&str>,
    limit: i64,
    currency_symbol: &str,
) -> anyhow::Result<()> {
    let rows = storefront_db::list_products(
        pool,
        storefront_db::ProductListFilters {
            category,
            limit: Some(limit.clamp(1, 200)),
        },
    )
    .await?;

    if rows.is_empty() {
        println!("no products found");
        return Ok(());
    }

    let now = Utc::now();
    println!(
        "{:<8}{:<32}{:<16}{:<28}{}",
        "ID", "SLUG", "CATEGORY", "PRICE", "AVAILABILITY"
    );
    for row in rows {
        let id = row.id;
        let record = match row.into_record() {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(product_id = id, error = %e, "skipping invalid stored product");
                continue;
            }
        };
        let summary = build_product_summary(&record, now);
        println!(
            "{:<8}{:<32}{:<16}{:<28}{}",
            id,
            summary.slug,
            summary.category.as_deref().unwrap_or("-"),
            price_cell(&summary.price, currency_symbol),
            summary.availability.label()
        );
    }
    Ok(())
}

pub(crate) async fn run_show(
    pool: &sqlx::PgPool,
    id: i64,
    currency_symbol: &str,
) -> anyhow::Result<()> {
    let record = match storefront_db::get_product(pool, id).await {
        Ok(row) => row.into_record()?,
        Err(storefront_db::DbError::NotFound) => anyhow::bail!("product {id} not found"),
        Err(e) => return Err(e.into()),
    };
    let view = build_product_view(&record, Utc::now());

    println!("{} ({})", view.name, view.slug);
    if let Some(name_bn) = &view.name_bn {
        println!("  name (bn):    {name_bn}");
    }
    if let Some(brand) = &view.brand {
        println!("  brand:        {brand}");
    }
    println!(
        "  category:     {}",
        view.category.as_deref().unwrap_or("-")
    );
    println!("  price:        {}", price_cell(&view.price, currency_symbol));
    println!("  availability: {}", view.availability.label());
    println!("  image:        {}", view.primary_image_url);
    if let Some(description) = &view.description {
        println!("  description:  {description}");
    }
    if !view.specifications.is_empty() {
        println!("  specifications:");
        for spec in &view.specifications {
            println!("    {:<20}{}", spec.name, spec.value);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn price_cell_includes_struck_price_when_on_sale() {
        let price = PriceDisplay {
            original_price: Decimal::new(650, 0),
            discounted_price: Decimal::new(600, 0),
            is_discounted: true,
        };
        assert_eq!(price_cell(&price, "৳"), "৳600.00 (was ৳650.00)");
    }

    #[test]
    fn price_cell_is_plain_when_not_discounted() {
        let price = PriceDisplay {
            original_price: Decimal::new(480, 0),
            discounted_price: Decimal::new(480, 0),
            is_discounted: false,
        };
        assert_eq!(price_cell(&price, "$"), "$480.00");
    }
}
