//! Database operations for the `products` table.
//!
//! Scalar fields live in columns; the nested parts of a product document
//! (discount, specifications, images) are stored as JSONB in the same shape
//! the catalog file and API use.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use sqlx::{types::Json, PgPool};
use storefront_core::{
    DiscountDocument, PriceValue, ProductDocument, ProductImage, ProductRecord, Specification,
};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub name_bn: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    /// JSONB document parts are kept as raw JSON and decoded in
    /// [`ProductRow::into_record`], so one malformed row cannot fail a whole
    /// listing query.
    pub discount: Option<Json<serde_json::Value>>,
    pub specifications: Json<serde_json::Value>,
    pub images: Json<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRow {
    /// Validate the stored document and convert it into a [`ProductRecord`].
    ///
    /// The stored slug is kept even if the name has since changed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::MalformedRecord`] if a JSONB column does not have the
    /// document shape, or [`DbError::InvalidRecord`] if the stored discount or
    /// price fails validation.
    pub fn into_record(self) -> Result<ProductRecord, DbError> {
        let id = self.id;
        let slug = self.slug;

        let discount: Option<DiscountDocument> = match self.discount {
            Some(Json(raw)) => decode_column(id, "discount", raw)?,
            None => None,
        };
        let specifications: Vec<Specification> =
            decode_column(id, "specifications", self.specifications.0)?;
        let images: Vec<ProductImage> = decode_column(id, "images", self.images.0)?;

        let document = ProductDocument {
            name: self.name,
            name_bn: self.name_bn,
            description: self.description,
            category: self.category,
            brand: self.brand,
            price: PriceValue::from(self.price),
            discount,
            stock: self.stock,
            specifications,
            images,
        };

        let mut record = ProductRecord::try_from(document)
            .map_err(|source| DbError::InvalidRecord { id, source })?;
        record.slug = slug;
        Ok(record)
    }
}

fn decode_column<T: DeserializeOwned>(
    id: i64,
    column: &'static str,
    raw: serde_json::Value,
) -> Result<T, DbError> {
    serde_json::from_value(raw).map_err(|source| DbError::MalformedRecord { id, column, source })
}

/// Input filters for product listing.
///
/// `limit` is `None` to return all products, or `Some(n)` to cap results.
#[derive(Debug, Clone, Default)]
pub struct ProductListFilters<'a> {
    pub category: Option<&'a str>,
    pub limit: Option<i64>,
}

const PRODUCT_COLUMNS: &str = "id, slug, name, name_bn, description, category, brand, price, \
     stock, discount, specifications, images, created_at, updated_at";

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Upserts a product row keyed by slug.
///
/// Conflicts on `slug` replace every document field and bump `updated_at`.
///
/// Returns the internal `id` of the upserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_product(pool: &PgPool, product: &ProductRecord) -> Result<i64, DbError> {
    let discount = product
        .discount
        .as_ref()
        .map(|d| Json(d.to_document()));

    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO products \
             (slug, name, name_bn, description, category, brand, price, stock, \
              discount, specifications, images) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         ON CONFLICT (slug) DO UPDATE SET \
             name           = EXCLUDED.name, \
             name_bn        = EXCLUDED.name_bn, \
             description    = EXCLUDED.description, \
             category       = EXCLUDED.category, \
             brand          = EXCLUDED.brand, \
             price          = EXCLUDED.price, \
             stock          = EXCLUDED.stock, \
             discount       = EXCLUDED.discount, \
             specifications = EXCLUDED.specifications, \
             images         = EXCLUDED.images, \
             updated_at     = NOW() \
         RETURNING id",
    )
    .bind(&product.slug)
    .bind(&product.name)
    .bind(&product.name_bn)
    .bind(&product.description)
    .bind(&product.category)
    .bind(&product.brand)
    .bind(product.price)
    .bind(product.stock)
    .bind(discount)
    .bind(Json(&product.specifications))
    .bind(Json(&product.images))
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Fetches a single product by its internal `id`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists with the given `id`, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_product(pool: &PgPool, id: i64) -> Result<ProductRow, DbError> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
    sqlx::query_as::<_, ProductRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)
}

/// Returns products, most recently updated first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_products(
    pool: &PgPool,
    filters: ProductListFilters<'_>,
) -> Result<Vec<ProductRow>, DbError> {
    let sql = format!(
        "SELECT {PRODUCT_COLUMNS} FROM products \
         WHERE ($1::TEXT IS NULL OR category = $1) \
         ORDER BY updated_at DESC, id DESC \
         LIMIT COALESCE($2, 9223372036854775807)"
    );
    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(filters.category)
        .bind(filters.limit)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
