//! Display payloads handed to the rendering side: product detail and listing
//! cards, availability, and the primary image.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::pricing::{build_price_display, PriceDisplay};
use crate::products::{ProductRecord, Specification};

/// Image shown when a product has no images of its own.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400?text=No+Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Availability {
    InStock { quantity: i32 },
    OutOfStock,
}

impl Availability {
    /// Human-readable label, e.g. `"In Stock (12)"` or `"Out of Stock"`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Availability::InStock { quantity } => format!("In Stock ({quantity})"),
            Availability::OutOfStock => "Out of Stock".to_string(),
        }
    }
}

#[must_use]
pub fn resolve_availability(product: &ProductRecord) -> Availability {
    if product.stock > 0 {
        Availability::InStock {
            quantity: product.stock,
        }
    } else {
        Availability::OutOfStock
    }
}

/// URL of the first image, or [`PLACEHOLDER_IMAGE_URL`] when there are none.
#[must_use]
pub fn resolve_primary_image(product: &ProductRecord) -> &str {
    product
        .images
        .first()
        .map_or(PLACEHOLDER_IMAGE_URL, |image| image.url.as_str())
}

/// Everything the product detail page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_bn: Option<String>,
    pub slug: String,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub price: PriceDisplay,
    pub availability: Availability,
    pub primary_image_url: String,
    /// Omitted entirely when the product has no specifications.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specifications: Vec<Specification>,
}

/// Listing-card subset of [`ProductView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSummary {
    pub name: String,
    pub slug: String,
    pub category: Option<String>,
    pub price: PriceDisplay,
    pub availability: Availability,
    pub primary_image_url: String,
}

#[must_use]
pub fn build_product_view(product: &ProductRecord, now: DateTime<Utc>) -> ProductView {
    ProductView {
        name: product.name.clone(),
        name_bn: product.name_bn.clone(),
        slug: product.slug.clone(),
        description: product.description.clone(),
        category: product.category.clone(),
        brand: product.brand.clone(),
        price: build_price_display(product, now),
        availability: resolve_availability(product),
        primary_image_url: resolve_primary_image(product).to_string(),
        specifications: product.specifications.clone(),
    }
}

#[must_use]
pub fn build_product_summary(product: &ProductRecord, now: DateTime<Utc>) -> ProductSummary {
    ProductSummary {
        name: product.name.clone(),
        slug: product.slug.clone(),
        category: product.category.clone(),
        price: build_price_display(product, now),
        availability: resolve_availability(product),
        primary_image_url: resolve_primary_image(product).to_string(),
    }
}
