pub mod app_config;
pub mod catalog;
pub mod config;
pub mod pricing;
pub mod products;
pub mod view;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, CatalogFile};
pub use config::{
    load_app_config, load_app_config_from_env, load_catalog_settings, CatalogSettings,
};
pub use pricing::{
    build_price_display, compute_discounted_price, format_amount, is_discount_active,
    PriceDisplay,
};
pub use products::{
    slugify, Discount, DiscountDocument, DiscountKind, PriceValue, ProductDocument, ProductImage,
    ProductRecord, Specification, ValidationError,
};
pub use view::{
    build_product_summary, build_product_view, resolve_availability, resolve_primary_image,
    Availability, ProductSummary, ProductView, PLACEHOLDER_IMAGE_URL,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[source] serde_yaml::Error),

    #[error("catalog product '{name}' is invalid: {source}")]
    InvalidProduct {
        name: String,
        #[source]
        source: ValidationError,
    },

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
