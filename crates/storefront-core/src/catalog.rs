use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::products::{ProductDocument, ProductRecord};
use crate::ConfigError;

#[derive(Debug, Deserialize)]
struct RawCatalog {
    products: Vec<ProductDocument>,
}

/// A validated catalog: every product parsed and slugs unique.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    pub products: Vec<ProductRecord>,
}

/// Load and validate the product catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<CatalogFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_catalog(&content)
}

/// Parse and validate catalog YAML that has already been read into memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed, a product fails
/// validation, or two products resolve to the same slug.
pub fn parse_catalog(content: &str) -> Result<CatalogFile, ConfigError> {
    let raw: RawCatalog = serde_yaml::from_str(content).map_err(ConfigError::CatalogFileParse)?;

    let mut seen_slugs = HashSet::new();
    let mut products = Vec::with_capacity(raw.products.len());

    for doc in raw.products {
        let name = doc.name.clone();
        let record = ProductRecord::try_from(doc)
            .map_err(|source| ConfigError::InvalidProduct { name, source })?;

        if record.slug.is_empty() {
            return Err(ConfigError::Validation(format!(
                "product '{}' has no ASCII characters to build a slug from",
                record.name
            )));
        }

        if !seen_slugs.insert(record.slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate product slug: '{}' (from product '{}')",
                record.slug, record.name
            )));
        }

        products.push(record);
    }

    Ok(CatalogFile { products })
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
