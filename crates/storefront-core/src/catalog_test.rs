use std::path::Path;

use rust_decimal::Decimal;

use super::*;
use crate::products::{DiscountKind, ValidationError};

#[test]
fn parses_minimal_catalog() {
    let yaml = r#"
products:
  - name: Green Tea
    price: "250"
  - name: Black Tea
    price: 300
    stock: 7
"#;
    let catalog = parse_catalog(yaml).expect("valid catalog");
    assert_eq!(catalog.products.len(), 2);
    assert_eq!(catalog.products[0].slug, "green-tea");
    assert_eq!(catalog.products[1].price, Decimal::new(300, 0));
    assert_eq!(catalog.products[1].stock, 7);
}

#[test]
fn parses_discount_block() {
    let yaml = r#"
products:
  - name: Silk Scarf
    price: "1200.00"
    discount:
      type: fixed
      value: 200
      startDate: "2025-01-01T00:00:00Z"
"#;
    let catalog = parse_catalog(yaml).expect("valid catalog");
    let discount = catalog.products[0]
        .discount
        .as_ref()
        .expect("discount present");
    assert_eq!(discount.kind, Some(DiscountKind::Fixed));
    assert_eq!(discount.value, Decimal::new(200, 0));
    assert!(discount.starts_at.is_some());
    assert!(discount.ends_at.is_none());
}

#[test]
fn rejects_unparsable_price_with_product_name() {
    let yaml = r#"
products:
  - name: Mystery Box
    price: "call us"
"#;
    let err = parse_catalog(yaml).unwrap_err();
    assert!(
        matches!(
            err,
            ConfigError::InvalidProduct { ref name, source: ValidationError::UnparsablePrice(_) }
                if name == "Mystery Box"
        ),
        "unexpected error: {err:?}"
    );
}

#[test]
fn rejects_duplicate_slug() {
    let yaml = r#"
products:
  - name: Green Tea
    price: 1
  - name: green  tea
    price: 2
"#;
    let err = parse_catalog(yaml).unwrap_err();
    assert!(err.to_string().contains("duplicate product slug"));
}

#[test]
fn rejects_name_without_ascii() {
    let yaml = r#"
products:
  - name: চা
    price: 1
"#;
    let err = parse_catalog(yaml).unwrap_err();
    assert!(err.to_string().contains("slug"));
}

#[test]
fn rejects_malformed_yaml() {
    let err = parse_catalog("products: [").unwrap_err();
    assert!(matches!(err, ConfigError::CatalogFileParse(_)));
}

#[test]
fn missing_file_reports_path() {
    let err = load_catalog(Path::new("/definitely/not/here.yaml")).unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.yaml"));
}

#[test]
fn load_catalog_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("products.yaml");
    assert!(
        path.exists(),
        "products.yaml missing at {path:?}; required for this test"
    );
    let result = load_catalog(&path);
    assert!(result.is_ok(), "failed to load products.yaml: {result:?}");
    assert!(!result.unwrap().products.is_empty());
}
