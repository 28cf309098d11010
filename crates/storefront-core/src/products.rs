//! Product documents as stored and served, and the validated record the
//! pricing and view logic operates on.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Reasons a [`ProductDocument`] cannot be turned into a [`ProductRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("product name must be non-empty")]
    EmptyName,
    #[error("price '{0}' is not a decimal number")]
    UnparsablePrice(String),
    #[error("price {0} is negative")]
    NegativePrice(Decimal),
    #[error("discount value '{0}' is not a decimal number")]
    UnparsableDiscountValue(String),
    #[error("discount value {0} is negative")]
    NegativeDiscountValue(Decimal),
}

/// A numeric field that documents may carry either as a JSON number or as a
/// string, e.g. `1250` or `"1250.00"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(serde_json::Number),
    Text(String),
}

impl PriceValue {
    /// Parses the raw value into a [`Decimal`].
    ///
    /// Scientific notation (`"1e3"`) is accepted; anything else that is not a
    /// plain decimal literal returns `None`.
    #[must_use]
    pub fn to_decimal(&self) -> Option<Decimal> {
        let raw = self.raw();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .ok()
    }

    fn raw(&self) -> String {
        match self {
            PriceValue::Number(n) => n.to_string(),
            PriceValue::Text(s) => s.clone(),
        }
    }
}

impl From<Decimal> for PriceValue {
    fn from(value: Decimal) -> Self {
        PriceValue::Text(value.to_string())
    }
}

/// One row of the specifications table, e.g. `{ name: "Weight", value: "1 kg" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub name: String,
    /// Stored documents sometimes hold numbers or booleans here; they are
    /// rendered as their JSON text.
    #[serde(deserialize_with = "deserialize_spec_value")]
    pub value: String,
}

fn deserialize_spec_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSpecValue {
        Text(String),
        Number(serde_json::Number),
        Flag(bool),
    }

    Ok(match RawSpecValue::deserialize(deserializer)? {
        RawSpecValue::Text(s) => s,
        RawSpecValue::Number(n) => n.to_string(),
        RawSpecValue::Flag(b) => b.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
}

/// Discount descriptor exactly as documents carry it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountDocument {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<PriceValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Kind of price reduction a discount applies.
///
/// Matching is exact (`"percentage"`, `"fixed"`). Any other non-empty value is
/// kept as [`DiscountKind::Unrecognized`] and leaves the price untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountKind {
    Percentage,
    Fixed,
    Unrecognized(String),
}

impl DiscountKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            DiscountKind::Percentage => "percentage",
            DiscountKind::Fixed => "fixed",
            DiscountKind::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for DiscountKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "percentage" => DiscountKind::Percentage,
            "fixed" => DiscountKind::Fixed,
            _ => DiscountKind::Unrecognized(raw),
        }
    }
}

impl std::fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated discount descriptor.
///
/// `kind` is `None` when the document had no `type` (or an empty one); such a
/// discount is never active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discount {
    pub kind: Option<DiscountKind>,
    /// Percentage points for [`DiscountKind::Percentage`], currency amount for
    /// [`DiscountKind::Fixed`]. Zero when the document omitted it.
    pub value: Decimal,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl Discount {
    #[must_use]
    pub fn to_document(&self) -> DiscountDocument {
        DiscountDocument {
            kind: self.kind.as_ref().map(|k| k.as_str().to_string()),
            value: Some(PriceValue::from(self.value)),
            start_date: self.starts_at,
            end_date: self.ends_at,
        }
    }
}

impl TryFrom<DiscountDocument> for Discount {
    type Error = ValidationError;

    fn try_from(doc: DiscountDocument) -> Result<Self, Self::Error> {
        let value = match doc.value {
            None => Decimal::ZERO,
            Some(raw) => {
                let parsed = raw
                    .to_decimal()
                    .ok_or_else(|| ValidationError::UnparsableDiscountValue(raw.raw()))?;
                if parsed.is_sign_negative() && !parsed.is_zero() {
                    return Err(ValidationError::NegativeDiscountValue(parsed));
                }
                parsed
            }
        };

        Ok(Discount {
            kind: doc
                .kind
                .filter(|k| !k.is_empty())
                .map(DiscountKind::from),
            value,
            starts_at: doc.start_date,
            ends_at: doc.end_date,
        })
    }
}

/// A product as the catalog store and the catalog file carry it, before any
/// validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    pub name: String,
    /// Bengali display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_bn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub price: PriceValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<DiscountDocument>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub specifications: Vec<Specification>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

/// A validated product: price parsed, discount normalized, slug derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub name: String,
    pub name_bn: Option<String>,
    /// URL-safe identifier derived from `name`; unique across the catalog.
    pub slug: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Decimal,
    pub discount: Option<Discount>,
    /// Units on hand. Zero or negative means out of stock.
    pub stock: i32,
    pub specifications: Vec<Specification>,
    pub images: Vec<ProductImage>,
}

impl ProductRecord {
    #[must_use]
    pub fn to_document(&self) -> ProductDocument {
        ProductDocument {
            name: self.name.clone(),
            name_bn: self.name_bn.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            brand: self.brand.clone(),
            price: PriceValue::from(self.price),
            discount: self.discount.as_ref().map(Discount::to_document),
            stock: self.stock,
            specifications: self.specifications.clone(),
            images: self.images.clone(),
        }
    }
}

impl TryFrom<ProductDocument> for ProductRecord {
    type Error = ValidationError;

    fn try_from(doc: ProductDocument) -> Result<Self, Self::Error> {
        let name = doc.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let price = doc
            .price
            .to_decimal()
            .ok_or_else(|| ValidationError::UnparsablePrice(doc.price.raw()))?;
        if price.is_sign_negative() && !price.is_zero() {
            return Err(ValidationError::NegativePrice(price));
        }

        let discount = doc.discount.map(Discount::try_from).transpose()?;
        let slug = slugify(&name);

        Ok(ProductRecord {
            name,
            name_bn: doc.name_bn.filter(|s| !s.trim().is_empty()),
            slug,
            description: doc.description,
            category: doc.category,
            brand: doc.brand.filter(|s| !s.trim().is_empty()),
            price,
            discount,
            stock: doc.stock,
            specifications: doc.specifications,
            images: doc.images,
        })
    }
}

/// Generate a URL-safe slug: lowercase ASCII alphanumerics, words joined by `-`.
///
/// Non-ASCII characters are dropped without inserting a separator.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c.is_whitespace() {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
