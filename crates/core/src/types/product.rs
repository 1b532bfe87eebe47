//! Validated product schema.
//!
//! Catalog records arrive as loosely-typed JSON. [`Product`] is the only
//! shape the rest of the workspace sees: records missing a required field
//! or carrying an unusable id/price are rejected here with a typed
//! [`ProductError`], and [`ProductBatch`] quarantines them so one bad record
//! never poisons the rest of a listing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::id::ProductId;
use super::price::{Price, PriceError};

/// Maximum number of whole stars a rating renders as.
pub const MAX_STARS: u8 = 5;

/// Errors that can occur when validating a product record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    /// The record was not a JSON object.
    #[error("product record must be a JSON object")]
    NotAnObject,

    /// A required field was absent or null.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The id was not an integer in range.
    #[error("invalid product id: {0}")]
    InvalidId(String),

    /// The title was present but blank.
    #[error("product title cannot be empty")]
    EmptyTitle,

    /// The price could not be parsed.
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// A field had the wrong JSON type.
    #[error("malformed product record: {0}")]
    Malformed(String),
}

/// Free-form variant attributes. The catalog populates these inconsistently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Aggregate customer rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductRating {
    /// Average rating (typically 0.0 - 5.0).
    pub rate: f64,
    /// Number of ratings.
    #[serde(default)]
    pub count: u32,
}

impl ProductRating {
    /// Whole stars to render, rounded and clamped to `0..=MAX_STARS`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=5
    pub fn stars(&self) -> u8 {
        self.rate.round().clamp(0.0, f64::from(MAX_STARS)) as u8
    }
}

/// A catalog product.
///
/// Deserializing a `Product` runs the same validation as
/// [`Product::from_value`], so stored carts and API responses go through
/// one gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProduct")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Image URI.
    pub image: String,
    pub category: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<ProductAttributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<ProductRating>,
}

impl Product {
    /// Create a product with the required fields and empty optional ones.
    #[must_use]
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: Price,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
            category: String::new(),
            description: String::new(),
            attributes: None,
            rating: None,
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Validate a raw JSON record.
    ///
    /// # Errors
    ///
    /// Returns `ProductError` if the record is not an object, is missing
    /// `id`, `title`, `price` or `image`, or carries an invalid id or price.
    pub fn from_value(value: Value) -> Result<Self, ProductError> {
        if !value.is_object() {
            return Err(ProductError::NotAnObject);
        }
        let raw: RawProduct =
            serde_json::from_value(value).map_err(|e| ProductError::Malformed(e.to_string()))?;
        Self::try_from(raw)
    }
}

/// A record that failed validation, kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarantinedRecord {
    /// Position of the record in its source array.
    pub index: usize,
    pub error: ProductError,
}

/// Result of validating a list of raw records.
#[derive(Debug, Clone, Default)]
pub struct ProductBatch {
    pub products: Vec<Product>,
    pub quarantined: Vec<QuarantinedRecord>,
}

impl ProductBatch {
    /// Validate every record, keeping valid products in source order.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let mut batch = Self::default();
        for (index, value) in values.into_iter().enumerate() {
            match Product::from_value(value) {
                Ok(product) => batch.products.push(product),
                Err(error) => batch.quarantined.push(QuarantinedRecord { index, error }),
            }
        }
        batch
    }
}

/// Wire shape accepted from the catalog and from storage.
#[derive(Deserialize)]
struct RawProduct {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, alias = "name")]
    title: Option<String>,
    #[serde(default)]
    price: Option<Value>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    attributes: Option<Value>,
    #[serde(default)]
    rating: Option<Value>,
}

impl TryFrom<RawProduct> for Product {
    type Error = ProductError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let id = parse_id(&raw.id.ok_or(ProductError::MissingField("id"))?)?;

        let title = raw.title.ok_or(ProductError::MissingField("title"))?;
        if title.trim().is_empty() {
            return Err(ProductError::EmptyTitle);
        }

        let price = match raw.price {
            None | Some(Value::Null) => return Err(ProductError::MissingField("price")),
            Some(value) => Price::from_json(&value)?,
        };

        let image = raw.image.ok_or(ProductError::MissingField("image"))?;

        Ok(Self {
            id,
            title,
            price,
            image,
            category: raw.category.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            // Optional extras are dropped rather than failing the whole record.
            attributes: raw
                .attributes
                .and_then(|v| serde_json::from_value(v).ok()),
            rating: raw.rating.and_then(|v| serde_json::from_value(v).ok()),
        })
    }
}

fn parse_id(value: &Value) -> Result<ProductId, ProductError> {
    match value {
        Value::Null => Err(ProductError::MissingField("id")),
        Value::Number(n) => n
            .as_i64()
            .and_then(|id| i32::try_from(id).ok())
            .map(ProductId::new)
            .ok_or_else(|| ProductError::InvalidId(value.to_string())),
        _ => Err(ProductError::InvalidId(value.to_string())),
    }
}
