use super::{Domain, NoStatus};
use crate::error::{Result, ShoeboxError};
use crate::model::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const DEFAULT_CATEGORY: &str = "books";

/// Fallback image shown when the form leaves the image URL empty.
pub const PLACEHOLDER_IMAGE: &str = "https://picsum.photos/600/400";

/// The products domain.
#[derive(Debug, Clone, Copy)]
pub struct Product;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub rating: f64,
    pub image: String,
}

/// Raw product form values. Price and rating arrive as the strings typed
/// into the form and are parsed during validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub rating: String,
    pub image: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            price: String::new(),
            rating: String::new(),
            image: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    /// Newest first.
    Newest,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl Default for ProductSort {
    fn default() -> Self {
        Self::Newest
    }
}

impl Domain for Product {
    type Fields = ProductFields;
    type Draft = ProductDraft;
    type StatusFilter = NoStatus;
    type SortKey = ProductSort;

    const KEY: &'static str = "products";

    fn validate(draft: &ProductDraft) -> Result<ProductFields> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ShoeboxError::Validation("product name is required".into()));
        }

        let price: f64 = draft.price.trim().parse().map_err(|_| {
            ShoeboxError::Validation("product price must be a number".into())
        })?;
        if !price.is_finite() || price < 0.0 {
            return Err(ShoeboxError::Validation(
                "product price must be a non-negative number".into(),
            ));
        }

        let rating: f64 = draft.rating.trim().parse().map_err(|_| {
            ShoeboxError::Validation("product rating must be a number".into())
        })?;
        if !(0.0..=5.0).contains(&rating) {
            return Err(ShoeboxError::Validation(
                "product rating must be between 0 and 5".into(),
            ));
        }

        let image = draft.image.trim();
        Ok(ProductFields {
            name: name.to_string(),
            description: draft.description.trim().to_string(),
            category: draft.category.clone(),
            price,
            rating,
            image: if image.is_empty() {
                PLACEHOLDER_IMAGE.to_string()
            } else {
                image.to_string()
            },
        })
    }

    fn draft(fields: &ProductFields) -> ProductDraft {
        ProductDraft {
            name: fields.name.clone(),
            description: fields.description.clone(),
            category: fields.category.clone(),
            price: fields.price.to_string(),
            rating: fields.rating.to_string(),
            image: fields.image.clone(),
        }
    }

    fn matches_search(fields: &ProductFields, needle: &str) -> bool {
        fields.name.to_lowercase().contains(needle)
            || fields.description.to_lowercase().contains(needle)
    }

    fn category(fields: &ProductFields) -> &str {
        &fields.category
    }

    fn matches_status(
        _record: &Record<ProductFields>,
        filter: NoStatus,
        _now: DateTime<Utc>,
    ) -> bool {
        match filter {}
    }

    fn compare(a: &Record<ProductFields>, b: &Record<ProductFields>, key: ProductSort) -> Ordering {
        match key {
            ProductSort::Newest => b.created_at.cmp(&a.created_at),
            ProductSort::PriceAsc => a.fields.price.total_cmp(&b.fields.price),
            ProductSort::PriceDesc => b.fields.price.total_cmp(&a.fields.price),
            ProductSort::RatingDesc => b.fields.rating.total_cmp(&a.fields.rating),
        }
    }
}
