use chrono::{DateTime, Utc};
use database::mongodb::bson_datetime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 100;

/// Product entity - represents a product stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    /// Current selling price
    pub price: f64,
    /// Price before discount, shown struck through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Image URL or asset path
    pub image: String,
    pub category: String,
    /// Units in stock
    #[serde(default)]
    pub quantity: i32,
    /// Average rating, 0 to 5
    #[serde(default)]
    pub rating: f64,
    /// Number of reviews
    #[serde(default)]
    pub reviews: i32,
    #[serde(default)]
    pub description: String,
    /// Free-form display range such as "$10 - $20"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(with = "bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0.0))]
    pub original_price: Option<f64>,
    #[validate(custom(function = "not_blank", message = "Image is required"))]
    pub image: String,
    #[validate(custom(function = "not_blank", message = "Category is required"))]
    pub category: String,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub quantity: i32,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(default)]
    pub rating: f64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub reviews: i32,
    #[serde(default)]
    pub description: String,
    pub price_range: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// DTO for updating an existing product; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub original_price: Option<f64>,
    #[validate(custom(function = "not_blank", message = "Image is required"))]
    pub image: Option<String>,
    #[validate(custom(function = "not_blank", message = "Category is required"))]
    pub category: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    #[validate(range(min = 0))]
    pub reviews: Option<i32>,
    pub description: Option<String>,
    pub price_range: Option<String>,
    pub featured: Option<bool>,
}

/// Query filters for listing products
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema, IntoParams)]
pub struct ProductFilter {
    /// Exact category match
    pub category: Option<String>,
    /// Only featured (or only non-featured) products
    pub featured: Option<bool>,
    /// Case-insensitive match on name or description
    pub search: Option<String>,
    /// Maximum number of results (capped at 100)
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            featured: None,
            search: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl ProductFilter {
    /// Clamp `limit` into 1..=100 and drop blank search terms
    pub fn normalized(mut self) -> Self {
        self.limit = self.limit.clamp(1, MAX_LIMIT);
        self.search = self
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    /// In-memory counterpart of the MongoDB query
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(ref category) = self.category {
            if &product.category != category {
                return false;
            }
        }
        if let Some(featured) = self.featured {
            if product.featured != featured {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            if !product.name.to_lowercase().contains(&needle)
                && !product.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Product {
    /// Create a new product from CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            price: input.price,
            original_price: input.original_price,
            image: input.image,
            category: input.category,
            quantity: input.quantity,
            rating: input.rating,
            reviews: input.reviews,
            description: input.description,
            price_range: input.price_range,
            featured: input.featured,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(original_price) = update.original_price {
            self.original_price = Some(original_price);
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(reviews) = update.reviews {
            self.reviews = reviews;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price_range) = update.price_range {
            self.price_range = Some(price_range);
        }
        if let Some(featured) = update.featured {
            self.featured = featured;
        }
        self.updated_at = Utc::now();
    }
}

/// Confirmation body for deletes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
