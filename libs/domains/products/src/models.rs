use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Product category
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum Category {
    Sunglasses,
    Eyeglasses,
    #[serde(rename = "Reading Glasses")]
    #[strum(serialize = "Reading Glasses")]
    ReadingGlasses,
    #[serde(rename = "Computer Glasses")]
    #[strum(serialize = "Computer Glasses")]
    ComputerGlasses,
}

/// Frame material
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum Material {
    Metal,
    Plastic,
    Titanium,
    Acetate,
    Wood,
    Other,
}

/// Frame shape
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum Shape {
    Round,
    Square,
    Rectangle,
    #[serde(rename = "Cat Eye")]
    #[strum(serialize = "Cat Eye")]
    CatEye,
    Aviator,
    Oval,
    Geometric,
    Other,
}

/// Target gender for a frame
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum Gender {
    Men,
    Women,
    Unisex,
}

/// Stock status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
pub enum ProductStatus {
    /// Product is available for purchase
    #[default]
    #[serde(rename = "In Stock")]
    #[strum(serialize = "In Stock")]
    InStock,
    /// Product is sold out
    #[serde(rename = "Out of Stock")]
    #[strum(serialize = "Out of Stock")]
    OutOfStock,
    /// Product is announced but not yet purchasable
    #[serde(rename = "Coming Soon")]
    #[strum(serialize = "Coming Soon")]
    ComingSoon,
}

/// Discount attached to a product
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    #[serde(default)]
    pub is_discounted: bool,
    /// Percentage off, 0-100
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub percentage: f64,
}

/// Product entity - represents an eyewear product stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Price in the store currency, >= 0
    pub price: f64,
    /// Product category
    pub category: Category,
    /// Frame material
    pub material: Option<Material>,
    /// Frame shape
    pub shape: Option<Shape>,
    /// Lens color
    pub color: Option<String>,
    /// Frame color label shown in listings
    pub frame_color: Option<String>,
    /// Brand name
    pub brand: Option<String>,
    /// Long-form description
    pub description: Option<String>,
    /// Primary image reference
    pub image: Option<String>,
    /// Additional image references, in display order
    #[serde(default)]
    pub gallery: Vec<String>,
    /// Shown on the featured shelf
    pub featured: bool,
    /// Shown on the best-seller shelf
    pub best_seller: bool,
    /// Target gender
    pub gender: Option<Gender>,
    /// Available frame sizes
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Supported lens types
    #[serde(default)]
    pub lens_types: Vec<String>,
    /// Current discount
    #[serde(default)]
    pub discount: Discount,
    /// Stock status
    pub status: ProductStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub category: Category,
    pub material: Option<Material>,
    pub shape: Option<Shape>,
    pub color: Option<String>,
    pub frame_color: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub best_seller: bool,
    pub gender: Option<Gender>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub lens_types: Vec<String>,
    #[serde(default)]
    #[validate(nested)]
    pub discount: Discount,
    #[serde(default)]
    pub status: ProductStatus,
}

/// DTO for updating an existing product
///
/// Fields left out of the payload stay unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub category: Option<Category>,
    pub material: Option<Material>,
    pub shape: Option<Shape>,
    pub color: Option<String>,
    pub frame_color: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub gallery: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub best_seller: Option<bool>,
    pub gender: Option<Gender>,
    pub sizes: Option<Vec<String>>,
    pub lens_types: Option<Vec<String>>,
    #[validate(nested)]
    pub discount: Option<Discount>,
    pub status: Option<ProductStatus>,
}

/// Query filters for listing products
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Filter by category
    pub category: Option<Category>,
    /// Filter by stock status
    pub status: Option<ProductStatus>,
    /// Filter by target gender
    pub gender: Option<Gender>,
    /// Only featured products
    pub featured: Option<bool>,
    /// Only best sellers
    pub best_seller: Option<bool>,
    /// Filter by brand
    pub brand: Option<String>,
    /// Search in name and description
    pub search: Option<String>,
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> i64 {
    50
}

/// A filter built in code pages the same way as one deserialized from an
/// empty query string.
impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            status: None,
            gender: None,
            featured: None,
            best_seller: None,
            brand: None,
            search: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Product {
    /// Create a new product from a CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            price: input.price,
            category: input.category,
            material: input.material,
            shape: input.shape,
            color: input.color,
            frame_color: input.frame_color,
            brand: input.brand,
            description: input.description,
            image: input.image,
            gallery: input.gallery,
            featured: input.featured,
            best_seller: input.best_seller,
            gender: input.gender,
            sizes: input.sizes,
            lens_types: input.lens_types,
            discount: input.discount,
            status: input.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from an UpdateProduct DTO, refreshing `updated_at`
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(material) = update.material {
            self.material = Some(material);
        }
        if let Some(shape) = update.shape {
            self.shape = Some(shape);
        }
        if let Some(color) = update.color {
            self.color = Some(color);
        }
        if let Some(frame_color) = update.frame_color {
            self.frame_color = Some(frame_color);
        }
        if let Some(brand) = update.brand {
            self.brand = Some(brand);
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(image) = update.image {
            self.image = Some(image);
        }
        if let Some(gallery) = update.gallery {
            self.gallery = gallery;
        }
        if let Some(featured) = update.featured {
            self.featured = featured;
        }
        if let Some(best_seller) = update.best_seller {
            self.best_seller = best_seller;
        }
        if let Some(gender) = update.gender {
            self.gender = Some(gender);
        }
        if let Some(sizes) = update.sizes {
            self.sizes = sizes;
        }
        if let Some(lens_types) = update.lens_types {
            self.lens_types = lens_types;
        }
        if let Some(discount) = update.discount {
            self.discount = discount;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}
