//! Product data models
//!
//! Defines the persisted Product entity and the request DTOs accepted
//! over the HTTP boundary.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A product record as stored in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Store-generated identifier, immutable for the record's lifetime
    pub id: i64,
    /// Product name
    pub name: String,
    /// Product price
    pub price: f64,
}

/// Create product request
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Name for the new product
    pub name: String,
    /// Price for the new product
    pub price: f64,
}

/// Update product request (partial update - omitted fields are left unchanged)
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    /// New name for the product (optional)
    pub name: Option<String>,
    /// New price for the product (optional)
    pub price: Option<f64>,
}
