//! Product database operations
//!
//! Handles all database interactions for the products table.

use crate::error::AppError;
use crate::models::{Product, UpdateProductRequest};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

/// Database connection pool for product operations
#[derive(Debug)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Initialize database connection pool
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    ///
    /// # Returns
    /// * `Ok(ProductRepository)` if successful
    /// * `Err(AppError)` if connection failed
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        // Ensure parent directory exists
        if let Some(parent) = PathBuf::from(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Internal(anyhow::anyhow!("Failed to create db directory: {}", e))
                })?;
            }
        }

        // SQLite connection string format: sqlite://path/to/db.db
        let connection_string = if db_path.starts_with("sqlite:") {
            db_path.to_string()
        } else {
            format!("sqlite:{}", db_path)
        };

        let options =
            SqliteConnectOptions::from_str(&connection_string)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("Connected to SQLite database at: {}", db_path);

        let repository = Self { pool };
        repository.run_migrations().await?;

        Ok(repository)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations...");

        sqlx::query(include_str!("../migrations/001_create_products.sql"))
            .execute(&self.pool)
            .await?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get all products, ordered by id
    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        let products =
            sqlx::query_as::<_, Product>("SELECT id, name, price FROM products ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(products)
    }

    /// Get a product by ID
    pub async fn get(&self, id: i64) -> Result<Option<Product>, AppError> {
        let product =
            sqlx::query_as::<_, Product>("SELECT id, name, price FROM products WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(product)
    }

    /// Insert a new product, returning the created record with its generated id
    pub async fn insert(&self, name: &str, price: f64) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, price) VALUES (?, ?) RETURNING id, name, price",
        )
        .bind(name)
        .bind(price)
        .fetch_one(&self.pool)
        .await?;

        debug!("Created product: {}", product.id);
        Ok(product)
    }

    /// Apply a partial update to a product
    ///
    /// Omitted fields keep their current value. Returns the updated record,
    /// or `None` (performing no write) if no product with the given id exists.
    pub async fn update(
        &self,
        id: i64,
        patch: &UpdateProductRequest,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "UPDATE products SET name = COALESCE(?, name), price = COALESCE(?, price) \
             WHERE id = ? RETURNING id, name, price",
        )
        .bind(patch.name.as_deref())
        .bind(patch.price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if product.is_some() {
            debug!("Updated product: {}", id);
        }
        Ok(product)
    }

    /// Delete a product by ID
    ///
    /// Returns the deleted record's id, or `None` if no product with the
    /// given id exists.
    pub async fn delete(&self, id: i64) -> Result<Option<i64>, AppError> {
        let deleted = sqlx::query_scalar::<_, i64>("DELETE FROM products WHERE id = ? RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        if deleted.is_some() {
            debug!("Deleted product: {}", id);
        }
        Ok(deleted)
    }
}
