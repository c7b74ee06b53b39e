//! Product API handlers
//!
//! Contains HTTP request handlers for product CRUD operations.

use crate::error::AppError;
use crate::models::{CreateProductRequest, Product, UpdateProductRequest};
use crate::repository::ProductRepository;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

/// GET /products - List all products
pub async fn list_products(
    State(repository): State<Arc<ProductRepository>>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = repository.list().await?;
    Ok(Json(products))
}

/// POST /products - Create a new product
pub async fn create_product(
    State(repository): State<Arc<ProductRepository>>,
    body: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<Json<Product>, AppError> {
    let Json(request) = body.map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;

    let product = repository.insert(&request.name, request.price).await?;
    Ok(Json(product))
}

/// GET /products/:id - Get a specific product
pub async fn get_product(
    State(repository): State<Arc<ProductRepository>>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, AppError> {
    let product = repository
        .get(id)
        .await?
        .ok_or(AppError::ProductNotFound(id))?;

    Ok(Json(product))
}

/// PATCH /products/:id - Partially update a product
pub async fn update_product(
    State(repository): State<Arc<ProductRepository>>,
    Path(id): Path<i64>,
    body: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<Product>, AppError> {
    let Json(request) = body.map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;

    let product = repository
        .update(id, &request)
        .await?
        .ok_or(AppError::ProductNotFound(id))?;

    Ok(Json(product))
}

/// DELETE /products/:id - Delete a product
pub async fn delete_product(
    State(repository): State<Arc<ProductRepository>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    repository
        .delete(id)
        .await?
        .ok_or(AppError::ProductNotFound(id))?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_state() -> (TempDir, Arc<ProductRepository>) {
        let dir = TempDir::new().expect("failed to create tempdir");
        let db_path = dir.path().join("test.db");
        let repository = ProductRepository::new(db_path.to_str().unwrap())
            .await
            .expect("failed to create repository");
        (dir, Arc::new(repository))
    }

    #[tokio::test]
    async fn test_list_products_empty() {
        let (_dir, repository) = test_state().await;

        let response = list_products(State(repository)).await.unwrap();
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_create_then_get_product() {
        let (_dir, repository) = test_state().await;
        let request = CreateProductRequest {
            name: "Widget".to_string(),
            price: 9.99,
        };

        let created = create_product(State(repository.clone()), Ok(Json(request)))
            .await
            .unwrap();
        assert_eq!(created.name, "Widget");
        assert_eq!(created.price, 9.99);

        let fetched = get_product(State(repository), Path(created.id))
            .await
            .unwrap();
        assert_eq!(fetched.0, created.0);
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let (_dir, repository) = test_state().await;

        let result = get_product(State(repository), Path(42)).await;
        match result.unwrap_err() {
            AppError::ProductNotFound(id) => assert_eq!(id, 42),
            other => panic!("Expected ProductNotFound error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_product_not_found() {
        let (_dir, repository) = test_state().await;
        let request = UpdateProductRequest {
            name: Some("Ghost".to_string()),
            price: None,
        };

        let result = update_product(State(repository), Path(42), Ok(Json(request))).await;
        match result.unwrap_err() {
            AppError::ProductNotFound(id) => assert_eq!(id, 42),
            other => panic!("Expected ProductNotFound error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_with_price_only_keeps_name() {
        let (_dir, repository) = test_state().await;
        let create = CreateProductRequest {
            name: "Widget".to_string(),
            price: 9.99,
        };
        let created = create_product(State(repository.clone()), Ok(Json(create)))
            .await
            .unwrap();

        let patch = UpdateProductRequest {
            name: None,
            price: Some(12.50),
        };
        let updated = update_product(State(repository), Path(created.id), Ok(Json(patch)))
            .await
            .unwrap();
        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.price, 12.50);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let (_dir, repository) = test_state().await;
        let request = CreateProductRequest {
            name: "Widget".to_string(),
            price: 9.99,
        };
        let created = create_product(State(repository.clone()), Ok(Json(request)))
            .await
            .unwrap();

        let status = delete_product(State(repository.clone()), Path(created.id))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let result = get_product(State(repository), Path(created.id)).await;
        assert!(matches!(
            result.unwrap_err(),
            AppError::ProductNotFound(_)
        ));
    }
}
