//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::extract::ValidJson;
use kernel::id::ProductId;
use kernel::principal::Principal;

use crate::application::{
    CreateProductUseCase, DeleteProductUseCase, GetProductUseCase, ListProductsUseCase,
    UpdateProductUseCase,
};
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{ProductRequest, ProductResponse};

pub struct CatalogAppState<P>
where
    P: ProductRepository + Send + Sync + 'static,
{
    pub repo: Arc<P>,
}

impl<P> Clone for CatalogAppState<P>
where
    P: ProductRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<P> CatalogAppState<P>
where
    P: ProductRepository + Send + Sync + 'static,
{
    pub fn new(repo: P) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

fn parse_product_id(raw: &str) -> CatalogResult<ProductId> {
    ProductId::parse_str(raw).map_err(|_| CatalogError::InvalidProductId)
}

/// GET /products
pub async fn list<P>(State(state): State<CatalogAppState<P>>) -> CatalogResult<Json<Vec<ProductResponse>>>
where
    P: ProductRepository + Send + Sync + 'static,
{
    let products = ListProductsUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// GET /products/{id}
pub async fn get_one<P>(
    State(state): State<CatalogAppState<P>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<ProductResponse>>
where
    P: ProductRepository + Send + Sync + 'static,
{
    let product_id = parse_product_id(&id)?;
    let product = GetProductUseCase::new(state.repo.clone())
        .execute(&product_id)
        .await?;
    Ok(Json(ProductResponse::from(product)))
}

/// POST /products
pub async fn create<P>(
    State(state): State<CatalogAppState<P>>,
    principal: Principal,
    ValidJson(req): ValidJson<ProductRequest>,
) -> CatalogResult<impl IntoResponse>
where
    P: ProductRepository + Send + Sync + 'static,
{
    let product = CreateProductUseCase::new(state.repo.clone())
        .execute(&principal, req.to_draft())
        .await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// PUT /products/{id}
pub async fn update<P>(
    State(state): State<CatalogAppState<P>>,
    principal: Principal,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<ProductRequest>,
) -> CatalogResult<Json<ProductResponse>>
where
    P: ProductRepository + Send + Sync + 'static,
{
    let product_id = parse_product_id(&id)?;
    let product = UpdateProductUseCase::new(state.repo.clone())
        .execute(&principal, &product_id, req.to_draft())
        .await?;
    Ok(Json(ProductResponse::from(product)))
}

/// DELETE /products/{id}
pub async fn delete<P>(
    State(state): State<CatalogAppState<P>>,
    principal: Principal,
    Path(id): Path<String>,
) -> CatalogResult<StatusCode>
where
    P: ProductRepository + Send + Sync + 'static,
{
    let product_id = parse_product_id(&id)?;
    DeleteProductUseCase::new(state.repo.clone())
        .execute(&principal, &product_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
