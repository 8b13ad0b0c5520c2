//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::extract::ValidJson;
use kernel::principal::Principal;

use crate::application::{CreateOrderUseCase, ListOrdersUseCase};
use crate::domain::repository::OrderStore;
use crate::error::OrderResult;
use crate::presentation::dto::{CreateOrderRequest, OrderResponse};

pub struct OrderingAppState<S>
where
    S: OrderStore,
{
    pub store: Arc<S>,
}

impl<S> Clone for OrderingAppState<S>
where
    S: OrderStore,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S> OrderingAppState<S>
where
    S: OrderStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// POST /orders
///
/// The order is placed for the authenticated caller.
pub async fn create<S>(
    State(state): State<OrderingAppState<S>>,
    principal: Principal,
    ValidJson(req): ValidJson<CreateOrderRequest>,
) -> OrderResult<impl IntoResponse>
where
    S: OrderStore,
{
    let lines = req.lines()?;
    let order = CreateOrderUseCase::new(state.store.clone())
        .execute(&principal.user_id, &lines)
        .await?;
    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

/// GET /orders
pub async fn list<S>(
    State(state): State<OrderingAppState<S>>,
    principal: Principal,
) -> OrderResult<Json<Vec<OrderResponse>>>
where
    S: OrderStore,
{
    let orders = ListOrdersUseCase::new(state.store.clone())
        .execute(&principal)
        .await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}
