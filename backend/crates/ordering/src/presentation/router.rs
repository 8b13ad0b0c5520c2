//! Ordering Router

use auth::domain::repository::RoleRepository;
use auth::infra::postgres::PgAuthRepository;
use auth::presentation::middleware::{AccessGate, require_permission};
use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};

use crate::domain::repository::OrderStore;
use crate::infra::postgres::PgOrderStore;
use crate::presentation::handlers::{self, OrderingAppState};

pub fn ordering_router(
    state: OrderingAppState<PgOrderStore>,
    gate: AccessGate<PgAuthRepository>,
) -> Router {
    ordering_router_generic(state, gate)
}

pub fn ordering_router_generic<S, R>(state: OrderingAppState<S>, gate: AccessGate<R>) -> Router
where
    S: OrderStore,
    R: RoleRepository + Send + Sync + 'static,
{
    let create_gate = from_fn_with_state(gate.require("order", "create"), require_permission::<R>);
    let read_gate = from_fn_with_state(gate.require("order", "read"), require_permission::<R>);

    Router::new()
        .route(
            "/orders",
            post(handlers::create::<S>)
                .route_layer(create_gate)
                .merge(get(handlers::list::<S>).route_layer(read_gate)),
        )
        .with_state(state)
}
