//! Catalog Router
//!
//! Reads are public. Each write method sits behind its own access gate so the
//! policy is asked about exactly one `(product, action)` pair.

use auth::domain::repository::RoleRepository;
use auth::infra::postgres::PgAuthRepository;
use auth::presentation::middleware::{AccessGate, require_permission};
use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};

use crate::domain::repository::ProductRepository;
use crate::infra::postgres::PgProductRepository;
use crate::presentation::handlers::{self, CatalogAppState};

pub fn catalog_router(
    state: CatalogAppState<PgProductRepository>,
    gate: AccessGate<PgAuthRepository>,
) -> Router {
    catalog_router_generic(state, gate)
}

pub fn catalog_router_generic<P, R>(state: CatalogAppState<P>, gate: AccessGate<R>) -> Router
where
    P: ProductRepository + Send + Sync + 'static,
    R: RoleRepository + Send + Sync + 'static,
{
    let create_gate = from_fn_with_state(gate.require("product", "create"), require_permission::<R>);
    let update_gate = from_fn_with_state(gate.require("product", "update"), require_permission::<R>);
    let delete_gate = from_fn_with_state(gate.require("product", "delete"), require_permission::<R>);

    Router::new()
        .route(
            "/products",
            get(handlers::list::<P>).merge(post(handlers::create::<P>).route_layer(create_gate)),
        )
        .route(
            "/products/{id}",
            get(handlers::get_one::<P>)
                .merge(put(handlers::update::<P>).route_layer(update_gate))
                .merge(delete(handlers::delete::<P>).route_layer(delete_gate)),
        )
        .with_state(state)
}
