//! Route definitions for the Stock Room Inventory service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/checkouts", checkout_routes())
        .route("/transfers", post(handlers::create_transfer))
        .nest("/inventory", inventory_routes())
        .nest("/choices", choice_routes())
}

/// Checkout and history routes
fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_checkouts).post(handlers::create_checkout),
        )
        .route("/export.csv", get(handlers::export_checkouts))
        .route("/totals", get(handlers::get_checkout_totals))
}

/// Inventory catalog routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_inventory).post(handlers::create_inventory_item),
        )
        .route("/:id", get(handlers::get_inventory_item))
        .route("/compare/:abbreviation", get(handlers::compare_inventory))
}

/// Cascading form choices
fn choice_routes() -> Router<AppState> {
    Router::new()
        .route("/centers", get(handlers::list_centers))
        .route("/checkout", get(handlers::get_checkout_choices))
        .route("/locations/:center_code", get(handlers::get_location_choices))
}
