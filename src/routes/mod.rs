mod dashboard;
mod health;
mod products;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch},
    Router,
};

use crate::{config::AdminConfig, middleware::require_basic_auth, AppState};

pub fn create_router(admin: AdminConfig) -> Router<AppState> {
    // Everything under /admin sits behind the Basic Auth gate.
    let admin_routes = Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/products/:id/availability",
            patch(products::set_product_availability),
        )
        .route("/products/:id/download", get(products::download_product_file))
        .route_layer(from_fn_with_state(admin, require_basic_auth));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/admin", admin_routes)
}
