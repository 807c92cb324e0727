use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_product, delete_product, get_product_by_id, get_products, update_product,
};

pub fn init_products_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_products).post(create_product))
        .route(
            "/{id}",
            get(get_product_by_id)
                .put(update_product)
                .delete(delete_product),
        )
}
