use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_supplier, delete_supplier, get_supplier_address, get_supplier_by_id, get_suppliers,
    update_supplier, update_supplier_address,
};

pub fn init_suppliers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_suppliers).post(create_supplier))
        .route(
            "/{id}",
            get(get_supplier_by_id)
                .put(update_supplier)
                .delete(delete_supplier),
        )
        .route(
            "/address/{id}",
            get(get_supplier_address).put(update_supplier_address),
        )
}
