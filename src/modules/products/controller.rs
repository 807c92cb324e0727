use anyhow::anyhow;
use axum::extract::{Path, State};
use supplydesk_core::{AppError, Envelope, Notifier, shape};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{Authenticated, CanAddProduct, CanDeleteProduct, CanUpdateProduct};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{Product, ProductDto, ProductView};
use super::repository::ProductRepository;
use super::service::ProductService;

pub const ID_MISMATCH: &str = "The route id does not match the product id in the body.";

/// List all products
#[instrument(skip_all)]
pub async fn get_products(
    _user: Authenticated,
    State(state): State<AppState>,
    notifier: Notifier,
) -> Envelope<Vec<ProductView>> {
    let products = ProductRepository::list(&state.db).await;
    shape(&notifier, Some(products))
}

/// Get a product by id
#[instrument(skip(_user, state, notifier))]
pub async fn get_product_by_id(
    _user: Authenticated,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    notifier: Notifier,
) -> Result<Envelope<ProductView>, AppError> {
    let product = ProductRepository::find(&state.db, id)
        .await
        .ok_or_else(|| AppError::not_found(anyhow!("Product not found")))?;

    Ok(shape(&notifier, Some(product)))
}

/// Create a product
#[instrument(skip_all)]
pub async fn create_product(
    _guard: CanAddProduct,
    State(state): State<AppState>,
    mut notifier: Notifier,
    ValidatedJson(dto): ValidatedJson<ProductDto>,
) -> Envelope<Product> {
    let product = ProductService::add(&state, &mut notifier, dto).await;
    shape(&notifier, product)
}

/// Update a product
#[instrument(skip(_guard, state, notifier, dto))]
pub async fn update_product(
    _guard: CanUpdateProduct,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut notifier: Notifier,
    ValidatedJson(dto): ValidatedJson<ProductDto>,
) -> Result<Envelope<Product>, AppError> {
    if dto.id != Some(id) {
        notifier.record(ID_MISMATCH);
        return Ok(shape(&notifier, None));
    }

    let product = ProductService::update(&state, &mut notifier, id, dto).await?;
    Ok(shape(&notifier, product))
}

/// Delete a product
#[instrument(skip(_guard, state, notifier))]
pub async fn delete_product(
    _guard: CanDeleteProduct,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    notifier: Notifier,
) -> Result<Envelope<Product>, AppError> {
    let product = ProductService::remove(&state, id).await?;
    Ok(shape(&notifier, Some(product)))
}
