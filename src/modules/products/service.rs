use anyhow::anyhow;
use chrono::Utc;
use supplydesk_core::{AppError, Notifier};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::state::AppState;

use super::model::{Product, ProductDto};
use super::repository::{ProductRepository, ProductWriteError};

pub const UNKNOWN_SUPPLIER: &str = "The supplier does not exist.";

pub struct ProductService;

impl ProductService {
    #[instrument(skip_all, fields(name = %dto.name, supplier_id = %dto.supplier_id))]
    pub async fn add(state: &AppState, notifier: &mut Notifier, dto: ProductDto) -> Option<Product> {
        let product = dto.into_product(Uuid::new_v4(), Utc::now());

        match ProductRepository::insert(&state.db, product).await {
            Ok(product) => {
                info!(product_id = %product.id, "Product created");
                Some(product)
            }
            Err(_) => {
                notifier.record(UNKNOWN_SUPPLIER);
                None
            }
        }
    }

    #[instrument(skip_all, fields(product_id = %id))]
    pub async fn update(
        state: &AppState,
        notifier: &mut Notifier,
        id: Uuid,
        dto: ProductDto,
    ) -> Result<Option<Product>, AppError> {
        // created_at is restored from the stored product
        let product = dto.into_product(id, Utc::now());

        match ProductRepository::replace_existing(&state.db, product).await {
            Ok(product) => {
                info!("Product updated");
                Ok(Some(product))
            }
            Err(ProductWriteError::UnknownSupplier) => {
                notifier.record(UNKNOWN_SUPPLIER);
                Ok(None)
            }
            Err(ProductWriteError::NotFound) => Err(product_not_found()),
        }
    }

    #[instrument(skip(state))]
    pub async fn remove(state: &AppState, id: Uuid) -> Result<Product, AppError> {
        let product = ProductRepository::remove(&state.db, id)
            .await
            .ok_or_else(product_not_found)?;

        info!("Product removed");
        Ok(product)
    }
}

fn product_not_found() -> AppError {
    AppError::not_found(anyhow!("Product not found"))
}
