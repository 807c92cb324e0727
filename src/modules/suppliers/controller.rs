use anyhow::anyhow;
use axum::extract::{Path, State};
use supplydesk_core::{AppError, Envelope, Notifier, shape};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{
    Authenticated, CanAddSupplier, CanDeleteSupplier, CanUpdateSupplier,
};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{Address, AddressDto, Supplier, SupplierDetails, SupplierDto};
use super::repository::SupplierRepository;
use super::service::SupplierService;

pub const ID_MISMATCH: &str = "The route id does not match the supplier id in the body.";
pub const ADDRESS_ID_MISMATCH: &str = "The route id does not match the address id in the body.";

/// List all suppliers
#[instrument(skip_all)]
pub async fn get_suppliers(
    _user: Authenticated,
    State(state): State<AppState>,
    notifier: Notifier,
) -> Envelope<Vec<Supplier>> {
    let suppliers = SupplierRepository::list(&state.db).await;
    shape(&notifier, Some(suppliers))
}

/// Get a supplier with its address and products
#[instrument(skip(_user, state, notifier))]
pub async fn get_supplier_by_id(
    _user: Authenticated,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    notifier: Notifier,
) -> Result<Envelope<SupplierDetails>, AppError> {
    let details = SupplierRepository::find_with_products(&state.db, id)
        .await
        .ok_or_else(|| AppError::not_found(anyhow!("Supplier not found")))?;

    Ok(shape(&notifier, Some(details)))
}

/// Create a supplier
#[instrument(skip_all)]
pub async fn create_supplier(
    _guard: CanAddSupplier,
    State(state): State<AppState>,
    mut notifier: Notifier,
    ValidatedJson(dto): ValidatedJson<SupplierDto>,
) -> Envelope<Supplier> {
    let supplier = SupplierService::add(&state, &mut notifier, dto).await;
    shape(&notifier, supplier)
}

/// Update a supplier
#[instrument(skip(_guard, state, notifier, dto))]
pub async fn update_supplier(
    _guard: CanUpdateSupplier,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut notifier: Notifier,
    ValidatedJson(dto): ValidatedJson<SupplierDto>,
) -> Result<Envelope<Supplier>, AppError> {
    if dto.id != Some(id) {
        notifier.record(ID_MISMATCH);
        return Ok(shape(&notifier, None));
    }

    let supplier = SupplierService::update(&state, &mut notifier, id, dto).await?;
    Ok(shape(&notifier, supplier))
}

/// Delete a supplier
#[instrument(skip(_guard, state, notifier))]
pub async fn delete_supplier(
    _guard: CanDeleteSupplier,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut notifier: Notifier,
) -> Result<Envelope<Supplier>, AppError> {
    let supplier = SupplierService::remove(&state, &mut notifier, id).await?;
    Ok(shape(&notifier, supplier))
}

/// Get the address of a supplier
#[instrument(skip(_user, state, notifier))]
pub async fn get_supplier_address(
    _user: Authenticated,
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
    notifier: Notifier,
) -> Result<Envelope<Address>, AppError> {
    let address = SupplierRepository::find_address(&state.db, supplier_id)
        .await
        .ok_or_else(|| AppError::not_found(anyhow!("Address not found")))?;

    Ok(shape(&notifier, Some(address)))
}

/// Update an address by its own id
#[instrument(skip(_guard, state, notifier, dto))]
pub async fn update_supplier_address(
    _guard: CanUpdateSupplier,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut notifier: Notifier,
    ValidatedJson(dto): ValidatedJson<AddressDto>,
) -> Result<Envelope<Address>, AppError> {
    if dto.id != Some(id) {
        notifier.record(ADDRESS_ID_MISMATCH);
        return Ok(shape(&notifier, None));
    }

    let address = SupplierService::update_address(&state, id, dto).await?;
    Ok(shape(&notifier, Some(address)))
}
