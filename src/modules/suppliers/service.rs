use anyhow::anyhow;
use supplydesk_core::{AppError, Notifier};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::state::AppState;

use super::model::{Address, AddressDto, Supplier, SupplierDto, SupplierKind};
use super::repository::{SupplierRepository, SupplierWriteError};

pub const DUPLICATE_DOCUMENT: &str = "A supplier with this document already exists.";
pub const DOCUMENT_NOT_NUMERIC: &str = "Document must contain only digits.";
pub const HAS_PRODUCTS: &str = "The supplier has registered products.";

pub struct SupplierService;

impl SupplierService {
    #[instrument(skip_all, fields(name = %dto.name))]
    pub async fn add(state: &AppState, notifier: &mut Notifier, dto: SupplierDto) -> Option<Supplier> {
        let supplier = dto.into_supplier(Uuid::new_v4());

        if !Self::check_document(notifier, &supplier) {
            return None;
        }

        match SupplierRepository::insert_if_document_free(&state.db, supplier).await {
            Ok(supplier) => {
                info!(supplier_id = %supplier.id, "Supplier created");
                Some(supplier)
            }
            Err(_) => {
                notifier.record(DUPLICATE_DOCUMENT);
                None
            }
        }
    }

    #[instrument(skip_all, fields(supplier_id = %id))]
    pub async fn update(
        state: &AppState,
        notifier: &mut Notifier,
        id: Uuid,
        dto: SupplierDto,
    ) -> Result<Option<Supplier>, AppError> {
        let supplier = dto.into_supplier(id);
        if !Self::check_document(notifier, &supplier) {
            return Ok(None);
        }

        match SupplierRepository::replace_existing(&state.db, supplier).await {
            Ok(supplier) => {
                info!("Supplier updated");
                Ok(Some(supplier))
            }
            Err(SupplierWriteError::DuplicateDocument) => {
                notifier.record(DUPLICATE_DOCUMENT);
                Ok(None)
            }
            Err(_) => Err(supplier_not_found()),
        }
    }

    #[instrument(skip(state, notifier))]
    pub async fn remove(
        state: &AppState,
        notifier: &mut Notifier,
        id: Uuid,
    ) -> Result<Option<Supplier>, AppError> {
        match SupplierRepository::remove_without_products(&state.db, id).await {
            Ok(supplier) => {
                info!("Supplier removed");
                Ok(Some(supplier))
            }
            Err(SupplierWriteError::HasProducts) => {
                notifier.record(HAS_PRODUCTS);
                Ok(None)
            }
            Err(_) => Err(supplier_not_found()),
        }
    }

    #[instrument(skip(state, dto))]
    pub async fn update_address(
        state: &AppState,
        id: Uuid,
        dto: AddressDto,
    ) -> Result<Address, AppError> {
        // The owner is resolved from the stored address, not from the body.
        let address = dto.into_address(id, Uuid::nil());

        let address = SupplierRepository::replace_address(&state.db, address)
            .await
            .map_err(|_| AppError::not_found(anyhow!("Address not found")))?;

        info!(supplier_id = %address.supplier_id, "Supplier address updated");
        Ok(address)
    }

    /// Records a notification for every document rule the supplier breaks.
    fn check_document(notifier: &mut Notifier, supplier: &Supplier) -> bool {
        let mut valid = true;

        if !supplier.document.chars().all(|c| c.is_ascii_digit()) {
            notifier.record(DOCUMENT_NOT_NUMERIC);
            valid = false;
        }

        let expected = supplier.kind.document_length();
        if supplier.document.len() != expected {
            let kind = match supplier.kind {
                SupplierKind::Individual => "individuals",
                SupplierKind::Company => "companies",
            };
            notifier.record(format!("Document must have {} digits for {}.", expected, kind));
            valid = false;
        }

        valid
    }
}

fn supplier_not_found() -> AppError {
    AppError::not_found(anyhow!("Supplier not found"))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use supplydesk_config::{CorsConfig, JwtConfig};

    use super::*;
    use crate::modules::products::model::Product;

    fn supplier(document: &str, kind: SupplierKind) -> Supplier {
        Supplier {
            id: Uuid::new_v4(),
            name: "Alpha SA".to_string(),
            document: document.to_string(),
            kind,
            active: true,
            address: None,
        }
    }

    fn dto(id: Option<Uuid>, document: &str) -> SupplierDto {
        SupplierDto {
            id,
            name: "Alpha SA".to_string(),
            document: document.to_string(),
            kind: SupplierKind::Individual,
            active: true,
            address: None,
        }
    }

    fn state() -> AppState {
        let jwt_config = JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            expiry_hours: 1,
            issuer: "SupplyDesk".to_string(),
            audience: "https://localhost".to_string(),
        };
        AppState::new(jwt_config, CorsConfig::from_origins("http://localhost:4200")).unwrap()
    }

    #[test]
    fn test_check_document_accepts_valid_lengths() {
        let mut notifier = Notifier::new();
        assert!(SupplierService::check_document(
            &mut notifier,
            &supplier("12345678901", SupplierKind::Individual)
        ));
        assert!(SupplierService::check_document(
            &mut notifier,
            &supplier("12345678000199", SupplierKind::Company)
        ));
        assert!(!notifier.has_notifications());
    }

    #[test]
    fn test_check_document_records_every_violation() {
        let mut notifier = Notifier::new();
        let valid = SupplierService::check_document(
            &mut notifier,
            &supplier("1234567890a", SupplierKind::Company),
        );

        assert!(!valid);
        assert_eq!(
            notifier.all(),
            vec![
                DOCUMENT_NOT_NUMERIC.to_string(),
                "Document must have 14 digits for companies.".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_add_records_duplicate_document() {
        let state = state();
        let mut notifier = Notifier::new();
        assert!(
            SupplierService::add(&state, &mut notifier, dto(None, "12345678901"))
                .await
                .is_some()
        );

        let second = SupplierService::add(&state, &mut notifier, dto(None, "12345678901")).await;

        assert!(second.is_none());
        assert_eq!(notifier.all(), vec![DUPLICATE_DOCUMENT.to_string()]);
    }

    #[tokio::test]
    async fn test_update_unknown_supplier_is_not_found() {
        let state = state();
        let mut notifier = Notifier::new();
        let id = Uuid::new_v4();

        let err = SupplierService::update(&state, &mut notifier, id, dto(Some(id), "12345678901"))
            .await
            .unwrap_err();

        assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_remove_with_products_records_notification() {
        let state = state();
        let mut notifier = Notifier::new();
        let stored = SupplierService::add(&state, &mut notifier, dto(None, "12345678901"))
            .await
            .unwrap();
        let product = Product {
            id: Uuid::new_v4(),
            supplier_id: stored.id,
            name: "Parafuso".to_string(),
            description: "Parafuso sextavado".to_string(),
            price: 0.5,
            active: true,
            created_at: Utc::now(),
        };
        state.db.write().await.products.insert(product.id, product);

        let removed = SupplierService::remove(&state, &mut notifier, stored.id)
            .await
            .unwrap();

        assert!(removed.is_none());
        assert_eq!(notifier.all(), vec![HAS_PRODUCTS.to_string()]);
    }
}
