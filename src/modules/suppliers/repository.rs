//! Supplier queries over the in-memory catalog.
//!
//! Every write checks its preconditions under the same write guard that
//! applies it.

use uuid::Uuid;

use crate::db::{Database, Tables};

use super::model::{Address, Supplier, SupplierDetails};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplierWriteError {
    NotFound,
    DuplicateDocument,
    HasProducts,
}

pub struct SupplierRepository;

impl SupplierRepository {
    /// All suppliers ordered by name.
    pub async fn list(db: &Database) -> Vec<Supplier> {
        let mut suppliers: Vec<_> = db.read().await.suppliers.values().cloned().collect();
        suppliers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        suppliers
    }

    pub async fn find_with_products(db: &Database, id: Uuid) -> Option<SupplierDetails> {
        let tables = db.read().await;
        let supplier = tables.suppliers.get(&id)?.clone();

        let mut products: Vec<_> = tables
            .products
            .values()
            .filter(|p| p.supplier_id == id)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        Some(SupplierDetails { supplier, products })
    }

    pub async fn find_address(db: &Database, supplier_id: Uuid) -> Option<Address> {
        db.read()
            .await
            .suppliers
            .get(&supplier_id)
            .and_then(|s| s.address.clone())
    }

    pub async fn insert_if_document_free(
        db: &Database,
        supplier: Supplier,
    ) -> Result<Supplier, SupplierWriteError> {
        let mut tables = db.write().await;
        if document_taken(&tables, &supplier.document, supplier.id) {
            return Err(SupplierWriteError::DuplicateDocument);
        }

        tables.suppliers.insert(supplier.id, supplier.clone());
        Ok(supplier)
    }

    /// Replaces a stored supplier, keeping its current address.
    pub async fn replace_existing(
        db: &Database,
        mut supplier: Supplier,
    ) -> Result<Supplier, SupplierWriteError> {
        let mut tables = db.write().await;
        if document_taken(&tables, &supplier.document, supplier.id) {
            return Err(SupplierWriteError::DuplicateDocument);
        }

        let stored = tables
            .suppliers
            .get_mut(&supplier.id)
            .ok_or(SupplierWriteError::NotFound)?;
        supplier.address = stored.address.clone();
        *stored = supplier.clone();

        Ok(supplier)
    }

    /// Removes a supplier and its address unless products still reference it.
    pub async fn remove_without_products(
        db: &Database,
        id: Uuid,
    ) -> Result<Supplier, SupplierWriteError> {
        let mut tables = db.write().await;
        if !tables.suppliers.contains_key(&id) {
            return Err(SupplierWriteError::NotFound);
        }
        if tables.products.values().any(|p| p.supplier_id == id) {
            return Err(SupplierWriteError::HasProducts);
        }

        tables
            .suppliers
            .remove(&id)
            .ok_or(SupplierWriteError::NotFound)
    }

    /// Replaces the address with the same id on whichever supplier owns it.
    pub async fn replace_address(
        db: &Database,
        mut address: Address,
    ) -> Result<Address, SupplierWriteError> {
        let mut tables = db.write().await;
        let owner = tables
            .suppliers
            .values_mut()
            .find(|s| s.address.as_ref().is_some_and(|a| a.id == address.id))
            .ok_or(SupplierWriteError::NotFound)?;

        address.supplier_id = owner.id;
        owner.address = Some(address.clone());
        Ok(address)
    }
}

fn document_taken(tables: &Tables, document: &str, except: Uuid) -> bool {
    tables
        .suppliers
        .values()
        .any(|s| s.document == document && s.id != except)
}
