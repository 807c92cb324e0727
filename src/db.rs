//! In-memory catalog storage.
//!
//! Suppliers and the products that reference them live behind a single
//! lock, so a rule spanning both tables (a product needs an existing
//! supplier, a supplier with products cannot be removed) is checked and
//! applied under one write guard.

use std::collections::HashMap;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::modules::products::model::Product;
use crate::modules::suppliers::model::Supplier;

#[derive(Debug, Default)]
pub struct Tables {
    pub suppliers: HashMap<Uuid, Supplier>,
    pub products: HashMap<Uuid, Product>,
}

#[derive(Debug, Default)]
pub struct Database {
    tables: RwLock<Tables>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}
