//! Product queries over the in-memory catalog.

use uuid::Uuid;

use crate::db::{Database, Tables};

use super::model::{Product, ProductView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductWriteError {
    NotFound,
    UnknownSupplier,
}

pub struct ProductRepository;

impl ProductRepository {
    /// All products ordered by name, each with its supplier's name.
    pub async fn list(db: &Database) -> Vec<ProductView> {
        let tables = db.read().await;
        let mut products: Vec<_> = tables
            .products
            .values()
            .map(|p| view(&tables, p))
            .collect();
        products.sort_by(|a, b| {
            a.product
                .name
                .cmp(&b.product.name)
                .then(a.product.id.cmp(&b.product.id))
        });
        products
    }

    pub async fn find(db: &Database, id: Uuid) -> Option<ProductView> {
        let tables = db.read().await;
        tables.products.get(&id).map(|p| view(&tables, p))
    }

    pub async fn insert(db: &Database, product: Product) -> Result<Product, ProductWriteError> {
        let mut tables = db.write().await;
        if !tables.suppliers.contains_key(&product.supplier_id) {
            return Err(ProductWriteError::UnknownSupplier);
        }

        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    /// Replaces a stored product, keeping its creation time.
    pub async fn replace_existing(
        db: &Database,
        mut product: Product,
    ) -> Result<Product, ProductWriteError> {
        let mut tables = db.write().await;
        if !tables.suppliers.contains_key(&product.supplier_id) {
            return Err(ProductWriteError::UnknownSupplier);
        }

        let stored = tables
            .products
            .get_mut(&product.id)
            .ok_or(ProductWriteError::NotFound)?;
        product.created_at = stored.created_at;
        *stored = product.clone();

        Ok(product)
    }

    pub async fn remove(db: &Database, id: Uuid) -> Option<Product> {
        db.write().await.products.remove(&id)
    }
}

fn view(tables: &Tables, product: &Product) -> ProductView {
    let supplier_name = tables
        .suppliers
        .get(&product.supplier_id)
        .map(|s| s.name.clone())
        .unwrap_or_default();

    ProductView {
        product: product.clone(),
        supplier_name,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::modules::suppliers::model::{Supplier, SupplierKind};

    async fn db_with_supplier(name: &str) -> (Database, Uuid) {
        let db = Database::new();
        let supplier = Supplier {
            id: Uuid::new_v4(),
            name: name.to_string(),
            document: "12345678901".to_string(),
            kind: SupplierKind::Individual,
            active: true,
            address: None,
        };
        let id = supplier.id;
        db.write().await.suppliers.insert(id, supplier);
        (db, id)
    }

    fn product(supplier_id: Uuid, name: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            supplier_id,
            name: name.to_string(),
            description: "Item de estoque".to_string(),
            price: 9.9,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_joins_supplier_name_and_sorts() {
        let (db, supplier_id) = db_with_supplier("Alpha SA").await;
        ProductRepository::insert(&db, product(supplier_id, "Porca"))
            .await
            .unwrap();
        ProductRepository::insert(&db, product(supplier_id, "Arruela"))
            .await
            .unwrap();

        let products = ProductRepository::list(&db).await;

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product.name, "Arruela");
        assert!(products.iter().all(|p| p.supplier_name == "Alpha SA"));
    }

    #[tokio::test]
    async fn test_insert_requires_existing_supplier() {
        let (db, _) = db_with_supplier("Alpha SA").await;

        let result = ProductRepository::insert(&db, product(Uuid::new_v4(), "Porca")).await;

        assert_eq!(result, Err(ProductWriteError::UnknownSupplier));
        assert!(ProductRepository::list(&db).await.is_empty());
    }

    #[tokio::test]
    async fn test_replace_existing_keeps_created_at() {
        let (db, supplier_id) = db_with_supplier("Alpha SA").await;
        let stored = ProductRepository::insert(&db, product(supplier_id, "Porca"))
            .await
            .unwrap();

        let mut changed = stored.clone();
        changed.price = 12.5;
        changed.created_at = stored.created_at + Duration::days(1);
        let updated = ProductRepository::replace_existing(&db, changed).await.unwrap();

        assert_eq!(updated.price, 12.5);
        assert_eq!(updated.created_at, stored.created_at);
    }

    #[tokio::test]
    async fn test_replace_existing_does_not_resurrect_removed_product() {
        let (db, supplier_id) = db_with_supplier("Alpha SA").await;
        let stored = ProductRepository::insert(&db, product(supplier_id, "Porca"))
            .await
            .unwrap();
        ProductRepository::remove(&db, stored.id).await.unwrap();

        let result = ProductRepository::replace_existing(&db, stored.clone()).await;

        assert_eq!(result, Err(ProductWriteError::NotFound));
        assert!(ProductRepository::find(&db, stored.id).await.is_none());
    }
}
