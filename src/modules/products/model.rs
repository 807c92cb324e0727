use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Product as listed, with the name of its supplier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub supplier_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub supplier_id: Uuid,
    #[validate(length(
        min = 2,
        max = 200,
        message = "Name must be between 2 and 200 characters"
    ))]
    pub name: String,
    #[validate(length(
        min = 2,
        max = 1000,
        message = "Description must be between 2 and 1000 characters"
    ))]
    pub description: String,
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than zero"))]
    pub price: f64,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl ProductDto {
    pub fn into_product(self, id: Uuid, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            supplier_id: self.supplier_id,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price,
            active: self.active,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(price: f64) -> ProductDto {
        ProductDto {
            id: None,
            supplier_id: Uuid::new_v4(),
            name: "Parafuso".to_string(),
            description: "Parafuso sextavado".to_string(),
            price,
            active: true,
        }
    }

    #[test]
    fn test_price_must_be_positive() {
        assert!(dto(0.0).validate().is_err());
        assert!(dto(-1.5).validate().is_err());
        assert!(dto(0.01).validate().is_ok());
    }

    #[test]
    fn test_dto_deserializes_camel_case_and_defaults_active() {
        let dto: ProductDto = serde_json::from_str(&format!(
            r#"{{"supplierId":"{}","name":"Parafuso","description":"Sextavado","price":2.5}}"#,
            Uuid::nil()
        ))
        .unwrap();

        assert_eq!(dto.supplier_id, Uuid::nil());
        assert!(dto.active);
    }

    #[test]
    fn test_view_flattens_product() {
        let created_at = Utc::now();
        let view = ProductView {
            product: dto(2.5).into_product(Uuid::nil(), created_at),
            supplier_name: "Acme".to_string(),
        };

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["supplierName"], "Acme");
        assert_eq!(value["price"], 2.5);
        assert_eq!(value["id"], Uuid::nil().to_string());
    }
}
