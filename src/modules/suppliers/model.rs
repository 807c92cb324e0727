use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::products::model::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplierKind {
    /// Registered under an 11-digit individual taxpayer number
    Individual,
    /// Registered under a 14-digit company number
    Company,
}

impl SupplierKind {
    pub fn document_length(self) -> usize {
        match self {
            SupplierKind::Individual => 11,
            SupplierKind::Company => 14,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub postal_code: String,
    pub district: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub document: String,
    pub kind: SupplierKind,
    pub active: bool,
    pub address: Option<Address>,
}

/// A supplier together with the products it provides.
#[derive(Debug, Clone, Serialize)]
pub struct SupplierDetails {
    #[serde(flatten)]
    pub supplier: Supplier,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[validate(length(
        min = 2,
        max = 200,
        message = "Street must be between 2 and 200 characters"
    ))]
    pub street: String,
    #[validate(length(min = 1, max = 50, message = "Number must be between 1 and 50 characters"))]
    pub number: String,
    #[validate(length(max = 250, message = "Complement must be at most 250 characters"))]
    #[serde(default)]
    pub complement: Option<String>,
    #[validate(length(equal = 8, message = "Postal code must have 8 characters"))]
    pub postal_code: String,
    #[validate(length(
        min = 2,
        max = 100,
        message = "District must be between 2 and 100 characters"
    ))]
    pub district: String,
    #[validate(length(min = 2, max = 100, message = "City must be between 2 and 100 characters"))]
    pub city: String,
    #[validate(length(min = 2, max = 50, message = "State must be between 2 and 50 characters"))]
    pub state: String,
}

impl AddressDto {
    pub fn into_address(self, id: Uuid, supplier_id: Uuid) -> Address {
        Address {
            id,
            supplier_id,
            street: self.street.trim().to_string(),
            number: self.number.trim().to_string(),
            complement: self
                .complement
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            postal_code: self.postal_code,
            district: self.district.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SupplierDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[validate(length(
        min = 2,
        max = 100,
        message = "Name must be between 2 and 100 characters"
    ))]
    pub name: String,
    #[validate(length(
        min = 11,
        max = 14,
        message = "Document must be between 11 and 14 characters"
    ))]
    pub document: String,
    pub kind: SupplierKind,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Only read on creation; later changes go through the address endpoint.
    #[validate(nested)]
    #[serde(default)]
    pub address: Option<AddressDto>,
}

fn default_active() -> bool {
    true
}

impl SupplierDto {
    pub fn into_supplier(self, id: Uuid) -> Supplier {
        let address = self.address.map(|address| {
            let address_id = address.id.unwrap_or_else(Uuid::new_v4);
            address.into_address(address_id, id)
        });

        Supplier {
            id,
            name: self.name.trim().to_string(),
            document: self.document,
            kind: self.kind,
            active: self.active,
            address,
        }
    }
}
