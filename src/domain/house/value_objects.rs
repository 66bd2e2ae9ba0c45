use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::HouseError;

// ============================================================================
// House Value Objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Uuid,
    pub street: String,
    pub house_number: String,
    pub flat_number: Option<String>,
    pub city: String,
    pub country: String,
}

impl Address {
    pub fn create(
        id: Uuid,
        street: impl Into<String>,
        house_number: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        flat_number: Option<String>,
    ) -> Result<Self, HouseError> {
        let address = Self {
            id,
            street: street.into(),
            house_number: house_number.into(),
            flat_number,
            city: city.into(),
            country: country.into(),
        };
        address.validate()?;
        Ok(address)
    }

    pub fn validate(&self) -> Result<(), HouseError> {
        if self.id.is_nil() {
            return Err(HouseError::NilId("address"));
        }

        for (field, value) in [
            ("street", &self.street),
            ("houseNumber", &self.house_number),
            ("city", &self.city),
            ("country", &self.country),
        ] {
            if value.trim().is_empty() {
                return Err(HouseError::EmptyField(field));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub area: f64,
}

impl Room {
    pub fn new(name: impl Into<String>, color: impl Into<String>, area: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
            area,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
