use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::commands::HouseUpdate;
use super::errors::HouseError;
use super::value_objects::{Address, Room};

// ============================================================================
// House Aggregate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    // Identity
    pub id: Uuid,

    // Current State
    pub name: String,
    pub color: String,
    pub area: f64,

    // Owned children
    pub address: Option<Address>,
    pub rooms: Vec<Room>,
}

impl House {
    /// Create a house, enforcing the creation invariants
    pub fn create(
        id: Uuid,
        name: impl Into<String>,
        color: impl Into<String>,
        area: f64,
        address: Option<Address>,
        rooms: Vec<Room>,
    ) -> Result<Self, HouseError> {
        if id.is_nil() {
            return Err(HouseError::NilId("house"));
        }

        let house = Self {
            id,
            name: name.into(),
            color: color.into(),
            area,
            address,
            rooms,
        };

        if house.name.trim().is_empty() {
            return Err(HouseError::EmptyField("name"));
        }
        if house.color.trim().is_empty() {
            return Err(HouseError::EmptyField("color"));
        }
        if !house.area.is_finite() || house.area < 0.0 {
            return Err(HouseError::InvalidArea(house.area));
        }
        if let Some(address) = &house.address {
            address.validate()?;
        }

        Ok(house)
    }

    /// Whole-field replacement of the scalar members
    pub fn apply_update(&mut self, update: &HouseUpdate) {
        self.name = update.name.clone();
        self.color = update.color.clone();
        self.area = update.area;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address::create(Uuid::new_v4(), "Street1", "1", "City1", "Country1", None).unwrap()
    }

    #[test]
    fn test_create_house() {
        let id = Uuid::new_v4();
        let house = House::create(id, "First House", "Red", 25.0, Some(address()), vec![]).unwrap();

        assert_eq!(house.id, id);
        assert_eq!(house.name, "First House");
        assert!(house.rooms.is_empty());
    }

    #[test]
    fn test_create_rejects_nil_id() {
        let err = House::create(Uuid::nil(), "First House", "Red", 25.0, None, vec![]).unwrap_err();
        assert_eq!(err, HouseError::NilId("house"));
    }

    #[test]
    fn test_create_rejects_empty_name_and_color() {
        assert_eq!(
            House::create(Uuid::new_v4(), "", "Red", 25.0, None, vec![]).unwrap_err(),
            HouseError::EmptyField("name")
        );
        assert_eq!(
            House::create(Uuid::new_v4(), "House", "  ", 25.0, None, vec![]).unwrap_err(),
            HouseError::EmptyField("color")
        );
    }

    #[test]
    fn test_create_rejects_invalid_area() {
        assert!(matches!(
            House::create(Uuid::new_v4(), "House", "Red", -1.0, None, vec![]),
            Err(HouseError::InvalidArea(_))
        ));
        assert!(matches!(
            House::create(Uuid::new_v4(), "House", "Red", f64::NAN, None, vec![]),
            Err(HouseError::InvalidArea(_))
        ));
    }

    #[test]
    fn test_create_validates_address() {
        let mut bad = address();
        bad.city = String::new();

        assert_eq!(
            House::create(Uuid::new_v4(), "House", "Red", 25.0, Some(bad), vec![]).unwrap_err(),
            HouseError::EmptyField("city")
        );
    }

    #[test]
    fn test_apply_update_keeps_children() {
        let room = Room::new("Restroom", "Green", 11.0);
        let mut house =
            House::create(Uuid::new_v4(), "First House", "Red", 25.0, Some(address()), vec![room.clone()])
                .unwrap();

        house.apply_update(&HouseUpdate {
            name: "Renamed".to_string(),
            color: "Blue".to_string(),
            area: 40.0,
        });

        assert_eq!(house.name, "Renamed");
        assert_eq!(house.color, "Blue");
        assert_eq!(house.area, 40.0);
        assert_eq!(house.rooms, vec![room]);
        assert!(house.address.is_some());
    }
}
