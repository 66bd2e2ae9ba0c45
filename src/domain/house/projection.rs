use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::patch::{
    coerce_composite, composite_to_value, CoercionError, Composite, FieldType, Member, NodeMut,
    PatchValue, Shape,
};

use super::aggregate::House;
use super::value_objects::{Address, Room};

// ============================================================================
// Patchable Projection
// ============================================================================
//
// The shape a patch document is applied to. Identities are not part of it:
// rooms are addressed by position only, and the address id is restored from
// the aggregate during merge.
//
// House → HousePatch → (engine) → HousePatch → merge_into(House)
//
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousePatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub area: f64,
    pub address: Option<AddressPatch>,
    pub rooms: Vec<RoomPatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPatch {
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub flat_number: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub area: f64,
}

// ============================================================================
// Member Lookup Tables
// ============================================================================

impl Composite for HousePatch {
    fn type_label(&self) -> &'static str {
        "House"
    }

    fn member_names(&self) -> &'static [&'static str] {
        &["name", "color", "area", "address", "rooms"]
    }

    fn member(&self, name: &str) -> Option<&dyn Member> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(&self.name),
            "color" => Some(&self.color),
            "area" => Some(&self.area),
            "address" => Some(&self.address),
            "rooms" => Some(&self.rooms),
            _ => None,
        }
    }

    fn member_mut(&mut self, name: &str) -> Option<&mut dyn Member> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(&mut self.name),
            "color" => Some(&mut self.color),
            "area" => Some(&mut self.area),
            "address" => Some(&mut self.address),
            "rooms" => Some(&mut self.rooms),
            _ => None,
        }
    }
}

impl Composite for AddressPatch {
    fn type_label(&self) -> &'static str {
        "Address"
    }

    fn member_names(&self) -> &'static [&'static str] {
        &["street", "houseNumber", "flatNumber", "city", "country"]
    }

    fn member(&self, name: &str) -> Option<&dyn Member> {
        match name.to_ascii_lowercase().as_str() {
            "street" => Some(&self.street),
            "housenumber" => Some(&self.house_number),
            "flatnumber" => Some(&self.flat_number),
            "city" => Some(&self.city),
            "country" => Some(&self.country),
            _ => None,
        }
    }

    fn member_mut(&mut self, name: &str) -> Option<&mut dyn Member> {
        match name.to_ascii_lowercase().as_str() {
            "street" => Some(&mut self.street),
            "housenumber" => Some(&mut self.house_number),
            "flatnumber" => Some(&mut self.flat_number),
            "city" => Some(&mut self.city),
            "country" => Some(&mut self.country),
            _ => None,
        }
    }
}

impl Composite for RoomPatch {
    fn type_label(&self) -> &'static str {
        "Room"
    }

    fn member_names(&self) -> &'static [&'static str] {
        &["name", "color", "area"]
    }

    fn member(&self, name: &str) -> Option<&dyn Member> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(&self.name),
            "color" => Some(&self.color),
            "area" => Some(&self.area),
            _ => None,
        }
    }

    fn member_mut(&mut self, name: &str) -> Option<&mut dyn Member> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(&mut self.name),
            "color" => Some(&mut self.color),
            "area" => Some(&mut self.area),
            _ => None,
        }
    }
}

// Nested composites are members of their parent, so they are field types too

impl FieldType for AddressPatch {
    const TYPE_NAME: &'static str = "Address";
    const SHAPE: Shape = Shape::Composite;

    fn to_value(&self) -> PatchValue {
        composite_to_value(self)
    }

    fn coerce(value: &PatchValue) -> Result<Self, CoercionError> {
        coerce_composite(value, Self::TYPE_NAME)
    }

    fn neutral() -> Self {
        Self::default()
    }

    fn descend(&mut self) -> Option<NodeMut<'_>> {
        Some(NodeMut::Composite(self))
    }
}

impl FieldType for RoomPatch {
    const TYPE_NAME: &'static str = "Room";
    const SHAPE: Shape = Shape::Composite;

    fn to_value(&self) -> PatchValue {
        composite_to_value(self)
    }

    fn coerce(value: &PatchValue) -> Result<Self, CoercionError> {
        coerce_composite(value, Self::TYPE_NAME)
    }

    fn neutral() -> Self {
        Self::default()
    }

    fn descend(&mut self) -> Option<NodeMut<'_>> {
        Some(NodeMut::Composite(self))
    }
}

// ============================================================================
// Aggregate ⇄ Projection
// ============================================================================

impl From<&House> for HousePatch {
    fn from(house: &House) -> Self {
        Self {
            name: Some(house.name.clone()),
            color: Some(house.color.clone()),
            area: house.area,
            address: house.address.as_ref().map(AddressPatch::from),
            rooms: house.rooms.iter().map(RoomPatch::from).collect(),
        }
    }
}

impl From<&Address> for AddressPatch {
    fn from(address: &Address) -> Self {
        Self {
            street: Some(address.street.clone()),
            house_number: Some(address.house_number.clone()),
            flat_number: address.flat_number.clone(),
            city: Some(address.city.clone()),
            country: Some(address.country.clone()),
        }
    }
}

impl From<&Room> for RoomPatch {
    fn from(room: &Room) -> Self {
        Self {
            name: Some(room.name.clone()),
            color: Some(room.color.clone()),
            area: room.area,
        }
    }
}

impl HousePatch {
    /// Write the patched state back onto `house`, field by field.
    ///
    /// The house id never changes. An address that survives keeps its id and
    /// a newly added one gets a fresh id. Rooms are merged by position: ids of
    /// existing positions are kept, appended rooms get fresh ids and surplus
    /// rooms are dropped.
    pub fn merge_into(self, house: &mut House) {
        house.name = self.name.unwrap_or_default();
        house.color = self.color.unwrap_or_default();
        house.area = self.area;

        let address_id = house.address.as_ref().map(|a| a.id);
        house.address = self
            .address
            .map(|patch| patch.into_address(address_id.unwrap_or_else(Uuid::new_v4)));

        let existing: Vec<Uuid> = house.rooms.iter().map(|r| r.id).collect();
        house.rooms = self
            .rooms
            .into_iter()
            .enumerate()
            .map(|(position, patch)| {
                let id = existing.get(position).copied().unwrap_or_else(Uuid::new_v4);
                patch.into_room(id)
            })
            .collect();
    }
}

impl AddressPatch {
    fn into_address(self, id: Uuid) -> Address {
        Address {
            id,
            street: self.street.unwrap_or_default(),
            house_number: self.house_number.unwrap_or_default(),
            flat_number: self.flat_number,
            city: self.city.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
        }
    }
}

impl RoomPatch {
    fn into_room(self, id: Uuid) -> Room {
        Room {
            id,
            name: self.name.unwrap_or_default(),
            color: self.color.unwrap_or_default(),
            area: self.area,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
