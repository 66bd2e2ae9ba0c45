use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::aggregate::House;

// ============================================================================
// House Documents - Inbound and outbound shapes
// ============================================================================

/// Whole-field replacement document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseUpdate {
    pub name: String,
    pub color: String,
    pub area: f64,
}

/// Creation document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseRequest {
    pub name: String,
    pub color: String,
    pub area: f64,
}

/// Summary row returned by the list use case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseListItem {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

impl From<&House> for HouseListItem {
    fn from(house: &House) -> Self {
        Self {
            id: house.id,
            name: house.name.clone(),
            color: house.color.clone(),
        }
    }
}
