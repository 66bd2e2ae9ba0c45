use anyhow::Result;
use uuid::{uuid, Uuid};

use crate::domain::house::{Address, House, Room};

// ============================================================================
// Seed Data
// ============================================================================

pub const FIRST_HOUSE_ID: Uuid = uuid!("7b4283fe-d046-4766-8015-ad4e50df4f67");
pub const SECOND_HOUSE_ID: Uuid = uuid!("2d6dea12-f724-45ad-adfb-c04703a41805");
pub const THIRD_HOUSE_ID: Uuid = uuid!("37f05632-8c35-4afe-a472-f3a57924d0b8");
pub const FOURTH_HOUSE_ID: Uuid = uuid!("4c6113de-2384-422c-986c-71fd5f23d7ef");
/// The only seeded house without an address
pub const HOMELESS_HOUSE_ID: Uuid = uuid!("d93291cc-2434-48c0-bf50-ff65505c1aa7");

/// Houses the demo binary starts with
pub fn seeded_houses() -> Result<Vec<House>> {
    Ok(vec![
        House::create(
            FIRST_HOUSE_ID,
            "First House",
            "Red",
            25.0,
            Some(Address::create(
                uuid!("f98247b5-bc43-410f-92f0-38668ddb7e9b"),
                "Street1",
                "1",
                "City1",
                "Country1",
                None,
            )?),
            vec![],
        )?,
        House::create(
            SECOND_HOUSE_ID,
            "Second House",
            "Red",
            25.0,
            Some(Address::create(
                uuid!("65c1688a-8427-4635-9387-cbb436c81305"),
                "Street2",
                "2",
                "City1",
                "Country1",
                None,
            )?),
            vec![
                Room::new("Restroom", "Green", 11.0)
                    .with_id(uuid!("b6a448f4-4b77-4591-9530-d145b770a2e6")),
                Room::new("Kids Room", "Pink", 20.0)
                    .with_id(uuid!("0a1826a1-7846-4f8a-a44e-a0efb93c25be")),
            ],
        )?,
        House::create(
            THIRD_HOUSE_ID,
            "Third House",
            "Red",
            25.0,
            Some(Address::create(
                uuid!("9bb47c15-cbfb-4edb-9595-b0f04c60b6bb"),
                "Street3",
                "3",
                "City1",
                "Country1",
                None,
            )?),
            vec![Room::new("Restroom", "Green", 11.0)
                .with_id(uuid!("db756d1d-7175-4fa6-8ca5-c70ebbcc099f"))],
        )?,
        House::create(
            FOURTH_HOUSE_ID,
            "Fourth House",
            "Red",
            25.0,
            Some(Address::create(
                uuid!("8d285b9f-db96-4b15-9de7-c3203f98b164"),
                "Street4",
                "4",
                "City1",
                "Country1",
                Some("1".to_string()),
            )?),
            vec![],
        )?,
        House::create(HOMELESS_HOUSE_ID, "Eleventh House", "Red", 25.0, None, vec![])?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_valid() {
        let houses = seeded_houses().unwrap();
        assert_eq!(houses.len(), 5);
        assert_eq!(houses[1].rooms.len(), 2);
        assert!(houses
            .iter()
            .find(|h| h.id == HOMELESS_HOUSE_ID)
            .unwrap()
            .address
            .is_none());
    }
}
