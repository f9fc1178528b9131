use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity categories emitted by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Airport,
    FlightRoute,
    BusStop,
    BusRoute,
    Country,
    City,
    Meal,
    Hotel,
}

impl EntityKind {
    /// Value stored in the `entity_type` field of snapshot documents.
    pub fn entity_type(self) -> &'static str {
        match self {
            EntityKind::Airport => "Airport",
            EntityKind::FlightRoute => "FlightRoute",
            EntityKind::BusStop => "BusStop",
            EntityKind::BusRoute => "BusRoute",
            EntityKind::Country => "Country",
            EntityKind::City => "City",
            EntityKind::Meal => "Meal",
            EntityKind::Hotel => "Hotel",
        }
    }

    /// Name of the creation event recorded for this kind.
    pub fn event_name(self) -> &'static str {
        match self {
            EntityKind::Airport => "AirportCreated",
            EntityKind::FlightRoute => "FlightRouteCreated",
            EntityKind::BusStop => "BusStopCreated",
            EntityKind::BusRoute => "BusRouteCreated",
            EntityKind::Country => "CountryCreated",
            EntityKind::City => "CityCreated",
            EntityKind::Meal => "MealCreated",
            EntityKind::Hotel => "HotelCreated",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entity_type())
    }
}

/// Identifier pair assigned to an entity when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityIds {
    /// Synthetic entity id used by every downstream reference.
    pub entity_id: String,
    /// Sequence number of the event that created the entity.
    pub last_event_id: u64,
}

impl EntityIds {
    pub fn new(entity_id: impl Into<String>, last_event_id: u64) -> Self {
        Self {
            entity_id: entity_id.into(),
            last_event_id,
        }
    }
}
