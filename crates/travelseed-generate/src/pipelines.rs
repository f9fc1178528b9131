//! Per-category generation: build payloads, resolve references, emit, register.

use std::io::Write;

use serde_json::Value;
use travelseed_core::{
    Airport, BusStop, CodeRef, Country, EntityKind, Hotel, Meal, ReferenceRegistry, Route,
};

use crate::emitter::EntityEmitter;
use crate::errors::Result;
use crate::output::Payload;

/// Routes of one transport mode and the stop kind they reference.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RouteShape {
    pub route: EntityKind,
    pub stop: EntityKind,
    /// Infix of the payload fields, e.g. `origin_airport_id`.
    pub stop_field: &'static str,
}

pub(crate) const FLIGHT_ROUTES: RouteShape = RouteShape {
    route: EntityKind::FlightRoute,
    stop: EntityKind::Airport,
    stop_field: "airport",
};

pub(crate) const BUS_ROUTES: RouteShape = RouteShape {
    route: EntityKind::BusRoute,
    stop: EntityKind::BusStop,
    stop_field: "bus_stop",
};

pub(crate) fn airports<W: Write>(
    emitter: &mut EntityEmitter<'_, W>,
    registry: &mut ReferenceRegistry,
    airports: &[Airport],
) -> Result<()> {
    for airport in airports {
        let ids = emitter.emit(EntityKind::Airport, &airport.attributes)?;
        registry.register(EntityKind::Airport, &airport.code, ids)?;
    }
    Ok(())
}

pub(crate) fn bus_stops<W: Write>(
    emitter: &mut EntityEmitter<'_, W>,
    registry: &mut ReferenceRegistry,
    stops: &[BusStop],
) -> Result<()> {
    for stop in stops {
        let ids = emitter.emit(EntityKind::BusStop, &stop.attributes)?;
        registry.register(EntityKind::BusStop, &stop.code, ids)?;
    }
    Ok(())
}

/// Routes are not referenced by other categories, so nothing is registered.
pub(crate) fn routes<W: Write>(
    emitter: &mut EntityEmitter<'_, W>,
    registry: &ReferenceRegistry,
    shape: RouteShape,
    routes: &[Route],
) -> Result<()> {
    for route in routes {
        let payload = route_payload(registry, shape, route)?;
        emitter.emit(shape.route, &payload)?;
    }
    Ok(())
}

/// Each country is followed by its own cities.
pub(crate) fn countries_and_cities<W: Write>(
    emitter: &mut EntityEmitter<'_, W>,
    registry: &mut ReferenceRegistry,
    countries: &[Country],
) -> Result<()> {
    for country in countries {
        let mut payload = Payload::new();
        payload.insert("title".to_string(), Value::from(country.title.as_str()));
        let country_ids = emitter.emit(EntityKind::Country, &payload)?;
        let country_id = country_ids.entity_id.clone();
        registry.register(EntityKind::Country, &country.identifier, country_ids)?;

        for city in &country.cities {
            let mut payload = Payload::new();
            payload.insert("title".to_string(), Value::from(city.title.as_str()));
            payload.insert("country_id".to_string(), Value::from(country_id.as_str()));
            let city_ids = emitter.emit(EntityKind::City, &payload)?;
            registry.register(EntityKind::City, &city.identifier, city_ids)?;
        }
    }
    Ok(())
}

pub(crate) fn meals<W: Write>(
    emitter: &mut EntityEmitter<'_, W>,
    registry: &mut ReferenceRegistry,
    meals: &[Meal],
) -> Result<()> {
    for meal in meals {
        let mut payload = Payload::new();
        payload.insert("title".to_string(), Value::from(meal.title.as_str()));
        let ids = emitter.emit(EntityKind::Meal, &payload)?;
        registry.register(EntityKind::Meal, &meal.identifier, ids)?;
    }
    Ok(())
}

pub(crate) fn hotels<W: Write>(
    emitter: &mut EntityEmitter<'_, W>,
    registry: &mut ReferenceRegistry,
    hotels: &[Hotel],
) -> Result<()> {
    for hotel in hotels {
        let payload = hotel_payload(registry, hotel)?;
        let ids = emitter.emit(EntityKind::Hotel, &payload)?;
        registry.register(EntityKind::Hotel, &hotel.title, ids)?;
    }
    Ok(())
}

fn route_payload(
    registry: &ReferenceRegistry,
    shape: RouteShape,
    route: &Route,
) -> Result<Payload> {
    let resolve = |stop: &CodeRef| -> Result<Value> {
        let ids = registry.resolve(shape.stop, &stop.code)?;
        Ok(Value::from(ids.entity_id.as_str()))
    };

    let origin = resolve(&route.origin)?;
    let via = route.via.iter().map(resolve).collect::<Result<Vec<_>>>()?;
    let destination = resolve(&route.destination)?;

    let field = shape.stop_field;
    let mut payload = Payload::new();
    payload.insert(format!("origin_{field}_id"), origin);
    payload.insert(format!("via_{field}_ids"), Value::Array(via));
    payload.insert(format!("destination_{field}_id"), destination);
    Ok(payload)
}

fn hotel_payload(registry: &ReferenceRegistry, hotel: &Hotel) -> Result<Payload> {
    let meals = hotel
        .meals
        .iter()
        .map(|meal| {
            let ids = registry.resolve(EntityKind::Meal, &meal.identifier)?;
            Ok(Value::from(ids.entity_id.as_str()))
        })
        .collect::<Result<Vec<_>>>()?;
    let country = registry.resolve(EntityKind::Country, &hotel.destination_country_id)?;
    let city = registry.resolve_optional(EntityKind::City, hotel.destination_city_id.as_deref())?;

    // Resolved references replace the natural keys in place.
    let mut payload = hotel.attributes.clone();
    payload.insert("title".to_string(), Value::from(hotel.title.as_str()));
    payload.insert("meals".to_string(), Value::Array(meals));
    payload.insert(
        "destination_country_id".to_string(),
        Value::from(country.entity_id.as_str()),
    );
    payload.insert(
        "destination_city_id".to_string(),
        city.map_or(Value::Null, |ids| Value::from(ids.entity_id.as_str())),
    );
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use travelseed_core::{EntityIds, Error as CoreError};

    use super::*;
    use crate::errors::GenerationError;

    fn registry_with(entries: &[(EntityKind, &str, &str)]) -> ReferenceRegistry {
        let mut registry = ReferenceRegistry::new();
        for (index, (kind, key, id)) in entries.iter().enumerate() {
            registry
                .register(*kind, key, EntityIds::new(*id, index as u64 + 1))
                .expect("register");
        }
        registry
    }

    #[test]
    fn route_payload_resolves_all_stops_in_order() {
        let registry = registry_with(&[
            (EntityKind::Airport, "AAA", "id-a"),
            (EntityKind::Airport, "BBB", "id-b"),
            (EntityKind::Airport, "CCC", "id-c"),
            (EntityKind::Airport, "DDD", "id-d"),
        ]);
        let route: Route = serde_json::from_value(json!({
            "origin": {"code": "AAA"},
            "via": [{"code": "DDD"}, {"code": "BBB"}],
            "destination": {"code": "CCC"}
        }))
        .expect("parse route");

        let payload = route_payload(&registry, FLIGHT_ROUTES, &route).expect("payload");
        assert_eq!(
            Value::Object(payload),
            json!({
                "origin_airport_id": "id-a",
                "via_airport_ids": ["id-d", "id-b"],
                "destination_airport_id": "id-c"
            })
        );
    }

    #[test]
    fn bus_route_uses_bus_stop_registry() {
        let registry = registry_with(&[
            (EntityKind::Airport, "S1", "airport"),
            (EntityKind::BusStop, "S2", "stop"),
        ]);
        let route: Route = serde_json::from_value(json!({
            "origin": {"code": "S2"},
            "destination": {"code": "S1"}
        }))
        .expect("parse route");

        let err = route_payload(&registry, BUS_ROUTES, &route).expect_err("S1 is no bus stop");
        assert!(matches!(
            err,
            GenerationError::Reference(CoreError::UnknownReference {
                kind: EntityKind::BusStop,
                ..
            })
        ));
    }

    #[test]
    fn hotel_payload_keeps_attributes_and_resolves_references() {
        let registry = registry_with(&[
            (EntityKind::Meal, "breakfast", "meal-1"),
            (EntityKind::Meal, "dinner", "meal-2"),
            (EntityKind::Country, "c1", "country-1"),
            (EntityKind::City, "t1", "city-1"),
        ]);
        let hotel: Hotel = serde_json::from_value(json!({
            "title": "Grand",
            "stars": 5,
            "meals": [{"identifier": "dinner"}, {"identifier": "breakfast"}],
            "destination_country_id": "c1",
            "destination_city_id": "t1"
        }))
        .expect("parse hotel");

        let payload = hotel_payload(&registry, &hotel).expect("payload");
        assert_eq!(
            Value::Object(payload),
            json!({
                "title": "Grand",
                "stars": 5,
                "meals": ["meal-2", "meal-1"],
                "destination_country_id": "country-1",
                "destination_city_id": "city-1"
            })
        );
    }

    #[test]
    fn hotel_without_city_gets_null_reference() {
        let registry = registry_with(&[(EntityKind::Country, "c1", "country-1")]);
        for city in [json!(null), json!("")] {
            let hotel: Hotel = serde_json::from_value(json!({
                "title": "Hut",
                "destination_country_id": "c1",
                "destination_city_id": city
            }))
            .expect("parse hotel");

            let payload = hotel_payload(&registry, &hotel).expect("payload");
            assert_eq!(payload.get("destination_city_id"), Some(&Value::Null));
            assert_eq!(payload.get("meals"), Some(&json!([])));
        }
    }

    #[test]
    fn hotel_with_unknown_city_fails() {
        let registry = registry_with(&[(EntityKind::Country, "c1", "country-1")]);
        let hotel: Hotel = serde_json::from_value(json!({
            "title": "Hut",
            "destination_country_id": "c1",
            "destination_city_id": "atlantis"
        }))
        .expect("parse hotel");

        let err = hotel_payload(&registry, &hotel).expect_err("unknown city");
        assert!(matches!(
            err,
            GenerationError::Reference(CoreError::UnknownReference {
                kind: EntityKind::City,
                ..
            })
        ));
    }

    #[test]
    fn hotel_payload_keeps_input_key_order() {
        let registry = registry_with(&[
            (EntityKind::Meal, "bb", "meal-1"),
            (EntityKind::Country, "c1", "country-1"),
        ]);
        let hotel: Hotel = serde_json::from_value(json!({
            "destination_country_id": "c1",
            "stars": 3,
            "meals": [{"identifier": "bb"}],
            "title": "Corner"
        }))
        .expect("parse hotel");

        let payload = hotel_payload(&registry, &hotel).expect("payload");
        let keys: Vec<&str> = payload.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "destination_country_id",
                "stars",
                "meals",
                "title",
                "destination_city_id"
            ]
        );
        assert_eq!(payload.get("destination_country_id"), Some(&json!("country-1")));
    }
}
