use schemars::schema_for;
use travelseed_core::TravelDomain;

#[test]
fn input_schema_lists_every_category() {
    let generated = schema_for!(TravelDomain);
    let json = serde_json::to_value(&generated).expect("serialize generated schema");

    let properties = json
        .get("properties")
        .and_then(|value| value.as_object())
        .expect("properties object");

    for category in [
        "airports",
        "flight_routes",
        "bus_stops",
        "bus_routes",
        "countries",
        "meals",
        "hotels",
    ] {
        let property = properties
            .get(category)
            .unwrap_or_else(|| panic!("missing category {category}"));
        assert_eq!(
            property.get("type").and_then(|value| value.as_str()),
            Some("object"),
            "{category} should be a keyed object"
        );
    }
}

#[test]
fn hotel_schema_requires_country() {
    let generated = schema_for!(TravelDomain);
    let json = serde_json::to_value(&generated).expect("serialize generated schema");

    let required = json
        .pointer("/definitions/Hotel/required")
        .and_then(|value| value.as_array())
        .expect("hotel required list");
    let required: Vec<&str> = required.iter().filter_map(|value| value.as_str()).collect();

    assert!(required.contains(&"title"));
    assert!(required.contains(&"destination_country_id"));
    assert!(!required.contains(&"destination_city_id"));
}
