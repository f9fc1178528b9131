use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ordered::values_in_order;

/// Parsed travel-domain description consumed by the generator.
///
/// Each category is a JSON object keyed by an arbitrary label; entities keep
/// the order in which they appear in the input.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct TravelDomain {
    #[serde(default, deserialize_with = "values_in_order")]
    #[schemars(with = "BTreeMap<String, Airport>")]
    pub airports: Vec<Airport>,
    #[serde(default, deserialize_with = "values_in_order")]
    #[schemars(with = "BTreeMap<String, Route>")]
    pub flight_routes: Vec<Route>,
    #[serde(default, deserialize_with = "values_in_order")]
    #[schemars(with = "BTreeMap<String, BusStop>")]
    pub bus_stops: Vec<BusStop>,
    #[serde(default, deserialize_with = "values_in_order")]
    #[schemars(with = "BTreeMap<String, Route>")]
    pub bus_routes: Vec<Route>,
    #[serde(default, deserialize_with = "values_in_order")]
    #[schemars(with = "BTreeMap<String, Country>")]
    pub countries: Vec<Country>,
    #[serde(default, deserialize_with = "values_in_order")]
    #[schemars(with = "BTreeMap<String, Meal>")]
    pub meals: Vec<Meal>,
    #[serde(default, deserialize_with = "values_in_order")]
    #[schemars(with = "BTreeMap<String, Hotel>")]
    pub hotels: Vec<Hotel>,
}

impl TravelDomain {
    /// Total number of entities (cities included) a run will emit.
    pub fn entity_count(&self) -> usize {
        let cities: usize = self.countries.iter().map(|country| country.cities.len()).sum();
        self.airports.len()
            + self.flight_routes.len()
            + self.bus_stops.len()
            + self.bus_routes.len()
            + self.countries.len()
            + cities
            + self.meals.len()
            + self.hotels.len()
    }
}

/// Airport keyed by its `code`; every attribute is carried into the payload.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Airport {
    pub code: String,
    /// The whole input object, `code` included, in input order.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for Airport {
    type Error = String;

    fn try_from(attributes: Map<String, Value>) -> Result<Self, Self::Error> {
        let code = code_attribute(&attributes)?;
        Ok(Self { code, attributes })
    }
}

impl From<Airport> for Map<String, Value> {
    fn from(airport: Airport) -> Self {
        airport.attributes
    }
}

/// Bus stop keyed by its `code`; every attribute is carried into the payload.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct BusStop {
    pub code: String,
    /// The whole input object, `code` included, in input order.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for BusStop {
    type Error = String;

    fn try_from(attributes: Map<String, Value>) -> Result<Self, Self::Error> {
        let code = code_attribute(&attributes)?;
        Ok(Self { code, attributes })
    }
}

impl From<BusStop> for Map<String, Value> {
    fn from(stop: BusStop) -> Self {
        stop.attributes
    }
}

fn code_attribute(attributes: &Map<String, Value>) -> Result<String, String> {
    match attributes.get("code") {
        Some(Value::String(code)) => Ok(code.clone()),
        Some(other) => Err(format!("field `code` must be a string, got {other}")),
        None => Err("missing field `code`".to_string()),
    }
}

/// Reference to an airport or bus stop by code.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CodeRef {
    pub code: String,
}

/// Flight or bus route between stops of the matching kind.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Route {
    pub origin: CodeRef,
    pub destination: CodeRef,
    /// Intermediate stops, in travel order.
    #[serde(default)]
    pub via: Vec<CodeRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Country {
    pub identifier: String,
    pub title: String,
    #[serde(default, deserialize_with = "values_in_order")]
    #[schemars(with = "BTreeMap<String, City>")]
    pub cities: Vec<City>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct City {
    pub identifier: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Meal {
    pub identifier: String,
    pub title: String,
}

/// Reference to a meal (or other identifier-keyed entity).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IdentifierRef {
    pub identifier: String,
}

/// Hotel with references to meals, a country and optionally a city.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Hotel {
    pub title: String,
    #[serde(default)]
    pub meals: Vec<IdentifierRef>,
    /// Country identifier.
    pub destination_country_id: String,
    /// City identifier; `null` or empty when the hotel is not in a listed city.
    #[serde(default)]
    pub destination_city_id: Option<String>,
    /// The whole input object, references included, in input order.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Deserialize)]
struct HotelFields {
    title: String,
    #[serde(default)]
    meals: Vec<IdentifierRef>,
    destination_country_id: String,
    #[serde(default)]
    destination_city_id: Option<String>,
}

impl TryFrom<Map<String, Value>> for Hotel {
    type Error = String;

    fn try_from(attributes: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: HotelFields = serde_json::from_value(Value::Object(attributes.clone()))
            .map_err(|err| err.to_string())?;
        Ok(Self {
            title: fields.title,
            meals: fields.meals,
            destination_country_id: fields.destination_country_id,
            destination_city_id: fields.destination_city_id,
            attributes,
        })
    }
}

impl From<Hotel> for Map<String, Value> {
    fn from(hotel: Hotel) -> Self {
        hotel.attributes
    }
}
