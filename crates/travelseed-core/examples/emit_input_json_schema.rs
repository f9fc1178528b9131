use schemars::schema_for;
use travelseed_core::TravelDomain;

fn main() {
    let schema = schema_for!(TravelDomain);
    let json = serde_json::to_string_pretty(&schema).expect("serialize json schema");
    println!("{json}");
}
