use std::collections::HashMap;

use serde_json::{Map, Value};

/// One record from the odds feed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OddsRecord {
	pub name: String,
	pub odds: Option<String>,
	pub event: Option<String>,
}

/// Copies prices from the odds payload onto matching horses in the races
/// payload, under each horse's "odds" key. Nothing happens unless both
/// payloads are arrays. A record carrying no price marks its horse "NR".
pub fn merge_odds(races: &mut Value, odds: &Value) {
	let Some(records) = odds.as_array() else {
		return;
	};
	let Some(race_entries) = races.as_array_mut() else {
		return;
	};

	let mut prices: HashMap<String, Value> = HashMap::new();

	for record in records.iter().filter_map(Value::as_object) {
		let Some(name) = record.get("name").and_then(Value::as_str) else {
			continue;
		};
		let price = record.get("odds").cloned().unwrap_or_else(|| Value::String("NR".to_string()));

		// Later records for the same horse win.
		prices.insert(name.to_string(), price);
	}

	for race in race_entries.iter_mut().filter_map(Value::as_object_mut) {
		let Some(horses) = race.get_mut("horses").and_then(Value::as_array_mut) else {
			continue;
		};

		for horse in horses.iter_mut().filter_map(Value::as_object_mut) {
			if let Some(price) = lookup_price(&prices, horse) {
				horse.insert("odds".to_string(), price);
			}
		}
	}
}

/// Feed names drift, so try the name as written, then with apostrophes
/// stripped, then uppercased.
fn lookup_price(prices: &HashMap<String, Value>, horse: &Map<String, Value>) -> Option<Value> {
	let name = horse.get("name").and_then(Value::as_str)?;

	prices
		.get(name)
		.or_else(|| prices.get(&name.replace('\'', "")))
		.or_else(|| prices.get(&name.to_uppercase()))
		.cloned()
}
