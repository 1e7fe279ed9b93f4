use serde_json::{Map, Value};

use crate::{
	odds::OddsRecord,
	race::{FormEntry, Horse, Race},
};

/// Races payload as last fetched. Error sentinels and any other non-array
/// payload decode to `Unavailable`.
#[derive(Clone, Debug)]
pub enum RaceDocument {
	Races(Vec<Race>),
	Unavailable,
}
impl RaceDocument {
	pub fn decode(value: &Value) -> Self {
		let Some(entries) = value.as_array() else {
			return Self::Unavailable;
		};

		Self::Races(entries.iter().filter_map(decode_race).collect())
	}

	pub fn races(&self) -> Option<&[Race]> {
		match self {
			Self::Races(races) => Some(races),
			Self::Unavailable => None,
		}
	}
}

/// Odds payload as last fetched, with the same sentinel handling as
/// [`RaceDocument`].
#[derive(Clone, Debug)]
pub enum OddsDocument {
	Odds(Vec<OddsRecord>),
	Unavailable,
}
impl OddsDocument {
	pub fn decode(value: &Value) -> Self {
		let Some(entries) = value.as_array() else {
			return Self::Unavailable;
		};

		Self::Odds(entries.iter().filter_map(decode_odds_record).collect())
	}

	pub fn records(&self) -> Option<&[OddsRecord]> {
		match self {
			Self::Odds(records) => Some(records),
			Self::Unavailable => None,
		}
	}
}

fn decode_race(value: &Value) -> Option<Race> {
	let object = value.as_object()?;
	let time = object.get("time")?.as_str()?.to_string();
	let place = object.get("place")?.as_str()?.to_string();
	let detail = object.get("detail").and_then(Value::as_str).map(str::to_string);
	let country = object.get("country").and_then(Value::as_str).map(str::to_string);
	let horses = object
		.get("horses")
		.and_then(Value::as_array)
		.map(|entries| entries.iter().filter_map(decode_horse).collect())
		.unwrap_or_default();

	Some(Race { time, place, detail, country, horses })
}

fn decode_horse(value: &Value) -> Option<Horse> {
	let object = value.as_object()?;
	let name = object.get("name")?.as_str()?.to_string();
	let odds = object.get("odds").and_then(decode_price);
	let past = object
		.get("past")
		.and_then(Value::as_array)
		.map(|entries| entries.iter().filter_map(Value::as_object).map(decode_form_entry).collect())
		.unwrap_or_default();

	Some(Horse { name, odds, past })
}

fn decode_form_entry(object: &Map<String, Value>) -> FormEntry {
	// The feed stores a run's rating under the "name" key.
	FormEntry {
		date: object.get("date").and_then(Value::as_str).map(str::to_string),
		rating: object.get("name").and_then(decode_rating),
	}
}

fn decode_odds_record(value: &Value) -> Option<OddsRecord> {
	let object = value.as_object()?;
	let name = object.get("name")?.as_str()?.to_string();
	let odds = object.get("odds").and_then(decode_price);
	let event = object.get("event").and_then(Value::as_str).map(str::to_string);

	Some(OddsRecord { name, odds, event })
}

fn decode_rating(value: &Value) -> Option<i64> {
	match value {
		Value::Number(number) =>
			number.as_i64().or_else(|| number.as_f64().map(|rating| rating as i64)),
		Value::String(raw) => raw.trim().parse().ok(),
		_ => None,
	}
}

fn decode_price(value: &Value) -> Option<String> {
	match value {
		Value::String(price) => Some(price.clone()),
		Value::Number(price) => Some(price.to_string()),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn non_array_payloads_are_unavailable() {
		let sentinel = json!({ "error": "File not found in bucket 'pluckier.appspot.com'" });

		assert!(RaceDocument::decode(&sentinel).races().is_none());
		assert!(OddsDocument::decode(&sentinel).records().is_none());
		assert!(RaceDocument::decode(&Value::Null).races().is_none());
	}

	#[test]
	fn races_missing_time_or_place_are_skipped() {
		let payload = json!([
			{ "time": "14:30", "place": "Ascot", "horses": [] },
			{ "time": "15:00" },
			{ "place": "York" },
			"not a race",
		]);
		let document = RaceDocument::decode(&payload);
		let races = document.races().expect("array payload must decode");

		assert_eq!(races.len(), 1);
		assert_eq!(races[0].place, "Ascot");
	}

	#[test]
	fn horses_missing_a_name_are_skipped() {
		let payload = json!([{
			"time": "14:30",
			"place": "Ascot",
			"horses": [{ "name": "Dobbin" }, { "odds": "5/2" }],
		}]);
		let document = RaceDocument::decode(&payload);
		let races = document.races().expect("array payload must decode");

		assert_eq!(races[0].horses.len(), 1);
		assert_eq!(races[0].horses[0].name, "Dobbin");
		assert!(races[0].horses[0].past.is_empty());
	}

	#[test]
	fn ratings_accept_numbers_and_numeric_strings() {
		let payload = json!([{
			"time": "14:30",
			"place": "Ascot",
			"horses": [{
				"name": "Dobbin",
				"past": [
					{ "date": "01/08/2026", "name": 85 },
					{ "date": "02/08/2026", "name": "72" },
					{ "date": "03/08/2026", "name": "fell" },
					{ "date": "04/08/2026" },
				],
			}],
		}]);
		let document = RaceDocument::decode(&payload);
		let races = document.races().expect("array payload must decode");
		let past = &races[0].horses[0].past;

		assert_eq!(past.len(), 4);
		assert_eq!(past[0].rating, Some(85));
		assert_eq!(past[1].rating, Some(72));
		assert_eq!(past[2].rating, None);
		assert_eq!(past[3].rating, None);
	}

	#[test]
	fn numeric_prices_decode_as_strings() {
		let payload = json!([
			{ "name": "Dobbin", "odds": "5/2", "event": "14:30 Ascot" },
			{ "name": "Trigger", "odds": 8, "event": "14:30 Ascot" },
			{ "name": "Silver" },
		]);
		let document = OddsDocument::decode(&payload);
		let records = document.records().expect("array payload must decode");

		assert_eq!(records[0].odds.as_deref(), Some("5/2"));
		assert_eq!(records[1].odds.as_deref(), Some("8"));
		assert_eq!(records[2].odds, None);
		assert_eq!(records[2].event, None);
	}
}
