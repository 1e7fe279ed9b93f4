use std::collections::BTreeSet;

use time::Time;

use crate::race::{Horse, RACE_TIME_FORMAT, Race};

/// Finds a race by exact time and case-insensitive place. First match wins.
pub fn find_race<'a>(races: &'a [Race], time: &str, place: &str) -> Option<&'a Race> {
	races.iter().find(|race| race.place.eq_ignore_ascii_case(place) && race.time == time)
}

/// Finds a horse anywhere on the card by case-insensitive name.
pub fn find_horse<'a>(races: &'a [Race], horse_name: &str) -> Option<&'a Horse> {
	races
		.iter()
		.flat_map(|race| &race.horses)
		.find(|horse| horse.name.eq_ignore_ascii_case(horse_name))
}

pub fn find_horse_in_race<'a>(race: &'a Race, horse_name: &str) -> Option<&'a Horse> {
	race.horses.iter().find(|horse| horse.name.eq_ignore_ascii_case(horse_name))
}

/// Distinct meeting names, sorted alphabetically.
pub fn meetings(races: &[Race]) -> Vec<&str> {
	races.iter().map(|race| race.place.as_str()).collect::<BTreeSet<_>>().into_iter().collect()
}

/// Times of every race at a meeting, sorted lexicographically. Duplicates
/// are kept.
pub fn times_at<'a>(races: &'a [Race], place: &str) -> Vec<&'a str> {
	let mut times = races
		.iter()
		.filter(|race| race.place.eq_ignore_ascii_case(place))
		.map(|race| race.time.as_str())
		.collect::<Vec<_>>();

	times.sort_unstable();

	times
}

/// Every race a horse appears in, in card order.
pub fn races_for_horse<'a>(races: &'a [Race], horse_name: &str) -> Vec<&'a Race> {
	races
		.iter()
		.filter(|race| race.horses.iter().any(|horse| horse.name.eq_ignore_ascii_case(horse_name)))
		.collect()
}

/// First race strictly after `now`. Races whose time does not parse are
/// ignored, and the earliest card entry wins a tie.
pub fn next_race<'a>(races: &'a [Race], now: Time) -> Option<&'a Race> {
	let mut next: Option<(Time, &Race)> = None;

	for race in races {
		let Ok(time) = Time::parse(&race.time, RACE_TIME_FORMAT) else {
			continue;
		};

		if time <= now {
			continue;
		}
		if next.map(|(best, _)| time < best).unwrap_or(true) {
			next = Some((time, race));
		}
	}

	next.map(|(_, race)| race)
}

#[cfg(test)]
mod tests {
	use time::macros::time;

	use super::*;

	fn race(time: &str, place: &str, horses: &[&str]) -> Race {
		Race {
			time: time.to_string(),
			place: place.to_string(),
			detail: None,
			country: None,
			horses: horses
				.iter()
				.map(|name| Horse { name: name.to_string(), odds: None, past: Vec::new() })
				.collect(),
		}
	}

	fn card() -> Vec<Race> {
		vec![
			race("14:30", "Ascot", &["Dobbin", "Trigger"]),
			race("15:05", "Ascot", &["Silver"]),
			race("14:30", "York", &["Dobbin"]),
		]
	}

	#[test]
	fn race_lookup_ignores_place_case_but_not_time_format() {
		let races = card();
		let found = find_race(&races, "14:30", "ASCOT").expect("race must be found");

		assert_eq!(found.place, "Ascot");
		assert!(find_race(&races, "14:3", "Ascot").is_none());
		assert!(find_race(&races, "14:30", "Newbury").is_none());
	}

	#[test]
	fn horse_lookup_ignores_case_and_takes_the_first_entry() {
		let races = card();
		let horse = find_horse(&races, "dobbin").expect("horse must be found");

		assert_eq!(horse.name, "Dobbin");
		assert!(find_horse(&races, "Arkle").is_none());
		assert!(find_horse_in_race(&races[1], "dobbin").is_none());
	}

	#[test]
	fn meetings_are_distinct_and_sorted() {
		assert_eq!(meetings(&card()), ["Ascot", "York"]);
		assert!(meetings(&[]).is_empty());
	}

	#[test]
	fn times_are_sorted_and_keep_duplicates() {
		let mut races = card();

		races.push(race("13:50", "Ascot", &[]));
		races.push(race("14:30", "ascot", &[]));

		assert_eq!(times_at(&races, "ascot"), ["13:50", "14:30", "14:30", "15:05"]);
		assert!(times_at(&races, "Newbury").is_empty());
	}

	#[test]
	fn races_for_horse_keeps_card_order() {
		let races = card();
		let running = races_for_horse(&races, "DOBBIN");

		assert_eq!(running.len(), 2);
		assert_eq!(running[0].place, "Ascot");
		assert_eq!(running[1].place, "York");
	}

	#[test]
	fn next_race_is_the_first_strictly_after_now() {
		let races = card();

		assert_eq!(
			next_race(&races, time!(14:30)).map(|race| race.time.as_str()),
			Some("15:05"),
			"a race starting right now has already gone"
		);
		assert_eq!(next_race(&races, time!(12:00)).map(|race| race.place.as_str()), Some("Ascot"));
		assert!(next_race(&races, time!(15:05)).is_none());
	}

	#[test]
	fn next_race_skips_unparsable_times_and_keeps_the_first_tie() {
		let races = vec![
			race("soon", "Ascot", &[]),
			race("15:05", "York", &[]),
			race("15:05", "Ascot", &[]),
		];

		assert_eq!(next_race(&races, time!(12:00)).map(|race| race.place.as_str()), Some("York"));
	}
}
