use crate::{RacesService, race_not_found};
use pluckier_domain::{dated_form, find_horse, find_horse_in_race, find_race, past_dates};

impl RacesService {
	/// Every distinct date a horse has run on, most recent first. The horse
	/// is looked up by its first appearance on the card, so a name entered in
	/// two races reads from the first one.
	pub async fn past_run_dates(&self, horse_name: &str) -> String {
		let snapshot = self.snapshot().await;
		let Some(races) = snapshot.races.races() else {
			return "Error: Race data is not available or in the expected format.".to_string();
		};
		let Some(horse) = find_horse(races, horse_name) else {
			return format!("Could not find a horse named: {horse_name}");
		};

		if horse.past.is_empty() {
			return format!("No past race data found for horse: {horse_name}");
		}

		format!("Past race dates for {horse_name}: {}", past_dates(horse).join(", "))
	}

	/// Recent form for one horse in one race: dated, rated runs, most recent
	/// first.
	pub async fn horse_form(&self, time: &str, place: &str, horse_name: &str) -> String {
		let snapshot = self.snapshot().await;
		let Some(race) = snapshot.races.races().and_then(|races| find_race(races, time, place))
		else {
			return race_not_found(time, place);
		};
		let Some(horse) = find_horse_in_race(race, horse_name) else {
			return format!("Could not find horse {horse_name} in the {time} at {place}");
		};

		if horse.past.is_empty() {
			return format!("No past race data found for horse: {horse_name}");
		}

		let details = dated_form(horse)
			.into_iter()
			.map(|(date, rating)| format!("Date: {date}, Rating: {rating}"))
			.collect::<Vec<_>>()
			.join("; ");

		if details.is_empty() {
			return format!("No valid past performance data found for {horse_name}");
		}

		format!("Form for {horse_name}: {details}")
	}
}
