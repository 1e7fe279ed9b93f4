use time::{OffsetDateTime, Time};

use crate::{RacesService, race_not_found};
use pluckier_domain::{find_race, races_for_horse, times_at};

impl RacesService {
	/// Distinct meeting names across the card, sorted alphabetically.
	pub async fn meetings(&self) -> String {
		let snapshot = self.snapshot().await;
		let Some(races) = snapshot.races.races() else {
			return "Error: Race data is not in the expected format.".to_string();
		};
		let meetings = pluckier_domain::meetings(races);

		if meetings.is_empty() {
			return "No meetings found in the data.".to_string();
		}

		format!("List of available meetings: {}", meetings.join(", "))
	}

	pub async fn all_times(&self, place: &str) -> String {
		let snapshot = self.snapshot().await;
		let Some(races) = snapshot.races.races() else {
			return "Error: Race data is not in the expected format.".to_string();
		};
		let times = times_at(races, place);

		if times.is_empty() {
			return format!("No race times found for meeting at {place}");
		}

		format!("Race times for {place}: {}", times.join(", "))
	}

	pub async fn all_runners(&self, time: &str, place: &str) -> String {
		let snapshot = self.snapshot().await;
		let Some(race) = snapshot.races.races().and_then(|races| find_race(races, time, place))
		else {
			return race_not_found(time, place);
		};
		let runners =
			race.horses.iter().map(|horse| horse.name.as_str()).collect::<Vec<_>>().join(", ");

		if runners.is_empty() {
			return format!("No runners found for the race at {place} at {time}");
		}

		format!("Runners for the {time} at {place}: {runners}")
	}

	/// Where a horse is running today. The reply echoes the name as the
	/// caller spelled it.
	pub async fn find_horse_race(&self, horse_name: &str) -> String {
		let snapshot = self.snapshot().await;
		let Some(races) = snapshot.races.races() else {
			return "Error: Race data is not available or in the expected format.".to_string();
		};
		let running = races_for_horse(races, horse_name)
			.iter()
			.map(|race| format!("{} at {}", race.time, race.place))
			.collect::<Vec<_>>()
			.join(", ");

		if running.is_empty() {
			return format!("Could not find any races for horse: {horse_name}");
		}

		format!("{horse_name} is running in: {running}")
	}

	pub async fn next_race(&self) -> String {
		self.next_race_at(OffsetDateTime::now_utc().time()).await
	}

	/// Same as [`Self::next_race`] with the clock pinned to `now`.
	pub async fn next_race_at(&self, now: Time) -> String {
		let snapshot = self.snapshot().await;
		let Some(races) = snapshot.races.races() else {
			return "Error: Race data is not available or in the expected format.".to_string();
		};

		match pluckier_domain::next_race(races, now) {
			Some(race) => format!("The next race is at {} at {}.", race.time, race.place),
			None => "There are no more races scheduled for today.".to_string(),
		}
	}
}
