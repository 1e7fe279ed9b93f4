mod decode;
mod form;
mod index;
mod odds;
mod race;

pub use decode::{OddsDocument, RaceDocument};
pub use form::{
	NapFilter, WinStrategy, average_rating, best_ever_rating, dated_form, most_recent_rating,
	past_dates,
};
pub use index::{
	find_horse, find_horse_in_race, find_race, meetings, next_race, races_for_horse, times_at,
};
pub use odds::{OddsRecord, merge_odds};
pub use race::{FORM_DATE_FORMAT, FormEntry, Horse, RACE_TIME_FORMAT, Race};
