use time::Date;

use crate::race::{FORM_DATE_FORMAT, FormEntry, Horse, Race};

/// Highest single rating from any past run.
pub fn best_ever_rating(horse: &Horse) -> Option<i64> {
	horse.past.iter().filter_map(|entry| entry.rating).max()
}

/// Average over the first `limit` past runs in feed order, counting only the
/// rated entries inside that window. `None` when the window has no rated
/// runs. The window is cut before unrated entries are dropped, so an unrated
/// latest run shrinks the sample rather than reaching further back.
pub fn average_rating(past: &[FormEntry], limit: Option<usize>) -> Option<f64> {
	let window = limit.unwrap_or(past.len());
	let ratings = past.iter().take(window).filter_map(|entry| entry.rating).collect::<Vec<_>>();

	if ratings.is_empty() {
		return None;
	}

	Some(ratings.iter().sum::<i64>() as f64 / ratings.len() as f64)
}

/// Rating attached to the most recent dated run. Runs whose date does not
/// parse are ignored, and a most recent run with no rating yields `None`
/// even when older runs were rated.
pub fn most_recent_rating(horse: &Horse) -> Option<i64> {
	most_recent_entry(&horse.past).and_then(|entry| entry.rating)
}

fn most_recent_entry(past: &[FormEntry]) -> Option<&FormEntry> {
	let mut latest: Option<(Date, &FormEntry)> = None;

	for entry in past {
		let Some(raw) = entry.date.as_deref() else {
			continue;
		};
		let Ok(date) = Date::parse(raw, FORM_DATE_FORMAT) else {
			continue;
		};

		if latest.map(|(best, _)| date > best).unwrap_or(true) {
			latest = Some((date, entry));
		}
	}

	latest.map(|(_, entry)| entry)
}

/// Distinct past run dates, most recent first.
pub fn past_dates(horse: &Horse) -> Vec<&str> {
	let mut dates: Vec<(&str, Date)> = Vec::new();

	for entry in &horse.past {
		let Some(raw) = entry.date.as_deref() else {
			continue;
		};
		if dates.iter().any(|(seen, _)| *seen == raw) {
			continue;
		}
		let Ok(date) = Date::parse(raw, FORM_DATE_FORMAT) else {
			continue;
		};

		dates.push((raw, date));
	}

	dates.sort_by(|a, b| b.1.cmp(&a.1));

	dates.into_iter().map(|(raw, _)| raw).collect()
}

/// Runs carrying both a parsable date and a rating, most recent first as
/// (date, rating) pairs. The sort is stable, so same-day runs keep their
/// feed order.
pub fn dated_form(horse: &Horse) -> Vec<(&str, i64)> {
	let mut entries: Vec<(Date, &str, i64)> = Vec::new();

	for entry in &horse.past {
		let Some(rating) = entry.rating else {
			continue;
		};
		let Some(raw) = entry.date.as_deref() else {
			continue;
		};
		let Ok(date) = Date::parse(raw, FORM_DATE_FORMAT) else {
			continue;
		};

		entries.push((date, raw, rating));
	}

	entries.sort_by(|a, b| b.0.cmp(&a.0));

	entries.into_iter().map(|(_, date, rating)| (date, rating)).collect()
}

/// Rating strategy behind the win percentage queries.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WinStrategy {
	BestEver,
	LastOne,
	LastThree,
	AllRuns,
}
impl WinStrategy {
	/// Label interpolated into the win percentages heading.
	pub fn label(&self) -> &'static str {
		match self {
			Self::BestEver => "best run",
			Self::LastOne => "latest run",
			Self::LastThree => "last 3 runs",
			Self::AllRuns => "all runs",
		}
	}

	/// Score for one horse. Averages are truncated toward zero, and a horse
	/// with no rated runs scores 0.
	pub fn score(&self, horse: &Horse) -> i64 {
		match self {
			Self::BestEver => best_ever_rating(horse).unwrap_or(0),
			Self::LastOne => truncated_average(&horse.past, Some(1)),
			Self::LastThree => truncated_average(&horse.past, Some(3)),
			Self::AllRuns => truncated_average(&horse.past, None),
		}
	}
}

fn truncated_average(past: &[FormEntry], limit: Option<usize>) -> i64 {
	average_rating(past, limit).map(|average| average as i64).unwrap_or(0)
}

/// Race filter behind the nap queries.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NapFilter {
	AllRaces,
	Handicap,
	UkHandicap,
}
impl NapFilter {
	pub fn matches(&self, race: &Race) -> bool {
		match self {
			Self::AllRaces => true,
			Self::Handicap => is_handicap(race),
			Self::UkHandicap => is_handicap(race) && is_uk(race),
		}
	}
}

fn is_handicap(race: &Race) -> bool {
	race.detail.as_deref().map(|detail| detail.to_lowercase().contains("handicap")).unwrap_or(false)
}

fn is_uk(race: &Race) -> bool {
	race.country.as_deref().map(|country| country.eq_ignore_ascii_case("UK")).unwrap_or(false)
}
