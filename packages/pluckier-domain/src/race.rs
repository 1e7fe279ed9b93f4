use time::{format_description::BorrowedFormatItem, macros::format_description};

/// Form dates as printed on a racecard, e.g. "21/08/2026".
pub const FORM_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
	format_description!("[day]/[month]/[year]");
/// Race times as printed on a racecard, e.g. "14:30".
pub const RACE_TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Race {
	pub time: String,
	pub place: String,
	pub detail: Option<String>,
	pub country: Option<String>,
	pub horses: Vec<Horse>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Horse {
	pub name: String,
	pub odds: Option<String>,
	pub past: Vec<FormEntry>,
}

/// One past run. Either field can be missing in the feed, and entries keep
/// their feed order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormEntry {
	pub date: Option<String>,
	pub rating: Option<i64>,
}
