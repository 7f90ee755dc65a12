use super::SketchRecord;
use chrono::{Datelike, NaiveDate};
use derive_more::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown gallery filter {0:?}, expected week, month or all")]
pub struct UnknownGalleryFilter(pub String);

static_assertions::assert_impl_all!(UnknownGalleryFilter: std::error::Error, Send, Sync);

/// Which saved sketches the gallery shows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display)]
pub enum GalleryFilter {
	/// Sketches from today back to seven days ago.
	#[display("week")]
	Week,
	/// Sketches from the current calendar month.
	#[display("month")]
	Month,
	#[default]
	#[display("all")]
	All,
}

impl GalleryFilter {
	pub const ALL: [GalleryFilter; 3] = [GalleryFilter::Week, GalleryFilter::Month, GalleryFilter::All];

	pub fn matches(self, record: &SketchRecord, today: NaiveDate) -> bool {
		match self {
			GalleryFilter::Week => (0..=7).contains(&(today - record.date).num_days()),
			GalleryFilter::Month => {
				record.date.month() == today.month() && record.date.year() == today.year()
			}
			GalleryFilter::All => true,
		}
	}

	pub fn apply<'a>(
		self,
		records: impl IntoIterator<Item = &'a SketchRecord>,
		today: NaiveDate,
	) -> Vec<&'a SketchRecord> {
		records
			.into_iter()
			.filter(|record| self.matches(record, today))
			.collect()
	}
}

impl FromStr for GalleryFilter {
	type Err = UnknownGalleryFilter;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		GalleryFilter::ALL
			.into_iter()
			.find(|filter| filter.to_string().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| UnknownGalleryFilter(s.to_owned()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn date(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	fn records() -> Vec<SketchRecord> {
		[
			("future", date(2025, 3, 13)),
			("today", date(2025, 3, 12)),
			("week-ago", date(2025, 3, 5)),
			("eight-days", date(2025, 3, 4)),
			("last-month", date(2025, 2, 28)),
			("last-year", date(2024, 3, 12)),
		]
		.into_iter()
		.map(|(id, date)| SketchRecord::new(id, date, "", ""))
		.collect()
	}

	fn ids(filter: GalleryFilter) -> Vec<String> {
		let records = records();
		filter
			.apply(&records, date(2025, 3, 12))
			.into_iter()
			.map(|record| record.id.clone())
			.collect()
	}

	#[test]
	fn week() {
		assert_eq!(ids(GalleryFilter::Week), ["today", "week-ago"]);
	}

	#[test]
	fn month() {
		assert_eq!(
			ids(GalleryFilter::Month),
			["future", "today", "week-ago", "eight-days"]
		);
	}

	#[test]
	fn all() {
		assert_eq!(ids(GalleryFilter::All).len(), 6);
	}

	#[test]
	fn parse() {
		assert_eq!("week".parse(), Ok(GalleryFilter::Week));
		assert_eq!(" Month ".parse(), Ok(GalleryFilter::Month));
		assert_eq!("all".parse(), Ok(GalleryFilter::All));
		assert_eq!(
			"year".parse::<GalleryFilter>(),
			Err(UnknownGalleryFilter("year".into()))
		);
	}
}
