use chrono::{Datelike, NaiveDate};

const BUILT_IN_PROMPTS: [&str; 10] = [
	"A lone tree on a hill",
	"City skyline at sunset",
	"A curious cat",
	"Abstract shapes and lines",
	"Your favorite food",
	"Something you see right now",
	"A dream you had",
	"Under the sea",
	"In the clouds",
	"Portrait of a friend",
];

/// What to draw today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPrompts {
	prompts: Vec<String>,
}

impl Default for DailyPrompts {
	fn default() -> Self {
		Self {
			prompts: BUILT_IN_PROMPTS.iter().map(|p| p.to_string()).collect(),
		}
	}
}

impl DailyPrompts {
	/// Returns `None` for an empty list.
	pub fn new(prompts: impl IntoIterator<Item = impl Into<String>>) -> Option<Self> {
		let prompts = prompts.into_iter().map(Into::into).collect::<Vec<_>>();
		(!prompts.is_empty()).then_some(Self { prompts })
	}

	pub fn prompts(&self) -> &[String] {
		&self.prompts
	}

	/// The same prompt all day, cycling through the list by day of the month.
	pub fn for_date(&self, date: NaiveDate) -> &str {
		&self.prompts[date.day() as usize % self.prompts.len()]
	}

	pub fn random(&self) -> &str {
		&self.prompts[fastrand::usize(..self.prompts.len())]
	}
}

/// A date the way the prompt screen shows it, e.g. "March 1, 2025".
pub fn long_date(date: NaiveDate) -> String {
	date.format("%B %-d, %Y").to_string()
}
