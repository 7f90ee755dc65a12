use super::{PaletteColor, StrokeWidth};
use glam::Vec2;
use itertools::Itertools;
use std::sync::Arc;

/// A position in surface-local pixels.
pub type Point = Vec2;

/// Identifies one gesture's stroke across all of the values it goes through while being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrokeHandle(pub(crate) u64);

/// One continuous pen-down-to-pen-up line.
///
/// Values are immutable: extending a stroke produces a new `StrokePath` whose point storage is a
/// fresh allocation, so any observer holding the previous value can tell that it changed (see
/// [`StrokePath::is_same_revision`]). Clones share storage and are cheap.
#[derive(Debug, Clone)]
pub struct StrokePath {
	handle: StrokeHandle,
	points: Arc<[Point]>,
	color: PaletteColor,
	width: StrokeWidth,
}

impl StrokePath {
	pub(crate) fn start(
		handle: StrokeHandle,
		point: Point,
		color: PaletteColor,
		width: StrokeWidth,
		duplicate_point: bool,
	) -> Self {
		debug_assert!(point.is_finite());
		let points: Arc<[Point]> = if duplicate_point {
			Arc::from([point, point])
		} else {
			Arc::from([point])
		};
		Self {
			handle,
			points,
			color,
			width,
		}
	}

	#[must_use]
	pub(crate) fn extended(&self, point: Point) -> Self {
		debug_assert!(point.is_finite());
		let points: Arc<[Point]> = self.points.iter().copied().chain([point]).collect();
		Self {
			points,
			..self.clone()
		}
	}

	pub fn handle(&self) -> StrokeHandle {
		self.handle
	}

	pub fn points(&self) -> &[Point] {
		&self.points
	}

	pub(crate) fn shared_points(&self) -> Arc<[Point]> {
		self.points.clone()
	}

	pub fn color(&self) -> PaletteColor {
		self.color
	}

	pub fn width(&self) -> StrokeWidth {
		self.width
	}

	/// Returns `true` if both values are the very same revision of a stroke, i.e. nothing has been
	/// appended in between.
	pub fn is_same_revision(&self, other: &StrokePath) -> bool {
		self.handle == other.handle && Arc::ptr_eq(&self.points, &other.points)
	}
}

/// Consecutive point pairs of a polyline. A single point yields one degenerate segment so that it
/// still renders as a dot.
pub fn segments(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
	let degenerate = (points.len() == 1).then(|| (points[0], points[0]));
	degenerate
		.into_iter()
		.chain(points.iter().copied().tuple_windows())
}

impl PartialEq for StrokePath {
	fn eq(&self, other: &Self) -> bool {
		self.color == other.color && self.width == other.width && self.points == other.points
	}
}
