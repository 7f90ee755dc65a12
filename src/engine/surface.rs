use super::{PaletteColor, Point, StrokeHandle, StrokePath, StrokeWidth};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Error, PartialEq)]
pub enum SurfaceError {
	#[error("non-finite point ({}, {})", .0.x, .0.y)]
	NonFinitePoint(Point),

	#[error("no active stroke")]
	NoActiveStroke,
}

static_assertions::assert_impl_all!(SurfaceError: std::error::Error, Send, Sync);

/// The strokes of one drawing surface: everything committed so far plus the stroke being drawn.
///
/// Committed strokes are kept in drawing order, which is also paint order. Every mutation that
/// changes what would be drawn increments [`revision`](Self::revision); callers that change
/// nothing (undo on an empty surface, rejected points, ...) leave it alone.
#[derive(Debug, Default)]
pub struct DrawingSurfaceState {
	committed: Vec<StrokePath>,
	active: Option<StrokePath>,
	next_handle: u64,
	revision: u64,
	duplicate_initial_point: bool,
}

impl DrawingSurfaceState {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts every new stroke with its first point recorded twice, for renderers that need two
	/// points to draw a dot.
	pub fn with_duplicated_initial_point(mut self, duplicate: bool) -> Self {
		self.duplicate_initial_point = duplicate;
		self
	}

	pub fn committed_strokes(&self) -> &[StrokePath] {
		&self.committed
	}

	pub fn active_stroke(&self) -> Option<&StrokePath> {
		self.active.as_ref()
	}

	/// All strokes in paint order: committed first, then the active one.
	pub fn strokes(&self) -> impl Iterator<Item = &StrokePath> {
		self.committed.iter().chain(self.active.as_ref())
	}

	pub fn revision(&self) -> u64 {
		self.revision
	}

	pub fn is_empty(&self) -> bool {
		self.committed.is_empty() && self.active.is_none()
	}

	fn touch(&mut self) {
		self.revision += 1;
	}

	pub fn begin_stroke(
		&mut self,
		point: Point,
		color: PaletteColor,
		width: StrokeWidth,
	) -> Result<StrokeHandle, SurfaceError> {
		if !point.is_finite() {
			return Err(SurfaceError::NonFinitePoint(point));
		}
		if let Some(previous) = &self.active {
			tracing::warn!(handle = ?previous.handle(), "replacing an unfinished stroke");
		}
		let handle = StrokeHandle(self.next_handle);
		self.next_handle += 1;
		self.active = Some(StrokePath::start(
			handle,
			point,
			color,
			width,
			self.duplicate_initial_point,
		));
		self.touch();
		Ok(handle)
	}

	pub fn extend_stroke(&mut self, point: Point) -> Result<(), SurfaceError> {
		let Some(active) = &self.active else {
			return Err(SurfaceError::NoActiveStroke);
		};
		if !point.is_finite() {
			return Err(SurfaceError::NonFinitePoint(point));
		}
		self.active = Some(active.extended(point));
		self.touch();
		Ok(())
	}

	/// Moves the active stroke onto the committed list. Returns its handle, or `None` if no stroke
	/// was active.
	pub fn commit_stroke(&mut self) -> Option<StrokeHandle> {
		let stroke = self.active.take()?;
		let handle = stroke.handle();
		self.committed.push(stroke);
		self.touch();
		Some(handle)
	}

	pub fn discard_active_stroke(&mut self) -> Option<StrokeHandle> {
		let stroke = self.active.take()?;
		self.touch();
		Some(stroke.handle())
	}

	/// Removes the most recently committed stroke. The active stroke is unaffected.
	pub fn undo(&mut self) -> Option<StrokePath> {
		let stroke = self.committed.pop()?;
		self.touch();
		Some(stroke)
	}

	pub fn clear(&mut self) {
		if self.is_empty() {
			return;
		}
		self.committed.clear();
		self.active = None;
		self.touch();
	}
}
