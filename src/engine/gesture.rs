use super::{DrawingSurfaceState, PaletteColor, Point, StrokeHandle, StrokeWidth};
use glam::vec2;

pub type PointerId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
	Start,
	Move,
	End,
	/// The platform took the gesture away, e.g. a system swipe.
	Cancel,
}

/// A raw pointer or touch event, as delivered by the input layer.
///
/// Coordinates are whatever the platform reported. Missing values are represented as NaN so that
/// they go through the same rejection path as any other non-finite coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
	pub pointer_id: PointerId,
	pub phase: PointerPhase,
	pub x: f32,
	pub y: f32,
}

impl PointerEvent {
	pub fn new(phase: PointerPhase, x: f32, y: f32) -> Self {
		Self {
			pointer_id: 0,
			phase,
			x,
			y,
		}
	}

	pub fn start(x: f32, y: f32) -> Self {
		Self::new(PointerPhase::Start, x, y)
	}

	pub fn moved(x: f32, y: f32) -> Self {
		Self::new(PointerPhase::Move, x, y)
	}

	pub fn end() -> Self {
		Self::new(PointerPhase::End, f32::NAN, f32::NAN)
	}

	pub fn cancel() -> Self {
		Self::new(PointerPhase::Cancel, f32::NAN, f32::NAN)
	}

	/// Builds an event from coordinates that may be absent altogether.
	pub fn from_optional(phase: PointerPhase, x: Option<f32>, y: Option<f32>) -> Self {
		Self::new(phase, x.unwrap_or(f32::NAN), y.unwrap_or(f32::NAN))
	}

	pub fn with_pointer(self, pointer_id: PointerId) -> Self {
		Self { pointer_id, ..self }
	}

	pub fn position(&self) -> Option<Point> {
		let p = vec2(self.x, self.y);
		p.is_finite().then_some(p)
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
	Idle,
	Drawing {
		pointer_id: PointerId,
		origin: Point,
		/// Set once a move has cleared the jitter threshold.
		moving: bool,
	},
}

/// What handling an event did to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
	Ignored,
	Began(StrokeHandle),
	Extended,
	Committed(StrokeHandle),
	Discarded(StrokeHandle),
}

/// Turns pointer events into stroke mutations. Only a single pointer draws at a time.
#[derive(Debug, Clone)]
pub struct GestureInputAdapter {
	state: GestureState,
	min_move_distance: f32,
}

impl Default for GestureInputAdapter {
	fn default() -> Self {
		Self::new(0.0)
	}
}

impl GestureInputAdapter {
	/// Moves that stay within `min_move_distance` of the start point are dropped until one gets
	/// further away than that.
	pub fn new(min_move_distance: f32) -> Self {
		Self {
			state: GestureState::Idle,
			min_move_distance: min_move_distance.max(0.0),
		}
	}

	pub fn state(&self) -> GestureState {
		self.state
	}

	pub fn is_drawing(&self) -> bool {
		matches!(self.state, GestureState::Drawing { .. })
	}

	/// Forgets any gesture in progress without touching a surface, e.g. after the surface itself
	/// was cleared.
	pub fn reset(&mut self) {
		self.state = GestureState::Idle;
	}

	pub fn handle(
		&mut self,
		event: PointerEvent,
		surface: &mut DrawingSurfaceState,
		color: PaletteColor,
		width: StrokeWidth,
	) -> GestureOutcome {
		use GestureOutcome::*;
		use PointerPhase::*;

		if let GestureState::Drawing { pointer_id, .. } = self.state {
			if pointer_id != event.pointer_id {
				tracing::trace!(
					drawing = pointer_id,
					other = event.pointer_id,
					"ignoring event from a second pointer"
				);
				return Ignored;
			}
		}

		match (self.state, event.phase) {
			(_, Start) => {
				let Some(position) = event.position() else {
					tracing::debug!(x = event.x, y = event.y, "ignoring start with invalid coordinates");
					return Ignored;
				};
				match surface.begin_stroke(position, color, width) {
					Ok(handle) => {
						self.state = GestureState::Drawing {
							pointer_id: event.pointer_id,
							origin: position,
							moving: false,
						};
						Began(handle)
					}
					Err(error) => {
						tracing::debug!(%error, "could not begin stroke");
						Ignored
					}
				}
			}
			(
				GestureState::Drawing {
					pointer_id,
					origin,
					moving,
				},
				Move,
			) => {
				let Some(position) = event.position() else {
					tracing::debug!(x = event.x, y = event.y, "ignoring move with invalid coordinates");
					return Ignored;
				};
				if !moving && position.distance(origin) < self.min_move_distance {
					return Ignored;
				}
				self.state = GestureState::Drawing {
					pointer_id,
					origin,
					moving: true,
				};
				match surface.extend_stroke(position) {
					Ok(()) => Extended,
					Err(error) => {
						// The surface lost its active stroke behind our back (e.g. a clear).
						tracing::debug!(%error, "could not extend stroke");
						self.state = GestureState::Idle;
						Ignored
					}
				}
			}
			(GestureState::Drawing { .. }, End) => {
				self.state = GestureState::Idle;
				surface.commit_stroke().map_or(Ignored, Committed)
			}
			(GestureState::Drawing { .. }, Cancel) => {
				self.state = GestureState::Idle;
				surface.discard_active_stroke().map_or(Ignored, Discarded)
			}
			(GestureState::Idle, Move | End | Cancel) => Ignored,
		}
	}
}
