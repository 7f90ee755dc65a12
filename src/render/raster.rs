use crate::engine::{segments, Point, Rgba8};
use tiny_skia::{Color, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

/// A finished frame: straight-alpha RGBA8 pixels, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
	width: u32,
	height: u32,
	pixels: Vec<Rgba8>,
}

impl Raster {
	/// A raster filled with `background` and nothing drawn on it.
	pub fn new(width: u32, height: u32, background: Rgba8) -> Self {
		Self {
			width,
			height,
			pixels: vec![background; width as usize * height as usize],
		}
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	pub fn pixels(&self) -> &[Rgba8] {
		&self.pixels
	}

	pub fn as_bytes(&self) -> &[u8] {
		bytemuck::cast_slice(&self.pixels)
	}

	pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
		(x < self.width && y < self.height)
			.then(|| self.pixels[y as usize * self.width as usize + x as usize])
	}
}

impl From<&Pixmap> for Raster {
	fn from(pixmap: &Pixmap) -> Self {
		// tiny-skia keeps premultiplied pixels; PNG wants straight alpha.
		let pixels = pixmap
			.pixels()
			.iter()
			.map(|pixel| {
				let c = pixel.demultiply();
				Rgba8::new(c.red(), c.green(), c.blue(), c.alpha())
			})
			.collect();
		Self {
			width: pixmap.width(),
			height: pixmap.height(),
			pixels,
		}
	}
}

/// An anti-aliased drawing target for strokes.
pub struct StrokeCanvas {
	pixmap: Pixmap,
}

impl StrokeCanvas {
	/// Returns `None` when tiny-skia cannot allocate a pixmap of that size, e.g. for zero area.
	pub fn new(width: u32, height: u32, background: Rgba8) -> Option<Self> {
		let mut pixmap = Pixmap::new(width, height)?;
		let [r, g, b, a] = background.0;
		pixmap.fill(Color::from_rgba8(r, g, b, a));
		Some(Self { pixmap })
	}

	/// Draws a polyline through `points` with round joins and round caps. A single point is a dot.
	///
	/// The whole polyline is one path, so where it doubles back on itself it is inked once rather
	/// than darkened.
	pub fn stroke_polyline(&mut self, points: &[Point], width: f32, color: Rgba8) {
		let Some(path) = polyline_path(points) else {
			return;
		};
		let mut paint = Paint::default();
		let [r, g, b, a] = color.0;
		paint.set_color_rgba8(r, g, b, a);
		paint.anti_alias = true;
		let stroke = Stroke {
			width,
			line_cap: LineCap::Round,
			line_join: LineJoin::Round,
			..Stroke::default()
		};
		self.pixmap
			.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
	}

	pub fn finish(self) -> Raster {
		Raster::from(&self.pixmap)
	}
}

fn polyline_path(points: &[Point]) -> Option<Path> {
	let mut builder = PathBuilder::new();
	for (i, (a, b)) in segments(points).enumerate() {
		if i == 0 {
			builder.move_to(a.x, a.y);
		}
		builder.line_to(b.x, b.y);
	}
	builder.finish()
}
