use bytemuck::{Pod, Zeroable};
use derive_more::Display;
use thiserror::Error;

/// A straight (non-premultiplied) 8-bit RGBA color.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Rgba8(pub [u8; 4]);

impl Rgba8 {
	pub const WHITE: Self = Self([0xff, 0xff, 0xff, 0xff]);

	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self([r, g, b, a])
	}
}

impl From<[u8; 4]> for Rgba8 {
	fn from(value: [u8; 4]) -> Self {
		Self(value)
	}
}

/// The two selectable ink colors. Their actual values come from the [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum PaletteColor {
	#[default]
	#[display("primary")]
	Primary,
	#[display("accent")]
	Accent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
	pub primary: Rgba8,
	pub accent: Rgba8,
}

impl Palette {
	pub fn resolve(&self, color: PaletteColor) -> Rgba8 {
		match color {
			PaletteColor::Primary => self.primary,
			PaletteColor::Accent => self.accent,
		}
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			primary: Rgba8::new(0x1c, 0x1c, 0x2a, 0xff),
			accent: Rgba8::new(0xd6, 0x45, 0x2c, 0xff),
		}
	}
}

#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
#[error("unsupported stroke width {0}px")]
pub struct UnsupportedStrokeWidth(pub u32);

static_assertions::assert_impl_all!(UnsupportedStrokeWidth: std::error::Error, Send, Sync);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum StrokeWidth {
	#[default]
	#[display("2px")]
	Two,
	#[display("4px")]
	Four,
	#[display("6px")]
	Six,
	#[display("8px")]
	Eight,
}

impl StrokeWidth {
	pub const ALL: [StrokeWidth; 4] = [
		StrokeWidth::Two,
		StrokeWidth::Four,
		StrokeWidth::Six,
		StrokeWidth::Eight,
	];

	pub fn pixels(self) -> u32 {
		match self {
			StrokeWidth::Two => 2,
			StrokeWidth::Four => 4,
			StrokeWidth::Six => 6,
			StrokeWidth::Eight => 8,
		}
	}
}

impl TryFrom<u32> for StrokeWidth {
	type Error = UnsupportedStrokeWidth;

	fn try_from(value: u32) -> Result<Self, Self::Error> {
		Self::ALL
			.into_iter()
			.find(|w| w.pixels() == value)
			.ok_or(UnsupportedStrokeWidth(value))
	}
}
