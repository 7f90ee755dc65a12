use base64::engine::*;
use std::io::Write;

pub const PNG_MEDIATYPE: &str = "image/png";

/// Writes 8-bit RGBA pixel data as a PNG.
pub fn encode_png(
	data: &[u8],
	width: u32,
	height: u32,
	out: impl Write,
) -> Result<(), png::EncodingError> {
	let mut encoder = png::Encoder::new(out, width, height);
	encoder.set_color(png::ColorType::Rgba);
	encoder.set_depth(png::BitDepth::Eight);
	encoder.set_srgb(png::SrgbRenderingIntent::Perceptual);
	encoder.set_compression(png::Compression::Default);
	// The trailing chunk is written when the writer is dropped.
	encoder.write_header()?.write_image_data(data)
}

pub fn encode_data_url(data: &[u8], mediatype: &str) -> String {
	let data = general_purpose::STANDARD.encode(data);
	format!("data:{mediatype};base64,{data}")
}

/// Splits a base64 data URL into its media type and decoded bytes.
pub fn decode_data_url(url: &str) -> Option<(&str, Vec<u8>)> {
	let rest = url.strip_prefix("data:")?;
	let (mediatype, data) = rest.split_once(";base64,")?;
	let data = general_purpose::STANDARD.decode(data).ok()?;
	Some((mediatype, data))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn data_url_round_trip() {
		let url = encode_data_url(b"sketch", PNG_MEDIATYPE);
		assert_eq!(url, "data:image/png;base64,c2tldGNo");
		assert_eq!(
			decode_data_url(&url),
			Some((PNG_MEDIATYPE, b"sketch".to_vec()))
		);
	}

	#[test]
	fn malformed_data_urls() {
		assert_eq!(decode_data_url("image/png;base64,c2tldGNo"), None);
		assert_eq!(decode_data_url("data:image/png,c2tldGNo"), None);
		assert_eq!(decode_data_url("data:image/png;base64,!!!"), None);
	}

	#[test]
	fn png_signature() -> anyhow::Result<()> {
		let mut out = Vec::new();
		encode_png(&[255; 2 * 2 * 4], 2, 2, &mut out)?;
		assert_eq!(&out[..8], b"\x89PNG\r\n\x1a\n");
		Ok(())
	}
}
