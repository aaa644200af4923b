pub mod tim2;

use std::fs;
use std::io;

use ttk_core::surface::StorageClass;

use tim2::*;

/// Reads a TIM2 texture file from the given path.
///
/// Palette-indexed images come back with their pixel rows already
/// synced from the colormap, so callers can treat every result as
/// direct color.
#[cfg(feature = "import")]
pub fn read_tim2(filepath: &str) -> Result<TIM2Texture, TIM2ImportError> {
	let input = fs::read(filepath)?;

	// no monitor is attached, so the decode cannot be cancelled
	let mut tex = match TIM2Texture::read(&mut input.as_slice(), None)? {
		DecodeOutcome::Image(tex) => tex,
		DecodeOutcome::Cancelled => {
			return Err(io::Error::from(io::ErrorKind::Interrupted).into());
		},
	};

	if tex.surface.class() == StorageClass::Indexed {
		tex.surface.sync_from_colormap()?;
	}

	Ok(tex)
}

#[cfg(test)]
mod tests {
	use std::env;

	use super::*;

	#[test]
	fn test_read_tim2_syncs_palette() {
		let mut buf = vec![];
		buf.extend_from_slice(b"TIM2");
		buf.extend_from_slice(&[4, 0, 1, 0]);
		buf.extend_from_slice(&[0; 8]);
		// image header: 1x1, 8 bpp indexed, two 32-bit palette entries
		buf.extend_from_slice(&57u32.to_le_bytes());
		buf.extend_from_slice(&8u32.to_le_bytes());
		buf.extend_from_slice(&1u32.to_le_bytes());
		buf.extend_from_slice(&48u16.to_le_bytes());
		buf.extend_from_slice(&2u16.to_le_bytes());
		buf.extend_from_slice(&[0, 1, 0x03, 5]);
		buf.extend_from_slice(&1u16.to_le_bytes());
		buf.extend_from_slice(&1u16.to_le_bytes());
		buf.extend_from_slice(&[0; 24]);
		buf.push(1); // the pixel selects palette entry 1
		buf.extend_from_slice(&[0, 0, 0, 0, 0x40, 0x80, 0xC0, 1]);

		let path = env::temp_dir().join("ttk_read_tim2_test.tm2");
		fs::write(&path, &buf).unwrap();

		let tex = read_tim2(path.to_str().unwrap()).unwrap();
		let pixel = tex.surface.pixel(0, 0).unwrap();

		assert_eq!((pixel.red, pixel.green, pixel.blue), (0x40, 0x80, 0xC0));
		assert_eq!(pixel.alpha, 255);

		fs::remove_file(&path).ok();
	}
}
