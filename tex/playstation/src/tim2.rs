use byteorder::{
	BE,
	LE,
	ReadBytesExt
};

use std::collections::TryReserveError;
use std::io;
use std::io::Read;

use thiserror::Error;
use tracing::debug;

use ttk_core::{
	scale5to8,
	scale6to8,
	tag4
};

use ttk_core::progress::{
	ProgressFn,
	Status
};

use ttk_core::quantum::{
	Quantum,
	QUANTUM_RANGE
};

use ttk_core::surface::{
	Pixel,
	PixelSurface,
	SurfaceError
};

pub const MAGIC: u32 = tag4!(b"TIM2");

#[cfg(feature = "import")]
#[derive(Debug, Error)]
pub enum TIM2ImportError {
	#[error("I/O error")]
	IO {
		#[from]
		source: io::Error,
	},
	#[error("Not a TIM2 texture: {0:08X}")]
	Magic(u32),
	#[error("Unsupported number of images: {0}")]
	ImageCount(u16),
	#[error("Unsupported CLUT storage mode: {0}")]
	ClutStorageMode(u8),
	#[error("Improper image header: {bpp} bpp with palette={palette}")]
	Depth {
		bpp: u8,
		palette: bool,
	},
	#[error("Image data ended early: expected {expected} bytes, got {actual}")]
	InsufficientData {
		expected: u64,
		actual: u64,
	},
	#[error("Memory allocation failed")]
	Resource {
		#[from]
		source: TryReserveError,
	},
	#[error("Pixel surface error")]
	Surface {
		#[from]
		source: SurfaceError,
	},
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FileHeader {
	pub magic: u32,
	pub format_type: u8,
	pub format_id: u8,
	pub image_count: u16,
}

impl FileHeader {
	#[cfg(feature = "import")]
	fn read<R>(buf: &mut R) -> Result<FileHeader, TIM2ImportError>
	where
		R: ReadBytesExt,
	{
		let magic = buf.read_u32::<BE>()?;
		if magic != MAGIC {
			return Err(TIM2ImportError::Magic(magic));
		}

		let format_type = buf.read_u8()?;
		let format_id = buf.read_u8()?;
		let image_count = buf.read_u16::<LE>()?;

		let mut reserved = [0; 8];
		buf.read_exact(&mut reserved)?;

		if image_count != 1 {
			return Err(TIM2ImportError::ImageCount(image_count));
		}

		Ok(FileHeader {
			magic: magic,
			format_type: format_type,
			format_id: format_id,
			image_count: image_count,
		})
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageHeader {
	pub total_size: u32,
	pub clut_size: u32,
	pub image_size: u32,
	pub header_size: u16,
	pub clut_color_count: u16,
	pub img_format: u8,
	pub mipmap_count: u8,
	pub clut_type: u8,
	pub bpp_type: u8,
	pub width: u16,
	pub height: u16,
	pub gs_tex0: u64,
	pub gs_tex1: u64,
	pub gs_regs: u32,
	pub gs_tex_clut: u32,
}

impl ImageHeader {
	#[cfg(feature = "import")]
	fn read<R>(buf: &mut R) -> Result<ImageHeader, TIM2ImportError>
	where
		R: ReadBytesExt,
	{
		let header = ImageHeader {
			total_size: buf.read_u32::<LE>()?,
			clut_size: buf.read_u32::<LE>()?,
			image_size: buf.read_u32::<LE>()?,
			header_size: buf.read_u16::<LE>()?,
			clut_color_count: buf.read_u16::<LE>()?,
			img_format: buf.read_u8()?,
			mipmap_count: buf.read_u8()?,
			clut_type: buf.read_u8()?,
			bpp_type: buf.read_u8()?,
			width: buf.read_u16::<LE>()?,
			height: buf.read_u16::<LE>()?,
			// the GS register words keep the GPU byte order
			gs_tex0: buf.read_u64::<BE>()?,
			gs_tex1: buf.read_u64::<BE>()?,
			gs_regs: buf.read_u32::<BE>()?,
			gs_tex_clut: buf.read_u32::<BE>()?,
		};

		debug!("GsTex0: {:016x}, GsTex1: {:016x}", header.gs_tex0, header.gs_tex1);

		Ok(header)
	}
}

/// Decode parameters derived from the raw `clut_type`/`bpp_type` codes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelFormat {
	pub bits_per_pixel: u8,
	pub palette_depth: Option<u8>,
}

impl PixelFormat {
	#[cfg(feature = "import")]
	pub fn derive(clut_type: u8, bpp_type: u8) -> Result<PixelFormat, TIM2ImportError> {
		let palette_depth = if clut_type != 0 {
			// High nibble selects the CLUT storage mode; only the
			// linear layout is supported, not the swizzled GS layouts.
			if clut_type >> 4 != 0 {
				return Err(TIM2ImportError::ClutStorageMode(clut_type >> 4));
			}

			Some(match clut_type & 0x0F {
				1 => 16,
				2 => 24,
				3 => 32,
				_ => 32,
			})
		} else {
			None
		};

		let bits_per_pixel = match bpp_type {
			1 => 16,
			2 => 24,
			3 => 32,
			4 => 4,
			5 => 8,
			_ => 8,
		};

		// 4/8 bpp data is palette-indexed, 16/24/32 bpp is direct
		// color; the header must enable the palette for exactly the
		// indexed depths.
		let indexed = bits_per_pixel == 4 || bits_per_pixel == 8;
		if indexed != palette_depth.is_some() {
			return Err(TIM2ImportError::Depth {
				bpp: bits_per_pixel,
				palette: palette_depth.is_some(),
			});
		}

		Ok(PixelFormat {
			bits_per_pixel: bits_per_pixel,
			palette_depth: palette_depth,
		})
	}
}

#[cfg(feature = "import")]
fn read_blob<R>(buf: &mut R, len: usize) -> Result<Vec<u8>, TIM2ImportError>
where
	R: Read,
{
	let mut data = Vec::new();
	data.try_reserve_exact(len)?;
	data.resize(len, 0);

	let mut filled = 0;
	while filled < len {
		match buf.read(&mut data[filled..]) {
			Ok(0) => {
				return Err(TIM2ImportError::InsufficientData {
					expected: len as u64,
					actual: filled as u64,
				});
			},
			Ok(count) => filled += count,
			Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
			Err(e) => return Err(e.into()),
		}
	}

	Ok(data)
}

#[cfg(feature = "import")]
fn unpack_row4(src: &[u8], indexes: &mut [Quantum]) {
	let columns = indexes.len();
	let mut p = 0;
	let mut x = 0;

	while x + 1 < columns {
		indexes[x] = src[p] & 0x0F;
		indexes[x + 1] = (src[p] >> 4) & 0x0F;
		p += 1;
		x += 2;
	}

	// a trailing odd pixel sits in the high nibble of the next byte
	if columns % 2 != 0 {
		indexes[columns - 1] = (src[p] >> 4) & 0x0F;
	}
}

#[cfg(feature = "import")]
fn unpack_row8(src: &[u8], indexes: &mut [Quantum]) {
	indexes.copy_from_slice(&src[..indexes.len()]);
}

#[cfg(feature = "import")]
fn pixel16(word: u16) -> Pixel {
	Pixel {
		red: scale5to8((word & 0x1F) as u8),
		green: scale5to8(((word >> 5) & 0x1F) as u8),
		blue: scale5to8(((word >> 10) & 0x1F) as u8),
		alpha: if word >> 15 == 0 { 0 } else { QUANTUM_RANGE },
	}
}

#[cfg(feature = "import")]
fn pixel24(word: u32) -> Pixel {
	Pixel {
		red: scale6to8((word & 0x3F) as u8),
		green: scale6to8(((word >> 6) & 0x3F) as u8),
		blue: scale6to8(((word >> 12) & 0x3F) as u8),
		alpha: if (word >> 18) & 0x3F == 0 { 0 } else { QUANTUM_RANGE },
	}
}

// Shared by 32-bit pixels (assembled MSB first) and 32-bit CLUT entries
// (assembled LSB first): both land red in byte 0 and the alpha
// indicator in byte 3. Only the indicator's zero/nonzero state is kept.
#[cfg(feature = "import")]
fn pixel32(bytes: &[u8]) -> Pixel {
	Pixel {
		red: bytes[0],
		green: bytes[1],
		blue: bytes[2],
		alpha: if bytes[3] == 0 { 0 } else { QUANTUM_RANGE },
	}
}

#[cfg(feature = "import")]
fn unpack_pixels(data: &[u8], format: &PixelFormat, surface: &mut PixelSurface, monitor: Option<&ProgressFn>) -> Result<Status, TIM2ImportError> {
	let columns = surface.width();
	let rows = surface.height();
	let bits_per_line = columns * format.bits_per_pixel as usize;
	let bytes_per_line = bits_per_line / 8 + if bits_per_line % 8 == 0 { 0 } else { 1 };

	debug!("{} bits per line, {} bytes per line", bits_per_line, bytes_per_line);

	let needed = bytes_per_line as u64 * rows as u64;
	if (data.len() as u64) < needed {
		return Err(TIM2ImportError::InsufficientData {
			expected: needed,
			actual: data.len() as u64,
		});
	}

	for y in 0..rows {
		let src = &data[y * bytes_per_line..(y + 1) * bytes_per_line];

		{
			let row = surface.queue_row(y)?;

			match format.bits_per_pixel {
				4 => unpack_row4(src, row.indexes),
				8 => unpack_row8(src, row.indexes),
				16 => {
					for (chunk, pixel) in src.chunks_exact(2).zip(row.pixels.iter_mut()) {
						*pixel = pixel16(u16::from_le_bytes([chunk[0], chunk[1]]));
					}
				},
				24 => {
					for (chunk, pixel) in src.chunks_exact(3).zip(row.pixels.iter_mut()) {
						*pixel = pixel24(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], 0]));
					}
				},
				32 => {
					for (chunk, pixel) in src.chunks_exact(4).zip(row.pixels.iter_mut()) {
						*pixel = pixel32(chunk);
					}
				},
				bpp => {
					return Err(TIM2ImportError::Depth {
						bpp: bpp,
						palette: format.palette_depth.is_some(),
					});
				},
			}
		}

		surface.sync_row()?;

		if let Some(monitor) = monitor {
			if !monitor(y, rows) {
				return Ok(Status::Cancelled);
			}
		}
	}

	Ok(Status::Complete)
}

#[cfg(feature = "import")]
fn decode_clut(data: &[u8], depth: u8, surface: &mut PixelSurface) -> Result<(), TIM2ImportError> {
	let entry_size = depth as usize / 8;
	let colors = surface.colormap().len();

	debug!("CLUT depth: {}, {} colors", depth, colors);

	let needed = colors as u64 * entry_size as u64;
	if (data.len() as u64) < needed {
		return Err(TIM2ImportError::InsufficientData {
			expected: needed,
			actual: data.len() as u64,
		});
	}

	let entries = data.chunks_exact(entry_size);
	match depth {
		16 => {
			for (chunk, entry) in entries.zip(surface.colormap_mut().iter_mut()) {
				*entry = pixel16(u16::from_le_bytes([chunk[0], chunk[1]]));
			}
		},
		24 => {
			for (chunk, entry) in entries.zip(surface.colormap_mut().iter_mut()) {
				*entry = pixel24(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], 0]));
			}
		},
		_ => {
			for (chunk, entry) in entries.zip(surface.colormap_mut().iter_mut()) {
				*entry = pixel32(chunk);
			}
		},
	}

	Ok(())
}

/// A decoded TIM2 image: the raw headers plus the populated surface.
#[derive(Clone, Debug)]
pub struct TIM2Texture {
	pub header: FileHeader,
	pub img_header: ImageHeader,
	pub surface: PixelSurface,
}

#[derive(Clone, Debug)]
pub enum DecodeOutcome {
	Image(TIM2Texture),
	Cancelled,
}

impl DecodeOutcome {
	/// The decoded texture, unless the pass was cancelled.
	pub fn into_image(self) -> Option<TIM2Texture> {
		match self {
			DecodeOutcome::Image(tex) => Some(tex),
			DecodeOutcome::Cancelled => None,
		}
	}
}

impl TIM2Texture {
	/// Decodes a single-image TIM2 stream.
	///
	/// The optional monitor is called after each committed pixel row
	/// with `(row, total_rows)`; returning `false` cancels the decode
	/// and yields [`DecodeOutcome::Cancelled`] instead of an image.
	#[cfg(feature = "import")]
	pub fn read<R>(buf: &mut R, monitor: Option<&ProgressFn>) -> Result<DecodeOutcome, TIM2ImportError>
	where
		R: ReadBytesExt,
	{
		let header = FileHeader::read(buf)?;
		let img_header = ImageHeader::read(buf)?;
		let format = PixelFormat::derive(img_header.clut_type, img_header.bpp_type)?;

		let columns = img_header.width as usize;
		let rows = img_header.height as usize;

		let mut surface = match format.palette_depth {
			Some(depth) => PixelSurface::indexed(columns, rows, depth as usize, img_header.clut_color_count as usize)?,
			None => PixelSurface::direct(columns, rows, format.bits_per_pixel as usize)?,
		};

		let data = read_blob(buf, img_header.image_size as usize)?;
		if unpack_pixels(&data, &format, &mut surface, monitor)?.is_cancelled() {
			return Ok(DecodeOutcome::Cancelled);
		}
		drop(data);

		if let Some(depth) = format.palette_depth {
			let clut = read_blob(buf, img_header.clut_size as usize)?;
			decode_clut(&clut, depth, &mut surface)?;
		}

		Ok(DecodeOutcome::Image(TIM2Texture {
			header: header,
			img_header: img_header,
			surface: surface,
		}))
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{
		AtomicUsize,
		Ordering
	};

	use super::*;

	fn file_header(image_count: u16) -> Vec<u8> {
		let mut buf = vec![];
		buf.extend_from_slice(b"TIM2");
		buf.push(4); // format_type
		buf.push(0); // format_id
		buf.extend_from_slice(&image_count.to_le_bytes());
		buf.extend_from_slice(&[0; 8]);
		buf
	}

	fn image_header(clut_size: u32, image_size: u32, colors: u16, clut_type: u8, bpp_type: u8, width: u16, height: u16) -> Vec<u8> {
		let mut buf = vec![];
		buf.extend_from_slice(&(48 + image_size + clut_size).to_le_bytes());
		buf.extend_from_slice(&clut_size.to_le_bytes());
		buf.extend_from_slice(&image_size.to_le_bytes());
		buf.extend_from_slice(&48u16.to_le_bytes()); // header_size
		buf.extend_from_slice(&colors.to_le_bytes());
		buf.push(0); // img_format
		buf.push(1); // mipmap_count
		buf.push(clut_type);
		buf.push(bpp_type);
		buf.extend_from_slice(&width.to_le_bytes());
		buf.extend_from_slice(&height.to_le_bytes());
		buf.extend_from_slice(&0xABCD_u64.to_be_bytes()); // GsTex0
		buf.extend_from_slice(&0u64.to_be_bytes()); // GsTex1
		buf.extend_from_slice(&0u32.to_be_bytes()); // GsRegs
		buf.extend_from_slice(&0u32.to_be_bytes()); // GsTexClut
		buf
	}

	fn decode(buf: &[u8]) -> Result<DecodeOutcome, TIM2ImportError> {
		TIM2Texture::read(&mut &buf[..], None)
	}

	#[test]
	fn test_bad_magic() {
		let mut buf = file_header(1);
		buf[3] = b'3';

		match decode(&buf) {
			Err(TIM2ImportError::Magic(0x54494D33)) => {},
			other => panic!("expected magic failure, got {:?}", other),
		}
	}

	#[test]
	fn test_image_count() {
		let buf = file_header(2);

		match decode(&buf) {
			Err(TIM2ImportError::ImageCount(2)) => {},
			other => panic!("expected image count failure, got {:?}", other),
		}
	}

	#[test]
	fn test_clut_storage_mode() {
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(0, 0, 0, 0x13, 4, 2, 1));

		match decode(&buf) {
			Err(TIM2ImportError::ClutStorageMode(1)) => {},
			other => panic!("expected storage mode failure, got {:?}", other),
		}
	}

	#[test]
	fn test_contradictory_depth() {
		// 4 bpp but no palette enabled
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(0, 2, 0, 0, 4, 2, 1));

		match decode(&buf) {
			Err(TIM2ImportError::Depth { bpp: 4, palette: false }) => {},
			other => panic!("expected depth failure, got {:?}", other),
		}

		// a palette under direct 16 bpp would never be referenced
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(4, 4, 2, 0x01, 1, 2, 1));

		match decode(&buf) {
			Err(TIM2ImportError::Depth { bpp: 16, palette: true }) => {},
			other => panic!("expected depth failure, got {:?}", other),
		}
	}

	#[test]
	fn test_unpack_4bpp_odd_width() {
		// width 3 spans two bytes per row: two pixels from byte 0,
		// the third from the high nibble of byte 1
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(64, 4, 16, 0x03, 4, 3, 2));
		buf.extend_from_slice(&[0x21, 0x3F, 0x54, 0x6F]);
		buf.extend_from_slice(&[0; 64]);

		let tex = decode(&buf).unwrap().into_image().unwrap();
		let surface = &tex.surface;

		assert_eq!(surface.index(0, 0), Some(1));
		assert_eq!(surface.index(1, 0), Some(2));
		assert_eq!(surface.index(2, 0), Some(3));
		assert_eq!(surface.index(0, 1), Some(4));
		assert_eq!(surface.index(1, 1), Some(5));
		assert_eq!(surface.index(2, 1), Some(6));
	}

	#[test]
	fn test_unpack_4bpp_even_width() {
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(64, 2, 16, 0x03, 4, 4, 1));
		buf.extend_from_slice(&[0x21, 0x43]);
		buf.extend_from_slice(&[0; 64]);

		let tex = decode(&buf).unwrap().into_image().unwrap();

		assert_eq!(tex.surface.index(0, 0), Some(1));
		assert_eq!(tex.surface.index(1, 0), Some(2));
		assert_eq!(tex.surface.index(2, 0), Some(3));
		assert_eq!(tex.surface.index(3, 0), Some(4));
	}

	#[test]
	fn test_unpack_8bpp() {
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(8, 3, 4, 0x01, 5, 3, 1));
		buf.extend_from_slice(&[2, 0, 3]);
		buf.extend_from_slice(&[0; 8]);

		let tex = decode(&buf).unwrap().into_image().unwrap();

		assert_eq!(tex.surface.index(0, 0), Some(2));
		assert_eq!(tex.surface.index(1, 0), Some(0));
		assert_eq!(tex.surface.index(2, 0), Some(3));
	}

	#[test]
	fn test_unpack_16bpp() {
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(0, 4, 0, 0, 1, 2, 1));
		buf.extend_from_slice(&0xFFFF_u16.to_le_bytes());
		buf.extend_from_slice(&0x0000_u16.to_le_bytes());

		let tex = decode(&buf).unwrap().into_image().unwrap();

		let white = tex.surface.pixel(0, 0).unwrap();
		assert_eq!((white.red, white.green, white.blue), (255, 255, 255));
		assert_eq!(white.alpha, QUANTUM_RANGE);

		let clear = tex.surface.pixel(1, 0).unwrap();
		assert_eq!((clear.red, clear.green, clear.blue), (0, 0, 0));
		assert_eq!(clear.alpha, 0);
	}

	#[test]
	fn test_unpack_16bpp_channel_order() {
		// red lives in the low five bits
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(0, 2, 0, 0, 1, 1, 1));
		buf.extend_from_slice(&0x001F_u16.to_le_bytes());

		let tex = decode(&buf).unwrap().into_image().unwrap();
		let pixel = tex.surface.pixel(0, 0).unwrap();

		assert_eq!((pixel.red, pixel.green, pixel.blue), (255, 0, 0));
		assert_eq!(pixel.alpha, 0);
	}

	#[test]
	fn test_unpack_24bpp() {
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(0, 6, 0, 0, 2, 2, 1));
		buf.extend_from_slice(&[0x3F, 0x00, 0x00]); // red only, indicator zero
		buf.extend_from_slice(&[0xFF, 0xFF, 0xFF]); // all channels, indicator set

		let tex = decode(&buf).unwrap().into_image().unwrap();

		let red = tex.surface.pixel(0, 0).unwrap();
		assert_eq!((red.red, red.green, red.blue), (255, 0, 0));
		assert_eq!(red.alpha, 0);

		let white = tex.surface.pixel(1, 0).unwrap();
		assert_eq!((white.red, white.green, white.blue), (255, 255, 255));
		assert_eq!(white.alpha, QUANTUM_RANGE);
	}

	#[test]
	fn test_unpack_32bpp() {
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(0, 8, 0, 0, 3, 2, 1));
		buf.extend_from_slice(&[0x10, 0x20, 0x30, 0x00]);
		buf.extend_from_slice(&[0x10, 0x20, 0x30, 0x01]);

		let tex = decode(&buf).unwrap().into_image().unwrap();

		let clear = tex.surface.pixel(0, 0).unwrap();
		assert_eq!((clear.red, clear.green, clear.blue), (0x10, 0x20, 0x30));
		assert_eq!(clear.alpha, 0);

		let opaque = tex.surface.pixel(1, 0).unwrap();
		assert_eq!(opaque.alpha, QUANTUM_RANGE);
	}

	#[test]
	fn test_clut_32() {
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(8, 1, 2, 0x03, 5, 1, 1));
		buf.push(1); // pixel index
		buf.extend_from_slice(&[0, 0, 0, 0, 255, 255, 255, 255]);

		let tex = decode(&buf).unwrap().into_image().unwrap();
		let colormap = tex.surface.colormap();

		assert_eq!(colormap[0], Pixel { red: 0, green: 0, blue: 0, alpha: 0 });
		assert_eq!(colormap[1], Pixel { red: 255, green: 255, blue: 255, alpha: 255 });
	}

	#[test]
	fn test_clut_16() {
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(4, 1, 2, 0x01, 5, 1, 1));
		buf.push(0);
		buf.extend_from_slice(&0x001F_u16.to_le_bytes());
		buf.extend_from_slice(&0xFFE0_u16.to_le_bytes());

		let tex = decode(&buf).unwrap().into_image().unwrap();
		let colormap = tex.surface.colormap();

		assert_eq!(colormap[0], Pixel { red: 255, green: 0, blue: 0, alpha: 0 });
		assert_eq!(colormap[1], Pixel { red: 0, green: 255, blue: 255, alpha: 255 });
	}

	#[test]
	fn test_truncated_image_data() {
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(0, 8, 0, 0, 3, 2, 1));
		buf.extend_from_slice(&[0x10, 0x20]); // 2 of 8 declared bytes

		match decode(&buf) {
			Err(TIM2ImportError::InsufficientData { expected: 8, actual: 2 }) => {},
			other => panic!("expected truncation failure, got {:?}", other),
		}
	}

	#[test]
	fn test_image_size_below_geometry() {
		// the blob is present but smaller than stride x rows
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(0, 2, 0, 0, 3, 1, 1));
		buf.extend_from_slice(&[0x10, 0x20]);

		match decode(&buf) {
			Err(TIM2ImportError::InsufficientData { expected: 4, actual: 2 }) => {},
			other => panic!("expected truncation failure, got {:?}", other),
		}
	}

	#[test]
	fn test_truncated_clut() {
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(4, 1, 2, 0x03, 5, 1, 1));
		buf.push(0);
		buf.extend_from_slice(&[0; 4]); // 2 entries need 8 bytes

		match decode(&buf) {
			Err(TIM2ImportError::InsufficientData { expected: 8, actual: 4 }) => {},
			other => panic!("expected truncation failure, got {:?}", other),
		}
	}

	#[test]
	fn test_progress_rows() {
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(0, 16, 0, 0, 3, 1, 4));
		buf.extend_from_slice(&[0xFF; 16]);

		let seen = AtomicUsize::new(0);
		let monitor = |y: usize, rows: usize| {
			assert_eq!(rows, 4);
			assert_eq!(y, seen.fetch_add(1, Ordering::Relaxed));
			true
		};

		let outcome = TIM2Texture::read(&mut &buf[..], Some(&monitor)).unwrap();
		assert!(outcome.into_image().is_some());
		assert_eq!(seen.load(Ordering::Relaxed), 4);
	}

	#[test]
	fn test_cancelled_decode() {
		let mut buf = file_header(1);
		buf.extend_from_slice(&image_header(0, 16, 0, 0, 3, 1, 4));
		buf.extend_from_slice(&[0xFF; 16]);

		let monitor = |y: usize, _: usize| y < 1;
		let outcome = TIM2Texture::read(&mut &buf[..], Some(&monitor)).unwrap();

		match outcome {
			DecodeOutcome::Cancelled => {},
			other => panic!("expected cancellation, got {:?}", other),
		}
	}
}
