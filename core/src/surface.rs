use std::collections::HashMap;
use std::collections::TryReserveError;

use thiserror::Error;

use crate::colorspace::Colorspace;
use crate::quantum::Quantum;

#[derive(Debug, Error)]
pub enum SurfaceError {
	#[error("{width}x{height} surface geometry overflows")]
	Geometry {
		width: usize,
		height: usize,
	},
	#[error("pixel allocation failed")]
	Resource {
		#[from]
		source: TryReserveError,
	},
	#[error("row {y} out of range for {rows} rows")]
	RowRange {
		y: usize,
		rows: usize,
	},
	#[error("no row queued for commit")]
	NoQueuedRow,
	#[error("surface has no colormap")]
	NoColormap,
}

/// Whether cells carry channel values directly or indices into a colormap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StorageClass {
	Direct,
	Indexed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pixel {
	pub red: Quantum,
	pub green: Quantum,
	pub blue: Quantum,
	pub alpha: Quantum,
}

/// A queued surface row: channel cells plus the auxiliary channel,
/// which holds the palette index for indexed storage and the black
/// channel for CMYK surfaces.
pub struct Row<'a> {
	pub pixels: &'a mut [Pixel],
	pub indexes: &'a mut [Quantum],
}

/// A width x height pixel grid with direct or indexed storage.
///
/// Rows are written through a queue/commit protocol: [`queue_row`]
/// opens a row for mutation, [`sync_row`] commits it. The backing store
/// is memory, so mutations become visible as they are made; committing
/// closes the transaction and is the point after which a caller may
/// treat the row as decoded.
///
/// [`queue_row`]: PixelSurface::queue_row
/// [`sync_row`]: PixelSurface::sync_row
#[derive(Clone, Debug)]
pub struct PixelSurface {
	width: usize,
	height: usize,
	depth: usize,
	class: StorageClass,
	colorspace: Colorspace,
	pixels: Vec<Pixel>,
	indexes: Vec<Quantum>,
	colormap: Vec<Pixel>,
	properties: HashMap<String, String>,
	queued: Option<usize>,
}

fn zeroed<T>(len: usize) -> Result<Vec<T>, TryReserveError>
where
	T: Clone + Default,
{
	let mut v = Vec::new();
	v.try_reserve_exact(len)?;
	v.resize(len, T::default());

	Ok(v)
}

impl PixelSurface {
	/// Creates a direct-class surface with all channels zeroed.
	pub fn direct(width: usize, height: usize, depth: usize) -> Result<PixelSurface, SurfaceError> {
		PixelSurface::with_class(width, height, depth, StorageClass::Direct, 0)
	}

	/// Creates an indexed-class surface with a zeroed colormap of `colors` entries.
	pub fn indexed(width: usize, height: usize, depth: usize, colors: usize) -> Result<PixelSurface, SurfaceError> {
		PixelSurface::with_class(width, height, depth, StorageClass::Indexed, colors)
	}

	fn with_class(width: usize, height: usize, depth: usize, class: StorageClass, colors: usize) -> Result<PixelSurface, SurfaceError> {
		let area = width.checked_mul(height)
			.ok_or(SurfaceError::Geometry { width: width, height: height })?;

		Ok(PixelSurface {
			width: width,
			height: height,
			depth: depth,
			class: class,
			colorspace: Colorspace::SRGB,
			pixels: zeroed(area)?,
			indexes: zeroed(area)?,
			colormap: zeroed(colors)?,
			properties: HashMap::new(),
			queued: None,
		})
	}

	pub fn width(&self) -> usize {
		self.width
	}

	pub fn height(&self) -> usize {
		self.height
	}

	/// Declared bit depth: the palette entry depth for indexed surfaces,
	/// the per-pixel depth otherwise.
	pub fn depth(&self) -> usize {
		self.depth
	}

	pub fn class(&self) -> StorageClass {
		self.class
	}

	pub fn colorspace(&self) -> Colorspace {
		self.colorspace
	}

	pub fn set_colorspace(&mut self, colorspace: Colorspace) {
		self.colorspace = colorspace;
	}

	/// Opens row `y` for mutation.
	pub fn queue_row(&mut self, y: usize) -> Result<Row<'_>, SurfaceError> {
		if y >= self.height {
			return Err(SurfaceError::RowRange { y: y, rows: self.height });
		}

		self.queued = Some(y);
		let start = y * self.width;
		let end = start + self.width;

		Ok(Row {
			pixels: &mut self.pixels[start..end],
			indexes: &mut self.indexes[start..end],
		})
	}

	/// Commits the queued row. Fails if no row is open.
	pub fn sync_row(&mut self) -> Result<(), SurfaceError> {
		match self.queued.take() {
			Some(_) => Ok(()),
			None => Err(SurfaceError::NoQueuedRow),
		}
	}

	pub fn pixels(&self) -> &[Pixel] {
		&self.pixels
	}

	pub fn indexes(&self) -> &[Quantum] {
		&self.indexes
	}

	/// Mutable channel and auxiliary-channel cells, row-major.
	pub fn channels_mut(&mut self) -> (&mut [Pixel], &mut [Quantum]) {
		(&mut self.pixels, &mut self.indexes)
	}

	pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
		if x >= self.width {
			return None;
		}

		self.pixels.get(y * self.width + x).copied()
	}

	pub fn index(&self, x: usize, y: usize) -> Option<Quantum> {
		if x >= self.width {
			return None;
		}

		self.indexes.get(y * self.width + x).copied()
	}

	pub fn colormap(&self) -> &[Pixel] {
		&self.colormap
	}

	pub fn colormap_mut(&mut self) -> &mut [Pixel] {
		&mut self.colormap
	}

	/// Expands the colormap through the auxiliary channel into the pixel
	/// cells. Out-of-range indices constrain to entry zero.
	pub fn sync_from_colormap(&mut self) -> Result<(), SurfaceError> {
		if self.colormap.is_empty() {
			return Err(SurfaceError::NoColormap);
		}

		for (pixel, index) in self.pixels.iter_mut().zip(self.indexes.iter()) {
			*pixel = *self.colormap.get(*index as usize).unwrap_or(&self.colormap[0]);
		}

		Ok(())
	}

	/// Reclassifies the surface as direct. Pixel cells are left as they
	/// are; callers wanting colormap content in them sync first.
	pub fn promote_to_direct(&mut self) {
		self.class = StorageClass::Direct;
	}

	pub fn property(&self, key: &str) -> Option<&str> {
		self.properties.get(key).map(|v| v.as_str())
	}

	pub fn set_property(&mut self, key: &str, value: &str) {
		self.properties.insert(key.to_string(), value.to_string());
	}
}
