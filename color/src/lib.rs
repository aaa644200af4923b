pub mod cmyk;
pub mod hue;
pub mod lab;
pub mod log;
pub mod rows;
pub mod tables;
pub mod ycc;

use std::collections::TryReserveError;

use thiserror::Error;
use tracing::debug;

use ttk_core::colorspace::Colorspace;
use ttk_core::progress::{ProgressFn, Status};
use ttk_core::quantum::{
	clamp_to_quantum,
	scale_map_to_quantum,
	Quantum,
	QUANTUM_RANGE,
	QUANTUM_SCALE
};
use ttk_core::surface::{Pixel, PixelSurface, StorageClass, SurfaceError};

use log::LogParams;
use tables::{PostStage, TransformTables};

#[derive(Debug, Error)]
pub enum TransformError {
	#[error("transform table allocation refused: {0}")]
	Resource(#[from] TryReserveError),

	#[error("surface error: {0}")]
	Surface(#[from] SurfaceError)
}

/// Indexed surfaces become direct before a per-pixel pass touches them.
fn promote(surface: &mut PixelSurface) -> Result<(), SurfaceError> {
	if surface.class() == StorageClass::Indexed {
		surface.sync_from_colormap()?;
		surface.promote_to_direct();
	}

	Ok(())
}

fn store_unit(pixel: &mut Pixel, red: f64, green: f64, blue: f64) {
	pixel.red = clamp_to_quantum(QUANTUM_RANGE as f64 * red);
	pixel.green = clamp_to_quantum(QUANTUM_RANGE as f64 * green);
	pixel.blue = clamp_to_quantum(QUANTUM_RANGE as f64 * blue);
}

fn transform_pixel(pixel: &mut Pixel, tables: &TransformTables, post: PostStage) {
	let sum = tables.x[pixel.red as usize]
		+ tables.y[pixel.green as usize]
		+ tables.z[pixel.blue as usize]
		+ tables.offset;

	let (red, green, blue) = match post {
		PostStage::None => (sum.x, sum.y, sum.z),
		PostStage::PhotoYcc => (ycc::remap(sum.x), ycc::remap(sum.y), ycc::remap(sum.z)),
	};

	pixel.red = scale_map_to_quantum(red);
	pixel.green = scale_map_to_quantum(green);
	pixel.blue = scale_map_to_quantum(blue);
}

/// Runs tabulated channel mixing over the surface. Indexed surfaces remix
/// their colormap and resync; direct surfaces take a monitored row pass.
fn apply_tables(surface: &mut PixelSurface, tables: &TransformTables, post: PostStage, monitor: Option<&ProgressFn>) -> Result<Status, SurfaceError> {
	match surface.class() {
		StorageClass::Indexed => {
			rows::apply_colormap(surface, |pixel| transform_pixel(pixel, tables, post));
			surface.sync_from_colormap()?;
			Ok(Status::Complete)
		},
		StorageClass::Direct => Ok(rows::apply(surface, monitor, |pixel, _| {
			transform_pixel(pixel, tables, post)
		})),
	}
}

/// Converts an sRGB surface in place into `colorspace`.
///
/// The surface tag moves to `colorspace` only when the pass runs to
/// completion; a cancelled pass leaves partially converted pixels behind
/// under the old tag.
pub fn to_alternate(surface: &mut PixelSurface, colorspace: Colorspace, monitor: Option<&ProgressFn>) -> Result<Status, TransformError> {
	debug!("transforming {}x{} surface from sRGB to {:?}", surface.width(), surface.height(), colorspace);

	let status = match colorspace {
		Colorspace::Cmy => {
			promote(surface)?;
			rows::apply(surface, monitor, |pixel, _| {
				pixel.red = QUANTUM_RANGE - pixel.red;
				pixel.green = QUANTUM_RANGE - pixel.green;
				pixel.blue = QUANTUM_RANGE - pixel.blue;
			})
		},
		Colorspace::Cmyk => {
			promote(surface)?;
			rows::apply(surface, monitor, |pixel, index| {
				let (c, m, y, k) = cmyk::rgb_to_cmyk(pixel.red, pixel.green, pixel.blue);
				pixel.red = c;
				pixel.green = m;
				pixel.blue = y;
				*index = k;
			})
		},
		Colorspace::Hsb => {
			promote(surface)?;
			rows::apply(surface, monitor, |pixel, _| {
				let (h, s, b) = hue::rgb_to_hsb(pixel.red, pixel.green, pixel.blue);
				store_unit(pixel, h, s, b);
			})
		},
		Colorspace::Hsl => {
			promote(surface)?;
			rows::apply(surface, monitor, |pixel, _| {
				let (h, s, l) = hue::rgb_to_hsl(pixel.red, pixel.green, pixel.blue);
				store_unit(pixel, h, s, l);
			})
		},
		Colorspace::Hwb => {
			promote(surface)?;
			rows::apply(surface, monitor, |pixel, _| {
				let (h, w, b) = hue::rgb_to_hwb(pixel.red, pixel.green, pixel.blue);
				store_unit(pixel, h, w, b);
			})
		},
		Colorspace::Lab => {
			promote(surface)?;
			rows::apply(surface, monitor, |pixel, _| {
				let (x, y, z) = lab::rgb_to_xyz(pixel.red, pixel.green, pixel.blue);
				let (l, a, b) = lab::xyz_to_lab(x, y, z);
				store_unit(pixel, l, a, b);
			})
		},
		Colorspace::Log => {
			let map = log::encode_map(&LogParams::from_properties(surface))?;
			promote(surface)?;
			rows::apply(surface, monitor, |pixel, _| {
				pixel.red = map[pixel.red as usize];
				pixel.green = map[pixel.green as usize];
				pixel.blue = map[pixel.blue as usize];
			})
		},
		_ => {
			let tables = TransformTables::forward(colorspace)?;
			apply_tables(surface, &tables, PostStage::None, monitor)?
		},
	};

	if !status.is_cancelled() {
		surface.set_colorspace(colorspace);
	}

	Ok(status)
}

/// Converts a surface in place from its tagged colorspace back to sRGB.
///
/// Luma-only surfaces already hold replicated gray levels, so they pass
/// through the identity tables. The tag moves to sRGB only on completion.
pub fn to_srgb(surface: &mut PixelSurface, monitor: Option<&ProgressFn>) -> Result<Status, TransformError> {
	let source = surface.colorspace();
	debug!("transforming {}x{} surface from {:?} to sRGB", surface.width(), surface.height(), source);

	let status = match source {
		Colorspace::Cmy => {
			promote(surface)?;
			rows::apply(surface, monitor, |pixel, _| {
				pixel.red = QUANTUM_RANGE - pixel.red;
				pixel.green = QUANTUM_RANGE - pixel.green;
				pixel.blue = QUANTUM_RANGE - pixel.blue;
			})
		},
		Colorspace::Cmyk => {
			promote(surface)?;
			rows::apply(surface, monitor, |pixel, index| {
				let (r, g, b) = cmyk::cmyk_to_rgb(pixel.red, pixel.green, pixel.blue, *index);
				pixel.red = r;
				pixel.green = g;
				pixel.blue = b;
			})
		},
		Colorspace::Hsb => {
			promote(surface)?;
			rows::apply(surface, monitor, |pixel, _| {
				let (r, g, b) = hue::hsb_to_rgb(QUANTUM_SCALE * pixel.red as f64, QUANTUM_SCALE * pixel.green as f64, QUANTUM_SCALE * pixel.blue as f64);
				pixel.red = r;
				pixel.green = g;
				pixel.blue = b;
			})
		},
		Colorspace::Hsl => {
			promote(surface)?;
			rows::apply(surface, monitor, |pixel, _| {
				let (r, g, b) = hue::hsl_to_rgb(QUANTUM_SCALE * pixel.red as f64, QUANTUM_SCALE * pixel.green as f64, QUANTUM_SCALE * pixel.blue as f64);
				pixel.red = r;
				pixel.green = g;
				pixel.blue = b;
			})
		},
		Colorspace::Hwb => {
			promote(surface)?;
			rows::apply(surface, monitor, |pixel, _| {
				let (r, g, b) = hue::hwb_to_rgb(QUANTUM_SCALE * pixel.red as f64, QUANTUM_SCALE * pixel.green as f64, QUANTUM_SCALE * pixel.blue as f64);
				pixel.red = r;
				pixel.green = g;
				pixel.blue = b;
			})
		},
		Colorspace::Lab => {
			promote(surface)?;
			rows::apply(surface, monitor, |pixel, _| {
				let (x, y, z) = lab::lab_to_xyz(QUANTUM_SCALE * pixel.red as f64, QUANTUM_SCALE * pixel.green as f64, QUANTUM_SCALE * pixel.blue as f64);
				let (r, g, b) = lab::xyz_to_rgb(x, y, z);
				pixel.red = r;
				pixel.green = g;
				pixel.blue = b;
			})
		},
		Colorspace::Log => {
			let map = log::decode_map(&LogParams::from_properties(surface))?;
			promote(surface)?;
			rows::apply(surface, monitor, |pixel, _| {
				pixel.red = map[pixel.red as usize];
				pixel.green = map[pixel.green as usize];
				pixel.blue = map[pixel.blue as usize];
			})
		},
		_ => {
			let tables = TransformTables::inverse(source)?;
			let post = if source == Colorspace::Ycc {
				PostStage::PhotoYcc
			} else {
				PostStage::None
			};
			apply_tables(surface, &tables, post, monitor)?
		},
	};

	if !status.is_cancelled() {
		surface.set_colorspace(Colorspace::SRGB);
	}

	Ok(status)
}

/// Converts a surface between any two supported colorspaces, transiting
/// through sRGB when neither endpoint already is sRGB.
///
/// A cancelled transit leaves the surface tagged with the last colorspace
/// it fully reached.
pub fn transform_colorspace(surface: &mut PixelSurface, colorspace: Colorspace, monitor: Option<&ProgressFn>) -> Result<Status, TransformError> {
	if surface.colorspace() == colorspace {
		return Ok(Status::Complete);
	}

	if colorspace == Colorspace::SRGB {
		return to_srgb(surface, monitor);
	}

	if surface.colorspace() != Colorspace::SRGB {
		let status = to_srgb(surface, monitor)?;
		if status.is_cancelled() {
			return Ok(status);
		}
	}

	to_alternate(surface, colorspace, monitor)
}
