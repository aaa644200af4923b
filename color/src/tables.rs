use std::collections::TryReserveError;

use ultraviolet::Vec3;

use ttk_core::colorspace::Colorspace;
use ttk_core::quantum::MAP_MAX;

/// Per-channel contribution tables for an affine colorspace transform.
/// Entry `x[r]` holds the contribution of red input level `r` to all three
/// output components; an output vector is `x[r] + y[g] + z[b] + offset`.
pub struct TransformTables {
	pub x: Vec<Vec3>,
	pub y: Vec<Vec3>,
	pub z: Vec<Vec3>,
	pub offset: Vec3,
}

/// Per-component stage applied after the table sum on the way back to sRGB.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PostStage {
	None,
	PhotoYcc,
}

impl TransformTables {
	fn build<F>(offset: Vec3, fill: F) -> Result<TransformTables, TryReserveError>
	where
		F: Fn(f32) -> (Vec3, Vec3, Vec3),
	{
		let mut x = Vec::new();
		let mut y = Vec::new();
		let mut z = Vec::new();
		x.try_reserve_exact(MAP_MAX + 1)?;
		y.try_reserve_exact(MAP_MAX + 1)?;
		z.try_reserve_exact(MAP_MAX + 1)?;

		for i in 0..=MAP_MAX {
			let (entry_x, entry_y, entry_z) = fill(i as f32);
			x.push(entry_x);
			y.push(entry_y);
			z.push(entry_z);
		}

		Ok(TransformTables { x: x, y: y, z: z, offset: offset })
	}

	/// Tables taking sRGB into `colorspace`. Signed chroma axes carry a
	/// half-range offset so they fit an unsigned channel.
	pub fn forward(colorspace: Colorspace) -> Result<TransformTables, TryReserveError> {
		let max = MAP_MAX as f32;
		let chroma = Vec3::new(0.0, 0.5 * (max + 1.0), 0.5 * (max + 1.0));

		match colorspace {
			Colorspace::Gray | Colorspace::Rec601Luma => Self::build(Vec3::zero(), |i| {
				(
					Vec3::broadcast(0.29900 * i),
					Vec3::broadcast(0.58700 * i),
					Vec3::broadcast(0.11400 * i),
				)
			}),
			Colorspace::Rec709Luma => Self::build(Vec3::zero(), |i| {
				(
					Vec3::broadcast(0.21260 * i),
					Vec3::broadcast(0.71520 * i),
					Vec3::broadcast(0.07220 * i),
				)
			}),
			Colorspace::Ohta => Self::build(chroma, |i| {
				(
					Vec3::new(0.33333 * i, 0.50000 * i, -0.25000 * i),
					Vec3::new(0.33334 * i, 0.00000 * i, 0.50000 * i),
					Vec3::new(0.33333 * i, -0.50000 * i, -0.25000 * i),
				)
			}),
			// Gamma removal, with the usual linear segment near black.
			Colorspace::Rgb => Self::build(Vec3::zero(), |i| {
				let mut v = i / max;
				if v <= 0.0404482362771082 {
					v /= 12.92;
				} else {
					v = ((v + 0.055) / 1.055).powf(2.4);
				}
				(
					Vec3::new(max * v, 0.0, 0.0),
					Vec3::new(0.0, max * v, 0.0),
					Vec3::new(0.0, 0.0, max * v),
				)
			}),
			Colorspace::Xyz => Self::build(Vec3::zero(), |i| {
				(
					Vec3::new(0.4124564 * i, 0.2126729 * i, 0.0193339 * i),
					Vec3::new(0.3575761 * i, 0.7151522 * i, 0.1191920 * i),
					Vec3::new(0.1804375 * i, 0.0721750 * i, 0.9503041 * i),
				)
			}),
			// ITU-R BT.601.
			Colorspace::YCbCr | Colorspace::Rec601YCbCr => Self::build(chroma, |i| {
				(
					Vec3::new(0.299000 * i, -0.168730 * i, 0.500000 * i),
					Vec3::new(0.587000 * i, -0.331264 * i, -0.418688 * i),
					Vec3::new(0.114000 * i, 0.500000 * i, -0.081312 * i),
				)
			}),
			// ITU-R BT.709.
			Colorspace::Rec709YCbCr => Self::build(chroma, |i| {
				(
					Vec3::new(0.212600 * i, -0.114572 * i, 0.500000 * i),
					Vec3::new(0.715200 * i, -0.385428 * i, -0.454153 * i),
					Vec3::new(0.072200 * i, 0.500000 * i, -0.045847 * i),
				)
			}),
			// Kodak PhotoYCC: scaled by 1.3584, C1 zero at 156, C2 at 137,
			// with a linear toe below 1.8% of full scale.
			Colorspace::Ycc => Self::build(Vec3::new(0.0, 156.0, 137.0), |i| {
				if i > 0.018 * max {
					let t = 1.099 * i - 0.099;
					(
						Vec3::new(
							0.2201118963486454 * t,
							-0.1348122097479598 * t,
							0.3848476530332144 * t,
						),
						Vec3::new(
							0.4321260306242638 * t,
							-0.2646647729834528 * t,
							-0.3222618720834477 * t,
						),
						Vec3::new(
							0.08392226148409894 * t,
							0.3994769827314126 * t,
							-0.06258578094976668 * t,
						),
					)
				} else {
					(
						Vec3::new(
							0.003962014134275617 * i,
							-0.002426619775463276 * i,
							0.006927257754597858 * i,
						),
						Vec3::new(
							0.007778268551236748 * i,
							-0.004763965913702149 * i,
							-0.005800713697502058 * i,
						),
						Vec3::new(
							0.001510600706713781 * i,
							0.007190585689165425 * i,
							-0.0011265440570958 * i,
						),
					)
				}
			}),
			Colorspace::Yiq => Self::build(chroma, |i| {
				(
					Vec3::new(0.29900 * i, 0.59600 * i, 0.21100 * i),
					Vec3::new(0.58700 * i, -0.27400 * i, -0.52300 * i),
					Vec3::new(0.11400 * i, -0.32200 * i, 0.31200 * i),
				)
			}),
			Colorspace::YPbPr => Self::build(chroma, |i| {
				(
					Vec3::new(0.299000 * i, -0.168736 * i, 0.500000 * i),
					Vec3::new(0.587000 * i, -0.331264 * i, -0.418688 * i),
					Vec3::new(0.114000 * i, 0.500000 * i, -0.081312 * i),
				)
			}),
			Colorspace::Yuv => Self::build(chroma, |i| {
				(
					Vec3::new(0.29900 * i, -0.14740 * i, 0.61500 * i),
					Vec3::new(0.58700 * i, -0.28950 * i, -0.51500 * i),
					Vec3::new(0.11400 * i, 0.43690 * i, -0.10000 * i),
				)
			}),
			_ => Self::build(Vec3::zero(), |i| {
				(
					Vec3::new(i, 0.0, 0.0),
					Vec3::new(0.0, i, 0.0),
					Vec3::new(0.0, 0.0, i),
				)
			}),
		}
	}

	/// Tables taking `colorspace` back into sRGB. Chroma recentering folds
	/// into the entries here, so the offset is always zero.
	pub fn inverse(colorspace: Colorspace) -> Result<TransformTables, TryReserveError> {
		let max = MAP_MAX as f32;

		match colorspace {
			Colorspace::Ohta => Self::build(Vec3::zero(), |i| {
				let d = 2.000000 * i - max;
				(
					Vec3::new(i, i, i),
					Vec3::new(0.500000 * d, 0.000000, -0.500000 * d),
					Vec3::new(-0.333340 * d, 0.666665 * d, -0.333340 * d),
				)
			}),
			Colorspace::YCbCr | Colorspace::Rec601YCbCr => Self::build(Vec3::zero(), |i| {
				let d = 2.000000 * i - max;
				(
					Vec3::new(i, i, i),
					Vec3::new(0.000000, -0.344136 * 0.500000 * d, 1.772000 * 0.500000 * d),
					Vec3::new(1.402000 * 0.500000 * d, -0.714136 * 0.500000 * d, 0.000000),
				)
			}),
			Colorspace::Rec709YCbCr => Self::build(Vec3::zero(), |i| {
				let d = 2.00000 * i - max;
				(
					Vec3::new(i, i, i),
					Vec3::new(0.00000, -0.187324 * 0.50000 * d, 1.855600 * 0.50000 * d),
					Vec3::new(1.574800 * 0.50000 * d, -0.468124 * 0.50000 * d, 0.00000),
				)
			}),
			// Gamma reapplication.
			Colorspace::Rgb => Self::build(Vec3::zero(), |i| {
				let mut v = i / max;
				if v <= 0.00313066844250063 {
					v *= 12.92;
				} else {
					v = 1.055 * (i / max).powf(1.0 / 2.4) - 0.055;
				}
				(
					Vec3::new(max * v, 0.0, 0.0),
					Vec3::new(0.0, max * v, 0.0),
					Vec3::new(0.0, 0.0, max * v),
				)
			}),
			Colorspace::Xyz => Self::build(Vec3::zero(), |i| {
				(
					Vec3::new(3.2404542 * i, -0.9692660 * i, 0.0556434 * i),
					Vec3::new(-1.5371385 * i, 1.8760108 * i, -0.2040259 * i),
					Vec3::new(-0.4985314 * i, 0.0415560 * i, 1.0572252 * i),
				)
			}),
			Colorspace::Ycc => Self::build(Vec3::zero(), |i| {
				(
					Vec3::broadcast(1.3584000 * i),
					Vec3::new(0.0000000, -0.4302726 * (i - 156.0), 2.2179000 * (i - 156.0)),
					Vec3::new(1.8215000 * (i - 137.0), -0.9271435 * (i - 137.0), 0.0000000),
				)
			}),
			Colorspace::Yiq => Self::build(Vec3::zero(), |i| {
				let d = 2.00000 * i - max;
				(
					Vec3::new(i, i, i),
					Vec3::new(0.47810 * d, -0.13635 * d, -0.55185 * d),
					Vec3::new(0.31070 * d, -0.32340 * d, 0.85030 * d),
				)
			}),
			// R = Y+1.402000*Pr, G = Y-0.344136*Pb-0.714136*Pr,
			// B = Y+1.772000*Pb, at half scale against recentered chroma.
			Colorspace::YPbPr => Self::build(Vec3::zero(), |i| {
				let d = 2.00000 * i - max;
				(
					Vec3::new(i, i, i),
					Vec3::new(0.000000, -0.172068 * d, 0.88600 * d),
					Vec3::new(0.701000 * d, -0.357068 * d, 0.000000),
				)
			}),
			Colorspace::Yuv => Self::build(Vec3::zero(), |i| {
				let d = 2.00000 * i - max;
				(
					Vec3::new(i, i, i),
					Vec3::new(0.00000, -0.19690 * d, 1.01395 * d),
					Vec3::new(0.56990 * d, -0.29025 * d, 0.00000),
				)
			}),
			_ => Self::build(Vec3::zero(), |i| {
				(
					Vec3::new(i, 0.0, 0.0),
					Vec3::new(0.0, i, 0.0),
					Vec3::new(0.0, 0.0, i),
				)
			}),
		}
	}
}
