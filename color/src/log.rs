use std::collections::TryReserveError;

use ttk_core::quantum::{
	clamp_to_quantum,
	scale_map_to_quantum,
	Quantum,
	MAP_MAX,
	QUANTUM_RANGE
};
use ttk_core::surface::PixelSurface;

const DISPLAY_GAMMA: f64 = 1.0 / 1.7;
const FILM_GAMMA: f64 = 0.6;
const REFERENCE_BLACK: f64 = 95.0;
const REFERENCE_WHITE: f64 = 685.0;

/// Cineon-style log encoding parameters, overridable through surface
/// properties of the same names.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogParams {
	pub gamma: f64,
	pub film_gamma: f64,
	pub reference_black: f64,
	pub reference_white: f64,
}

impl Default for LogParams {
	fn default() -> Self {
		LogParams {
			gamma: DISPLAY_GAMMA,
			film_gamma: FILM_GAMMA,
			reference_black: REFERENCE_BLACK,
			reference_white: REFERENCE_WHITE,
		}
	}
}

impl LogParams {
	pub fn from_properties(surface: &PixelSurface) -> Self {
		LogParams {
			gamma: property_or(surface, "gamma", DISPLAY_GAMMA),
			film_gamma: property_or(surface, "film-gamma", FILM_GAMMA),
			reference_black: property_or(surface, "reference-black", REFERENCE_BLACK),
			reference_white: property_or(surface, "reference-white", REFERENCE_WHITE),
		}
	}

	/// Density slope per code value; the display density is fixed.
	fn slope(&self) -> f64 {
		(self.gamma / DISPLAY_GAMMA) * 0.002 / self.film_gamma
	}

	fn black(&self) -> f64 {
		10.0f64.powf((self.reference_black - self.reference_white) * self.slope())
	}
}

fn property_or(surface: &PixelSurface, key: &str, default: f64) -> f64 {
	surface
		.property(key)
		.and_then(|value| value.parse::<f64>().ok())
		.filter(|value| value.is_normal())
		.unwrap_or(default)
}

/// Linear-to-log lookup table, one entry per map level.
pub fn encode_map(params: &LogParams) -> Result<Vec<Quantum>, TryReserveError> {
	let slope = params.slope();
	let black = params.black();

	let mut map = Vec::new();
	map.try_reserve_exact(MAP_MAX + 1)?;
	for i in 0..=MAP_MAX {
		let linear = i as f64 / MAP_MAX as f64;
		let density = params.reference_white + (black + linear * (1.0 - black)).log10() / slope;
		map.push(scale_map_to_quantum((MAP_MAX as f64 * density / 1024.0) as f32));
	}

	Ok(map)
}

/// Log-to-linear lookup table. Code values at or below the reference black
/// floor clamp to zero and values past reference white saturate.
pub fn decode_map(params: &LogParams) -> Result<Vec<Quantum>, TryReserveError> {
	let slope = params.slope();
	let black = params.black();
	let floor = (params.reference_black * MAP_MAX as f64 / 1024.0) as usize;
	let ceiling = (params.reference_white * MAP_MAX as f64 / 1024.0) as usize;

	let mut map = Vec::new();
	map.try_reserve_exact(MAP_MAX + 1)?;
	for i in 0..=MAP_MAX {
		map.push(if i <= floor {
			0
		} else if i < ceiling {
			let density = 1024.0 * i as f64 / MAP_MAX as f64 - params.reference_white;
			clamp_to_quantum(
				QUANTUM_RANGE as f64 / (1.0 - black) * (10.0f64.powf(density * slope) - black),
			)
		} else {
			QUANTUM_RANGE
		});
	}

	Ok(map)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_encode_endpoints() {
		let map = encode_map(&LogParams::default()).unwrap();
		assert_eq!(map.len(), MAP_MAX + 1);
		assert_eq!(map[0], 24);
		assert_eq!(map[255], 171);
	}

	#[test]
	fn test_decode_endpoints() {
		let map = decode_map(&LogParams::default()).unwrap();
		assert_eq!(map[0], 0);
		assert_eq!(map[23], 0);
		assert_eq!(map[170], 255);
		assert_eq!(map[255], 255);
	}

	#[test]
	fn test_round_trip_midtones() {
		let params = LogParams::default();
		let encode = encode_map(&params).unwrap();
		let decode = decode_map(&params).unwrap();
		for value in [64usize, 100, 128, 200] {
			let back = decode[encode[value] as usize] as i32;
			assert!(
				(back - value as i32).abs() <= 3,
				"{} -> {} -> {}",
				value,
				encode[value],
				back
			);
		}
	}

	#[test]
	fn test_properties_override_defaults() {
		let mut surface = PixelSurface::direct(1, 1, 8).unwrap();
		surface.set_property("reference-white", "1000");
		surface.set_property("film-gamma", "not-a-number");
		surface.set_property("gamma", "0");

		let params = LogParams::from_properties(&surface);
		assert_eq!(params.reference_white, 1000.0);
		assert_eq!(params.film_gamma, FILM_GAMMA);
		assert_eq!(params.gamma, DISPLAY_GAMMA);
		assert_eq!(params.reference_black, REFERENCE_BLACK);
	}
}
