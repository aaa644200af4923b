use ttk_core::quantum::{
	QUANTUM_RANGE,
	QUANTUM_SCALE
};

/// Photo CD luma curve: 1389 evenly spaced steps up to 1.0. The inverse
/// YCC tables produce overrange sums (scaled by 1.3584); indexing this
/// curve through [`round_to_ycc`] folds them back into quantum range.
pub static YCC_MAP: [f32; 1389] = build_ycc_map();

const fn build_ycc_map() -> [f32; 1389] {
	let mut map = [0.0f32; 1389];
	let mut i = 0;
	while i < 1389 {
		map[i] = i as f32 / 1388.0;
		i += 1;
	}
	map
}

pub fn round_to_ycc(value: f64) -> usize {
	if value <= 0.0 {
		return 0;
	}
	if value >= 1388.0 {
		return 1388;
	}
	(value + 0.5) as usize
}

/// Applies the curve to one channel value in map units.
pub fn remap(value: f32) -> f32 {
	QUANTUM_RANGE as f32 * YCC_MAP[round_to_ycc(1024.0 * QUANTUM_SCALE * value as f64)]
}
