/// Native per-channel resolution of a pixel.
pub type Quantum = u8;

/// Largest representable channel value.
pub const QUANTUM_RANGE: Quantum = Quantum::MAX;

/// Index of the last entry in a per-channel transform table.
pub const MAP_MAX: usize = QUANTUM_RANGE as usize;

/// Normalizes a quantum into the 0.0..=1.0 range when multiplied.
pub const QUANTUM_SCALE: f64 = 1.0 / QUANTUM_RANGE as f64;

/// Rounds a real channel value to the nearest quantum, clamping overflow.
pub fn clamp_to_quantum(value: f64) -> Quantum {
	if value <= 0.0 {
		return 0;
	}

	if value >= QUANTUM_RANGE as f64 {
		return QUANTUM_RANGE;
	}

	(value + 0.5) as Quantum
}

/// Rounds a transform-table sum back to a quantum, clamping to the map range.
pub fn scale_map_to_quantum(value: f32) -> Quantum {
	if value <= 0.0 {
		return 0;
	}

	if value >= MAP_MAX as f32 {
		return QUANTUM_RANGE;
	}

	(value + 0.5) as Quantum
}
