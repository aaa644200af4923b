use ttk_core::quantum::{
	clamp_to_quantum,
	Quantum,
	QUANTUM_RANGE,
	QUANTUM_SCALE
};

/// Splits sRGB into CMYK with undercolor removal: K takes the common
/// ink share, the remaining channels are rescaled by what is left.
pub fn rgb_to_cmyk(red: Quantum, green: Quantum, blue: Quantum) -> (Quantum, Quantum, Quantum, Quantum) {
	let cyan = 1.0 - QUANTUM_SCALE * red as f64;
	let magenta = 1.0 - QUANTUM_SCALE * green as f64;
	let yellow = 1.0 - QUANTUM_SCALE * blue as f64;
	let black = cyan.min(magenta).min(yellow);

	if black >= 1.0 {
		return (0, 0, 0, QUANTUM_RANGE);
	}

	let scale = 1.0 - black;
	(
		clamp_to_quantum(QUANTUM_RANGE as f64 * (cyan - black) / scale),
		clamp_to_quantum(QUANTUM_RANGE as f64 * (magenta - black) / scale),
		clamp_to_quantum(QUANTUM_RANGE as f64 * (yellow - black) / scale),
		clamp_to_quantum(QUANTUM_RANGE as f64 * black),
	)
}

pub fn cmyk_to_rgb(cyan: Quantum, magenta: Quantum, yellow: Quantum, black: Quantum) -> (Quantum, Quantum, Quantum) {
	let k = black as f64;
	let unmix = |channel: Quantum| {
		clamp_to_quantum(
			QUANTUM_RANGE as f64 - (QUANTUM_SCALE * channel as f64 * (QUANTUM_RANGE as f64 - k) + k),
		)
	};

	(unmix(cyan), unmix(magenta), unmix(yellow))
}
