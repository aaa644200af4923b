use ttk_core::quantum::{
	clamp_to_quantum,
	Quantum,
	QUANTUM_RANGE,
	QUANTUM_SCALE
};

const D50_X: f64 = 0.9642;
const D50_Y: f64 = 1.0;
const D50_Z: f64 = 0.8249;

const EPSILON: f64 = 1.0e-16;

fn decompand(value: f64) -> f64 {
	if value <= 0.0404482362771082 {
		value / 12.92
	} else {
		((value + 0.055) / 1.055).powf(2.4)
	}
}

fn compand(value: f64) -> f64 {
	if value <= 0.00313066844250063 {
		value * 12.92
	} else {
		1.055 * value.powf(1.0 / 2.4) - 0.055
	}
}

fn lab_f1(alpha: f64) -> f64 {
	if alpha <= (24.0 / 116.0) * (24.0 / 116.0) * (24.0 / 116.0) {
		(841.0 / 108.0) * alpha + 16.0 / 116.0
	} else {
		alpha.powf(1.0 / 3.0)
	}
}

fn lab_f2(alpha: f64) -> f64 {
	if alpha > 24.0 / 116.0 {
		alpha * alpha * alpha
	} else {
		let beta = (108.0 / 841.0) * (alpha - 16.0 / 116.0);
		if beta > 0.0 {
			beta
		} else {
			0.0
		}
	}
}

/// Gamma-expanded sRGB quanta to CIE XYZ under the sRGB primaries.
pub fn rgb_to_xyz(red: Quantum, green: Quantum, blue: Quantum) -> (f64, f64, f64) {
	let r = decompand(QUANTUM_SCALE * red as f64);
	let g = decompand(QUANTUM_SCALE * green as f64);
	let b = decompand(QUANTUM_SCALE * blue as f64);

	let x = 0.4124240 * r + 0.3575790 * g + 0.1804640 * b;
	let y = 0.2126560 * r + 0.7151580 * g + 0.0721856 * b;
	let z = 0.0193324 * r + 0.1191930 * g + 0.9504440 * b;

	(x, y, z)
}

pub fn xyz_to_rgb(x: f64, y: f64, z: f64) -> (Quantum, Quantum, Quantum) {
	let r = 3.2404542 * x - 1.5371385 * y - 0.4985314 * z;
	let g = -0.9692660 * x + 1.8760108 * y + 0.0415560 * z;
	let b = 0.0556434 * x - 0.2040259 * y + 1.0572252 * z;

	(
		clamp_to_quantum(QUANTUM_RANGE as f64 * compand(r)),
		clamp_to_quantum(QUANTUM_RANGE as f64 * compand(g)),
		clamp_to_quantum(QUANTUM_RANGE as f64 * compand(b)),
	)
}

/// CIE XYZ to L*a*b* with a D50 white point. L is scaled to [0, 1] and the
/// signed a/b axes are wrapped into [0, 1] so they survive a quantum channel.
pub fn xyz_to_lab(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
	if x.abs() < EPSILON && y.abs() < EPSILON && z.abs() < EPSILON {
		return (0.0, 0.5, 0.5);
	}

	let fx = lab_f1(x / D50_X);
	let fy = lab_f1(y / D50_Y);
	let fz = lab_f1(z / D50_Z);

	let l = (116.0 * fy - 16.0) / 100.0;
	let mut a = 500.0 * (fx - fy) / 255.0;
	if a < 0.0 {
		a += 1.0;
	}
	let mut b = 200.0 * (fy - fz) / 255.0;
	if b < 0.0 {
		b += 1.0;
	}

	(l, a, b)
}

pub fn lab_to_xyz(l: f64, a: f64, b: f64) -> (f64, f64, f64) {
	if l <= 0.0 {
		return (0.0, 0.0, 0.0);
	}

	let y = (100.0 * l + 16.0) / 116.0;
	let x = y + 255.0 * 0.002 * if a > 0.5 { a - 1.0 } else { a };
	let z = y - 255.0 * 0.005 * if b > 0.5 { b - 1.0 } else { b };

	(D50_X * lab_f2(x), D50_Y * lab_f2(y), D50_Z * lab_f2(z))
}
