use ttk_core::quantum::{
	clamp_to_quantum,
	Quantum,
	QUANTUM_RANGE,
	QUANTUM_SCALE
};

fn quantum(value: f64) -> Quantum {
	clamp_to_quantum(QUANTUM_RANGE as f64 * value)
}

/// sRGB to hue/saturation/brightness, all in [0, 1].
pub fn rgb_to_hsb(red: Quantum, green: Quantum, blue: Quantum) -> (f64, f64, f64) {
	let r = red as f64;
	let g = green as f64;
	let b = blue as f64;
	let max = r.max(g).max(b);
	let min = r.min(g).min(b);

	let brightness = QUANTUM_SCALE * max;
	if max == 0.0 {
		return (0.0, 0.0, 0.0);
	}

	let saturation = 1.0 - min / max;
	let delta = max - min;
	if delta == 0.0 {
		return (0.0, saturation, brightness);
	}

	let mut hue = if r == max {
		(g - b) / delta
	} else if g == max {
		2.0 + (b - r) / delta
	} else {
		4.0 + (r - g) / delta
	};
	hue /= 6.0;
	if hue < 0.0 {
		hue += 1.0;
	}

	(hue, saturation, brightness)
}

pub fn hsb_to_rgb(hue: f64, saturation: f64, brightness: f64) -> (Quantum, Quantum, Quantum) {
	if saturation == 0.0 {
		let v = quantum(brightness);
		return (v, v, v);
	}

	let h = 6.0 * (hue - hue.floor());
	let f = h - h.floor();
	let p = brightness * (1.0 - saturation);
	let q = brightness * (1.0 - saturation * f);
	let t = brightness * (1.0 - saturation * (1.0 - f));

	let (r, g, b) = match h as i64 {
		1 => (q, brightness, p),
		2 => (p, brightness, t),
		3 => (p, q, brightness),
		4 => (t, p, brightness),
		5 => (brightness, p, q),
		_ => (brightness, t, p),
	};

	(quantum(r), quantum(g), quantum(b))
}

/// sRGB to hue/saturation/lightness, all in [0, 1].
pub fn rgb_to_hsl(red: Quantum, green: Quantum, blue: Quantum) -> (f64, f64, f64) {
	let r = QUANTUM_SCALE * red as f64;
	let g = QUANTUM_SCALE * green as f64;
	let b = QUANTUM_SCALE * blue as f64;
	let max = r.max(g).max(b);
	let min = r.min(g).min(b);
	let c = max - min;

	let lightness = (max + min) / 2.0;
	if c == 0.0 {
		return (0.0, 0.0, lightness);
	}

	let mut hue = if max == r {
		let h = (g - b) / c;
		if h < 0.0 {
			h + 6.0
		} else {
			h
		}
	} else if max == g {
		2.0 + (b - r) / c
	} else {
		4.0 + (r - g) / c
	};
	hue /= 6.0;

	let saturation = if lightness <= 0.5 {
		c / (2.0 * lightness)
	} else {
		c / (2.0 - 2.0 * lightness)
	};

	(hue, saturation, lightness)
}

pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (Quantum, Quantum, Quantum) {
	if saturation == 0.0 {
		let v = quantum(lightness);
		return (v, v, v);
	}

	let c = if lightness <= 0.5 {
		2.0 * lightness * saturation
	} else {
		(2.0 - 2.0 * lightness) * saturation
	};

	let h = 6.0 * (hue - hue.floor());
	let x = c * (1.0 - (h - 2.0 * (h / 2.0).floor() - 1.0).abs());
	let min = lightness - 0.5 * c;

	let (r, g, b) = match h as i64 {
		1 => (x, c, 0.0),
		2 => (0.0, c, x),
		3 => (0.0, x, c),
		4 => (x, 0.0, c),
		5 => (c, 0.0, x),
		_ => (c, x, 0.0),
	};

	(quantum(r + min), quantum(g + min), quantum(b + min))
}

/// sRGB to hue/whiteness/blackness, all in [0, 1].
pub fn rgb_to_hwb(red: Quantum, green: Quantum, blue: Quantum) -> (f64, f64, f64) {
	let r = red as f64;
	let g = green as f64;
	let b = blue as f64;
	let w = r.min(g).min(b);
	let v = r.max(g).max(b);

	let whiteness = QUANTUM_SCALE * w;
	let blackness = 1.0 - QUANTUM_SCALE * v;
	if v == w {
		return (0.0, whiteness, blackness);
	}

	let (f, p) = if r == w {
		(g - b, 3.0)
	} else if g == w {
		(b - r, 5.0)
	} else {
		(r - g, 1.0)
	};

	((p - f / (v - w)) / 6.0, whiteness, blackness)
}

pub fn hwb_to_rgb(hue: f64, whiteness: f64, blackness: f64) -> (Quantum, Quantum, Quantum) {
	let v = 1.0 - blackness;
	let h = 6.0 * hue;
	let i = h.floor();
	let mut f = h - i;
	if (i as i64) & 0x01 != 0 {
		f = 1.0 - f;
	}
	let n = whiteness + f * (v - whiteness);

	let (r, g, b) = match i as i64 {
		1 => (n, v, whiteness),
		2 => (whiteness, v, n),
		3 => (whiteness, n, v),
		4 => (n, whiteness, v),
		5 => (v, whiteness, n),
		_ => (v, n, whiteness),
	};

	(quantum(r), quantum(g), quantum(b))
}
