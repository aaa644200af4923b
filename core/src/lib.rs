pub mod colorspace;
pub mod progress;
pub mod quantum;
pub mod surface;

/// Converts a 4-byte string into a 32-bit big endian integer.
/// Byte strings longer than 4 bytes are truncated.
#[macro_export]
macro_rules! tag4 {
	($b4: literal) => {
		u32::from_be_bytes([$b4[0], $b4[1], $b4[2], $b4[3]])
	}
}

/// Scales a 5 bit value to 8 bits
pub const fn scale5to8(b: u8) -> u8 {
	b << 3 | b >> 2
}

/// Scales a 6 bit value to 8 bits
pub const fn scale6to8(b: u8) -> u8 {
	b << 2 | b >> 4
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tag4() {
		assert_eq!(tag4!(b"TIM2"), 0x54494D32);
	}

	#[test]
	fn test_scale5to8() {
		assert_eq!(scale5to8(0), 0);
		assert_eq!(scale5to8(16), 132);
		assert_eq!(scale5to8(31), 255);
	}

	#[test]
	fn test_scale6to8() {
		assert_eq!(scale6to8(0), 0);
		assert_eq!(scale6to8(32), 130);
		assert_eq!(scale6to8(63), 255);
	}
}
