//! Utilities for working with bit-padded ("synchsafe") integers
//!
//! A synchsafe integer only uses the low 7 bits of each byte, so that it can never contain
//! the `0xFF 0xE0` pattern used by MPEG frame syncs. The same machinery is used with 8 bits
//! per byte for plain big endian integers.

use crate::error::Result;
use crate::macros::id3v2_err;

/// The number of bytes an encoded integer occupies
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Width {
	/// Exactly this many bytes
	///
	/// Values that don't fit are an error, they are never truncated.
	Fixed(usize),
	/// As many bytes as needed, but never fewer than `min`
	///
	/// This is used for ever-growing counters (`PCNT`, `POPM`).
	Grow {
		/// The minimum number of bytes
		min: usize,
	},
}

/// An integer codec using `bits` bits of every byte
///
/// # Examples
///
/// ```rust
/// use id3kit::id3::v2::util::synchsafe::{BitPaddedInt, Width};
///
/// # fn main() -> id3kit::error::Result<()> {
/// let encoded = BitPaddedInt::SYNCHSAFE.encode(129, Width::Fixed(4))?;
/// assert_eq!(encoded, [0x00, 0x00, 0x01, 0x01]);
///
/// assert_eq!(BitPaddedInt::SYNCHSAFE.decode(&encoded)?, 129);
/// # Ok(()) }
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct BitPaddedInt {
	bits: u8,
	big_endian: bool,
}

impl BitPaddedInt {
	/// 7 bits per byte, big endian
	pub const SYNCHSAFE: Self = Self::new(7, true);
	/// 8 bits per byte, big endian
	pub const PLAIN: Self = Self::new(8, true);

	/// Create a codec using `bits` (1..=8) bits of every byte
	///
	/// `bits` is clamped to that range.
	pub const fn new(bits: u8, big_endian: bool) -> Self {
		let bits = if bits == 0 {
			1
		} else if bits > 8 {
			8
		} else {
			bits
		};

		Self { bits, big_endian }
	}

	/// The number of bits used per byte
	pub fn bits(self) -> u8 {
		self.bits
	}

	fn mask(self) -> u64 {
		(1_u64 << self.bits) - 1
	}

	fn padding_mask(self) -> u8 {
		(((1_u16 << (8 - self.bits)) - 1) << self.bits) as u8
	}

	/// Decode an integer from `bytes`
	///
	/// Every byte is masked to `bits` bits. An empty input decodes to `0`.
	///
	/// # Errors
	///
	/// The value doesn't fit in a `u64`
	pub fn decode(self, bytes: &[u8]) -> Result<u64> {
		let mask = self.mask();

		let mut value = 0_u64;
		let mut shift = 0_u32;
		let mut accumulate = |byte: u8| -> Result<()> {
			let part = u64::from(byte) & mask;
			if part != 0 {
				if shift >= u64::BITS || (part << shift) >> shift != part {
					return Err(id3v2_err!(ValueTooWide(8)));
				}

				value |= part << shift;
			}

			shift += u32::from(self.bits);
			Ok(())
		};

		// Least significant byte first
		if self.big_endian {
			for byte in bytes.iter().rev() {
				accumulate(*byte)?;
			}
		} else {
			for byte in bytes {
				accumulate(*byte)?;
			}
		}

		Ok(value)
	}

	/// Strip the padding bits from every 8 bit group of `value`
	///
	/// This is the integer form of [`BitPaddedInt::decode`], for values that were
	/// already read as a plain integer.
	///
	/// ```rust
	/// use id3kit::id3::v2::util::synchsafe::BitPaddedInt;
	///
	/// assert_eq!(BitPaddedInt::SYNCHSAFE.strip(0x0101), 0x81);
	/// ```
	pub fn strip(self, mut value: u64) -> u64 {
		let mask = self.mask();

		let mut stripped = 0;
		let mut shift = 0;
		while value != 0 {
			stripped |= (value & mask) << shift;
			value >>= 8;
			shift += u32::from(self.bits);
		}

		stripped
	}

	/// Encode `value`
	///
	/// # Errors
	///
	/// With [`Width::Fixed`], the value doesn't fit in the requested number of bytes
	pub fn encode(self, mut value: u64, width: Width) -> Result<Vec<u8>> {
		let mask = self.mask();

		let mut bytes = Vec::new();
		match width {
			Width::Fixed(width) => {
				bytes.resize(width, 0);

				let mut index = 0;
				while value != 0 {
					if index >= width {
						return Err(id3v2_err!(ValueTooWide(width)));
					}

					bytes[index] = (value & mask) as u8;
					value >>= self.bits;
					index += 1;
				}
			},
			Width::Grow { min } => {
				while value != 0 {
					bytes.push((value & mask) as u8);
					value >>= self.bits;
				}

				if bytes.len() < min {
					bytes.resize(min, 0);
				}
			},
		}

		if self.big_endian {
			bytes.reverse();
		}

		Ok(bytes)
	}

	/// Whether the padding bits of every byte are unset
	///
	/// This catches writers that claim to use synchsafe integers, but actually write plain ones.
	pub fn has_valid_padding(self, bytes: &[u8]) -> bool {
		let mask = self.padding_mask();
		bytes.iter().all(|byte| byte & mask == 0)
	}

	/// The integer form of [`BitPaddedInt::has_valid_padding`]
	pub fn has_valid_padding_int(self, mut value: u64) -> bool {
		let mask = u64::from(self.padding_mask());
		while value != 0 {
			if value & mask != 0 {
				return false;
			}

			value >>= 8;
		}

		true
	}
}

/// Shorthand for [`BitPaddedInt::SYNCHSAFE`] encoding with a width of 4
pub(crate) fn synch_u32(value: u64) -> Result<[u8; 4]> {
	let encoded = BitPaddedInt::SYNCHSAFE.encode(value, Width::Fixed(4))?;

	let mut bytes = [0; 4];
	bytes.copy_from_slice(&encoded);
	Ok(bytes)
}

#[cfg(test)]
mod tests {
	use super::{BitPaddedInt, Width};

	macro_rules! decode_tests {
		($($name:ident: $codec:expr, $bytes:expr => $expected:expr;)+) => {
			$(
				paste::paste! {
					#[test_log::test]
					fn [<decode_ $name>]() {
						assert_eq!($codec.decode(&$bytes).unwrap(), $expected);
					}
				}
			)+
		};
	}

	decode_tests! {
		empty: BitPaddedInt::SYNCHSAFE, [] => 0;
		zero: BitPaddedInt::SYNCHSAFE, [0x00, 0x00, 0x00, 0x00] => 0;
		one: BitPaddedInt::SYNCHSAFE, [0x00, 0x00, 0x00, 0x01] => 1;
		one_little_endian: BitPaddedInt::new(7, false), [0x01, 0x00, 0x00, 0x00] => 1;
		overflow_byte: BitPaddedInt::SYNCHSAFE, [0x00, 0x00, 0x01, 0x01] => 0x81;
		masked_high_bit: BitPaddedInt::SYNCHSAFE, [0x00, 0x00, 0x01, 0x81] => 0x81;
		six_bits: BitPaddedInt::new(6, true), [0x00, 0x00, 0x01, 0x81] => 0x41;
		eight_bits: BitPaddedInt::PLAIN, [0xFF, 0xFF, 0xFF, 0xFF] => 0xFFFF_FFFF;
	}

	#[test_log::test]
	fn decode_too_wide() {
		assert!(BitPaddedInt::PLAIN.decode(&[0x01; 9]).is_err());
		// Leading zeros don't count
		assert_eq!(BitPaddedInt::PLAIN.decode(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 1]).unwrap(), 1);
	}

	#[test_log::test]
	fn strip_int() {
		assert_eq!(BitPaddedInt::SYNCHSAFE.strip(0x7F7F_7F7F), 0x0FFF_FFFF);
		assert_eq!(BitPaddedInt::SYNCHSAFE.strip(0x0000_0181), 0x81);
		assert_eq!(BitPaddedInt::PLAIN.strip(0xFFFF_FFFF), 0xFFFF_FFFF);
	}

	#[test_log::test]
	fn encode() {
		let synchsafe = BitPaddedInt::SYNCHSAFE;
		assert_eq!(synchsafe.encode(0, Width::Fixed(4)).unwrap(), [0, 0, 0, 0]);
		assert_eq!(synchsafe.encode(129, Width::Fixed(4)).unwrap(), [0, 0, 1, 1]);
		assert_eq!(
			BitPaddedInt::new(6, true).encode(0x41, Width::Fixed(4)).unwrap(),
			[0, 0, 1, 1]
		);
		assert_eq!(synchsafe.encode(129, Width::Fixed(2)).unwrap(), [1, 1]);
		assert_eq!(
			BitPaddedInt::new(7, false).encode(129, Width::Fixed(4)).unwrap(),
			[1, 1, 0, 0]
		);
	}

	#[test_log::test]
	fn encode_too_wide() {
		assert!(BitPaddedInt::SYNCHSAFE.encode(129, Width::Fixed(1)).is_err());
		assert!(BitPaddedInt::PLAIN.encode(1 << 32, Width::Fixed(4)).is_err());
	}

	#[test_log::test]
	fn encode_grow() {
		let plain = BitPaddedInt::PLAIN;
		assert_eq!(plain.encode(100, Width::Grow { min: 4 }).unwrap().len(), 4);
		assert_eq!(plain.encode(1 << 32, Width::Grow { min: 4 }).unwrap(), [1, 0, 0, 0, 0]);
		assert_eq!(plain.encode(0, Width::Grow { min: 6 }).unwrap().len(), 6);
	}

	#[test_log::test]
	fn round_trip() {
		for value in [0_u64, 1, 127, 128, 0x3FFF, 0x4000, 0x0FFF_FFFF] {
			let encoded = BitPaddedInt::SYNCHSAFE.encode(value, Width::Fixed(4)).unwrap();
			assert_eq!(BitPaddedInt::SYNCHSAFE.decode(&encoded).unwrap(), value);
		}

		for value in [0_u64, 0xFF, 0xFFFF_FFFF, 0x0001_0000_0000, u64::MAX] {
			let encoded = BitPaddedInt::PLAIN.encode(value, Width::Grow { min: 4 }).unwrap();
			assert_eq!(BitPaddedInt::PLAIN.decode(&encoded).unwrap(), value);
		}

		assert!(BitPaddedInt::SYNCHSAFE.encode(0x1000_0000, Width::Fixed(4)).is_err());
	}

	#[test_log::test]
	fn padding_bytes() {
		assert!(BitPaddedInt::PLAIN.has_valid_padding(&[0xFF, 0xFF]));
		assert!(!BitPaddedInt::SYNCHSAFE.has_valid_padding(&[0xFF]));
		assert!(!BitPaddedInt::SYNCHSAFE.has_valid_padding(&[0x00, 0xFF]));
		assert!(BitPaddedInt::SYNCHSAFE.has_valid_padding(&[0x7F, 0x7F]));
		assert!(!BitPaddedInt::new(6, true).has_valid_padding(&[0x7F]));
		assert!(!BitPaddedInt::new(6, true).has_valid_padding(&[0x9F]));
		assert!(BitPaddedInt::new(6, true).has_valid_padding(&[0x3F]));
	}

	#[test_log::test]
	fn padding_int() {
		assert!(BitPaddedInt::PLAIN.has_valid_padding_int(0xFF));
		assert!(!BitPaddedInt::SYNCHSAFE.has_valid_padding_int(0xFF));
		assert!(!BitPaddedInt::SYNCHSAFE.has_valid_padding_int(0xFF << 8));
		assert!(BitPaddedInt::SYNCHSAFE.has_valid_padding_int(0x7F << 8));
		assert!(!BitPaddedInt::new(6, true).has_valid_padding_int(0x9F << 32));
		assert!(BitPaddedInt::new(6, true).has_valid_padding_int(0x3F << 16));
	}
}
