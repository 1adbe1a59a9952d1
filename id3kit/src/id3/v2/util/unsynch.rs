//! The unsynchronisation scheme
//!
//! Unsynchronisation inserts a `0x00` after every `0xFF` that is followed by a byte `>= 0xE0`,
//! by `0x00`, or by the end of the data, so the tag can never contain a false MPEG frame sync.

use crate::error::Result;
use crate::macros::id3v2_err;

/// Reverse the unsynchronisation scheme
///
/// # Errors
///
/// * An `0xFF` is followed by a byte `>= 0xE0` ("invalid sync-safe string")
/// * The data ends with an `0xFF` ("string ended unsafe")
///
/// # Examples
///
/// ```rust
/// use id3kit::id3::v2::util::unsynch;
///
/// # fn main() -> id3kit::error::Result<()> {
/// assert_eq!(unsynch::decode(&[0xFF, 0x00, 0x00])?, [0xFF, 0x00]);
/// assert!(unsynch::decode(&[0xFF, 0xFF]).is_err());
/// # Ok(()) }
/// ```
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
	let mut output = Vec::with_capacity(data.len());

	let mut safe = true;
	for &byte in data {
		if safe {
			output.push(byte);
			safe = byte != 0xFF;
			continue;
		}

		if byte >= 0xE0 {
			return Err(id3v2_err!(BadUnsynchData("invalid sync-safe string")));
		}

		if byte != 0x00 {
			output.push(byte);
		}

		safe = true;
	}

	if !safe {
		return Err(id3v2_err!(BadUnsynchData("string ended unsafe")));
	}

	Ok(output)
}

/// Apply the unsynchronisation scheme
///
/// This must only be applied once, encoding already unsynchronised data changes it.
///
/// # Examples
///
/// ```rust
/// use id3kit::id3::v2::util::unsynch;
///
/// assert_eq!(unsynch::encode(&[0xFF, 0x44]), [0xFF, 0x44]);
/// assert_eq!(unsynch::encode(&[0xFF, 0x00]), [0xFF, 0x00, 0x00]);
/// assert_eq!(unsynch::encode(&[0xFF]), [0xFF, 0x00]);
/// ```
pub fn encode(data: &[u8]) -> Vec<u8> {
	let mut output = Vec::with_capacity(data.len());

	let mut bytes = data.iter().copied().peekable();
	while let Some(byte) = bytes.next() {
		output.push(byte);

		if byte != 0xFF {
			continue;
		}

		match bytes.peek() {
			Some(&next) if next != 0x00 && next < 0xE0 => {},
			_ => output.push(0x00),
		}
	}

	output
}
