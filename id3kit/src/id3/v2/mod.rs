//! ID3v2 items and utilities
//!
//! ## Important notes
//!
//! All tags are normalized to ID3v2.4 by default, see [`Id3v2Tag::normalize_for_v24`].
//! Tags are always written as ID3v2.4.
//!
//! Frames are stored by their hash key, which is the frame ID, followed by the fields that
//! tell multiple frames of the same ID apart. See [`Frame::hash_key`].
//!
//! ### Unknown frames
//!
//! Frames that can't be parsed, such as encrypted frames or frames with an unknown ID, are
//! kept as raw bytes in [`Id3v2Tag::unknown_frames`]. They are written back as is, so long as
//! they came from an ID3v2.3 or ID3v2.4 tag.

mod frame;
mod header;
mod normalize;
mod read;
pub mod spec;
mod tag;
pub mod util;
mod write;

pub use frame::{
	Frame, FrameCategory, FrameFlags, FrameKind, FrameTable, HashKeyRule, is_valid_frame_id,
};
pub use header::{ID3V2_HEADER_SIZE, Id3v2Header, Id3v2TagFlags, Id3v2Version};
pub use spec::{FieldValue, Id3TimeStamp, Spec, SpecKind};
pub use tag::Id3v2Tag;
pub use write::delete;

use crate::config::ParsingMode;
use crate::error::{ErrorKind, Id3v2ErrorKind, Result};

use std::io::{Read, Seek, SeekFrom};

/// Check for an ID3v2 header at the current position of `reader`
///
/// If a header is found, `reader` is left at the start of the frame stream. Otherwise, it is
/// restored to its original position.
///
/// # Errors
///
/// * The extended header is malformed
/// * [`std::io::Error`]
///
/// # Examples
///
/// ```rust
/// use id3kit::id3::v2::{Id3v2Version, probe};
///
/// use std::io::Cursor;
///
/// # fn main() -> id3kit::error::Result<()> {
/// let mut reader = Cursor::new(b"ID3\x03\x00\x00\x00\x00\x00\x00");
/// let header = probe(&mut reader)?.unwrap();
/// assert_eq!(header.version, Id3v2Version::V3);
///
/// let mut reader = Cursor::new(b"fLaC");
/// assert!(probe(&mut reader)?.is_none());
/// # Ok(()) }
/// ```
pub fn probe<R>(reader: &mut R) -> Result<Option<Id3v2Header>>
where
	R: Read + Seek,
{
	let start = reader.stream_position()?;

	match Id3v2Header::parse(reader, ParsingMode::BestAttempt) {
		Ok(header) => Ok(Some(header)),
		Err(e) if is_not_a_tag(e.kind()) => {
			reader.seek(SeekFrom::Start(start))?;
			Ok(None)
		},
		Err(e) => Err(e),
	}
}

fn is_not_a_tag(kind: &ErrorKind) -> bool {
	match kind {
		ErrorKind::NoHeader => true,
		ErrorKind::Id3v2(e) => matches!(e.kind(), Id3v2ErrorKind::UnsupportedVersion(..)),
		_ => false,
	}
}
