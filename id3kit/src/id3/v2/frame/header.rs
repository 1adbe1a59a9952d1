use crate::id3::v2::util::synchsafe::BitPaddedInt;

use byteorder::{BigEndian, ByteOrder};

/// Various flags to describe the content of a frame
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct FrameFlags {
	/// Preserve frame on tag edit
	pub tag_alter_preservation: bool,
	/// Preserve frame on file edit
	pub file_alter_preservation: bool,
	/// Item cannot be written to
	pub read_only: bool,
	/// The frame carries a group identifier byte
	pub grouping_identity: bool,
	/// Frame is zlib compressed
	pub compression: bool,
	/// Frame is encrypted
	///
	/// NOTE: Encrypted frames are never decoded, they are kept as opaque bytes.
	pub encryption: bool,
	/// Frame is unsynchronised
	///
	/// This only exists in ID3v2.4. ID3v2.3 and ID3v2.2 can only unsynchronise the entire tag.
	pub unsynchronisation: bool,
	/// Frame content is prefixed with its decoded length
	pub data_length_indicator: bool,
}

impl FrameFlags {
	/// Parse the flags from an ID3v2.4 frame
	pub fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x4000 == 0x4000,
			file_alter_preservation: flags & 0x2000 == 0x2000,
			read_only: flags & 0x1000 == 0x1000,
			grouping_identity: flags & 0x0040 == 0x0040,
			compression: flags & 0x0008 == 0x0008,
			encryption: flags & 0x0004 == 0x0004,
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: flags & 0x0001 == 0x0001,
		}
	}

	/// Parse the flags from an ID3v2.3 frame
	pub fn parse_id3v23(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x8000 == 0x8000,
			file_alter_preservation: flags & 0x4000 == 0x4000,
			read_only: flags & 0x2000 == 0x2000,
			grouping_identity: flags & 0x0020 == 0x0020,
			compression: flags & 0x0080 == 0x0080,
			encryption: flags & 0x0040 == 0x0040,
			unsynchronisation: false,
			data_length_indicator: false,
		}
	}

	/// Get the ID3v2.4 byte representation of the flags
	pub fn as_id3v24_bytes(&self) -> u16 {
		let mut flags = 0;

		if *self == FrameFlags::default() {
			return flags;
		}

		if self.tag_alter_preservation {
			flags |= 0x4000
		}

		if self.file_alter_preservation {
			flags |= 0x2000
		}

		if self.read_only {
			flags |= 0x1000
		}

		if self.grouping_identity {
			flags |= 0x0040
		}

		if self.compression {
			flags |= 0x0008
		}

		if self.encryption {
			flags |= 0x0004
		}

		if self.unsynchronisation {
			flags |= 0x0002
		}

		if self.data_length_indicator {
			flags |= 0x0001
		}

		flags
	}
}

/// Whether `id` has the shape of a frame ID
///
/// Frame IDs are made of uppercase ASCII letters and digits, with at least one letter.
///
/// # Examples
///
/// ```rust
/// use id3kit::id3::v2::is_valid_frame_id;
///
/// assert!(is_valid_frame_id("TIT2"));
/// assert!(is_valid_frame_id("TT2"));
/// assert!(!is_valid_frame_id("tit2"));
/// assert!(!is_valid_frame_id("1234"));
/// ```
pub fn is_valid_frame_id(id: &str) -> bool {
	!id.is_empty()
		&& id
			.chars()
			.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
		&& id.chars().any(|c| c.is_ascii_uppercase())
}

/// A frame header, as found in the frame stream
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct RawFrameHeader<'a> {
	pub(crate) id: &'a [u8],
	/// The declared size of the content
	pub(crate) size: u32,
	/// The raw flags, always 0 for ID3v2.2
	pub(crate) flags: u16,
	/// The length of the header itself
	pub(crate) len: usize,
}

impl RawFrameHeader<'_> {
	/// The ID decoded as Latin-1
	pub(crate) fn id_str(&self) -> String {
		self.id.iter().map(|b| char::from(*b)).collect()
	}

	/// An all zero ID, which means padding has been reached
	pub(crate) fn is_padding(&self) -> bool {
		self.id.iter().all(|b| *b == 0)
	}
}

/// Parse a 6 byte ID3v2.2 frame header
///
/// Returns `None` if there isn't enough data for a header.
pub(crate) fn parse_v2_header(data: &[u8]) -> Option<RawFrameHeader<'_>> {
	let header = data.get(..6)?;

	Some(RawFrameHeader {
		id: &header[..3],
		size: BigEndian::read_u24(&header[3..]),
		flags: 0,
		len: 6,
	})
}

/// Parse a 10 byte ID3v2.3/ID3v2.4 frame header
///
/// Returns `None` if there isn't enough data for a header.
pub(crate) fn parse_header(data: &[u8], synchsafe: bool) -> Option<RawFrameHeader<'_>> {
	let header = data.get(..10)?;

	let mut size = BigEndian::read_u32(&header[4..]);
	if synchsafe {
		size = BitPaddedInt::SYNCHSAFE.strip(u64::from(size)) as u32;
	}

	Some(RawFrameHeader {
		id: &header[..4],
		size,
		flags: BigEndian::read_u16(&header[8..]),
		len: 10,
	})
}
