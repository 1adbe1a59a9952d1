use super::frame::FrameTable;
use crate::config::ParsingMode;
use crate::error::Result;
use crate::id3::v2::util::synchsafe::BitPaddedInt;
use crate::macros::{err, id3v2_err, try_vec};

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ByteOrder};

/// The size of an ID3v2 header (and footer)
pub const ID3V2_HEADER_SIZE: u64 = 10;

/// The ID3v2 version
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3v2Version {
	/// The major version number
	pub fn major(self) -> u8 {
		match self {
			Self::V2 => 2,
			Self::V3 => 3,
			Self::V4 => 4,
		}
	}
}

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Id3v2TagFlags {
	/// Whether or not all frames are unsynchronised. See [`FrameFlags::unsynchronisation`](crate::id3::v2::FrameFlags::unsynchronisation)
	pub unsynchronisation: bool,
	/// Whether the tag has an extended header
	pub extended_header: bool,
	/// Indicates if the tag is in an experimental stage
	pub experimental: bool,
	/// Indicates that the tag includes a footer
	pub footer: bool,
}

impl Id3v2TagFlags {
	fn from_byte(byte: u8) -> Self {
		Self {
			unsynchronisation: byte & 0x80 == 0x80,
			extended_header: byte & 0x40 == 0x40,
			experimental: byte & 0x20 == 0x20,
			footer: byte & 0x10 == 0x10,
		}
	}
}

/// An ID3v2 header, along with its extended header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Id3v2Header {
	/// The major version
	pub version: Id3v2Version,
	/// The revision, the last component of `2.major.revision`
	pub revision: u8,
	/// The tag flags
	///
	/// [`Id3v2TagFlags::extended_header`] is cleared for tags that set it without actually
	/// having an extended header.
	pub flags: Id3v2TagFlags,
	/// The declared size of the tag, **excluding** the header and footer
	pub size: u32,
	/// The payload of the extended header, after its size field
	pub extended_header: Vec<u8>,
	/// The number of bytes the extended header takes up, including its size field
	pub(crate) extended_size: u32,
}

impl Id3v2Header {
	/// Parse a header from the current position of `reader`
	///
	/// On success, `reader` is positioned at the start of the frame stream.
	///
	/// # Errors
	///
	/// * [`ErrorKind::NoHeader`](crate::error::ErrorKind::NoHeader): There's no "ID3" signature, or fewer than 10 bytes
	/// * [`Id3v2ErrorKind::UnsupportedVersion`](crate::error::Id3v2ErrorKind::UnsupportedVersion)
	/// * [`Id3v2ErrorKind::BadHeaderFlags`](crate::error::Id3v2ErrorKind::BadHeaderFlags): Reserved flags are set in [`ParsingMode::Strict`]
	/// * [`Id3v2ErrorKind::BadExtendedHeaderSize`](crate::error::Id3v2ErrorKind::BadExtendedHeaderSize)
	pub(crate) fn parse<R>(reader: &mut R, parse_mode: ParsingMode) -> Result<Self>
	where
		R: Read + Seek,
	{
		log::debug!("Parsing ID3v2 header");

		let mut header = [0; 10];
		if let Err(e) = reader.read_exact(&mut header) {
			if e.kind() == std::io::ErrorKind::UnexpectedEof {
				err!(NoHeader);
			}

			return Err(e.into());
		}

		if &header[..3] != b"ID3" {
			err!(NoHeader);
		}

		let version = match header[3] {
			2 => Id3v2Version::V2,
			3 => Id3v2Version::V3,
			4 => Id3v2Version::V4,
			major => id3v2_err!(@BAIL UnsupportedVersion(major, header[4])),
		};
		let revision = header[4];

		let flag_byte = header[5];
		if parse_mode == ParsingMode::Strict {
			let reserved = match version {
				Id3v2Version::V4 => flag_byte & 0x0F,
				Id3v2Version::V3 => flag_byte & 0x1F,
				Id3v2Version::V2 => 0,
			};

			if reserved != 0 {
				id3v2_err!(@BAIL BadHeaderFlags(flag_byte));
			}
		}

		let mut flags = Id3v2TagFlags::from_byte(flag_byte);
		// In ID3v2.2 this bit means compression, which was never defined
		if version == Id3v2Version::V2 {
			flags.extended_header = false;
			flags.footer = false;
		}

		let size = BitPaddedInt::SYNCHSAFE.decode(&header[6..])? as u32;

		let mut extended_header = Vec::new();
		let mut extended_size = 0;
		if flags.extended_header {
			let mut size_field = [0; 4];
			reader.read_exact(&mut size_field)?;

			// Some writers set the flag without writing an extended header
			let is_frame_id = std::str::from_utf8(&size_field)
				.is_ok_and(|id| FrameTable::ID3V24.contains(id));
			if is_frame_id {
				log::debug!("Extended header flag set, but found a frame, ignoring");

				flags.extended_header = false;
				reader.seek(SeekFrom::Current(-4))?;
			} else {
				let payload_size = match version {
					Id3v2Version::V4 => BitPaddedInt::SYNCHSAFE
						.decode(&size_field)?
						.checked_sub(4),
					_ => Some(u64::from(BigEndian::read_u32(&size_field))),
				};

				let Some(payload_size) = payload_size else {
					id3v2_err!(@BAIL BadExtendedHeaderSize);
				};

				if payload_size + 4 > u64::from(size) {
					id3v2_err!(@BAIL BadExtendedHeaderSize);
				}

				extended_header = try_vec![0; payload_size as usize];
				reader.read_exact(&mut extended_header)?;
				extended_size = payload_size as u32 + 4;
			}
		}

		Ok(Self {
			version,
			revision,
			flags,
			size,
			extended_header,
			extended_size,
		})
	}

	/// The `(2, major, revision)` version triple
	pub fn version_triple(&self) -> (u8, u8, u8) {
		(2, self.version.major(), self.revision)
	}

	/// The number of bytes in the frame stream, following the extended header
	pub(crate) fn frames_size(&self) -> u32 {
		self.size.saturating_sub(self.extended_size)
	}

	/// The total size of the tag on disk, including the header and footer
	pub fn full_tag_size(&self) -> u64 {
		let footer = if self.flags.footer { ID3V2_HEADER_SIZE } else { 0 };
		u64::from(self.size) + ID3V2_HEADER_SIZE + footer
	}
}
