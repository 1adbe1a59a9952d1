use super::Frame;
use super::header::FrameFlags;
use super::kinds::FrameKind;
use crate::config::ParsingMode;
use crate::error::Result;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::spec::Fields;
use crate::id3::v2::util::unsynch;
use crate::macros::id3v2_err;

use std::borrow::Cow;

/// What a frame needs to know about the tag it was found in
#[derive(Copy, Clone, Debug)]
pub(crate) struct FrameContext {
	pub(crate) version: Id3v2Version,
	/// The tag-level unsynchronisation flag
	pub(crate) unsynchronisation: bool,
	pub(crate) parsing_mode: ParsingMode,
}

impl Frame {
	/// Decode a frame's content, undoing any transforms signaled by `flags`
	///
	/// # Errors
	///
	/// * [`Id3v2ErrorKind::BadUnsynchData`](crate::error::Id3v2ErrorKind::BadUnsynchData)
	/// * [`Id3v2ErrorKind::BadCompressedData`](crate::error::Id3v2ErrorKind::BadCompressedData)
	/// * [`Id3v2ErrorKind::EncryptionUnsupported`](crate::error::Id3v2ErrorKind::EncryptionUnsupported)
	/// * [`Id3v2ErrorKind::JunkFrame`](crate::error::Id3v2ErrorKind::JunkFrame)
	pub(crate) fn from_data(
		kind: &'static FrameKind,
		context: FrameContext,
		flags: u16,
		data: &[u8],
	) -> Result<Self> {
		let content = decode_content(context, flags, data)?;
		read_fields(kind, &content)
	}
}

/// Undo the unsynchronisation, compression and encryption of a frame's content
pub(crate) fn decode_content(context: FrameContext, flags: u16, data: &[u8]) -> Result<Cow<'_, [u8]>> {
	match context.version {
		Id3v2Version::V4 => decode_v24_content(context, FrameFlags::parse_id3v24(flags), data),
		Id3v2Version::V3 => {
			let flags = FrameFlags::parse_id3v23(flags);

			let mut content = data;
			if flags.compression {
				// The decompressed size, which isn't needed
				if content.len() < 4 {
					id3v2_err!(@BAIL BadCompressedData);
				}

				content = &content[4..];
			}

			if flags.encryption {
				id3v2_err!(@BAIL EncryptionUnsupported);
			}

			if flags.compression {
				return inflate(content).map(Cow::Owned);
			}

			Ok(Cow::Borrowed(content))
		},
		// ID3v2.2 frames have no flags
		Id3v2Version::V2 => Ok(Cow::Borrowed(data)),
	}
}

fn decode_v24_content(context: FrameContext, flags: FrameFlags, data: &[u8]) -> Result<Cow<'_, [u8]>> {
	let (size_prefix, content) = if flags.compression || flags.data_length_indicator {
		data.split_at(data.len().min(4))
	} else {
		data.split_at(0)
	};

	let mut content = Cow::Borrowed(content);
	if flags.unsynchronisation || context.unsynchronisation {
		content = Cow::Owned(unsynch::decode(&content)?);
	}

	if flags.encryption {
		id3v2_err!(@BAIL EncryptionUnsupported);
	}

	if flags.compression {
		let inflated = match inflate(&content) {
			Ok(inflated) => inflated,
			Err(err) if context.parsing_mode == ParsingMode::Strict => return Err(err),
			// Some writers forgot to write the size prefix, so it's actually part of the zlib stream
			Err(_) => {
				log::debug!("Failed to decompress frame, retrying with the size prefix included");

				let mut joined = size_prefix.to_vec();
				joined.extend_from_slice(&content);
				inflate(&joined)?
			},
		};

		content = Cow::Owned(inflated);
	}

	Ok(content)
}

#[cfg(feature = "id3v2_compression_support")]
fn inflate(data: &[u8]) -> Result<Vec<u8>> {
	use std::io::Read;

	let limit = crate::util::alloc::allocation_limit() as u64;

	let mut decompressed = Vec::new();
	flate2::read::ZlibDecoder::new(data)
		.take(limit + 1)
		.read_to_end(&mut decompressed)
		.map_err(|_| id3v2_err!(BadCompressedData))?;

	if decompressed.len() as u64 > limit {
		crate::macros::err!(TooMuchData);
	}

	Ok(decompressed)
}

#[cfg(not(feature = "id3v2_compression_support"))]
fn inflate(_: &[u8]) -> Result<Vec<u8>> {
	Err(id3v2_err!(BadCompressedData))
}

/// Read the fields of `kind` from a decoded frame body
pub(crate) fn read_fields(kind: &'static FrameKind, data: &[u8]) -> Result<Frame> {
	let mut fields: Fields = Vec::with_capacity(kind.specs.len() + kind.optional_specs.len());

	let mut remaining = data;
	for spec in kind.specs {
		if remaining.is_empty() {
			id3v2_err!(@BAIL JunkFrame("ran out of data"));
		}

		let (value, rest) = spec.read(&fields, remaining)?;
		fields.push((spec.name, value));
		remaining = rest;
	}

	for spec in kind.optional_specs {
		if remaining.is_empty() {
			break;
		}

		let (value, rest) = spec.read(&fields, remaining)?;
		fields.push((spec.name, value));
		remaining = rest;
	}

	if remaining.iter().any(|b| *b != 0) {
		log::warn!(
			"{}: Leftover data after reading all fields ({} bytes)",
			kind.id,
			remaining.len()
		);
	}

	Ok(Frame { kind, fields })
}

#[cfg(test)]
mod tests {
	use super::{FrameContext, decode_content};
	use crate::config::ParsingMode;
	use crate::error::Id3v2ErrorKind;
	use crate::id3::v2::header::Id3v2Version;
	use crate::id3::v2::{Frame, FrameTable};

	const V24: FrameContext = FrameContext {
		version: Id3v2Version::V4,
		unsynchronisation: false,
		parsing_mode: ParsingMode::BestAttempt,
	};

	#[test_log::test]
	fn plain_text_frame() {
		let kind = FrameTable::ID3V24.get("TIT2").unwrap();
		let frame = Frame::from_data(kind, V24, 0, b"\x00ab").unwrap();
		assert_eq!(frame.text_value().as_deref(), Some("ab"));
		assert_eq!(frame.encoding(), crate::util::text::TextEncoding::Latin1);
	}

	#[test_log::test]
	fn out_of_data_is_junk() {
		let kind = FrameTable::ID3V24.get("TIT2").unwrap();
		let err = Frame::from_data(kind, V24, 0, b"\x00").unwrap_err();
		assert!(matches!(err.id3v2_kind(), Some(Id3v2ErrorKind::JunkFrame(_))));

		let kind = FrameTable::ID3V24.get("APIC").unwrap();
		assert!(Frame::from_data(kind, V24, 0, b"\x00image/png\x00").is_err());
	}

	#[test_log::test]
	fn optional_tail() {
		let kind = FrameTable::ID3V24.get("POPM").unwrap();

		let frame = Frame::from_data(kind, V24, 0, b"a@b\x00\x80").unwrap();
		assert!(frame.field("count").is_none());

		let frame = Frame::from_data(kind, V24, 0, b"a@b\x00\x80\x00\x00\x01\x00").unwrap();
		assert_eq!(frame.field("count").and_then(|v| v.as_int()), Some(256));
	}

	#[test_log::test]
	fn unsynchronised_frame() {
		let context = FrameContext {
			unsynchronisation: true,
			..V24
		};

		let content = decode_content(context, 0, b"\x00\xFF\x00\xE0").unwrap();
		assert_eq!(&*content, b"\x00\xFF\xE0");

		// Frame level flag
		let content = decode_content(V24, 0x0002, b"\x00\xFF\x00\xE0").unwrap();
		assert_eq!(&*content, b"\x00\xFF\xE0");

		let err = decode_content(V24, 0x0002, b"\xFF\xFF").unwrap_err();
		assert!(matches!(err.id3v2_kind(), Some(Id3v2ErrorKind::BadUnsynchData(_))));
	}

	#[test_log::test]
	fn encrypted_frames_are_rejected() {
		let err = decode_content(V24, 0x0004, b"\x80abcd").unwrap_err();
		assert!(matches!(err.id3v2_kind(), Some(Id3v2ErrorKind::EncryptionUnsupported)));

		let v23 = FrameContext {
			version: Id3v2Version::V3,
			..V24
		};
		let err = decode_content(v23, 0x0040, b"\x80abcd").unwrap_err();
		assert!(matches!(err.id3v2_kind(), Some(Id3v2ErrorKind::EncryptionUnsupported)));
	}

	#[test_log::test]
	fn v23_compression_needs_size() {
		let v23 = FrameContext {
			version: Id3v2Version::V3,
			..V24
		};

		let err = decode_content(v23, 0x0080, b"\x00\x00").unwrap_err();
		assert!(matches!(err.id3v2_kind(), Some(Id3v2ErrorKind::BadCompressedData)));
	}

	#[cfg(feature = "id3v2_compression_support")]
	#[test_log::test]
	fn compressed_frames() {
		use flate2::Compression;
		use flate2::write::ZlibEncoder;
		use std::io::Write;

		let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
		encoder.write_all(b"\x00Compressed").unwrap();
		let compressed = encoder.finish().unwrap();

		let kind = FrameTable::ID3V24.get("TIT2").unwrap();

		let mut data = vec![0, 0, 0, 11];
		data.extend_from_slice(&compressed);
		let frame = Frame::from_data(kind, V24, 0x0009, &data).unwrap();
		assert_eq!(frame.text_value().as_deref(), Some("Compressed"));

		// Missing size prefix
		let frame = Frame::from_data(kind, V24, 0x0008, &compressed).unwrap();
		assert_eq!(frame.text_value().as_deref(), Some("Compressed"));

		let strict = FrameContext {
			parsing_mode: ParsingMode::Strict,
			..V24
		};
		assert!(Frame::from_data(kind, strict, 0x0008, &compressed).is_err());

		let v23 = FrameContext {
			version: Id3v2Version::V3,
			..V24
		};
		let frame = Frame::from_data(kind, v23, 0x0080, &data).unwrap();
		assert_eq!(frame.text_value().as_deref(), Some("Compressed"));
	}
}
