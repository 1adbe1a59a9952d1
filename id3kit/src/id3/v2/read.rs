use super::frame::read::FrameContext;
use super::frame::{Frame, FrameKind, FrameTable, is_valid_frame_id, parse_header, parse_v2_header};
use super::header::{Id3v2Header, Id3v2Version};
use super::tag::Id3v2Tag;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::{Id3v2ErrorKind, Result};
use crate::id3::v2::util::unsynch;
use crate::macros::{parse_mode_choice, try_vec};
use crate::util::alloc::allocation_limit;

use std::borrow::Cow;
use std::io::{self, Read};

/// What became of a single frame in the frame stream
#[derive(Debug)]
pub(crate) enum FrameOutcome {
	/// A decoded frame
	Frame(Frame),
	/// A frame that is kept as raw bytes, header included
	Unknown(Vec<u8>),
	/// A frame that is dropped
	Skip(&'static str),
}

/// Read the frame stream following `header` into a tag
pub(crate) fn parse_id3v2<R>(
	reader: &mut R,
	header: &Id3v2Header,
	parse_options: ParseOptions,
) -> Result<Id3v2Tag>
where
	R: Read,
{
	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {:?}",
		header.size,
		header.version
	);

	let size = header.frames_size() as usize;
	let parsing_mode = parse_options.parsing_mode;
	let data = parse_mode_choice!(
		parsing_mode,
		RELAXED: {
			let mut data = Vec::new();
			reader.by_ref().take(size as u64).read_to_end(&mut data)?;

			if data.len() < size {
				log::warn!(
					"Tag declares {size} bytes, but only {} are available, clamping",
					data.len()
				);
			}

			data
		},
		DEFAULT: {
			// A size over the limit is only worth reporting if the stream actually holds it
			if size > allocation_limit() {
				let available = io::copy(&mut reader.by_ref().take(size as u64), &mut io::sink())?;
				if available < size as u64 {
					log::debug!("Tag declares {size} bytes, but only {available} are available");
					return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
				}
			}

			let mut data = try_vec![0; size];
			reader.read_exact(&mut data)?;
			data
		}
	);

	let table = parse_options
		.known_frames
		.unwrap_or(match header.version {
			Id3v2Version::V2 => FrameTable::ID3V22,
			_ => FrameTable::ID3V24,
		});

	let mut tag = Id3v2Tag::from_header(header);
	for outcome in read_frames(&data, header, table, parsing_mode)? {
		match outcome {
			FrameOutcome::Frame(frame) => {
				tag.add(frame);
			},
			FrameOutcome::Unknown(raw) => tag.push_unknown_frame(raw),
			FrameOutcome::Skip(reason) => log::debug!("Skipping frame: {reason}"),
		}
	}

	Ok(tag)
}

/// Demultiplex a frame stream
pub(crate) fn read_frames(
	data: &[u8],
	header: &Id3v2Header,
	table: FrameTable,
	parsing_mode: ParsingMode,
) -> Result<Vec<FrameOutcome>> {
	let mut data = Cow::Borrowed(data);

	// ID3v2.4 unsynchronises every frame on its own
	if header.version < Id3v2Version::V4 && header.flags.unsynchronisation {
		match unsynch::decode(&data) {
			Ok(decoded) => data = Cow::Owned(decoded),
			Err(e) => log::debug!("Failed to undo tag unsynchronisation, reading as is: {e}"),
		}
	}

	let context = FrameContext {
		version: header.version,
		unsynchronisation: header.version == Id3v2Version::V4 && header.flags.unsynchronisation,
		parsing_mode,
	};

	match header.version {
		Id3v2Version::V2 => read_v2_frames(&data, table, context),
		_ => read_frames_10(&data, table, context),
	}
}

fn read_frames_10(data: &[u8], table: FrameTable, context: FrameContext) -> Result<Vec<FrameOutcome>> {
	let synchsafe = context.version == Id3v2Version::V4 && sizes_are_synchsafe(data, table);
	log::debug!(
		"Reading frame sizes as {}",
		if synchsafe { "synchsafe integers" } else { "plain integers" }
	);

	let mut outcomes = Vec::new();

	let mut remaining = data;
	while let Some(frame_header) = parse_header(remaining, synchsafe) {
		if frame_header.is_padding() {
			break;
		}

		let end = remaining.len().min(frame_header.len + frame_header.size as usize);
		let (raw, rest) = remaining.split_at(end);
		remaining = rest;

		let id = frame_header.id_str();
		log::trace!("Reading frame `{id}`, size: {}", frame_header.size);

		if frame_header.size == 0 {
			outcomes.push(FrameOutcome::Skip("empty frame"));
			continue;
		}

		let content = &raw[frame_header.len..];
		let outcome = match table.get(&id) {
			Some(kind) => load_frame(kind, context, frame_header.flags, raw, content)?,
			None if is_valid_frame_id(&id) => FrameOutcome::Unknown(raw.to_vec()),
			None => FrameOutcome::Skip("invalid frame ID"),
		};

		outcomes.push(outcome);
	}

	Ok(outcomes)
}

fn read_v2_frames(data: &[u8], table: FrameTable, context: FrameContext) -> Result<Vec<FrameOutcome>> {
	let mut outcomes = Vec::new();

	let mut remaining = data;
	while let Some(frame_header) = parse_v2_header(remaining) {
		if frame_header.is_padding() {
			break;
		}

		let id = frame_header.id_str();
		if !is_valid_frame_id(&id) {
			log::debug!("Found an invalid frame ID, assuming the rest of the tag is padding");
			break;
		}

		let end = remaining.len().min(frame_header.len + frame_header.size as usize);
		let (raw, rest) = remaining.split_at(end);
		remaining = rest;

		log::trace!("Reading frame `{id}`, size: {}", frame_header.size);

		if frame_header.size == 0 {
			outcomes.push(FrameOutcome::Skip("empty frame"));
			continue;
		}

		let content = &raw[frame_header.len..];
		let outcome = match table.get(&id) {
			Some(kind) => load_frame(kind, context, 0, raw, content)?,
			None => FrameOutcome::Unknown(raw.to_vec()),
		};

		outcomes.push(outcome);
	}

	Ok(outcomes)
}

/// Decode a single frame, deciding whether a failure drops the frame or the tag
fn load_frame(
	kind: &'static FrameKind,
	context: FrameContext,
	flags: u16,
	raw: &[u8],
	content: &[u8],
) -> Result<FrameOutcome> {
	let err = match Frame::from_data(kind, context, flags, content) {
		Ok(frame) => return Ok(FrameOutcome::Frame(frame)),
		Err(err) => err,
	};

	match err.id3v2_kind() {
		Some(Id3v2ErrorKind::EncryptionUnsupported) => {
			log::debug!("{}: Keeping encrypted frame as raw bytes", kind.id);
			Ok(FrameOutcome::Unknown(raw.to_vec()))
		},
		Some(Id3v2ErrorKind::JunkFrame(reason)) => Ok(FrameOutcome::Skip(reason)),
		Some(Id3v2ErrorKind::BadUnsynchData(_) | Id3v2ErrorKind::BadCompressedData)
			if context.parsing_mode != ParsingMode::Strict =>
		{
			log::warn!("{}: Dropping frame, {err}", kind.id);
			Ok(FrameOutcome::Skip("failed to undo a frame transform"))
		},
		_ => Err(err),
	}
}

/// Scan the frame stream, returning the number of known frames found and how far
/// the scan ended from the end of the data
///
/// A negative offset means the scan stopped at padding, a positive one means the last
/// frame claimed more data than there is.
fn scan_frames(data: &[u8], table: FrameTable, synchsafe: bool) -> (usize, i64) {
	let len = data.len() as i64;

	let mut found = 0;
	let mut offset = 0_i64;
	while offset < len - 10 {
		let part = &data[offset as usize..offset as usize + 10];
		if part.iter().all(|b| *b == 0) {
			return (found, -((len - offset) % 10));
		}

		let Some(frame_header) = parse_header(part, synchsafe) else {
			break;
		};

		offset += 10 + i64::from(frame_header.size);
		if std::str::from_utf8(frame_header.id).is_ok_and(|id| table.contains(id)) {
			found += 1;
		}
	}

	(found, offset - len)
}

/// Whether the frame sizes of an ID3v2.4 tag are synchsafe
///
/// Some writers (notably iTunes) use plain integers. The stream is scanned both ways, and
/// plain integers win if they find more known frames, or as many while the synchsafe scan
/// overshoots the data and the plain one doesn't.
fn sizes_are_synchsafe(data: &[u8], table: FrameTable) -> bool {
	let (as_synchsafe, synchsafe_offset) = scan_frames(data, table, true);
	let (as_plain, plain_offset) = scan_frames(data, table, false);

	!(as_plain > as_synchsafe
		|| (as_plain == as_synchsafe && synchsafe_offset >= 1 && plain_offset <= 1))
}
