use crate::config::{Id3v1Policy, ParsingMode, WriteOptions};
use crate::error::{Id3Error, Result};
use crate::id3::find_id3v1;
use crate::id3::v1;
use crate::id3::v2::frame::Frame;
use crate::id3::v2::header::ID3V2_HEADER_SIZE;
use crate::id3::v2::tag::Id3v2Tag;
use crate::id3::v2::util::synchsafe::{BitPaddedInt, synch_u32};
use crate::util::io::{FileLike, Length, Truncate, delete_bytes, insert_bytes};

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, WriteBytesExt};

/// Frames written ahead of the rest, in this order
const PRIORITY_FRAMES: [&str; 7] = ["TIT2", "TPE1", "TRCK", "TALB", "TPOS", "TDRC", "TCON"];

pub(crate) fn write_id3v2<F>(tag: &Id3v2Tag, file: &mut F, write_options: WriteOptions) -> Result<()>
where
	F: FileLike,
	Id3Error: From<<F as Truncate>::Error>,
	Id3Error: From<<F as Length>::Error>,
{
	let mut frames = create_frames(tag)?;
	if frames.is_empty() {
		log::debug!("No frames to write, removing tags");
		return delete(file, true, true);
	}

	file.rewind()?;
	let existing_size = existing_tag_size(file)?;

	let frames_size = frames.len() as u64;
	let size = match existing_size {
		Some(existing) if existing >= frames_size => existing,
		_ => align(frames_size, write_options.padding_alignment),
	};

	log::debug!("Writing ID3v2 tag, frames: {frames_size} bytes, padding: {} bytes", size - frames_size);
	frames.resize(size as usize, 0);

	let mut id3v2 = Cursor::new(Vec::with_capacity(frames.len() + ID3V2_HEADER_SIZE as usize));
	id3v2.write_all(b"ID3")?;
	// Version 2.4.0, no flags
	id3v2.write_all(&[4, 0, 0])?;
	id3v2.write_all(&synch_u32(size)?)?;
	id3v2.write_all(&frames)?;

	// With no existing tag, the entire tag needs to be inserted
	let reserved = existing_size.map_or(0, |existing| existing + ID3V2_HEADER_SIZE);
	let needed = size + ID3V2_HEADER_SIZE;
	if reserved < needed {
		insert_bytes(file, needed - reserved, reserved)?;
	}

	// Header last
	file.seek(SeekFrom::Start(ID3V2_HEADER_SIZE))?;
	file.write_all(&id3v2.get_ref()[ID3V2_HEADER_SIZE as usize..])?;
	file.rewind()?;
	file.write_all(&id3v2.get_ref()[..ID3V2_HEADER_SIZE as usize])?;

	write_id3v1(tag, file, write_options.id3v1)
}

/// Serialize the frames of `tag`, including its unknown frames
pub(crate) fn create_frames(tag: &Id3v2Tag) -> Result<Vec<u8>> {
	let mut ordered = tag.frames.iter().collect::<Vec<_>>();
	// Stable, so the rest stay in insertion order
	ordered.sort_by_key(|(key, _)| {
		PRIORITY_FRAMES
			.iter()
			.position(|id| key.get(..4) == Some(*id))
			.unwrap_or(PRIORITY_FRAMES.len())
	});

	let mut frames = Vec::new();
	for (_, frame) in ordered {
		if tag.parsing_mode == ParsingMode::Strict && is_empty_text(frame) {
			log::debug!("Skipping empty `{}` frame", frame.id());
			continue;
		}

		frames.extend(frame_bytes(frame.id(), &frame.as_bytes()?)?);
	}

	// The headers of older unknown frames can't be written to an ID3v2.4 tag
	if tag.version >= (2, 3, 0) {
		for raw in &tag.unknown_frames {
			if raw.len() > ID3V2_HEADER_SIZE as usize {
				frames.extend_from_slice(raw);
			}
		}
	} else if !tag.unknown_frames.is_empty() {
		log::debug!("Dropping {} unknown frames from an ID3v2.2 tag", tag.unknown_frames.len());
	}

	Ok(frames)
}

fn is_empty_text(frame: &Frame) -> bool {
	frame.kind().is_text() && frame.text_value().is_none_or(|text| text.is_empty())
}

/// Build an ID3v2.4 frame, with a synchsafe size and no flags
pub(crate) fn frame_bytes(id: &str, content: &[u8]) -> Result<Vec<u8>> {
	let mut frame = Vec::with_capacity(content.len() + 10);
	frame.write_all(id.as_bytes())?;
	frame.write_all(&synch_u32(content.len() as u64)?)?;
	frame.write_u16::<BigEndian>(0)?;
	frame.write_all(content)?;

	Ok(frame)
}

fn align(size: u64, alignment: u32) -> u64 {
	let alignment = u64::from(alignment);
	if alignment == 0 {
		return size;
	}

	size.div_ceil(alignment) * alignment
}

/// The declared size of the ID3v2 tag at the start of `file`, `None` if there is no tag
///
/// `file` is expected to be at the start.
fn existing_tag_size<R>(file: &mut R) -> Result<Option<u64>>
where
	R: Read,
{
	let mut header = Vec::with_capacity(ID3V2_HEADER_SIZE as usize);
	file.by_ref().take(ID3V2_HEADER_SIZE).read_to_end(&mut header)?;

	if header.len() < ID3V2_HEADER_SIZE as usize || !header.starts_with(b"ID3") {
		return Ok(None);
	}

	BitPaddedInt::SYNCHSAFE.decode(&header[6..]).map(Some)
}

fn write_id3v1<F>(tag: &Id3v2Tag, file: &mut F, policy: Id3v1Policy) -> Result<()>
where
	F: FileLike,
	Id3Error: From<<F as Truncate>::Error>,
	Id3Error: From<<F as Length>::Error>,
{
	let existing = find_id3v1(file)?;

	let file_len = file.len()?;
	let tag_start = existing.unwrap_or(file_len);

	match policy {
		Id3v1Policy::Create => {},
		Id3v1Policy::UpdateIfPresent if existing.is_some() => {},
		_ => {
			if existing.is_some() {
				log::debug!("Removing ID3v1 tag");
			}

			file.truncate(tag_start)?;
			return Ok(());
		},
	}

	log::debug!("Writing ID3v1 tag");

	let id3v1 = v1::render_id3v1(tag)?;
	file.seek(SeekFrom::Start(tag_start))?;
	file.write_all(&id3v1)?;

	Ok(())
}

/// Remove the ID3v1 and/or ID3v2 tags from `file`
///
/// Only an ID3v2 tag at the very start of the file is removed.
///
/// # Errors
///
/// * [`std::io::Error`]
/// * The ID3v2 tag claims to be larger than the file
///
/// # Examples
///
/// ```rust
/// use id3kit::id3::v2::delete;
/// use std::io::Cursor;
///
/// # fn main() -> id3kit::error::Result<()> {
/// let mut file = Cursor::new(b"ID3\x04\x00\x00\x00\x00\x00\x02\x00\x00audio".to_vec());
/// delete(&mut file, true, true)?;
///
/// assert_eq!(file.into_inner(), b"audio");
/// # Ok(()) }
/// ```
pub fn delete<F>(file: &mut F, v1: bool, v2: bool) -> Result<()>
where
	F: FileLike,
	Id3Error: From<<F as Truncate>::Error>,
	Id3Error: From<<F as Length>::Error>,
{
	if v1 {
		if let Some(start) = find_id3v1(file)? {
			log::debug!("Removing ID3v1 tag");
			file.truncate(start)?;
		}
	}

	if v2 {
		file.rewind()?;
		if let Some(size) = existing_tag_size(file)? {
			log::debug!("Removing ID3v2 tag");
			delete_bytes(file, size + ID3V2_HEADER_SIZE, 0)?;
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::{align, create_frames, delete, frame_bytes};
	use crate::config::{Id3v1Policy, ParsingMode, WriteOptions};
	use crate::id3::v2::{Frame, Id3v2Tag};
	use crate::util::text::TextEncoding;

	use std::io::Cursor;

	fn text(id: &str, value: &str) -> Frame {
		Frame::text(id, TextEncoding::Latin1, [value]).unwrap()
	}

	fn tag(frames: Vec<Frame>) -> Id3v2Tag {
		let mut tag = Id3v2Tag::new();
		for frame in frames {
			tag.add(frame);
		}

		tag
	}

	fn ids(mut frames: &[u8]) -> Vec<String> {
		let mut ids = Vec::new();
		while frames.len() >= 10 {
			let size = crate::id3::v2::util::synchsafe::BitPaddedInt::SYNCHSAFE
				.decode(&frames[4..8])
				.unwrap() as usize;
			ids.push(String::from_utf8(frames[..4].to_vec()).unwrap());
			frames = &frames[10 + size..];
		}

		ids
	}

	#[test_log::test]
	fn frame_header() {
		assert_eq!(
			frame_bytes("TIT2", &[0; 0x80]).unwrap()[..10],
			*b"TIT2\x00\x00\x01\x00\x00\x00"
		);
	}

	#[test_log::test]
	fn priority_order() {
		let tag = tag(vec![
			text("TMOO", "a"),
			text("TCON", "b"),
			text("TBPM", "1"),
			text("TIT2", "c"),
			text("TPE1", "d"),
		]);

		let frames = create_frames(&tag).unwrap();
		assert_eq!(ids(&frames), ["TIT2", "TPE1", "TCON", "TMOO", "TBPM"]);
	}

	#[test_log::test]
	fn empty_text_in_strict_mode() {
		let mut tag = tag(vec![text("TIT2", ""), text("TPE1", "a")]);
		assert_eq!(ids(&create_frames(&tag).unwrap()), ["TIT2", "TPE1"]);

		tag.parsing_mode = ParsingMode::Strict;
		assert_eq!(ids(&create_frames(&tag).unwrap()), ["TPE1"]);
	}

	#[test_log::test]
	fn unknown_frames() {
		let mut tag = tag(vec![text("TIT2", "a")]);
		tag.unknown_frames.push(b"XYZW\x00\x00\x00\x01\x00\x00z".to_vec());
		// Too short to be a frame
		tag.unknown_frames.push(b"XYZW\x00\x00".to_vec());
		assert_eq!(ids(&create_frames(&tag).unwrap()), ["TIT2", "XYZW"]);

		tag.version = (2, 2, 0);
		assert_eq!(ids(&create_frames(&tag).unwrap()), ["TIT2"]);
	}

	#[test_log::test]
	fn alignment() {
		assert_eq!(align(1, 1024), 1024);
		assert_eq!(align(1024, 1024), 1024);
		assert_eq!(align(1025, 1024), 2048);
		assert_eq!(align(1025, 0), 1025);
	}

	#[test_log::test]
	fn write_new_tag() {
		let tag = tag(vec![text("TIT2", "a")]);

		let mut file = Cursor::new(b"audio".to_vec());
		tag.save_to(&mut file, WriteOptions::new()).unwrap();

		let data = file.into_inner();
		assert_eq!(data.len(), 10 + 1024 + 5);
		assert_eq!(&data[..10], b"ID3\x04\x00\x00\x00\x00\x08\x00");
		assert_eq!(&data[10..23], b"TIT2\x00\x00\x00\x03\x00\x00\x00a\x00");
		assert!(data[23..1034].iter().all(|b| *b == 0));
		assert_eq!(&data[1034..], b"audio");
	}

	#[test_log::test]
	fn reuse_existing_space() {
		let mut data = b"ID3\x03\x00\x00\x00\x00\x00\x20".to_vec();
		data.extend_from_slice(&[0; 0x20]);
		data.extend_from_slice(b"audio");

		let tag = tag(vec![text("TIT2", "a")]);
		let mut file = Cursor::new(data);
		tag.save_to(&mut file, WriteOptions::new()).unwrap();

		let data = file.into_inner();
		assert_eq!(data.len(), 10 + 0x20 + 5);
		assert_eq!(&data[..10], b"ID3\x04\x00\x00\x00\x00\x00\x20");
		assert_eq!(&data[42..], b"audio");
	}

	#[test_log::test]
	fn id3v1_policies() {
		let tag = tag(vec![text("TIT2", "Title")]);

		// Never created implicitly
		let mut file = Cursor::new(vec![0; 200]);
		tag.save_to(&mut file, WriteOptions::new()).unwrap();
		let data = file.into_inner();
		assert_eq!(data.len(), 10 + 1024 + 200);

		// Created on request
		let mut file = Cursor::new(data);
		tag.save_to(&mut file, WriteOptions::new().id3v1(Id3v1Policy::Create))
			.unwrap();
		let data = file.into_inner();
		assert_eq!(data.len(), 10 + 1024 + 200 + 128);
		assert_eq!(&data[data.len() - 128..data.len() - 120], b"TAGTitle");

		// Updated in place
		let tag = self::tag(vec![text("TIT2", "Other")]);
		let mut file = Cursor::new(data);
		tag.save_to(&mut file, WriteOptions::new()).unwrap();
		let data = file.into_inner();
		assert_eq!(data.len(), 10 + 1024 + 200 + 128);
		assert_eq!(&data[data.len() - 128..data.len() - 120], b"TAGOther");

		// Removed
		let mut file = Cursor::new(data);
		tag.save_to(&mut file, WriteOptions::new().id3v1(Id3v1Policy::Remove))
			.unwrap();
		assert_eq!(file.into_inner().len(), 10 + 1024 + 200);
	}

	#[test_log::test]
	fn empty_tag_deletes() {
		let mut data = b"ID3\x04\x00\x00\x00\x00\x00\x02\x00\x00audio".to_vec();
		let mut v1 = b"TAG".to_vec();
		v1.resize(128, 0);
		data.extend(v1);

		let mut file = Cursor::new(data);
		Id3v2Tag::new().save_to(&mut file, WriteOptions::new()).unwrap();
		assert_eq!(file.into_inner(), b"audio");
	}

	#[test_log::test]
	fn delete_selectively() {
		let mut data = b"ID3\x04\x00\x00\x00\x00\x00\x02\x00\x00audio".to_vec();
		let mut v1 = b"TAG".to_vec();
		v1.resize(128, 0);
		data.extend(v1);

		let mut file = Cursor::new(data.clone());
		delete(&mut file, true, false).unwrap();
		assert_eq!(file.into_inner(), &data[..17]);

		let mut file = Cursor::new(data.clone());
		delete(&mut file, false, true).unwrap();
		assert_eq!(file.into_inner(), &data[12..]);

		let mut file = Cursor::new(b"audio".to_vec());
		delete(&mut file, true, true).unwrap();
		assert_eq!(file.into_inner(), b"audio");
	}
}
