
use super::frame::{Frame, normalize_key};
use super::header::{Id3v2Header, Id3v2TagFlags};
use super::read::parse_id3v2;
use super::write;
use crate::config::{ParseOptions, ParsingMode, WriteOptions};
use crate::error::{ErrorKind, Id3Error, Id3v2ErrorKind, Result};
use crate::id3::v1;
use crate::util::io::{FileLike, Length, Truncate};

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// The version an ID3v1 tag is reported as
const ID3V1_VERSION: (u8, u8, u8) = (1, 1, 0);

/// An ID3v2 tag
///
/// Frames are keyed by their [hash key](Frame::hash_key), so a tag holds at most one frame per key.
/// Keys passed to the lookup methods have their discriminators lowercased, `"COMM:Foo:ENG"` and
/// `"COMM:foo:eng"` find the same frame.
///
/// Frames with IDs that aren't in the frame table are kept as raw bytes (header included), see
/// [`Id3v2Tag::unknown_frames`].
///
/// # Examples
///
/// ```rust
/// use id3kit::TextEncoding;
/// use id3kit::id3::v2::{Frame, Id3v2Tag};
///
/// # fn main() -> id3kit::error::Result<()> {
/// let mut tag = Id3v2Tag::new();
/// tag.add(Frame::text("TIT2", TextEncoding::UTF8, ["Foo title"])?);
///
/// // ID3v2.2 frames are upgraded
/// tag.add(Frame::text("TT2", TextEncoding::UTF8, ["Bar title"])?);
///
/// assert_eq!(tag.len(), 1);
/// assert_eq!(
/// 	tag.get("TIT2").and_then(Frame::text_value).as_deref(),
/// 	Some("Bar title")
/// );
/// # Ok(()) }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Id3v2Tag {
	pub(crate) version: (u8, u8, u8),
	pub(crate) flags: Id3v2TagFlags,
	pub(crate) size: u32,
	pub(crate) extended_header: Vec<u8>,
	pub(crate) frames: Vec<(String, Frame)>,
	pub(crate) unknown_frames: Vec<Vec<u8>>,
	/// Whether the unknown frames of an ID3v2.3 tag were rewritten with ID3v2.4 headers
	pub(crate) unknown_frames_upgraded: bool,
	pub(crate) parsing_mode: ParsingMode,
}

impl Default for Id3v2Tag {
	fn default() -> Self {
		Self {
			version: (2, 4, 0),
			flags: Id3v2TagFlags::default(),
			size: 0,
			extended_header: Vec::new(),
			frames: Vec::new(),
			unknown_frames: Vec::new(),
			unknown_frames_upgraded: false,
			parsing_mode: ParsingMode::default(),
		}
	}
}

impl Id3v2Tag {
	/// Create a new empty `Id3v2Tag`
	///
	/// # Examples
	///
	/// ```rust
	/// use id3kit::id3::v2::Id3v2Tag;
	///
	/// let tag = Id3v2Tag::new();
	/// assert!(tag.is_empty());
	/// assert_eq!(tag.version(), (2, 4, 0));
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn from_header(header: &Id3v2Header) -> Self {
		Self {
			version: header.version_triple(),
			flags: header.flags,
			size: header.size,
			extended_header: header.extended_header.clone(),
			..Self::default()
		}
	}

	/// Read a tag from the current position of `reader`
	///
	/// If there's no ID3v2 tag, or its version is unsupported, the last 128 bytes of the stream
	/// are checked for an ID3v1 tag. A tag read from ID3v1 has a [version](Id3v2Tag::version)
	/// of `(1, 1, 0)`.
	///
	/// # Errors
	///
	/// * [`ErrorKind::NoHeader`]: Neither an ID3v2 nor an ID3v1 tag was found
	/// * [`Id3v2ErrorKind::UnsupportedVersion`]: No ID3v1 tag was found either
	/// * The declared tag size is larger than the stream (unless [`ParsingMode::Relaxed`])
	/// * [`ErrorKind::TooMuchData`]: The tag is over the
	///   [allocation limit](crate::config::GlobalOptions::allocation_limit)
	/// * Any fatal frame error, see [`ParsingMode`]
	pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
	{
		let mut tag = match Id3v2Header::parse(reader, parse_options.parsing_mode) {
			Ok(header) => parse_id3v2(reader, &header, parse_options)?,
			Err(err) if falls_back_to_id3v1(&err) => read_id3v1_fallback(reader, err)?,
			Err(err) => return Err(err),
		};

		tag.parsing_mode = parse_options.parsing_mode;
		if parse_options.normalize {
			tag.normalize_for_v24();
		}

		Ok(tag)
	}

	/// Read a tag from the start of the file at `path`
	///
	/// # Errors
	///
	/// * `path` can't be opened
	/// * See [`Id3v2Tag::read_from`]
	pub fn read_from_path<P>(path: P, parse_options: ParseOptions) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let mut file = std::fs::File::open(path)?;
		Self::read_from(&mut file, parse_options)
	}

	/// The version of the tag as it was read, `(2, major, revision)`
	///
	/// This doesn't change after [`Id3v2Tag::normalize_for_v24`], and tags are always written
	/// as ID3v2.4.0.
	pub fn version(&self) -> (u8, u8, u8) {
		self.version
	}

	/// The flags of the tag as it was read
	pub fn flags(&self) -> &Id3v2TagFlags {
		&self.flags
	}

	/// The size of the tag as it was read, excluding the header
	pub fn size(&self) -> u32 {
		self.size
	}

	/// The extended header payload, empty if there was none
	pub fn extended_header(&self) -> &[u8] {
		&self.extended_header
	}

	/// Frames that aren't in the frame table, including their headers
	pub fn unknown_frames(&self) -> &[Vec<u8>] {
		&self.unknown_frames
	}

	pub(crate) fn push_unknown_frame(&mut self, raw: Vec<u8>) {
		self.unknown_frames.push(raw);
	}
}

impl Id3v2Tag {
	fn position(&self, key: &str) -> Option<usize> {
		let key = normalize_key(key);
		self.frames.iter().position(|(k, _)| *k == key)
	}

	/// Get the frame with the hash key `key`
	pub fn get(&self, key: &str) -> Option<&Frame> {
		self.position(key).map(|pos| &self.frames[pos].1)
	}

	/// Get the frame with the hash key `key` mutably
	///
	/// NOTE: Changing a field that makes up the hash key won't move the frame, re-add it
	///       instead.
	pub fn get_mut(&mut self, key: &str) -> Option<&mut Frame> {
		self.position(key).map(|pos| &mut self.frames[pos].1)
	}

	/// Whether there's a frame with the hash key `key`
	pub fn contains(&self, key: &str) -> bool {
		self.position(key).is_some()
	}

	/// Get all frames matching `key`
	///
	/// If a frame has the exact hash key `key`, only it is returned. Otherwise, every frame
	/// whose key starts with `key:` is.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3kit::TextEncoding;
	/// use id3kit::id3::v2::{FieldValue, Frame, Id3v2Tag};
	///
	/// # fn main() -> id3kit::error::Result<()> {
	/// let mut tag = Id3v2Tag::new();
	/// for desc in ["Foo", "Bar"] {
	/// 	tag.add(Frame::new(
	/// 		"TXXX",
	/// 		[
	/// 			("encoding", FieldValue::from(TextEncoding::UTF8)),
	/// 			("desc", FieldValue::from(desc)),
	/// 			("text", FieldValue::from("Baz")),
	/// 		],
	/// 	)?);
	/// }
	///
	/// assert_eq!(tag.get_all("TXXX").len(), 2);
	/// assert_eq!(tag.get_all("TXXX:FOO").len(), 1);
	/// # Ok(()) }
	/// ```
	pub fn get_all(&self, key: &str) -> Vec<&Frame> {
		if let Some(frame) = self.get(key) {
			return vec![frame];
		}

		let prefix = format!("{}:", normalize_key(key));
		self.frames
			.iter()
			.filter(|(k, _)| k.starts_with(&prefix))
			.map(|(_, frame)| frame)
			.collect()
	}

	/// Remove the frame with the hash key `key`
	pub fn remove(&mut self, key: &str) -> Option<Frame> {
		self.position(key).map(|pos| self.frames.remove(pos).1)
	}

	/// Remove all frames matching `key`
	///
	/// This uses the same matching as [`Id3v2Tag::get_all`].
	pub fn remove_all(&mut self, key: &str) -> Vec<Frame> {
		if let Some(frame) = self.remove(key) {
			return vec![frame];
		}

		let prefix = format!("{}:", normalize_key(key));

		let mut removed = Vec::new();
		let mut kept = Vec::with_capacity(self.frames.len());
		for (k, frame) in std::mem::take(&mut self.frames) {
			if k.starts_with(&prefix) {
				removed.push(frame);
			} else {
				kept.push((k, frame));
			}
		}

		self.frames = kept;
		removed
	}

	/// Replace all frames matching `key` with `frames`
	pub fn set_all<I>(&mut self, key: &str, frames: I)
	where
		I: IntoIterator<Item = Frame>,
	{
		self.remove_all(key);
		for frame in frames {
			self.add(frame);
		}
	}

	/// Add a frame
	///
	/// ID3v2.2 frames are upgraded to their ID3v2.4 equivalent, or discarded if they have none.
	/// A frame with the same hash key is replaced in place and returned.
	pub fn add(&mut self, frame: Frame) -> Option<Frame> {
		let id = frame.id();
		let Some(frame) = frame.upgraded() else {
			log::warn!("Discarding `{id}` frame, it has no ID3v2.4 equivalent");
			return None;
		};

		let key = frame.hash_key();
		match self.frames.iter_mut().find(|(k, _)| *k == key) {
			Some((_, existing)) => {
				log::warn!("Replacing existing frame `{key}`");
				Some(std::mem::replace(existing, frame))
			},
			None => {
				self.frames.push((key, frame));
				None
			},
		}
	}

	/// Iterate over all frames, in insertion order
	pub fn iter(&self) -> impl Iterator<Item = &Frame> {
		self.frames.iter().map(|(_, frame)| frame)
	}

	/// Iterate over all hash keys, in insertion order
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.frames.iter().map(|(key, _)| key.as_str())
	}

	/// The number of frames
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Whether the tag has no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// Remove every frame, known and unknown
	pub fn clear(&mut self) {
		self.frames.clear();
		self.unknown_frames.clear();
	}

	/// The [pretty-printed](Frame::pprint) frames, sorted and separated by newlines
	///
	/// # Examples
	///
	/// ```rust
	/// use id3kit::TextEncoding;
	/// use id3kit::id3::v2::{Frame, Id3v2Tag};
	///
	/// # fn main() -> id3kit::error::Result<()> {
	/// let mut tag = Id3v2Tag::new();
	/// tag.add(Frame::text("TPE1", TextEncoding::UTF8, ["Foo", "Bar"])?);
	/// tag.add(Frame::text("TIT2", TextEncoding::UTF8, ["Baz"])?);
	///
	/// assert_eq!(tag.pprint(), "TIT2=Baz\nTPE1=Foo / Bar");
	/// # Ok(()) }
	/// ```
	pub fn pprint(&self) -> String {
		let mut lines = self.iter().map(Frame::pprint).collect::<Vec<_>>();
		lines.sort();
		lines.join("\n")
	}
}

impl Id3v2Tag {
	/// Write the tag to the start of `file`
	///
	/// The tag is always written as ID3v2.4.0. If it fits in the space of the existing tag, the
	/// rest of that space becomes padding. Otherwise, the file is grown, rounding the tag size up
	/// to [`WriteOptions::padding_alignment`].
	///
	/// A tag with no frames to write is removed from the file entirely, along with any ID3v1 tag.
	///
	/// # Errors
	///
	/// * [`std::io::Error`]
	/// * A frame can't be serialized
	/// * The tag is too large for a synchsafe size
	pub fn save_to<F>(&self, file: &mut F, write_options: WriteOptions) -> Result<()>
	where
		F: FileLike,
		Id3Error: From<<F as Truncate>::Error>,
		Id3Error: From<<F as Length>::Error>,
	{
		write::write_id3v2(self, file, write_options)
	}

	/// Write the tag to the file at `path`
	///
	/// # Errors
	///
	/// * `path` can't be opened for reading and writing
	/// * See [`Id3v2Tag::save_to`]
	pub fn save_to_path<P>(&self, path: P, write_options: WriteOptions) -> Result<()>
	where
		P: AsRef<Path>,
	{
		let mut file = OpenOptions::new().read(true).write(true).open(path)?;
		self.save_to(&mut file, write_options)
	}

	/// Remove the tags from `file`, and clear this tag
	///
	/// See [`delete`](crate::id3::v2::delete).
	///
	/// # Errors
	///
	/// * [`std::io::Error`]
	pub fn delete_from<F>(&mut self, file: &mut F, v1: bool, v2: bool) -> Result<()>
	where
		F: FileLike,
		Id3Error: From<<F as Truncate>::Error>,
		Id3Error: From<<F as Length>::Error>,
	{
		write::delete(file, v1, v2)?;
		self.clear();
		Ok(())
	}

	/// Remove the tags from the file at `path`, and clear this tag
	///
	/// # Errors
	///
	/// * `path` can't be opened for reading and writing
	/// * See [`Id3v2Tag::delete_from`]
	pub fn delete_from_path<P>(&mut self, path: P, v1: bool, v2: bool) -> Result<()>
	where
		P: AsRef<Path>,
	{
		let mut file = OpenOptions::new().read(true).write(true).open(path)?;
		self.delete_from(&mut file, v1, v2)
	}
}

fn falls_back_to_id3v1(err: &Id3Error) -> bool {
	matches!(err.kind(), ErrorKind::NoHeader)
		|| matches!(err.id3v2_kind(), Some(Id3v2ErrorKind::UnsupportedVersion(..)))
}

/// Build a tag from the ID3v1 tag at the end of `reader`, or return `err` if there is none
fn read_id3v1_fallback<R>(reader: &mut R, err: Id3Error) -> Result<Id3v2Tag>
where
	R: Read + Seek,
{
	log::debug!("No usable ID3v2 tag ({err}), checking for ID3v1");

	if reader
		.seek(SeekFrom::End(-(v1::ID3V1_TAG_SIZE as i64)))
		.is_err()
	{
		return Err(err);
	}

	let mut data = Vec::with_capacity(v1::ID3V1_TAG_SIZE);
	reader.read_to_end(&mut data)?;

	let Some(frames) = v1::parse_id3v1(&data) else {
		return Err(err);
	};

	let mut tag = Id3v2Tag {
		version: ID3V1_VERSION,
		..Id3v2Tag::default()
	};

	for frame in frames {
		tag.add(frame);
	}

	Ok(tag)
}
