use super::frame::read::{FrameContext, decode_content};
use super::frame::{Frame, parse_header};
use super::header::Id3v2Version;
use super::tag::Id3v2Tag;
use super::write::frame_bytes;
use crate::config::ParsingMode;
use crate::id3::v2::FieldValue;
use crate::util::text::TextEncoding;

/// Frames with no ID3v2.4 equivalent
const OBSOLETE_FRAMES: [&str; 6] = ["RVAD", "EQUA", "TRDA", "TSIZ", "TDAT", "TIME"];

impl Id3v2Tag {
	/// Convert the frames of an older tag to their ID3v2.4 equivalents
	///
	/// This is done by default when reading, see [`ParseOptions::normalize`](crate::config::ParseOptions::normalize).
	///
	/// * `TYER`, `TDAT` and `TIME` are merged into `TDRC`
	/// * `TORY` becomes `TDOR`
	/// * `IPLS` becomes `TIPL`
	/// * `TCON` values are replaced by their decoded genres (`"(17)"` becomes `"Rock"`)
	/// * ID3v2.2 `PIC` image formats become MIME types, and `LINK` frames are dropped
	/// * Frames with no ID3v2.4 equivalent are dropped
	///
	/// Frames that already exist in their ID3v2.4 form are never overwritten. Unknown frames
	/// of ID3v2.2 (and ID3v1) tags are dropped, since their headers can't be written to an
	/// ID3v2.4 tag.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3kit::TextEncoding;
	/// use id3kit::id3::v2::{Frame, Id3v2Tag};
	///
	/// # fn main() -> id3kit::error::Result<()> {
	/// let mut tag = Id3v2Tag::new();
	/// tag.add(Frame::text("TYER", TextEncoding::Latin1, ["2004"])?);
	/// tag.add(Frame::text("TDAT", TextEncoding::Latin1, ["2512"])?);
	///
	/// tag.normalize_for_v24();
	///
	/// assert!(!tag.contains("TYER"));
	/// assert_eq!(
	/// 	tag.get("TDRC").and_then(Frame::text_value).as_deref(),
	/// 	Some("2004-12-25")
	/// );
	/// # Ok(()) }
	/// ```
	pub fn normalize_for_v24(&mut self) {
		if self.version < (2, 3, 0) {
			self.unknown_frames.clear();
		}

		if self.version == (2, 3, 0) && !self.unknown_frames_upgraded {
			self.upgrade_unknown_frames();
		}

		self.merge_recording_time();

		if let Some(original_year) = self.remove("TORY") {
			if !self.contains("TDOR") {
				let year = original_year.text_value().unwrap_or_default();
				self.add_text("TDOR", TextEncoding::Latin1, year);
			}
		}

		if let Some(involved_people) = self.remove("IPLS") {
			if !self.contains("TIPL") {
				match Frame::new("TIPL", involved_people.fields().iter().cloned()) {
					Ok(frame) => {
						self.add(frame);
					},
					Err(e) => log::debug!("Failed to convert IPLS frame: {e}"),
				}
			}
		}

		if let Some(genre) = self.get_mut("TCON") {
			let genres = genre.genres();
			if let Err(e) = genre.set_genres(genres) {
				log::debug!("Failed to replace TCON genres: {e}");
			}
		}

		if self.version < (2, 3, 0) {
			let pictures = self
				.frames
				.iter_mut()
				.map(|(_, frame)| frame)
				.filter(|frame| frame.id() == "APIC");
			for picture in pictures {
				let mime = match picture.field("mime").and_then(FieldValue::as_text) {
					Some("PNG") => "image/png",
					Some("JPG") => "image/jpeg",
					_ => continue,
				};

				if let Err(e) = picture.set_field("mime", FieldValue::from(mime)) {
					log::debug!("Failed to replace picture format: {e}");
				}
			}

			self.remove_all("LINK");
		}

		for id in OBSOLETE_FRAMES {
			self.remove_all(id);
		}
	}

	/// Merge `TYER`, `TDAT` and `TIME` into a `TDRC` timestamp
	fn merge_recording_time(&mut self) {
		let Some(year) = self.take_text("TYER") else {
			return;
		};

		let mut timestamp = year;
		if let Some(date) = self.take_text("TDAT") {
			// DDMM
			let (day, month) = split_pair(&date);
			timestamp.push_str(&format!("-{month}-{day}"));

			if let Some(time) = self.take_text("TIME") {
				// HHMM
				let (hour, minute) = split_pair(&time);
				timestamp.push_str(&format!("T{hour}:{minute}:00"));
			}
		}

		if !self.contains("TDRC") {
			self.add_text("TDRC", TextEncoding::Latin1, timestamp);
		}
	}

	/// Remove a frame, returning its string form if it's not empty
	fn take_text(&mut self, key: &str) -> Option<String> {
		let text = self
			.get(key)
			.and_then(Frame::text_value)
			.filter(|text| !text.is_empty())?;

		self.remove(key);
		Some(text)
	}

	fn add_text(&mut self, id: &str, encoding: TextEncoding, text: String) {
		match Frame::text(id, encoding, text.split('\0')) {
			Ok(frame) => {
				self.add(frame);
			},
			Err(e) => log::debug!("Failed to create {id} frame: {e}"),
		}
	}

	/// Rewrite the unknown frames of an ID3v2.3 tag with ID3v2.4 headers
	///
	/// Frames that can't be decoded (compressed or encrypted) are dropped.
	fn upgrade_unknown_frames(&mut self) {
		let context = FrameContext {
			version: Id3v2Version::V3,
			unsynchronisation: false,
			parsing_mode: ParsingMode::BestAttempt,
		};

		let mut upgraded = Vec::with_capacity(self.unknown_frames.len());
		for raw in &self.unknown_frames {
			let Some(header) = parse_header(raw, false) else {
				continue;
			};

			let id = header.id_str();
			let content = match decode_content(context, header.flags, &raw[header.len..]) {
				Ok(content) => content,
				Err(e) => {
					log::debug!("Dropping unknown frame `{id}`: {e}");
					continue;
				},
			};

			match frame_bytes(&id, &content) {
				Ok(frame) => upgraded.push(frame),
				Err(e) => log::debug!("Dropping unknown frame `{id}`: {e}"),
			}
		}

		self.unknown_frames = upgraded;
		self.unknown_frames_upgraded = true;
	}
}

/// Split a 4 character `DDMM`/`HHMM` value into its halves
fn split_pair(value: &str) -> (String, String) {
	let chars = value.chars().collect::<Vec<_>>();
	let split = chars.len().min(2);

	let first = chars[..split].iter().collect();
	let second = chars[split..].iter().collect();
	(first, second)
}
