use super::constants::{GENRES, ID3V1_TAG_MARKER, ID3V1_TAG_SIZE};
use crate::error::Result;
use crate::id3::v2::{FieldValue, Frame, Id3v2Tag};
use crate::util::text::latin1_encode;

use std::io::{Cursor, Write};

use byteorder::WriteBytesExt;

/// Render the ID3v1 equivalent of an ID3v2 tag
///
/// Text is encoded as Latin-1, with unrepresentable characters replaced by `?`, and
/// cut to fit its field. Missing fields are zeroed, and a missing or non-standard genre is
/// written as `255`.
///
/// # Errors
///
/// Writing to the buffer fails
///
/// # Examples
///
/// ```rust
/// use id3kit::TextEncoding;
/// use id3kit::id3::v1::render_id3v1;
/// use id3kit::id3::v2::{Frame, Id3v2Tag};
///
/// # fn main() -> id3kit::error::Result<()> {
/// let mut tag = Id3v2Tag::new();
/// tag.add(Frame::text("TIT2", TextEncoding::UTF8, ["Title"])?);
///
/// let rendered = render_id3v1(&tag)?;
/// assert_eq!(rendered.len(), 128);
/// assert_eq!(&rendered[..8], b"TAGTitle");
/// assert_eq!(rendered[127], 255);
/// # Ok(()) }
/// ```
pub fn render_id3v1(tag: &Id3v2Tag) -> Result<Vec<u8>> {
	let mut writer = Vec::with_capacity(ID3V1_TAG_SIZE);
	writer.write_all(&ID3V1_TAG_MARKER)?;

	for id in ["TIT2", "TPE1", "TALB"] {
		let value = tag.get(id).and_then(first_text);
		writer.write_all(&resize_string(value.as_deref(), 30)?)?;
	}

	let year = tag
		.get("TDRC")
		.or_else(|| tag.get("TYER"))
		.and_then(Frame::text_value);
	writer.write_all(&resize_string(year.as_deref(), 4)?)?;

	let comment = tag
		.get_all("COMM")
		.first()
		.and_then(|frame| frame.field("text"))
		.and_then(FieldValue::as_list)
		.and_then(|values| values.first())
		.and_then(FieldValue::to_text);
	writer.write_all(&resize_string(comment.as_deref(), 28)?)?;
	writer.write_u8(0)?;

	let track = tag
		.get("TRCK")
		.and_then(Frame::numeric_value)
		.and_then(|track| u8::try_from(track).ok())
		.unwrap_or(0);
	writer.write_u8(track)?;

	let genre = tag
		.get("TCON")
		.and_then(|frame| frame.genres().into_iter().next())
		.and_then(|genre| GENRES.iter().position(|known| *known == genre))
		.and_then(|index| u8::try_from(index).ok())
		.unwrap_or(255);
	writer.write_u8(genre)?;

	Ok(writer)
}

fn first_text(frame: &Frame) -> Option<String> {
	frame.text_values().into_iter().next()
}

fn resize_string(value: Option<&str>, size: usize) -> Result<Vec<u8>> {
	let mut cursor = Cursor::new(vec![0; size]);

	if let Some(value) = value {
		for b in latin1_encode(value, true).take(size) {
			cursor.write_u8(b?)?;
		}
	}

	Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
	use super::render_id3v1;
	use crate::TextEncoding;
	use crate::id3::v1::parse_id3v1;
	use crate::id3::v2::{FieldValue, Frame, Id3v2Tag};

	fn text(id: &str, value: &str) -> Frame {
		Frame::text(id, TextEncoding::UTF8, [value]).unwrap()
	}

	#[test_log::test]
	fn empty_tag() {
		let rendered = render_id3v1(&Id3v2Tag::new()).unwrap();

		let mut expected = b"TAG".to_vec();
		expected.resize(127, 0);
		expected.push(255);
		assert_eq!(rendered, expected);
	}

	#[test_log::test]
	fn full_tag() {
		let mut tag = Id3v2Tag::new();
		tag.add(text("TIT2", "Title"));
		tag.add(text("TPE1", "Artist"));
		tag.add(text("TALB", "Album"));
		tag.add(text("TDRC", "2004-12-25"));
		tag.add(text("TRCK", "3/12"));
		tag.add(text("TCON", "Rock"));
		tag.add(
			Frame::new(
				"COMM",
				[
					("encoding", FieldValue::from(TextEncoding::UTF8)),
					("lang", FieldValue::from("eng")),
					("desc", FieldValue::from("")),
					("text", FieldValue::from("Comment")),
				],
			)
			.unwrap(),
		);

		let rendered = render_id3v1(&tag).unwrap();
		assert_eq!(rendered.len(), 128);
		assert_eq!(&rendered[93..97], b"2004");
		assert_eq!(rendered[125], 0);
		assert_eq!(rendered[126], 3);
		assert_eq!(rendered[127], 17);

		let pprint = parse_id3v1(&rendered)
			.unwrap()
			.iter()
			.map(Frame::pprint)
			.collect::<Vec<_>>();
		assert_eq!(
			pprint,
			[
				"TIT2=Title",
				"TPE1=Artist",
				"TALB=Album",
				"TDRC=2004",
				"COMM=ID3v1 Comment=eng=Comment",
				"TRCK=3",
				"TCON=17",
			]
		);
	}

	#[test_log::test]
	fn long_and_unrepresentable_text() {
		let mut tag = Id3v2Tag::new();
		tag.add(text("TIT2", &"a".repeat(40)));
		tag.add(text("TPE1", "Bj\u{f6}rk \u{2603}"));

		let rendered = render_id3v1(&tag).unwrap();
		assert_eq!(&rendered[3..33], "a".repeat(30).as_bytes());
		assert_eq!(&rendered[33..41], b"Bj\xf6rk ?\0");
	}

	#[test_log::test]
	fn out_of_range_values() {
		let mut tag = Id3v2Tag::new();
		tag.add(text("TRCK", "300"));
		tag.add(text("TCON", "Not A Genre"));
		tag.add(text("TYER", "1999"));

		let rendered = render_id3v1(&tag).unwrap();
		assert_eq!(&rendered[93..97], b"1999");
		assert_eq!(rendered[126], 0);
		assert_eq!(rendered[127], 255);
	}
}
