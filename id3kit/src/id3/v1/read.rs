use super::constants::{ID3V1_TAG_MARKER, ID3V1_TAG_SIZE};
use crate::id3::v2::{FieldValue, Frame};
use crate::util::text::{TextEncoding, latin1_decode};

/// The size of a tag with an empty year field
const MIN_TAG_SIZE: usize = ID3V1_TAG_SIZE - 4;

/// Find the start of an ID3v1 tag in the trailing bytes of a file
///
/// This is the first `"TAG"` marker, as long as it leaves enough room for a tag. Some old
/// writers shortened the year field, so a tag may be as small as 124 bytes.
pub(crate) fn find_marker(data: &[u8]) -> Option<usize> {
	let start = data
		.windows(ID3V1_TAG_MARKER.len())
		.position(|window| window == ID3V1_TAG_MARKER)?;

	(MIN_TAG_SIZE..=ID3V1_TAG_SIZE)
		.contains(&(data.len() - start))
		.then_some(start)
}

/// Parse an ID3v1 tag into ID3v2.4 frames
///
/// `data` is expected to be the last 128 bytes of a file. Empty fields produce no frame.
///
/// Returns `None` if there's no tag.
///
/// # Examples
///
/// ```rust
/// use id3kit::id3::v1::parse_id3v1;
///
/// let mut data = b"TAGTitle".to_vec();
/// data.resize(128, 0);
/// data[127] = 17;
///
/// let frames = parse_id3v1(&data).unwrap();
/// let ids = frames.iter().map(|frame| frame.id()).collect::<Vec<_>>();
/// assert_eq!(ids, ["TIT2", "TCON"]);
/// ```
pub fn parse_id3v1(data: &[u8]) -> Option<Vec<Frame>> {
	let data = &data[find_marker(data)?..];

	log::debug!("Found an ID3v1 tag, parsing");

	let year_len = data.len() - MIN_TAG_SIZE;
	let (title, rest) = data[3..].split_at(30);
	let (artist, rest) = rest.split_at(30);
	let (album, rest) = rest.split_at(30);
	let (year, rest) = rest.split_at(year_len);
	let (comment, rest) = rest.split_at(29);
	let (track, genre) = (rest[0], rest[1]);

	let mut frames = Vec::new();
	let mut push = |frame: crate::error::Result<Frame>| match frame {
		Ok(frame) => frames.push(frame),
		Err(e) => log::warn!("Failed to convert ID3v1 field: {e}"),
	};

	for (id, field) in [("TIT2", title), ("TPE1", artist), ("TALB", album), ("TDRC", year)] {
		if let Some(text) = decode_text(field) {
			push(Frame::text(id, TextEncoding::Latin1, [text]));
		}
	}

	if let Some(text) = decode_text(comment) {
		push(Frame::new(
			"COMM",
			[
				("encoding", FieldValue::from(TextEncoding::Latin1)),
				("lang", FieldValue::from("eng")),
				("desc", FieldValue::from("ID3v1 Comment")),
				("text", FieldValue::from(text)),
			],
		));
	}

	// A track of 32 (space) is likely a comment padded with spaces instead of nulls
	if track != 0 && (track != b' ' || comment[28] == 0) {
		push(Frame::text("TRCK", TextEncoding::Latin1, [track.to_string()]));
	}

	if genre != 255 {
		push(Frame::text("TCON", TextEncoding::Latin1, [genre.to_string()]));
	}

	Some(frames)
}

fn decode_text(data: &[u8]) -> Option<String> {
	let end = data.iter().position(|b| *b == 0).unwrap_or(data.len());
	let text = data[..end].trim_ascii();
	if text.is_empty() {
		return None;
	}

	Some(latin1_decode(text))
}
