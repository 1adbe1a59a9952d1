use id3kit::config::ParseOptions;
use id3kit::id3::v2::Id3v2Tag;

use std::fs::File;
use std::io::{Read as _, Seek as _, Write as _};

/// Audio that the tags are placed around
pub const AUDIO: &[u8] = b"\xFF\xFBaudio frames";

/// Create a new temporary file holding `content`
pub fn temp_file(content: &[u8]) -> File {
	let mut file = tempfile::tempfile().unwrap();
	file.write_all(content).unwrap();
	file.rewind().unwrap();

	file
}

/// The full contents of `file`
pub fn contents(file: &mut File) -> Vec<u8> {
	file.rewind().unwrap();

	let mut content = Vec::new();
	file.read_to_end(&mut content).unwrap();
	content
}

/// Read a tag from the start of `file`
pub fn read_tag(file: &mut File) -> Id3v2Tag {
	file.rewind().unwrap();
	Id3v2Tag::read_from(file, ParseOptions::new()).unwrap()
}

/// An ID3v2.4 frame, `content` is expected to be under 128 bytes
pub fn frame_v24(id: &[u8; 4], content: &[u8]) -> Vec<u8> {
	assert!(content.len() < 128);

	let mut out = id.to_vec();
	out.extend_from_slice(&[0, 0, 0, content.len() as u8, 0, 0]);
	out.extend_from_slice(content);
	out
}

/// An ID3v2.3 frame, with a plain size
pub fn frame_v23(id: &[u8; 4], flags: u16, content: &[u8]) -> Vec<u8> {
	let mut out = id.to_vec();
	out.extend_from_slice(&(content.len() as u32).to_be_bytes());
	out.extend_from_slice(&flags.to_be_bytes());
	out.extend_from_slice(content);
	out
}

/// An ID3v2.2 frame
pub fn frame_v22(id: &[u8; 3], content: &[u8]) -> Vec<u8> {
	let mut out = id.to_vec();
	out.extend_from_slice(&(content.len() as u32).to_be_bytes()[1..]);
	out.extend_from_slice(content);
	out
}

/// A tag header followed by `body`
pub fn tag(major: u8, flags: u8, body: &[u8]) -> Vec<u8> {
	let size = body.len() as u32;
	assert!(size < 1 << 28);

	let mut out = vec![b'I', b'D', b'3', major, 0, flags];
	out.extend_from_slice(&[
		(size >> 21) as u8 & 0x7F,
		(size >> 14) as u8 & 0x7F,
		(size >> 7) as u8 & 0x7F,
		size as u8 & 0x7F,
	]);
	out.extend_from_slice(body);
	out
}

/// A 128 byte ID3v1 tag
pub fn id3v1(title: &str, artist: &str, track: u8, genre: u8) -> Vec<u8> {
	let mut out = b"TAG".to_vec();
	for (value, len) in [(title, 30), (artist, 30), ("", 30), ("1999", 4), ("", 30)] {
		let start = out.len();
		out.extend_from_slice(value.as_bytes());
		out.resize(start + len, 0);
	}

	out[126] = track;
	out.push(genre);
	out
}
