use crate::util::{AUDIO, frame_v22, frame_v23, frame_v24, read_tag, tag, temp_file};

use id3kit::TextEncoding;
use id3kit::config::{ParseOptions, ParsingMode};
use id3kit::error::{ErrorKind, Id3v2ErrorKind};
use id3kit::id3::v2::util::unsynch;
use id3kit::id3::v2::{FieldValue, Frame, Id3v2Tag, Id3v2Version, probe};

use std::io::{Cursor, Seek as _};

fn file_with(tag_bytes: &[u8]) -> std::fs::File {
	let mut content = tag_bytes.to_vec();
	content.extend_from_slice(AUDIO);
	temp_file(&content)
}

#[test_log::test]
fn empty_v24_tag() {
	let mut file = file_with(&tag(4, 0, &[0; 10]));

	let tag = read_tag(&mut file);
	assert!(tag.is_empty());
	assert_eq!(tag.version(), (2, 4, 0));
}

#[test_log::test]
fn latin1_title() {
	let mut file = file_with(&tag(4, 0, &frame_v24(b"TIT2", b"\x00ab")));

	let tag = read_tag(&mut file);
	let title = tag.get("TIT2").unwrap();
	assert_eq!(title.text_value().as_deref(), Some("ab"));
	assert_eq!(title.field("encoding"), Some(&FieldValue::Encoding(TextEncoding::Latin1)));
}

#[test_log::test]
fn invalid_unsynch_data() {
	let err = unsynch::decode(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap_err();
	assert!(matches!(err.id3v2_kind(), Some(Id3v2ErrorKind::BadUnsynchData(_))));
}

#[test_log::test]
fn v22_tag() {
	let mut body = frame_v22(b"TT2", b"\x00Title");
	body.extend(frame_v22(b"TYE", b"\x002004"));
	body.extend(frame_v22(b"PIC", b"\x00PNG\x03\x00data"));
	body.extend(frame_v22(b"LNK", b"TT2http://example.com\x00"));
	body.extend_from_slice(&[0; 16]);

	let mut file = file_with(&tag(2, 0, &body));
	let tag = read_tag(&mut file);

	assert_eq!(tag.version(), (2, 2, 0));
	assert_eq!(
		tag.pprint(),
		"APIC= (image/png, 4 bytes)\nTDRC=2004\nTIT2=Title"
	);
	assert!(tag.keys().all(|key| key.len() >= 4));
}

#[test_log::test]
fn v23_tag() {
	let mut body = frame_v23(b"TIT2", 0, b"\x01\xFF\xFEa\x00b\x00");
	body.extend(frame_v23(b"TPE1", 0, b"\x00Foo/Bar"));
	body.extend(frame_v23(b"TYER", 0, b"\x002004"));
	body.extend(frame_v23(b"TDAT", 0, b"\x002512"));
	body.extend(frame_v23(b"TIME", 0, b"\x001330"));
	body.extend(frame_v23(b"TCON", 0, b"\x00(17)(RX)Pop Rock"));
	body.extend(frame_v23(b"IPLS", 0, b"\x00Producer\x00Foo\x00"));
	body.extend_from_slice(&[0; 32]);

	let mut file = file_with(&tag(3, 0, &body));
	let tag = read_tag(&mut file);

	assert_eq!(tag.version(), (2, 3, 0));
	assert_eq!(
		tag.pprint(),
		"TCON=Rock / Remix / Pop Rock\nTDRC=2004-12-25 13:30:00\nTIPL=Producer=Foo\nTIT2=ab\nTPE1=Foo/Bar"
	);
}

#[test_log::test]
fn v23_unsynchronised_tag() {
	let body = frame_v23(b"TIT2", 0, b"\x00\xFF\xE0");
	let encoded = unsynch::encode(&body);
	assert_ne!(encoded, body);

	let mut file = file_with(&tag(3, 0x80, &encoded));
	let tag = read_tag(&mut file);

	assert!(tag.flags().unsynchronisation);
	assert_eq!(
		tag.get("TIT2").and_then(Frame::text_value).as_deref(),
		Some("\u{FF}\u{E0}")
	);
}

#[test_log::test]
fn itunes_frame_sizes() {
	// A 200 byte frame, with its size written as a plain integer
	let mut content = vec![0];
	content.resize(200, b'a');

	let mut body = b"TIT2".to_vec();
	body.extend_from_slice(&200_u32.to_be_bytes());
	body.extend_from_slice(&[0, 0]);
	body.extend_from_slice(&content);
	body.extend(frame_v24(b"TPE1", b"\x00Artist"));

	let mut file = file_with(&tag(4, 0, &body));
	let tag = read_tag(&mut file);

	assert_eq!(tag.get("TIT2").and_then(Frame::text_value).map(|t| t.len()), Some(199));
	assert_eq!(tag.get("TPE1").and_then(Frame::text_value).as_deref(), Some("Artist"));
}

#[test_log::test]
fn broken_frames_in_strict_mode() {
	// The frame claims to be unsynchronised, but isn't
	let mut body = b"TIT2".to_vec();
	body.extend_from_slice(&[0, 0, 0, 3, 0, 0x02]);
	body.extend_from_slice(b"\x00\xFF\xFF");
	body.extend(frame_v24(b"TPE1", b"\x00Artist"));

	let data = tag(4, 0, &body);

	let tag = Id3v2Tag::read_from(&mut Cursor::new(&data), ParseOptions::new()).unwrap();
	assert_eq!(tag.keys().collect::<Vec<_>>(), ["TPE1"]);

	let err = Id3v2Tag::read_from(
		&mut Cursor::new(&data),
		ParseOptions::new().parsing_mode(ParsingMode::Strict),
	)
	.unwrap_err();
	assert!(matches!(err.id3v2_kind(), Some(Id3v2ErrorKind::BadUnsynchData(_))));
}

#[test_log::test]
fn truncated_tag() {
	let mut data = tag(4, 0, &frame_v24(b"TIT2", b"\x00ab"));
	data.truncate(data.len() - 1);

	let err = Id3v2Tag::read_from(&mut Cursor::new(&data), ParseOptions::new()).unwrap_err();
	assert!(err.is_eof());
}

#[test_log::test]
fn probe_leaves_reader_at_frames() {
	let mut file = file_with(&tag(3, 0, &frame_v23(b"TIT2", 0, b"\x00ab")));

	let header = probe(&mut file).unwrap().unwrap();
	assert_eq!(header.version, Id3v2Version::V3);
	assert_eq!(header.full_tag_size(), 23);
	assert_eq!(file.stream_position().unwrap(), 10);

	let mut file = temp_file(AUDIO);
	assert!(probe(&mut file).unwrap().is_none());
	assert_eq!(file.stream_position().unwrap(), 0);
}

#[test_log::test]
fn missing_tag() {
	let mut file = temp_file(AUDIO);
	let err = Id3v2Tag::read_from(&mut file, ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::NoHeader));
}
