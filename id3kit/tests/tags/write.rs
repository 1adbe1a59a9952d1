use crate::util::{AUDIO, contents, frame_v23, id3v1, read_tag, tag, temp_file};

use id3kit::TextEncoding;
use id3kit::config::{Id3v1Policy, ParseOptions, ParsingMode, WriteOptions};
use id3kit::id3::v2::{FieldValue, Frame, Id3v2Tag, delete};

use std::io::Cursor;

fn title(value: &str) -> Frame {
	Frame::text("TIT2", TextEncoding::UTF8, [value]).unwrap()
}

fn comment(desc: &str, text: &str) -> Frame {
	Frame::new(
		"COMM",
		[
			("encoding", FieldValue::from(TextEncoding::UTF16)),
			("lang", FieldValue::from("eng")),
			("desc", FieldValue::from(desc)),
			("text", FieldValue::from(text)),
		],
	)
	.unwrap()
}

#[test_log::test]
fn save_to_untagged_file() {
	let mut file = temp_file(AUDIO);

	let mut tag = Id3v2Tag::new();
	tag.add(title("Title"));
	tag.add(comment("Desc", "Comment"));
	tag.save_to(&mut file, WriteOptions::default()).unwrap();

	let content = contents(&mut file);
	assert_eq!(&content[..5], b"ID3\x04\x00");
	assert!(content.ends_with(AUDIO));

	let read = read_tag(&mut file);
	assert_eq!(read.version(), (2, 4, 0));
	assert_eq!(read.pprint(), tag.pprint());
}

#[test_log::test]
fn save_reuses_existing_padding() {
	let mut original = tag(3, 0, &frame_v23(b"TIT2", 0, b"\x00Title"));
	original.resize(original.len() + 500, 0);
	// Fix the declared size to include the padding
	original[8] = ((original.len() - 10) >> 7) as u8;
	original[9] = ((original.len() - 10) & 0x7F) as u8;

	let tag_len = original.len();
	original.extend_from_slice(AUDIO);
	let mut file = temp_file(&original);

	let mut tag = read_tag(&mut file);
	tag.add(Frame::text("TPE1", TextEncoding::Latin1, ["Artist"]).unwrap());
	tag.save_to(&mut file, WriteOptions::default()).unwrap();

	let content = contents(&mut file);
	assert_eq!(content.len(), tag_len + AUDIO.len());
	assert_eq!(&content[3..5], b"\x04\x00");
	assert_eq!(read_tag(&mut file).pprint(), "TIT2=Title\nTPE1=Artist");
}

#[test_log::test]
fn save_grows_file() {
	let mut original = tag(4, 0, &[0; 20]);
	original.extend_from_slice(AUDIO);
	let mut file = temp_file(&original);

	let mut tag = Id3v2Tag::new();
	tag.add(title(&"a".repeat(100)));
	tag.save_to(&mut file, WriteOptions::new().padding_alignment(256)).unwrap();

	let content = contents(&mut file);
	assert_eq!(content.len(), 10 + 256 + AUDIO.len());
	assert!(content.ends_with(AUDIO));
}

#[test_log::test]
fn empty_tag_removes_everything() {
	let mut original = tag(4, 0, &[0; 20]);
	original.extend_from_slice(AUDIO);
	original.extend(id3v1("Title", "Artist", 1, 0));
	let mut file = temp_file(&original);

	Id3v2Tag::new()
		.save_to(&mut file, WriteOptions::default())
		.unwrap();
	assert_eq!(contents(&mut file), AUDIO);

	// Nothing to remove
	Id3v2Tag::new()
		.save_to(&mut file, WriteOptions::default())
		.unwrap();
	assert_eq!(contents(&mut file), AUDIO);
}

#[test_log::test]
fn id3v1_policies() {
	let mut tag = Id3v2Tag::new();
	tag.add(title("Title"));

	let mut file = temp_file(AUDIO);

	tag.save_to(&mut file, WriteOptions::new().id3v1(Id3v1Policy::UpdateIfPresent))
		.unwrap();
	let content = contents(&mut file);
	assert!(content.ends_with(AUDIO));

	tag.save_to(&mut file, WriteOptions::new().id3v1(Id3v1Policy::Create))
		.unwrap();
	let content = contents(&mut file);
	let trailer = &content[content.len() - 128..];
	assert_eq!(&trailer[..8], b"TAGTitle");

	tag.add(title("New title"));
	tag.save_to(&mut file, WriteOptions::new().id3v1(Id3v1Policy::UpdateIfPresent))
		.unwrap();
	let updated = contents(&mut file);
	assert_eq!(updated.len(), content.len());
	assert_eq!(&updated[updated.len() - 125..updated.len() - 116], b"New title");

	tag.save_to(&mut file, WriteOptions::new().id3v1(Id3v1Policy::Remove))
		.unwrap();
	assert!(contents(&mut file).ends_with(AUDIO));
}

#[test_log::test]
fn strict_mode_skips_empty_text() {
	let mut tag = Id3v2Tag::new();
	tag.add(title("Title"));
	tag.add(Frame::text("TPE1", TextEncoding::Latin1, [""]).unwrap());

	let mut file = temp_file(AUDIO);
	tag.save_to(&mut file, WriteOptions::default()).unwrap();
	assert!(read_tag(&mut file).contains("TPE1"));

	// The parsing mode is remembered from reading
	file = temp_file(&contents(&mut file));
	let strict = Id3v2Tag::read_from(
		&mut file,
		ParseOptions::new().parsing_mode(ParsingMode::Strict),
	)
	.unwrap();
	strict.save_to(&mut file, WriteOptions::default()).unwrap();
	assert!(!read_tag(&mut file).contains("TPE1"));
}

#[test_log::test]
fn delete_tags() {
	let mut original = tag(4, 0, &[0; 20]);
	original.extend_from_slice(AUDIO);
	original.extend(id3v1("Title", "Artist", 1, 0));

	let mut file = Cursor::new(original.clone());
	delete(&mut file, true, false).unwrap();
	assert_eq!(file.get_ref()[..30], original[..30]);
	assert!(file.get_ref().ends_with(AUDIO));

	let mut file = Cursor::new(original.clone());
	delete(&mut file, false, true).unwrap();
	assert!(file.get_ref().starts_with(AUDIO));
	assert_eq!(file.get_ref().len(), AUDIO.len() + 128);

	let mut tag = Id3v2Tag::new();
	tag.add(title("Title"));

	let mut file = temp_file(&original);
	tag.delete_from(&mut file, true, true).unwrap();
	assert!(tag.is_empty());
	assert_eq!(contents(&mut file), AUDIO);
}

#[test_log::test]
fn path_round_trip() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("song.mp3");
	std::fs::write(&path, AUDIO).unwrap();

	let mut tag = Id3v2Tag::new();
	tag.add(title("Title"));
	tag.save_to_path(&path, WriteOptions::default()).unwrap();

	let mut read = Id3v2Tag::read_from_path(&path, ParseOptions::new()).unwrap();
	assert_eq!(read.pprint(), "TIT2=Title");

	read.delete_from_path(&path, true, true).unwrap();
	assert_eq!(std::fs::read(&path).unwrap(), AUDIO);
}
