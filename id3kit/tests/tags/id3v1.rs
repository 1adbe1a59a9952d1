use crate::util::{AUDIO, contents, frame_v24, id3v1, read_tag, tag, temp_file};

use id3kit::config::{Id3v1Policy, WriteOptions};
use id3kit::id3::v1::{GENRES, parse_id3v1, render_id3v1};
use id3kit::id3::v2::Frame;

#[test_log::test]
fn read_without_id3v2() {
	let mut content = AUDIO.to_vec();
	content.extend(id3v1("Title", "Artist", 7, 17));
	let mut file = temp_file(&content);

	let tag = read_tag(&mut file);
	assert_eq!(tag.version(), (1, 1, 0));
	assert_eq!(
		tag.pprint(),
		"TCON=Rock\nTDRC=1999\nTIT2=Title\nTPE1=Artist\nTRCK=7"
	);
}

#[test_log::test]
fn id3v2_takes_precedence() {
	let mut content = tag(4, 0, &frame_v24(b"TIT2", b"\x00v2 title"));
	content.extend_from_slice(AUDIO);
	content.extend(id3v1("v1 title", "", 0, 255));
	let mut file = temp_file(&content);

	let tag = read_tag(&mut file);
	assert_eq!(tag.version(), (2, 4, 0));
	assert_eq!(tag.pprint(), "TIT2=v2 title");
}

#[test_log::test]
fn upgrade_file_to_id3v2() {
	let mut content = AUDIO.to_vec();
	content.extend(id3v1("Title", "Artist", 7, 17));
	let mut file = temp_file(&content);

	let tag = read_tag(&mut file);
	tag.save_to(&mut file, WriteOptions::new().id3v1(Id3v1Policy::UpdateIfPresent))
		.unwrap();

	let saved = contents(&mut file);
	assert_eq!(&saved[..3], b"ID3");
	assert_eq!(&saved[saved.len() - 128..], render_id3v1(&tag).unwrap().as_slice());

	let reread = read_tag(&mut file);
	assert_eq!(reread.version(), (2, 4, 0));
	assert_eq!(reread.pprint(), tag.pprint());
}

#[test_log::test]
fn every_genre_survives() {
	for (index, genre) in GENRES.iter().enumerate() {
		let mut data = id3v1("", "", 0, index as u8);
		data[93..97].fill(0);

		let frames = parse_id3v1(&data).unwrap();
		assert_eq!(frames.len(), 1);

		let mut tag = id3kit::id3::v2::Id3v2Tag::new();
		for frame in frames {
			tag.add(frame);
		}

		tag.normalize_for_v24();
		assert_eq!(
			tag.get("TCON").map(Frame::genres).unwrap_or_default(),
			[*genre]
		);
		assert_eq!(render_id3v1(&tag).unwrap()[127], index as u8);
	}
}
