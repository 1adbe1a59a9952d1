//! ID3 tags
//!
//! An ID3v2 tag lives at the start of a file, and an ID3v1 tag in its last 128 bytes.
//! Everything is read into, and written from, an [`Id3v2Tag`](v2::Id3v2Tag).

pub mod v1;
pub mod v2;

use crate::error::Result;
use v1::ID3V1_TAG_SIZE;

use std::io::{Read, Seek, SeekFrom};

/// Locate an ID3v1 tag, returning its offset from the start of the stream
pub(crate) fn find_id3v1<R>(data: &mut R) -> Result<Option<u64>>
where
	R: Read + Seek,
{
	log::debug!("Searching for an ID3v1 tag");

	// Too small for a tag
	let Ok(start) = data.seek(SeekFrom::End(-(ID3V1_TAG_SIZE as i64))) else {
		return Ok(None);
	};

	let mut trailer = Vec::with_capacity(ID3V1_TAG_SIZE);
	data.by_ref()
		.take(ID3V1_TAG_SIZE as u64)
		.read_to_end(&mut trailer)?;

	let found = v1::find_marker(&trailer).map(|offset| start + offset as u64);
	if let Some(offset) = found {
		log::debug!("Found an ID3v1 tag at offset {offset}");
	}

	Ok(found)
}
