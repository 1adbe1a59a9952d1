//! `TCON` genre decoding
//!
//! Genres are stored in one of a few shapes:
//!
//! * A bare ID3v1 genre index (`"17"`)
//! * `CR` (Cover) or `RX` (Remix)
//! * One or more parenthesized indexes, optionally followed by a refinement (`"(17)(RX)Pop Rock"`)
//! * A plain label, where a leading `((` escapes a literal parenthesis

use crate::id3::v1::GENRES;

const COVER: &str = "Cover";
const REMIX: &str = "Remix";
const UNKNOWN: &str = "Unknown";

fn is_index(value: &str) -> bool {
	!value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn genre_name(index: &str) -> &'static str {
	match index.parse::<usize>() {
		Ok(index) => GENRES.get(index).copied().unwrap_or(UNKNOWN),
		Err(_) => UNKNOWN,
	}
}

/// Split the leading `(id)` groups off of `value`
fn split_ids(value: &str) -> (Vec<&str>, &str) {
	let mut ids = Vec::new();

	let mut rest = value;
	while let Some(inner) = rest.strip_prefix('(') {
		let Some(end) = inner.find(')') else {
			break;
		};

		let id = &inner[..end];
		if !(is_index(id) || id == "CR" || id == "RX") {
			break;
		}

		ids.push(id);
		rest = &inner[end + 1..];
	}

	(ids, rest)
}

/// Decode the genres held in the text values of a `TCON` frame
pub(crate) fn decode_genres<'a, I>(values: I) -> Vec<String>
where
	I: IntoIterator<Item = &'a str>,
{
	let mut genres = Vec::new();

	for value in values {
		if is_index(value) {
			genres.push(genre_name(value).to_owned());
			continue;
		}

		match value {
			"" => {},
			"CR" => genres.push(COVER.to_owned()),
			"RX" => genres.push(REMIX.to_owned()),
			_ => {
				let (ids, label) = split_ids(value);

				let mut decoded = Vec::with_capacity(ids.len() + 1);
				for id in ids {
					let name = match id {
						"CR" => COVER,
						"RX" => REMIX,
						_ => genre_name(id),
					};

					decoded.push(name.to_owned());
				}

				if !label.is_empty() {
					let label = if label.starts_with("((") {
						&label[1..]
					} else {
						label
					};

					if !decoded.iter().any(|genre| genre == label) {
						decoded.push(label.to_owned());
					}
				}

				genres.extend(decoded);
			},
		}
	}

	genres
}
