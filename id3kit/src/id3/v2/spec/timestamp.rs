use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Write};
use std::hash::{Hash, Hasher};

const SEPARATORS: [char; 5] = ['-', '-', ' ', ':', ':'];

/// An ID3v2.4 date and time
///
/// The format is `YYYY[-MM[-DD[ HH[:MM[:SS]]]]]`. When parsing, any of `-`, `T`, `:`, `/`, `.`
/// or whitespace may separate the components, and components that aren't numbers end the
/// timestamp.
///
/// Timestamps compare by their formatted text, which orders them chronologically.
///
/// # Examples
///
/// ```rust
/// use id3kit::id3::v2::Id3TimeStamp;
///
/// let stamp = Id3TimeStamp::parse("2004-12-25T10:30");
/// assert_eq!(stamp.year(), Some(2004));
/// assert_eq!(stamp.minute(), Some(30));
/// assert_eq!(stamp.text(), "2004-12-25 10:30");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Id3TimeStamp {
	parts: [Option<u32>; 6],
}

impl Id3TimeStamp {
	/// Parse a timestamp from text
	pub fn parse(text: &str) -> Self {
		let mut parts = [None; 6];

		let mut pieces = split_components(text).into_iter();
		for part in &mut parts {
			// Missing components are absent
			let Some(piece) = pieces.next() else {
				break;
			};

			*part = piece.parse::<u32>().ok();
		}

		Self { parts }
	}

	/// The year
	pub fn year(&self) -> Option<u32> {
		self.component(0)
	}

	/// The month
	pub fn month(&self) -> Option<u32> {
		self.component(1)
	}

	/// The day
	pub fn day(&self) -> Option<u32> {
		self.component(2)
	}

	/// The hour
	pub fn hour(&self) -> Option<u32> {
		self.component(3)
	}

	/// The minute
	pub fn minute(&self) -> Option<u32> {
		self.component(4)
	}

	/// The second
	pub fn second(&self) -> Option<u32> {
		self.component(5)
	}

	// Components after the first absent one are not part of the timestamp
	fn component(&self, index: usize) -> Option<u32> {
		if self.parts[..index].iter().any(Option::is_none) {
			return None;
		}

		self.parts[index]
	}

	/// The formatted timestamp
	pub fn text(&self) -> String {
		let mut text = String::new();
		for (index, part) in self.parts.iter().enumerate() {
			let Some(value) = part else {
				break;
			};

			if index == 0 {
				let _ = write!(text, "{value:04}");
			} else {
				text.push(SEPARATORS[index - 1]);
				let _ = write!(text, "{value:02}");
			}
		}

		text
	}
}

fn split_components(text: &str) -> Vec<&str> {
	let mut pieces = Vec::new();

	let mut start = 0;
	let mut chars = text.char_indices().peekable();
	while let Some((index, c)) = chars.next() {
		if matches!(c, '-' | 'T' | ':' | '/' | '.') {
			pieces.push(&text[start..index]);
			start = index + c.len_utf8();
		} else if c.is_whitespace() {
			pieces.push(&text[start..index]);

			let mut end = index + c.len_utf8();
			while let Some(&(next_index, next)) = chars.peek() {
				if !next.is_whitespace() {
					break;
				}

				end = next_index + next.len_utf8();
				chars.next();
			}

			start = end;
		}
	}

	pieces.push(&text[start..]);
	pieces
}

impl From<&str> for Id3TimeStamp {
	fn from(value: &str) -> Self {
		Self::parse(value)
	}
}

impl Display for Id3TimeStamp {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.text())
	}
}

impl PartialEq for Id3TimeStamp {
	fn eq(&self, other: &Self) -> bool {
		self.text() == other.text()
	}
}

impl Eq for Id3TimeStamp {}

impl PartialOrd for Id3TimeStamp {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Id3TimeStamp {
	fn cmp(&self, other: &Self) -> Ordering {
		self.text().cmp(&other.text())
	}
}

impl Hash for Id3TimeStamp {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.text().hash(state);
	}
}
