use super::Id3TimeStamp;
use crate::util::text::TextEncoding;

/// The value of a single frame field
///
/// Which variant a field holds is decided by its [`SpecKind`](super::SpecKind).
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
	/// Bytes, integers, and channel types
	Int(u64),
	/// A text encoding selector
	Encoding(TextEncoding),
	/// Any kind of text (encoded, Latin-1, fixed width)
	Text(String),
	/// An ID3v2.4 timestamp
	TimeStamp(Id3TimeStamp),
	/// A gain or peak
	Float(f64),
	/// Raw bytes
	Binary(Vec<u8>),
	/// A list of values sharing one spec
	List(Vec<FieldValue>),
	/// `(role, person)` pairs
	Pairs(Vec<(String, String)>),
	/// `(text, time)` pairs of synchronized lyrics
	SyncedText(Vec<(String, u32)>),
	/// `(event type, time)` pairs
	Events(Vec<(u8, u32)>),
	/// `(frequency, adjustment)` pairs, sorted by frequency
	Adjustments(Vec<(f64, f64)>),
	/// Seek point indexes
	Indexes(Vec<u16>),
}

impl FieldValue {
	/// The value as an integer
	pub fn as_int(&self) -> Option<u64> {
		match self {
			Self::Int(value) => Some(*value),
			_ => None,
		}
	}

	/// The value as a text encoding
	pub fn as_encoding(&self) -> Option<TextEncoding> {
		match self {
			Self::Encoding(encoding) => Some(*encoding),
			_ => None,
		}
	}

	/// The value as text
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	/// The value as a float
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Self::Float(value) => Some(*value),
			_ => None,
		}
	}

	/// The value as raw bytes
	pub fn as_binary(&self) -> Option<&[u8]> {
		match self {
			Self::Binary(data) => Some(data),
			_ => None,
		}
	}

	/// The value as a list
	pub fn as_list(&self) -> Option<&[FieldValue]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}

	/// The value as `(role, person)` pairs
	pub fn as_pairs(&self) -> Option<&[(String, String)]> {
		match self {
			Self::Pairs(pairs) => Some(pairs),
			_ => None,
		}
	}

	/// The string form of a scalar text value
	///
	/// Timestamps are formatted, everything else that isn't text gives `None`.
	pub fn to_text(&self) -> Option<String> {
		match self {
			Self::Text(text) => Some(text.clone()),
			Self::TimeStamp(stamp) => Some(stamp.text()),
			_ => None,
		}
	}
}

impl From<u8> for FieldValue {
	fn from(value: u8) -> Self {
		Self::Int(u64::from(value))
	}
}

impl From<u32> for FieldValue {
	fn from(value: u32) -> Self {
		Self::Int(u64::from(value))
	}
}

impl From<u64> for FieldValue {
	fn from(value: u64) -> Self {
		Self::Int(value)
	}
}

impl From<f64> for FieldValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<TextEncoding> for FieldValue {
	fn from(value: TextEncoding) -> Self {
		Self::Encoding(value)
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<Id3TimeStamp> for FieldValue {
	fn from(value: Id3TimeStamp) -> Self {
		Self::TimeStamp(value)
	}
}

impl From<Vec<u8>> for FieldValue {
	fn from(value: Vec<u8>) -> Self {
		Self::Binary(value)
	}
}

impl From<&[u8]> for FieldValue {
	fn from(value: &[u8]) -> Self {
		Self::Binary(value.to_vec())
	}
}

impl From<Vec<String>> for FieldValue {
	fn from(value: Vec<String>) -> Self {
		Self::List(value.into_iter().map(Self::Text).collect())
	}
}

impl From<Vec<&str>> for FieldValue {
	fn from(value: Vec<&str>) -> Self {
		Self::List(value.into_iter().map(Self::from).collect())
	}
}

impl From<Vec<(String, String)>> for FieldValue {
	fn from(value: Vec<(String, String)>) -> Self {
		Self::Pairs(value)
	}
}
