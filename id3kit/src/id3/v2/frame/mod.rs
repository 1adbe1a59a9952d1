mod genre;
mod header;
mod kinds;
pub(crate) mod read;

pub use header::{FrameFlags, is_valid_frame_id};
pub(crate) use header::{RawFrameHeader, parse_header, parse_v2_header};
pub use kinds::{FrameCategory, FrameKind, FrameTable, HashKeyRule};

use crate::error::{Id3Error, Id3v2ErrorKind, Result};
use crate::id3::v2::spec::{self, FieldValue, Fields};
use crate::macros::id3v2_err;
use crate::util::text::{TextEncoding, latin1_decode};

use std::fmt::Write as _;

/// A single ID3v2 frame
///
/// A frame is a [`FrameKind`] along with the values of its fields, in the order they appear
/// on the wire. Every value has been validated against its field's spec, so a frame can always
/// be serialized (as long as its text fits the frame's encoding).
///
/// # Examples
///
/// ```rust
/// use id3kit::TextEncoding;
/// use id3kit::id3::v2::{FieldValue, Frame};
///
/// # fn main() -> id3kit::error::Result<()> {
/// let title = Frame::text("TIT2", TextEncoding::UTF8, ["Foo"])?;
/// assert_eq!(title.hash_key(), "TIT2");
/// assert_eq!(title.text_value().as_deref(), Some("Foo"));
///
/// let comment = Frame::new(
/// 	"COMM",
/// 	[
/// 		("encoding", FieldValue::from(TextEncoding::Latin1)),
/// 		("lang", FieldValue::from("eng")),
/// 		("desc", FieldValue::from("Notes")),
/// 		("text", FieldValue::from("Bar")),
/// 	],
/// )?;
/// assert_eq!(comment.hash_key(), "COMM:notes:eng");
/// # Ok(()) }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
	kind: &'static FrameKind,
	fields: Fields,
}

impl Frame {
	/// Create a new frame
	///
	/// `id` is looked up in [`FrameTable::ID3V24`], then [`FrameTable::ID3V22`].
	///
	/// # Errors
	///
	/// * `id` isn't a known frame
	/// * A field doesn't exist for the frame, or its value is invalid
	/// * A mandatory field is missing
	pub fn new<'a, I>(id: &str, fields: I) -> Result<Self>
	where
		I: IntoIterator<Item = (&'a str, FieldValue)>,
	{
		let Some(kind) = FrameTable::ID3V24
			.get(id)
			.or_else(|| FrameTable::ID3V22.get(id))
		else {
			id3v2_err!(@BAIL BadFrameId(id.as_bytes().to_vec()));
		};

		Self::with_kind(kind, fields)
	}

	/// Create a new frame of a specific kind
	///
	/// # Errors
	///
	/// See [`Frame::new`]
	pub fn with_kind<'a, I>(kind: &'static FrameKind, fields: I) -> Result<Self>
	where
		I: IntoIterator<Item = (&'a str, FieldValue)>,
	{
		let mut frame = Self {
			kind,
			fields: Vec::with_capacity(kind.specs.len()),
		};

		for (name, value) in fields {
			frame.set_field(name, value)?;
		}

		if let Some(missing) = kind
			.specs
			.iter()
			.find(|spec| frame.field(spec.name).is_none())
		{
			id3v2_err!(@BAIL MissingField(missing.name));
		}

		Ok(frame)
	}

	/// Create a text frame
	///
	/// # Errors
	///
	/// * `id` isn't a known frame
	/// * `id` isn't a plain text frame (`TXXX` needs a description, use [`Frame::new`])
	pub fn text<I, S>(id: &str, encoding: TextEncoding, values: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let values = values.into_iter().map(Into::into).collect::<Vec<String>>();

		Self::new(
			id,
			[
				("encoding", FieldValue::Encoding(encoding)),
				("text", FieldValue::from(values)),
			],
		)
	}

	/// The frame ID
	pub fn id(&self) -> &'static str {
		self.kind.id
	}

	/// The kind of frame
	pub fn kind(&self) -> &'static FrameKind {
		self.kind
	}

	/// All fields, in wire order
	pub fn fields(&self) -> &[(&'static str, FieldValue)] {
		&self.fields
	}

	/// Get the value of a field
	pub fn field(&self, name: &str) -> Option<&FieldValue> {
		spec::lookup(&self.fields, name)
	}

	/// Set the value of a field
	///
	/// # Errors
	///
	/// * The frame has no field called `name`
	/// * `value` is invalid for the field
	pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
		let Some(spec) = self.kind.spec(name) else {
			return Err(Id3v2ErrorKind::UnknownField(self.kind.id, name.to_owned()).into());
		};

		let value = spec.validate(value)?;

		if let Some((_, existing)) = self.fields.iter_mut().find(|(n, _)| *n == spec.name) {
			*existing = value;
			return Ok(());
		}

		let order = field_order(self.kind, spec.name);
		let position = self
			.fields
			.iter()
			.position(|(n, _)| field_order(self.kind, n) > order)
			.unwrap_or(self.fields.len());

		self.fields.insert(position, (spec.name, value));
		Ok(())
	}

	/// The text encoding of the frame, Latin-1 if it has none
	pub fn encoding(&self) -> TextEncoding {
		spec::frame_encoding(&self.fields)
	}

	/// Serialize the frame content (without a header)
	///
	/// Optional fields are written up to the first one that's missing.
	///
	/// # Errors
	///
	/// * Text can't be represented in the frame's encoding
	/// * A mandatory field is missing
	pub fn as_bytes(&self) -> Result<Vec<u8>> {
		let mut content = Vec::new();

		for spec in self.kind.specs {
			let Some(value) = self.field(spec.name) else {
				id3v2_err!(@BAIL MissingField(spec.name));
			};

			content.extend(spec.write(&self.fields, value)?);
		}

		for spec in self.kind.optional_specs {
			let Some(value) = self.field(spec.name) else {
				break;
			};

			content.extend(spec.write(&self.fields, value)?);
		}

		Ok(content)
	}

	/// The key identifying this frame within a tag
	///
	/// See [`HashKeyRule`].
	pub fn hash_key(&self) -> String {
		let mut key = String::from(self.kind.id);

		match self.kind.hash_key {
			HashKeyRule::Id => {},
			HashKeyRule::Fields(names) => {
				for name in names {
					key.push(':');
					if let Some(value) = self.field(name) {
						key.push_str(&discriminator(value));
					}
				}
			},
			HashKeyRule::Content => {
				key.push(':');
				key.push_str(&hex(&self.as_bytes().unwrap_or_default()));
			},
		}

		key
	}

	/// The individual text values of a text or URL frame
	///
	/// Every other frame has none.
	pub fn text_values(&self) -> Vec<String> {
		match self.kind.category {
			FrameCategory::Text
			| FrameCategory::NumericText
			| FrameCategory::NumericPartText
			| FrameCategory::TimeStampText
			| FrameCategory::UserText => self
				.field("text")
				.and_then(FieldValue::as_list)
				.unwrap_or_default()
				.iter()
				.filter_map(FieldValue::to_text)
				.collect(),
			FrameCategory::Url | FrameCategory::UserUrl => self
				.field("url")
				.and_then(FieldValue::to_text)
				.into_iter()
				.collect(),
			FrameCategory::PairedText | FrameCategory::Other => Vec::new(),
		}
	}

	/// The string form of a text or URL frame
	///
	/// Multiple values are separated by a null byte, or a `,` for timestamps.
	pub fn text_value(&self) -> Option<String> {
		let separator = match self.kind.category {
			FrameCategory::PairedText | FrameCategory::Other => return None,
			FrameCategory::TimeStampText => ",",
			_ => "\0",
		};

		Some(self.text_values().join(separator))
	}

	/// The numeric value of a numeric text frame
	///
	/// For frames like `TRCK` this is the number before the `/`.
	pub fn numeric_value(&self) -> Option<i64> {
		let value = self.text_values().into_iter().next()?;

		match self.kind.category {
			FrameCategory::NumericText => value.trim().parse().ok(),
			FrameCategory::NumericPartText => value.split('/').next()?.trim().parse().ok(),
			_ => None,
		}
	}

	/// The decoded genres of a `TCON` frame
	///
	/// ```rust
	/// use id3kit::TextEncoding;
	/// use id3kit::id3::v2::Frame;
	///
	/// # fn main() -> id3kit::error::Result<()> {
	/// let genre = Frame::text("TCON", TextEncoding::Latin1, ["(17)(RX)Pop Rock"])?;
	/// assert_eq!(genre.genres(), ["Rock", "Remix", "Pop Rock"]);
	/// # Ok(()) }
	/// ```
	pub fn genres(&self) -> Vec<String> {
		if self.kind.id != "TCON" {
			return Vec::new();
		}

		let values = self.text_values();
		genre::decode_genres(values.iter().map(String::as_str))
	}

	/// Replace the genres of a `TCON` frame
	///
	/// # Errors
	///
	/// This isn't a `TCON` frame
	pub fn set_genres<I, S>(&mut self, genres: I) -> Result<()>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		if self.kind.id != "TCON" {
			return Err(Id3Error::from(Id3v2ErrorKind::InvalidFieldValue {
				field: "text",
				reason: "only TCON frames hold genres",
			}));
		}

		let genres = genres.into_iter().map(Into::into).collect::<Vec<String>>();
		self.set_field("text", FieldValue::from(genres))
	}

	/// A human readable representation of the frame, `ID=content`
	pub fn pprint(&self) -> String {
		format!("{}={}", self.kind.id, self.pprint_content())
	}

	fn pprint_content(&self) -> String {
		let text = |name: &str| {
			self.field(name)
				.and_then(FieldValue::to_text)
				.unwrap_or_default()
		};
		let int = |name: &str| self.field(name).and_then(FieldValue::as_int).unwrap_or(0);
		let float = |name: &str| self.field(name).and_then(FieldValue::as_float).unwrap_or(0.0);
		let binary = |name: &str| self.field(name).and_then(FieldValue::as_binary).unwrap_or_default();

		match self.kind.category {
			FrameCategory::Text
			| FrameCategory::NumericText
			| FrameCategory::NumericPartText
			| FrameCategory::TimeStampText => return self.text_values().join(" / "),
			FrameCategory::UserText => {
				return format!("{}={}", text("desc"), self.text_values().join(" / "));
			},
			FrameCategory::Url | FrameCategory::UserUrl => return text("url"),
			FrameCategory::PairedText => {
				return self
					.field("people")
					.and_then(FieldValue::as_pairs)
					.unwrap_or_default()
					.iter()
					.map(|(role, person)| format!("{role}={person}"))
					.collect::<Vec<_>>()
					.join(" / ");
			},
			FrameCategory::Other => {},
		}

		match self.kind.id {
			"COMM" => {
				let comment = self
					.field("text")
					.and_then(FieldValue::as_list)
					.unwrap_or_default()
					.iter()
					.filter_map(FieldValue::to_text)
					.collect::<Vec<_>>()
					.join(" / ");

				format!("{}={}={comment}", text("desc"), text("lang"))
			},
			"USLT" => format!("{}={}={}", text("desc"), text("lang"), text("text")),
			"APIC" | "GEOB" => format!(
				"{} ({}, {} bytes)",
				text("desc"),
				text("mime"),
				binary("data").len()
			),
			"POPM" => format!("{}={} {}/255", text("email"), int("count"), int("rating")),
			"PCNT" => int("count").to_string(),
			"RVA2" => format!("{}: {:+.4} dB/{:.4}", text("desc"), float("gain"), float("peak")),
			"UFID" | "PRIV" => format!("{}={}", text("owner"), hex(binary("data"))),
			_ => String::from("[unrepresentable data]"),
		}
	}

	/// Move an ID3v2.2 frame to its ID3v2.4 kind
	///
	/// Frames of any other version are returned as is. `None` means the frame has no
	/// ID3v2.4 equivalent.
	pub(crate) fn upgraded(self) -> Option<Self> {
		if self.kind.id.len() != 3 {
			return Some(self);
		}

		let kind = self.kind.upgrade.and_then(|id| FrameTable::ID3V24.get(id))?;
		Some(Self {
			kind,
			fields: self.fields,
		})
	}
}

fn field_order(kind: &FrameKind, name: &str) -> usize {
	kind.specs
		.iter()
		.chain(kind.optional_specs)
		.position(|spec| spec.name == name)
		.unwrap_or(usize::MAX)
}

fn discriminator(value: &FieldValue) -> String {
	let raw = match value {
		FieldValue::Int(value) => value.to_string(),
		FieldValue::Binary(data) => latin1_decode(data),
		_ => value.to_text().unwrap_or_default(),
	};

	raw.to_lowercase()
}

fn hex(data: &[u8]) -> String {
	let mut out = String::with_capacity(data.len() * 2);
	for byte in data {
		let _ = write!(out, "{byte:02x}");
	}

	out
}

/// Normalize a key the same way [`Frame::hash_key`] does
///
/// The frame ID is kept, while the discriminators are lowercased.
pub(crate) fn normalize_key(key: &str) -> String {
	match key.split_once(':') {
		Some((id, rest)) => format!("{id}:{}", rest.to_lowercase()),
		None => key.to_owned(),
	}
}
