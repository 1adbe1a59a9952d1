//! Frame field specs
//!
//! Every frame kind is described by an ordered list of [`Spec`]s. A spec knows how to read
//! its field from the frame body, how to write it back, and which values are valid for it.
//! Specs can look at the fields decoded before them, which is how text fields find the
//! frame's text encoding.

mod timestamp;
mod value;

pub use timestamp::Id3TimeStamp;
pub use value::FieldValue;

use crate::error::{Id3Error, Id3v2ErrorKind, Result};
use crate::id3::v2::util::synchsafe::{BitPaddedInt, Width};
use crate::macros::id3v2_err;
use crate::util::text::{TextEncoding, latin1_decode};

use std::collections::BTreeMap;

use byteorder::{BigEndian, ByteOrder};

/// Decoded frame fields, in spec order
pub type Fields = Vec<(&'static str, FieldValue)>;

pub(crate) fn lookup<'a>(fields: &'a [(&'static str, FieldValue)], name: &str) -> Option<&'a FieldValue> {
	fields
		.iter()
		.find(|(field_name, _)| *field_name == name)
		.map(|(_, value)| value)
}

/// The text encoding selected by a frame's `encoding` field, Latin-1 if it has none
pub(crate) fn frame_encoding(fields: &[(&'static str, FieldValue)]) -> TextEncoding {
	lookup(fields, "encoding")
		.and_then(FieldValue::as_encoding)
		.unwrap_or_default()
}

fn junk(reason: &'static str) -> Id3Error {
	id3v2_err!(JunkFrame(reason))
}

fn invalid(field: &'static str, reason: &'static str) -> Id3Error {
	Id3Error::from(Id3v2ErrorKind::InvalidFieldValue { field, reason })
}

/// The wire shape of a field
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SpecKind {
	/// A single byte
	Byte,
	/// The text encoding selector
	///
	/// Values `>= 16` are the first byte of a Latin-1 payload from writers that omit the selector.
	Encoding,
	/// A big endian integer taking up the rest of the frame, written with at least 4 bytes
	Integer,
	/// A big endian integer of a fixed number of bytes
	SizedInteger(usize),
	/// A fixed width Latin-1 string (language codes, dates, etc.)
	FixedString(usize),
	/// A null terminated Latin-1 string
	Latin1Text,
	/// A terminated string in the frame's text encoding
	EncodedText,
	/// An [`SpecKind::EncodedText`] holding a number
	EncodedNumericText,
	/// An [`SpecKind::EncodedText`] holding a number, optionally followed by `/total`
	EncodedNumericPartText,
	/// An [`SpecKind::EncodedText`] holding an [`Id3TimeStamp`]
	TimeStamp,
	/// A repetition of `item` until the frame is exhausted
	///
	/// When validating, a single string is split on `separator`.
	Multi {
		/// The spec of every item
		item: &'static SpecKind,
		/// The separator accepted when validating a single string
		separator: char,
	},
	/// A repetition of `(role, person)` [`SpecKind::EncodedText`] pairs
	PairedText,
	/// The rest of the frame
	Binary,
	/// A signed 16 bit gain, in units of 1/512 dB
	VolumeAdjustment,
	/// A peak volume with a bit count prefix, scaled to `[0, 1]`
	VolumePeak,
	/// Repeated terminated strings, each followed by a 32 bit timestamp
	SynchronizedText,
	/// Repeated `(event type, 32 bit timestamp)` pairs
	KeyEvents,
	/// Repeated `(frequency, adjustment)` pairs
	VolumeAdjustments,
	/// `N` indexes of `b` bits, where `N` and `b` are earlier fields
	AspiIndex,
}

/// A named field spec
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Spec {
	/// The name of the field
	pub name: &'static str,
	/// The wire shape of the field
	pub kind: SpecKind,
}

impl Spec {
	/// Create a new `Spec`
	pub const fn new(name: &'static str, kind: SpecKind) -> Self {
		Self { name, kind }
	}

	/// Read this field from `data`, returning the value and the remaining data
	///
	/// `fields` holds the fields of the frame read so far.
	///
	/// # Errors
	///
	/// The data is malformed, see [`Id3v2ErrorKind::JunkFrame`]
	pub fn read<'a>(
		&self,
		fields: &[(&'static str, FieldValue)],
		data: &'a [u8],
	) -> Result<(FieldValue, &'a [u8])> {
		self.kind.read(self.name, fields, data)
	}

	/// Write `value`
	///
	/// `fields` holds all fields of the frame.
	///
	/// # Errors
	///
	/// * `value` doesn't match the spec
	/// * Text can't be represented in the frame's encoding
	pub fn write(&self, fields: &[(&'static str, FieldValue)], value: &FieldValue) -> Result<Vec<u8>> {
		self.kind.write(self.name, fields, value)
	}

	/// Check `value` against this spec, converting it where there is an obvious conversion
	///
	/// # Errors
	///
	/// See [`Id3v2ErrorKind::InvalidFieldValue`]
	pub fn validate(&self, value: FieldValue) -> Result<FieldValue> {
		self.kind.validate(self.name, value)
	}
}

fn read_encoded_text(encoding: TextEncoding, data: &[u8]) -> Result<(String, &[u8])> {
	let terminator = encoding.terminator();
	let (text, rest) = match encoding.find_terminator(data) {
		Some(pos) => (&data[..pos], &data[pos + terminator.len()..]),
		None => (data, &data[data.len()..]),
	};

	if text.len() < terminator.len() {
		return Ok((String::new(), rest));
	}

	let decoded = encoding
		.decode(text)
		.map_err(|_| junk("undecodable text"))?;
	Ok((decoded, rest))
}

impl SpecKind {
	fn read<'a>(
		self,
		name: &'static str,
		fields: &[(&'static str, FieldValue)],
		data: &'a [u8],
	) -> Result<(FieldValue, &'a [u8])> {
		match self {
			SpecKind::Byte => match data.split_first() {
				Some((byte, rest)) => Ok((FieldValue::Int(u64::from(*byte)), rest)),
				None => Err(junk("expected a byte")),
			},
			SpecKind::Encoding => {
				let Some((&byte, rest)) = data.split_first() else {
					return Err(junk("expected a text encoding"));
				};

				if byte >= 16 {
					return Ok((FieldValue::Encoding(TextEncoding::Latin1), data));
				}

				match TextEncoding::from_u8(byte) {
					Some(encoding) => Ok((FieldValue::Encoding(encoding), rest)),
					None => Err(junk("invalid text encoding")),
				}
			},
			SpecKind::Integer => {
				let value = BitPaddedInt::PLAIN
					.decode(data)
					.map_err(|_| junk("integer too large"))?;
				Ok((FieldValue::Int(value), &data[data.len()..]))
			},
			SpecKind::SizedInteger(size) => {
				let (bytes, rest) = data.split_at(size.min(data.len()));
				let value = BitPaddedInt::PLAIN
					.decode(bytes)
					.map_err(|_| junk("integer too large"))?;
				Ok((FieldValue::Int(value), rest))
			},
			SpecKind::FixedString(len) => {
				let (bytes, rest) = data.split_at(len.min(data.len()));
				Ok((FieldValue::Text(latin1_decode(bytes)), rest))
			},
			SpecKind::Latin1Text => match data.iter().position(|b| *b == 0) {
				Some(pos) => Ok((FieldValue::Text(latin1_decode(&data[..pos])), &data[pos + 1..])),
				None => Ok((FieldValue::Text(latin1_decode(data)), &data[data.len()..])),
			},
			SpecKind::EncodedText
			| SpecKind::EncodedNumericText
			| SpecKind::EncodedNumericPartText => {
				let (text, rest) = read_encoded_text(frame_encoding(fields), data)?;
				Ok((FieldValue::Text(text), rest))
			},
			SpecKind::TimeStamp => {
				let (text, rest) = read_encoded_text(frame_encoding(fields), data)?;
				Ok((FieldValue::TimeStamp(Id3TimeStamp::parse(&text)), rest))
			},
			SpecKind::Multi { item, .. } => {
				let mut values = Vec::new();

				let mut remaining = data;
				while !remaining.is_empty() {
					let (value, rest) = item.read(name, fields, remaining)?;
					values.push(value);

					if rest.len() == remaining.len() {
						break;
					}

					remaining = rest;
				}

				Ok((FieldValue::List(values), remaining))
			},
			SpecKind::PairedText => {
				let encoding = frame_encoding(fields);
				let mut pairs = Vec::new();

				let mut remaining = data;
				while !remaining.is_empty() {
					let (role, rest) = read_encoded_text(encoding, remaining)?;
					let (person, rest) = read_encoded_text(encoding, rest)?;
					pairs.push((role, person));
					remaining = rest;
				}

				Ok((FieldValue::Pairs(pairs), remaining))
			},
			SpecKind::Binary => Ok((FieldValue::Binary(data.to_vec()), &data[data.len()..])),
			SpecKind::VolumeAdjustment => {
				if data.len() < 2 {
					return Err(junk("volume adjustment too short"));
				}

				let gain = f64::from(BigEndian::read_i16(data)) / 512.0;
				Ok((FieldValue::Float(gain), &data[2..]))
			},
			SpecKind::VolumePeak => {
				let Some((&bits, rest)) = data.split_first() else {
					return Err(junk("expected a peak"));
				};

				let value_bytes = usize::min(4, (usize::from(bits) + 7) >> 3);
				if value_bytes + 1 > data.len() {
					return Err(junk("peak too short"));
				}

				// Align the most significant bit of the peak with bit 31
				let shift = ((8 - (u32::from(bits) & 7)) & 7) + (4 - value_bytes as u32) * 8;

				let mut peak = 0_u64;
				for byte in &rest[..value_bytes] {
					peak = (peak << 8) | u64::from(*byte);
				}
				peak <<= shift;

				let peak = peak as f64 / f64::from(i32::MAX);
				Ok((FieldValue::Float(peak), &rest[value_bytes..]))
			},
			SpecKind::SynchronizedText => {
				let encoding = frame_encoding(fields);
				let terminator = encoding.terminator();

				let mut texts = Vec::new();
				let mut remaining = data;
				while !remaining.is_empty() {
					let Some(pos) = encoding.find_terminator(remaining) else {
						return Err(junk("missing terminator in synchronized text"));
					};

					let time_start = pos + terminator.len();
					if remaining.len() < time_start + 4 {
						return Err(junk("missing timestamp in synchronized text"));
					}

					let text = encoding
						.decode(&remaining[..pos])
						.map_err(|_| junk("undecodable text"))?;
					let time = BigEndian::read_u32(&remaining[time_start..]);

					texts.push((text, time));
					remaining = &remaining[time_start + 4..];
				}

				Ok((FieldValue::SyncedText(texts), remaining))
			},
			SpecKind::KeyEvents => {
				let mut events = Vec::new();

				let mut remaining = data;
				while remaining.len() >= 5 {
					events.push((remaining[0], BigEndian::read_u32(&remaining[1..5])));
					remaining = &remaining[5..];
				}

				Ok((FieldValue::Events(events), remaining))
			},
			SpecKind::VolumeAdjustments => {
				// Later duplicates of a frequency win
				let mut adjustments = BTreeMap::new();

				let mut remaining = data;
				while remaining.len() >= 4 {
					let frequency = BigEndian::read_u16(remaining);
					let adjustment = BigEndian::read_i16(&remaining[2..]);
					adjustments.insert(frequency, adjustment);
					remaining = &remaining[4..];
				}

				let adjustments = adjustments
					.into_iter()
					.map(|(frequency, adjustment)| {
						(f64::from(frequency) / 2.0, f64::from(adjustment) / 512.0)
					})
					.collect();

				Ok((FieldValue::Adjustments(adjustments), remaining))
			},
			SpecKind::AspiIndex => {
				let bits = lookup(fields, "b").and_then(FieldValue::as_int);
				let count = lookup(fields, "N")
					.and_then(FieldValue::as_int)
					.unwrap_or(0) as usize;

				let size = match bits {
					Some(8) => 1,
					Some(16) => 2,
					_ => {
						log::warn!("Invalid bit count in ASPI ({bits:?})");
						return Ok((FieldValue::Indexes(Vec::new()), data));
					},
				};

				let Some(needed) = count.checked_mul(size) else {
					return Err(junk("too many seek points"));
				};

				if data.len() < needed {
					return Err(junk("missing seek points"));
				}

				let (indexes, rest) = data.split_at(needed);
				let indexes = match size {
					1 => indexes.iter().map(|b| u16::from(*b)).collect(),
					_ => indexes.chunks_exact(2).map(BigEndian::read_u16).collect(),
				};

				Ok((FieldValue::Indexes(indexes), rest))
			},
		}
	}

	fn write(
		self,
		name: &'static str,
		fields: &[(&'static str, FieldValue)],
		value: &FieldValue,
	) -> Result<Vec<u8>> {
		match (self, value) {
			(SpecKind::Byte, FieldValue::Int(value)) => match u8::try_from(*value) {
				Ok(byte) => Ok(vec![byte]),
				Err(_) => Err(invalid(name, "expected an integer in 0..=255")),
			},
			(SpecKind::Encoding, FieldValue::Encoding(encoding)) => Ok(vec![*encoding as u8]),
			(SpecKind::Integer, FieldValue::Int(value)) => {
				BitPaddedInt::PLAIN.encode(*value, Width::Grow { min: 4 })
			},
			(SpecKind::SizedInteger(size), FieldValue::Int(value)) => {
				BitPaddedInt::PLAIN.encode(*value, Width::Fixed(size))
			},
			(SpecKind::FixedString(len), FieldValue::Text(text)) => {
				let mut out = TextEncoding::Latin1.encode(text, false, false)?;
				out.resize(len, 0);
				Ok(out)
			},
			(SpecKind::Latin1Text, FieldValue::Text(text)) => {
				Ok(TextEncoding::Latin1.encode(text, true, false)?)
			},
			(
				SpecKind::EncodedText
				| SpecKind::EncodedNumericText
				| SpecKind::EncodedNumericPartText,
				FieldValue::Text(text),
			) => Ok(frame_encoding(fields).encode(text, true, false)?),
			(SpecKind::TimeStamp, FieldValue::TimeStamp(stamp)) => {
				Ok(frame_encoding(fields).encode(&stamp.text(), true, false)?)
			},
			(SpecKind::Multi { item, .. }, FieldValue::List(items)) => {
				let mut out = Vec::new();
				for value in items {
					out.extend(item.write(name, fields, value)?);
				}

				Ok(out)
			},
			(SpecKind::PairedText, FieldValue::Pairs(pairs)) => {
				let encoding = frame_encoding(fields);

				let mut out = Vec::new();
				for (role, person) in pairs {
					out.extend(encoding.encode(role, true, false)?);
					out.extend(encoding.encode(person, true, false)?);
				}

				Ok(out)
			},
			(SpecKind::Binary, FieldValue::Binary(data)) => Ok(data.clone()),
			(SpecKind::VolumeAdjustment, FieldValue::Float(gain)) => {
				Ok(((gain * 512.0).round() as i16).to_be_bytes().to_vec())
			},
			(SpecKind::VolumePeak, FieldValue::Float(peak)) => {
				// Always written with 16 bits
				let [high, low] = ((peak * 32768.0).round() as u16).to_be_bytes();
				Ok(vec![0x10, high, low])
			},
			(SpecKind::SynchronizedText, FieldValue::SyncedText(texts)) => {
				let encoding = frame_encoding(fields);

				let mut out = Vec::new();
				for (text, time) in texts {
					out.extend(encoding.encode(text, true, false)?);
					out.extend(time.to_be_bytes());
				}

				Ok(out)
			},
			(SpecKind::KeyEvents, FieldValue::Events(events)) => {
				let mut out = Vec::with_capacity(events.len() * 5);
				for (event_type, time) in events {
					out.push(*event_type);
					out.extend(time.to_be_bytes());
				}

				Ok(out)
			},
			(SpecKind::VolumeAdjustments, FieldValue::Adjustments(adjustments)) => {
				let mut out = Vec::with_capacity(adjustments.len() * 4);
				for (frequency, adjustment) in adjustments {
					out.extend(((frequency * 2.0) as u16).to_be_bytes());
					out.extend(((adjustment * 512.0) as i16).to_be_bytes());
				}

				Ok(out)
			},
			(SpecKind::AspiIndex, FieldValue::Indexes(indexes)) => {
				match lookup(fields, "b").and_then(FieldValue::as_int) {
					Some(8) => indexes
						.iter()
						.map(|index| {
							u8::try_from(*index).map_err(|_| invalid(name, "index too large for 8 bits"))
						})
						.collect(),
					Some(16) => Ok(indexes.iter().flat_map(|index| index.to_be_bytes()).collect()),
					_ => Err(invalid(name, "bit count must be 8 or 16")),
				}
			},
			_ => Err(invalid(name, "value doesn't match the field type")),
		}
	}

	fn validate(self, name: &'static str, value: FieldValue) -> Result<FieldValue> {
		match (self, value) {
			(SpecKind::Byte, FieldValue::Int(value)) if value <= 0xFF => Ok(FieldValue::Int(value)),
			(SpecKind::Byte, _) => Err(invalid(name, "expected an integer in 0..=255")),
			(SpecKind::Encoding, value @ FieldValue::Encoding(_)) => Ok(value),
			(SpecKind::Encoding, FieldValue::Int(value)) => u8::try_from(value)
				.ok()
				.and_then(TextEncoding::from_u8)
				.map(FieldValue::Encoding)
				.ok_or_else(|| invalid(name, "expected a text encoding in 0..=3")),
			(SpecKind::Integer, value @ FieldValue::Int(_)) => Ok(value),
			(SpecKind::SizedInteger(size), FieldValue::Int(value))
				if size >= 8 || value >> (size * 8) == 0 =>
			{
				Ok(FieldValue::Int(value))
			},
			(SpecKind::SizedInteger(_), FieldValue::Int(_)) => {
				Err(invalid(name, "integer too large for the field"))
			},
			(SpecKind::FixedString(len), FieldValue::Text(text)) => {
				if text.chars().count() != len {
					return Err(invalid(name, "string has the wrong length"));
				}

				Ok(FieldValue::Text(text))
			},
			(
				SpecKind::Latin1Text
				| SpecKind::EncodedText
				| SpecKind::EncodedNumericText
				| SpecKind::EncodedNumericPartText,
				value @ FieldValue::Text(_),
			) => Ok(value),
			(SpecKind::TimeStamp, value @ FieldValue::TimeStamp(_)) => Ok(value),
			(SpecKind::TimeStamp, FieldValue::Text(text)) => {
				Ok(FieldValue::TimeStamp(Id3TimeStamp::parse(&text)))
			},
			(SpecKind::Multi { item, .. }, FieldValue::List(items)) => items
				.into_iter()
				.map(|value| item.validate(name, value))
				.collect::<Result<Vec<_>>>()
				.map(FieldValue::List),
			(SpecKind::Multi { item, separator }, FieldValue::Text(text)) => text
				.split(separator)
				.map(|part| item.validate(name, FieldValue::Text(part.to_owned())))
				.collect::<Result<Vec<_>>>()
				.map(FieldValue::List),
			(SpecKind::Multi { item, .. }, value) => item
				.validate(name, value)
				.map(|value| FieldValue::List(vec![value])),
			(SpecKind::PairedText, value @ FieldValue::Pairs(_)) => Ok(value),
			(SpecKind::Binary, value @ FieldValue::Binary(_)) => Ok(value),
			(SpecKind::VolumeAdjustment, FieldValue::Float(gain)) => {
				if !(-64.0..64.0).contains(&gain) {
					return Err(invalid(name, "gain must be in -64.0..64.0"));
				}

				Ok(FieldValue::Float(gain))
			},
			(SpecKind::VolumePeak, FieldValue::Float(peak)) => {
				if !(0.0..=65535.0 / 32768.0).contains(&peak) {
					return Err(invalid(name, "peak must be in 0.0..=65535/32768"));
				}

				Ok(FieldValue::Float(peak))
			},
			(SpecKind::SynchronizedText, value @ FieldValue::SyncedText(_))
			| (SpecKind::KeyEvents, value @ FieldValue::Events(_))
			| (SpecKind::VolumeAdjustments, value @ FieldValue::Adjustments(_))
			| (SpecKind::AspiIndex, value @ FieldValue::Indexes(_)) => Ok(value),
			_ => Err(invalid(name, "value doesn't match the field type")),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{FieldValue, Id3TimeStamp, Spec, SpecKind};
	use crate::util::text::TextEncoding;

	fn encoding_fields(encoding: TextEncoding) -> Vec<(&'static str, FieldValue)> {
		vec![("encoding", FieldValue::Encoding(encoding))]
	}

	#[test_log::test]
	fn encoding_spec() {
		let spec = Spec::new("encoding", SpecKind::Encoding);

		let (value, rest) = spec.read(&[], b"abcdefg").unwrap();
		assert_eq!(value, FieldValue::Encoding(TextEncoding::Latin1));
		assert_eq!(rest, b"abcdefg");

		let (value, rest) = spec.read(&[], b"\x03abcdefg").unwrap();
		assert_eq!(value, FieldValue::Encoding(TextEncoding::UTF8));
		assert_eq!(rest, b"abcdefg");

		assert!(spec.read(&[], b"\x09ab").is_err());

		assert!(spec.validate(FieldValue::Int(3)).is_ok());
		assert!(spec.validate(FieldValue::Int(4)).is_err());
	}

	#[test_log::test]
	fn byte_spec() {
		let spec = Spec::new("type", SpecKind::Byte);
		assert_eq!(spec.read(&[], b"ab").unwrap(), (FieldValue::Int(0x61), &b"b"[..]));
		assert_eq!(spec.write(&[], &FieldValue::Int(0x61)).unwrap(), b"a");
		assert!(spec.validate(FieldValue::Int(1000)).is_err());
		assert!(spec.read(&[], b"").is_err());
	}

	#[test_log::test]
	fn fixed_width_string_spec() {
		let spec = Spec::new("lang", SpecKind::FixedString(3));

		let (value, rest) = spec.read(&[], b"abcdefg").unwrap();
		assert_eq!(value, FieldValue::Text(String::from("abc")));
		assert_eq!(rest, b"defg");

		let write = |text: &str| spec.write(&[], &FieldValue::from(text)).unwrap();
		assert_eq!(write("abcdefg"), b"abc");
		assert_eq!(write(""), b"\0\0\0");
		assert_eq!(write("a"), b"a\0\0");

		assert!(spec.validate(FieldValue::from("eng")).is_ok());
		assert!(spec.validate(FieldValue::from("en")).is_err());
	}

	#[test_log::test]
	fn encoded_text_spec() {
		let spec = Spec::new("text", SpecKind::EncodedText);
		let fields = encoding_fields(TextEncoding::Latin1);

		let (value, rest) = spec.read(&fields, b"abcd\x00fg").unwrap();
		assert_eq!(value, FieldValue::from("abcd"));
		assert_eq!(rest, b"fg");

		let (value, rest) = spec.read(&fields, b"abcd").unwrap();
		assert_eq!(value, FieldValue::from("abcd"));
		assert!(rest.is_empty());

		assert_eq!(spec.write(&fields, &FieldValue::from("abcdefg")).unwrap(), b"abcdefg\x00");
	}

	#[test_log::test]
	fn encoded_text_utf16() {
		let spec = Spec::new("text", SpecKind::EncodedText);
		let fields = encoding_fields(TextEncoding::UTF16);

		let written = spec.write(&fields, &FieldValue::from("ab")).unwrap();
		assert_eq!(written, b"\xFF\xFEa\x00b\x00\x00\x00");

		let mut data = written.clone();
		data.extend_from_slice(b"rest");
		let (value, rest) = spec.read(&fields, &data).unwrap();
		assert_eq!(value, FieldValue::from("ab"));
		assert_eq!(rest, b"rest");

		// Shorter than the terminator
		let (value, rest) = spec.read(&fields, b"a").unwrap();
		assert_eq!(value, FieldValue::from(""));
		assert!(rest.is_empty());

		// Odd length
		assert!(spec.read(&fields, b"\xFF\xFEa\x00b").is_err());
	}

	#[test_log::test]
	fn timestamp_spec() {
		let spec = Spec::new("stamp", SpecKind::TimeStamp);
		let fields = encoding_fields(TextEncoding::Latin1);

		let (value, rest) = spec.read(&fields, b"ab\x00fg").unwrap();
		assert_eq!(value, FieldValue::TimeStamp(Id3TimeStamp::parse("ab")));
		assert_eq!(rest, b"fg");

		let (value, rest) = spec.read(&fields, b"1234\x00").unwrap();
		assert_eq!(value, FieldValue::TimeStamp(Id3TimeStamp::parse("1234")));
		assert!(rest.is_empty());

		let stamp = FieldValue::TimeStamp(Id3TimeStamp::parse("1234"));
		assert_eq!(spec.write(&fields, &stamp).unwrap(), b"1234\x00");
	}

	#[test_log::test]
	fn multi_spec() {
		const TEXT: SpecKind = SpecKind::EncodedText;
		let spec = Spec::new(
			"text",
			SpecKind::Multi {
				item: &TEXT,
				separator: '\0',
			},
		);
		let fields = encoding_fields(TextEncoding::Latin1);

		let (value, _) = spec.read(&fields, b"a\x00b\x00c").unwrap();
		assert_eq!(value, FieldValue::from(vec!["a", "b", "c"]));

		let value = spec.validate(FieldValue::from("a\0b")).unwrap();
		assert_eq!(value, FieldValue::from(vec!["a", "b"]));
		assert_eq!(spec.write(&fields, &value).unwrap(), b"a\x00b\x00");
	}

	#[test_log::test]
	fn integer_spec() {
		let spec = Spec::new("count", SpecKind::Integer);
		assert_eq!(spec.read(&[], b"\x01\x00").unwrap().0, FieldValue::Int(256));
		assert_eq!(spec.write(&[], &FieldValue::Int(1)).unwrap(), b"\x00\x00\x00\x01");

		let sized = Spec::new("size", SpecKind::SizedInteger(3));
		let (value, rest) = sized.read(&[], b"\x00\x01\x00#").unwrap();
		assert_eq!(value, FieldValue::Int(256));
		assert_eq!(rest, b"#");
		assert!(sized.validate(FieldValue::Int(1 << 24)).is_err());
		assert!(sized.write(&[], &FieldValue::Int(1 << 24)).is_err());
	}

	#[test_log::test]
	fn volume_adjustment_spec() {
		let spec = Spec::new("gain", SpecKind::VolumeAdjustment);
		assert_eq!(spec.read(&[], b"\x04\x00").unwrap().0, FieldValue::Float(2.0));
		assert_eq!(spec.read(&[], b"\xfc\x00").unwrap().0, FieldValue::Float(-2.0));
		assert_eq!(spec.write(&[], &FieldValue::Float(2.0)).unwrap(), b"\x04\x00");
		assert_eq!(spec.write(&[], &FieldValue::Float(-2.0)).unwrap(), b"\xfc\x00");
		assert!(spec.validate(FieldValue::Float(65.0)).is_err());
	}

	#[test_log::test]
	fn volume_peak_spec() {
		let spec = Spec::new("peak", SpecKind::VolumePeak);
		assert_eq!(spec.write(&[], &FieldValue::Float(0.5)).unwrap(), b"\x10\x40\x00");

		let (value, rest) = spec.read(&[], b"\x10\x40\x00").unwrap();
		let peak = value.as_float().unwrap();
		assert!((peak - 0.5).abs() < 1e-6);
		assert!(rest.is_empty());

		// The bit count claims more bytes than are available
		assert!(spec.read(&[], b"\x10\x40").is_err());
		assert!(spec.validate(FieldValue::Float(2.0)).is_err());
	}

	#[test_log::test]
	fn synchronized_text_spec() {
		let spec = Spec::new("text", SpecKind::SynchronizedText);
		let fields = encoding_fields(TextEncoding::Latin1);

		let value = FieldValue::SyncedText(vec![
			(String::from("foo"), 1000),
			(String::from("bar"), 2000),
		]);
		let written = spec.write(&fields, &value).unwrap();
		assert_eq!(written, b"foo\x00\x00\x00\x03\xE8bar\x00\x00\x00\x07\xD0");
		assert_eq!(spec.read(&fields, &written).unwrap().0, value);

		assert!(spec.read(&fields, b"foobar").is_err());
		assert!(spec.read(&fields, b"foobar\x00\xFF\xFF\xFF").is_err());

		// "a\u{100}" has a zero byte pair straddling its two code units
		let fields = encoding_fields(TextEncoding::UTF16);
		let value = FieldValue::SyncedText(vec![
			(String::from("a\u{100}"), 1000),
			(String::from("b"), 2000),
		]);
		let written = spec.write(&fields, &value).unwrap();
		assert_eq!(
			&written[..12],
			b"\xFF\xFEa\x00\x00\x01\x00\x00\x00\x00\x03\xE8"
		);
		assert_eq!(spec.read(&fields, &written).unwrap().0, value);
	}

	#[test_log::test]
	fn volume_adjustments_spec() {
		let spec = Spec::new("adjustments", SpecKind::VolumeAdjustments);

		let (value, rest) = spec
			.read(&[], b"\x00\x04\x04\x00\x00\x02\xfc\x00\x00\x04\x02\x00#")
			.unwrap();
		assert_eq!(value, FieldValue::Adjustments(vec![(1.0, -2.0), (2.0, 1.0)]));
		assert_eq!(rest, b"#");
	}

	#[test_log::test]
	fn aspi_index_spec() {
		let spec = Spec::new("Fi", SpecKind::AspiIndex);

		let fields = vec![("N", FieldValue::Int(2)), ("b", FieldValue::Int(16))];
		let (value, _) = spec.read(&fields, b"\x00\x01\x00\x02").unwrap();
		assert_eq!(value, FieldValue::Indexes(vec![1, 2]));
		assert_eq!(spec.write(&fields, &value).unwrap(), b"\x00\x01\x00\x02");

		let fields = vec![("N", FieldValue::Int(2)), ("b", FieldValue::Int(12))];
		let (value, rest) = spec.read(&fields, b"\x00\x01").unwrap();
		assert_eq!(value, FieldValue::Indexes(Vec::new()));
		assert_eq!(rest, b"\x00\x01");
	}
}
