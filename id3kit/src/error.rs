//! Contains the errors that can arise within id3kit
//!
//! The primary error is [`Id3Error`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

pub use crate::util::text::TextEncodingError;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, Id3Error>`
pub type Result<T> = std::result::Result<T, Id3Error>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Tag discovery
	/// No tag signature was found where one was expected
	///
	/// For ID3v2, this is the "no tag" signal. It is returned when the stream doesn't start
	/// with `"ID3"`, or is too small to hold a header, and no ID3v1 tag could be used in its place.
	NoHeader,

	// File data related errors
	/// Attempting to read/write an abnormally large amount of data
	TooMuchData,
	/// Expected the data to be a different size than provided
	SizeMismatch,

	// Tag related errors
	/// Errors that arise while decoding text
	TextDecode(&'static str),
	/// Errors that arise while encoding text
	TextEncode(TextEncodingError),
	/// Errors that arise while reading/writing ID3v2 tags
	Id3v2(Id3v2Error),

	// Conversions for external errors
	/// Represents all cases of [`std::io::Error`].
	///
	/// A tag that claims to be larger than the stream it lives in is reported
	/// as [`std::io::ErrorKind::UnexpectedEof`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
	/// This should **never** be encountered
	Infallible(std::convert::Infallible),
}

/// The types of errors that can occur while interacting with ID3v2 tags
#[derive(Debug)]
#[non_exhaustive]
pub enum Id3v2ErrorKind {
	// Header
	/// Arises when a tag has a major version other than 2, 3, or 4
	UnsupportedVersion(u8, u8),
	/// Arises when reserved header flag bits are set while using [`ParsingMode::Strict`](crate::config::ParsingMode::Strict)
	BadHeaderFlags(u8),
	/// Arises when an extended header declares a size smaller than its own size field
	BadExtendedHeaderSize,

	// Frame transforms
	/// Arises when a frame or tag has its unsynchronisation flag set, but the content is not actually synchsafe
	BadUnsynchData(&'static str),
	/// Arises when a compressed frame is unable to be decompressed
	BadCompressedData,
	/// Arises when an encrypted frame is encountered
	///
	/// Encrypted frames are never decoded. When reading a tag, they are preserved as
	/// opaque bytes in [`Id3v2Tag::unknown_frames`](crate::id3::v2::Id3v2Tag::unknown_frames).
	EncryptionUnsupported,

	// Frame content
	/// Arises when a frame is structurally invalid (ran out of data, undecodable text, etc.)
	///
	/// While reading a tag, these frames are dropped.
	JunkFrame(&'static str),
	/// Arises when a frame ID isn't known
	BadFrameId(Vec<u8>),
	/// Arises when an integer doesn't fit into the requested number of bytes
	ValueTooWide(usize),
	/// Arises when a field value fails validation
	InvalidFieldValue {
		/// The name of the field
		field: &'static str,
		/// Why the value was rejected
		reason: &'static str,
	},
	/// Arises when a frame is constructed without one of its mandatory fields
	MissingField(&'static str),
	/// Arises when a field name doesn't exist for a frame
	UnknownField(&'static str, String),
}

impl Display for Id3v2ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::UnsupportedVersion(major, minor) => write!(
				f,
				"Found an invalid version (v{major}.{minor}), expected any major revision in: (2, \
				 3, 4)"
			),
			Self::BadHeaderFlags(flags) => write!(f, "Header has reserved flags set: {flags:#04x}"),
			Self::BadExtendedHeaderSize => {
				write!(f, "Found an extended header with an invalid size")
			},
			Self::BadUnsynchData(message) => write!(f, "Bad unsynchronised data: {message}"),
			Self::BadCompressedData => write!(f, "Failed to decompress frame"),
			Self::EncryptionUnsupported => write!(f, "Encrypted frames are not supported"),
			Self::JunkFrame(message) => write!(f, "Junk frame: {message}"),
			Self::BadFrameId(frame_id) => write!(f, "Failed to parse a frame ID: 0x{frame_id:x?}"),
			Self::ValueTooWide(width) => write!(f, "Value too wide (>{width} bytes)"),
			Self::InvalidFieldValue { field, reason } => {
				write!(f, "Invalid value for field `{field}`: {reason}")
			},
			Self::MissingField(field) => write!(f, "Missing mandatory field `{field}`"),
			Self::UnknownField(id, field) => write!(f, "Frame `{id}` has no field `{field}`"),
		}
	}
}

/// An error that arises while reading/writing ID3v2 tags
pub struct Id3v2Error {
	kind: Id3v2ErrorKind,
}

impl Id3v2Error {
	/// Create a new `Id3v2Error` from an [`Id3v2ErrorKind`]
	#[must_use]
	pub const fn new(kind: Id3v2ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`Id3v2ErrorKind`]
	pub fn kind(&self) -> &Id3v2ErrorKind {
		&self.kind
	}
}

impl Debug for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {:?}", self.kind)
	}
}

impl Display for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {}", self.kind)
	}
}

/// Errors that could occur within id3kit
pub struct Id3Error {
	pub(crate) kind: ErrorKind,
}

impl Id3Error {
	/// Create an `Id3Error` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3kit::error::{ErrorKind, Id3Error};
	///
	/// let no_header = Id3Error::new(ErrorKind::NoHeader);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3kit::error::{ErrorKind, Id3Error};
	///
	/// let no_header = Id3Error::new(ErrorKind::NoHeader);
	/// if let ErrorKind::NoHeader = no_header.kind() {
	/// 	println!("No tag here");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	/// Returns the [`Id3v2ErrorKind`], if this is an ID3v2 error
	pub fn id3v2_kind(&self) -> Option<&Id3v2ErrorKind> {
		match &self.kind {
			ErrorKind::Id3v2(err) => Some(err.kind()),
			_ => None,
		}
	}

	/// Whether this error signals an end-of-file condition
	pub fn is_eof(&self) -> bool {
		matches!(&self.kind, ErrorKind::Io(err) if err.kind() == std::io::ErrorKind::UnexpectedEof)
	}
}

impl std::error::Error for Id3Error {}

impl Debug for Id3Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<Id3v2Error> for Id3Error {
	fn from(input: Id3v2Error) -> Self {
		Self {
			kind: ErrorKind::Id3v2(input),
		}
	}
}

impl From<Id3v2ErrorKind> for Id3Error {
	fn from(input: Id3v2ErrorKind) -> Self {
		Self {
			kind: ErrorKind::Id3v2(Id3v2Error::new(input)),
		}
	}
}

impl From<TextEncodingError> for Id3Error {
	fn from(input: TextEncodingError) -> Self {
		Self {
			kind: ErrorKind::TextEncode(input),
		}
	}
}

impl From<std::io::Error> for Id3Error {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<TryReserveError> for Id3Error {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl From<std::convert::Infallible> for Id3Error {
	fn from(input: std::convert::Infallible) -> Self {
		Self {
			kind: ErrorKind::Infallible(input),
		}
	}
}

impl Display for Id3Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::NoHeader => write!(f, "No ID3 tag found"),
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::TextEncode(ref err) => write!(f, "Text encoding: {err}"),
			ErrorKind::Id3v2(ref id3v2_err) => write!(f, "{id3v2_err}"),
			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read/write an abnormally large amount of data"
			),
			ErrorKind::SizeMismatch => write!(
				f,
				"Encountered an invalid item size, either too big or too small to be valid"
			),

			ErrorKind::Infallible(_) => write!(f, "A expected condition was not upheld"),
		}
	}
}
