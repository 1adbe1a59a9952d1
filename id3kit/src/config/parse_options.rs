use crate::id3::v2::FrameTable;

/// The parsing strictness mode
///
/// # Examples
///
/// ```rust,no_run
/// use id3kit::config::{ParseOptions, ParsingMode};
/// use id3kit::id3::v2::Id3v2Tag;
///
/// # fn main() -> id3kit::error::Result<()> {
/// // We only want to read spec-compliant inputs
/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
/// let tag = Id3v2Tag::read_from_path("foo.mp3", parsing_options)?;
/// # Ok(()) }
/// ```
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Will eagerly error on invalid input
	///
	/// This mode will eagerly error on any non-spec-compliant input.
	///
	/// ## Examples of behavior
	///
	/// * Reserved tag header flags - The tag is rejected
	/// * Broken unsynchronisation or compression in a frame - The entire tag is rejected
	/// * A compressed frame missing its size prefix - The frame is not recovered
	/// * Empty text frames - They are skipped when saving
	Strict,
	/// Default mode, less eager to error on recoverably malformed input
	///
	/// This mode will attempt to fill in any holes where possible in otherwise valid, spec-compliant input.
	///
	/// NOTE: A readable input does *not* necessarily make it writeable.
	///
	/// ## Examples of behavior
	///
	/// * Reserved tag header flags - Ignored
	/// * Broken unsynchronisation or compression in a frame - The frame is dropped and the parser moves on
	/// * A compressed frame missing its size prefix - Decompression is retried with the prefix included
	#[default]
	BestAttempt,
	/// Least eager to error, may produce partial output
	///
	/// In addition to everything [`ParsingMode::BestAttempt`] tolerates, a tag that claims to be
	/// larger than the stream is read up to the end of the stream instead of being rejected.
	Relaxed,
}

/// Options to control how id3kit parses a tag
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) normalize: bool,
	pub(crate) known_frames: Option<FrameTable>,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// 	normalize: true,
	/// 	known_frames: None,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3kit::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			normalize: true,
			known_frames: None,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use id3kit::config::{ParseOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::BestAttempt. Here, we need absolute correctness.
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// Whether to upgrade ID3v2.2 and ID3v2.3 frames to their ID3v2.4 equivalents after reading
	///
	/// See [`Id3v2Tag::normalize_for_v24`](crate::id3::v2::Id3v2Tag::normalize_for_v24).
	///
	/// # Examples
	///
	/// ```rust
	/// use id3kit::config::ParseOptions;
	///
	/// // I want to see the TYER/TDAT/TIME frames as they are in the file
	/// let parsing_options = ParseOptions::new().normalize(false);
	/// ```
	pub fn normalize(&mut self, normalize: bool) -> Self {
		self.normalize = normalize;
		*self
	}

	/// The table of frames to decode
	///
	/// Frames with IDs missing from the table are kept as opaque bytes in
	/// [`Id3v2Tag::unknown_frames`](crate::id3::v2::Id3v2Tag::unknown_frames).
	/// By default, the standard table for the tag's version is used.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3kit::config::ParseOptions;
	/// use id3kit::id3::v2::FrameTable;
	///
	/// // Keep every frame as raw bytes
	/// let parsing_options = ParseOptions::new().known_frames(Some(FrameTable::EMPTY));
	/// ```
	pub fn known_frames(&mut self, known_frames: Option<FrameTable>) -> Self {
		self.known_frames = known_frames;
		*self
	}
}
