/// What to do with an ID3v1 tag when saving an ID3v2 tag
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum Id3v1Policy {
	/// Remove any existing ID3v1 tag
	Remove,
	/// Rewrite an existing ID3v1 tag, never creating one
	#[default]
	UpdateIfPresent,
	/// Always write an ID3v1 tag
	Create,
}

/// Options to control how id3kit writes to a file
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) id3v1: Id3v1Policy,
	pub(crate) padding_alignment: u32,
}

impl WriteOptions {
	/// Default boundary the tag size is rounded up to when it needs to grow
	pub const DEFAULT_PADDING_ALIGNMENT: u32 = 1024;

	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3kit::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	pub const fn new() -> Self {
		Self {
			id3v1: Id3v1Policy::UpdateIfPresent,
			padding_alignment: Self::DEFAULT_PADDING_ALIGNMENT,
		}
	}

	/// What to do with the ID3v1 tag at the end of the file
	///
	/// # Examples
	///
	/// ```rust
	/// use id3kit::config::{Id3v1Policy, WriteOptions};
	///
	/// // My old car stereo only reads ID3v1
	/// let options = WriteOptions::new().id3v1(Id3v1Policy::Create);
	/// ```
	pub fn id3v1(mut self, policy: Id3v1Policy) -> Self {
		self.id3v1 = policy;
		self
	}

	/// The boundary the tag size is rounded up to when it no longer fits in the file
	///
	/// Tags that fit within the space already reserved in the file are written in place, and
	/// the remainder is left as padding. An alignment of `0` disables rounding.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3kit::config::WriteOptions;
	///
	/// // I really don't want my files rewritten, so I'll reserve more space!
	/// let options = WriteOptions::new().padding_alignment(4096);
	/// ```
	pub fn padding_alignment(mut self, padding_alignment: u32) -> Self {
		self.padding_alignment = padding_alignment;
		self
	}
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	id3v1: Id3v1Policy::UpdateIfPresent,
	/// 	padding_alignment: 1024,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}
