use std::cell::Cell;

thread_local! {
	static GLOBAL_OPTIONS: Cell<GlobalOptions> = const { Cell::new(GlobalOptions::new()) };
}

pub(crate) fn global_options() -> GlobalOptions {
	GLOBAL_OPTIONS.with(Cell::get)
}

/// Thread-wide limits, applied with [`apply_global_options`]
///
/// Tags declare the sizes of their frames, extended headers and compressed data. These options
/// bound what id3kit is willing to allocate for them.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
#[non_exhaustive]
pub struct GlobalOptions {
	pub(crate) allocation_limit: usize,
}

impl GlobalOptions {
	/// The allocation limit of a new `GlobalOptions`, 16 MiB
	pub const DEFAULT_ALLOCATION_LIMIT: usize = 16 * 1024 * 1024;

	/// Creates a new `GlobalOptions` with the defaults
	#[must_use]
	pub const fn new() -> Self {
		Self {
			allocation_limit: Self::DEFAULT_ALLOCATION_LIMIT,
		}
	}

	/// The maximum size of any single buffer whose size comes from the tag
	///
	/// This includes the tag body, the extended header, and the output of decompressing a
	/// frame. Going over it is an [`ErrorKind::TooMuchData`](crate::error::ErrorKind::TooMuchData)
	/// error, unless the tag body is cut short by the end of the stream, in which case reading
	/// fails with [`std::io::ErrorKind::UnexpectedEof`] as it would under the limit.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3kit::config::{GlobalOptions, apply_global_options};
	///
	/// // Tags with large embedded pictures
	/// apply_global_options(GlobalOptions::new().allocation_limit(64 * 1024 * 1024));
	/// ```
	pub fn allocation_limit(&mut self, allocation_limit: usize) -> Self {
		self.allocation_limit = allocation_limit;
		*self
	}
}

impl Default for GlobalOptions {
	fn default() -> Self {
		Self::new()
	}
}

/// Replace the [`GlobalOptions`] of the current thread
pub fn apply_global_options(options: GlobalOptions) {
	GLOBAL_OPTIONS.with(|global_options| global_options.set(options));
}
