//! Reading, editing and writing of ID3v2 and ID3v1 tags
//!
//! ID3v2.2, ID3v2.3 and ID3v2.4 tags are read, and normalized to ID3v2.4 by default.
//! Tags are always written as ID3v2.4, optionally alongside an ID3v1 tag at the end of the file.
//!
//! # Examples
//!
//! ## Reading a tag
//!
//! ```rust,no_run
//! use id3kit::config::ParseOptions;
//! use id3kit::id3::v2::Id3v2Tag;
//!
//! # fn main() -> id3kit::error::Result<()> {
//! let tag = Id3v2Tag::read_from_path("song.mp3", ParseOptions::new())?;
//!
//! if let Some(title) = tag.get("TIT2").and_then(|frame| frame.text_value()) {
//! 	println!("Title: {title}");
//! }
//!
//! println!("{}", tag.pprint());
//! # Ok(()) }
//! ```
//!
//! ## Editing a tag
//!
//! ```rust,no_run
//! use id3kit::TextEncoding;
//! use id3kit::config::{Id3v1Policy, ParseOptions, WriteOptions};
//! use id3kit::id3::v2::{Frame, Id3v2Tag};
//!
//! # fn main() -> id3kit::error::Result<()> {
//! let mut tag = Id3v2Tag::read_from_path("song.mp3", ParseOptions::new())?;
//! tag.add(Frame::text("TPE1", TextEncoding::UTF8, ["Artist"])?);
//! tag.remove_all("COMM");
//!
//! let write_options = WriteOptions::new().id3v1(Id3v1Policy::Create);
//! tag.save_to_path("song.mp3", write_options)?;
//! # Ok(()) }
//! ```
//!
//! # Logging
//!
//! Recoverable problems, such as dropped frames, are reported through the [`log`] crate.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod error;
pub mod id3;
pub(crate) mod macros;
mod util;

pub use util::io;
pub use util::text::TextEncoding;

pub mod prelude {
	//! A prelude for commonly used items in the library.
	//!
	//! ```rust
	//! # #![allow(unused_imports)]
	//! use id3kit::prelude::*;
	//! ```

	pub use crate::config::{ParseOptions, ParsingMode, WriteOptions};
	pub use crate::id3::v2::{FieldValue, Frame, Id3v2Tag};
}
