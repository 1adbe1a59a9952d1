//! ID3v1 items
//!
//! ID3v1 tags have no representation of their own, they are read into and written from an
//! [`Id3v2Tag`](crate::id3::v2::Id3v2Tag) using the equivalent ID3v2.4 frames.
//!
//! | ID3v1 field | Frame  |
//! |-------------|--------|
//! | title       | `TIT2` |
//! | artist      | `TPE1` |
//! | album       | `TALB` |
//! | year        | `TDRC` |
//! | comment     | `COMM` |
//! | track       | `TRCK` |
//! | genre       | `TCON` |

pub(crate) mod constants;
mod read;
mod write;

pub use constants::{GENRES, ID3V1_TAG_SIZE};
pub use read::parse_id3v1;
pub use write::render_id3v1;

pub(crate) use read::find_marker;
