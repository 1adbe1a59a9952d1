#![allow(missing_docs)]

mod id3v1;
mod read;
pub(crate) mod util;
mod write;
