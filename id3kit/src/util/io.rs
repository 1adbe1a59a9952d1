//! Various traits for reading and writing to file-like objects

use crate::error::{Id3Error, Result};
use crate::macros::err;

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Provides a method to truncate an object to the specified length
///
/// This is one component of the [`FileLike`] trait, which is used to provide implementors access to any
/// file saving methods such as [`Id3v2Tag::save_to`](crate::id3::v2::Id3v2Tag::save_to).
///
/// Take great care in implementing this for downstream types, as id3kit will assume that the
/// container has the new length specified. If this assumption were to be broken, files **will** become corrupted.
///
/// # Examples
///
/// ```rust
/// use id3kit::io::Truncate;
///
/// let mut data = vec![1, 2, 3, 4, 5];
/// Truncate::truncate(&mut data, 3).unwrap();
///
/// assert_eq!(data, vec![1, 2, 3]);
/// ```
pub trait Truncate {
	/// The error type of the truncation operation
	type Error: Into<Id3Error>;

	/// Truncate a storage object to the specified length
	///
	/// # Errors
	///
	/// Errors depend on the object being truncated, which may not always be fallible.
	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error>;
}

impl Truncate for File {
	type Error = std::io::Error;

	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error> {
		self.set_len(new_len)
	}
}

impl Truncate for Vec<u8> {
	type Error = std::convert::Infallible;

	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error> {
		self.truncate(new_len as usize);
		Ok(())
	}
}

impl<T> Truncate for Cursor<T>
where
	T: Truncate,
{
	type Error = <T as Truncate>::Error;

	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error> {
		self.get_mut().truncate(new_len)
	}
}

impl<T> Truncate for Box<T>
where
	T: Truncate,
{
	type Error = <T as Truncate>::Error;

	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error> {
		self.as_mut().truncate(new_len)
	}
}

impl<T> Truncate for &mut T
where
	T: Truncate,
{
	type Error = <T as Truncate>::Error;

	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error> {
		(**self).truncate(new_len)
	}
}

/// Provides a method to get the length of a storage object
///
/// This is one component of the [`FileLike`] trait, which is used to provide implementors access to any
/// file saving methods such as [`Id3v2Tag::save_to`](crate::id3::v2::Id3v2Tag::save_to).
///
/// Take great care in implementing this for downstream types, as id3kit will assume that the
/// container has the exact length specified. If this assumption were to be broken, files **may** become corrupted.
///
/// # Examples
///
/// ```rust
/// use id3kit::io::Length;
///
/// let data = vec![1, 2, 3, 4, 5];
/// assert_eq!(Length::len(&data).unwrap(), 5);
/// ```
pub trait Length {
	/// The error type of the length operation
	type Error: Into<Id3Error>;

	/// Get the length of a storage object
	///
	/// # Errors
	///
	/// Errors depend on the object being read, which may not always be fallible.
	fn len(&self) -> std::result::Result<u64, Self::Error>;
}

impl Length for File {
	type Error = std::io::Error;

	fn len(&self) -> std::result::Result<u64, Self::Error> {
		self.metadata().map(|m| m.len())
	}
}

impl Length for Vec<u8> {
	type Error = std::convert::Infallible;

	fn len(&self) -> std::result::Result<u64, Self::Error> {
		Ok(self.len() as u64)
	}
}

impl<T> Length for Cursor<T>
where
	T: Length,
{
	type Error = <T as Length>::Error;

	fn len(&self) -> std::result::Result<u64, Self::Error> {
		Length::len(self.get_ref())
	}
}

impl<T> Length for Box<T>
where
	T: Length,
{
	type Error = <T as Length>::Error;

	fn len(&self) -> std::result::Result<u64, Self::Error> {
		Length::len(self.as_ref())
	}
}

impl<T> Length for &T
where
	T: Length,
{
	type Error = <T as Length>::Error;

	fn len(&self) -> std::result::Result<u64, Self::Error> {
		Length::len(*self)
	}
}

impl<T> Length for &mut T
where
	T: Length,
{
	type Error = <T as Length>::Error;

	fn len(&self) -> std::result::Result<u64, Self::Error> {
		Length::len(*self)
	}
}

/// Provides a set of methods to read and write to a file-like object
///
/// This is a combination of the [`Read`], [`Write`], [`Seek`], [`Truncate`], and [`Length`] traits.
/// It is used to provide implementors access to any file saving methods such as [`Id3v2Tag::save_to`](crate::id3::v2::Id3v2Tag::save_to).
///
/// Take great care in implementing this for downstream types, as id3kit will assume that the
/// trait implementations are correct. If this assumption were to be broken, files **may** become corrupted.
pub trait FileLike: Read + Write + Seek + Truncate + Length
where
	<Self as Truncate>::Error: Into<Id3Error>,
	<Self as Length>::Error: Into<Id3Error>,
{
}

impl<T> FileLike for T
where
	T: Read + Write + Seek + Truncate + Length,
	<T as Truncate>::Error: Into<Id3Error>,
	<T as Length>::Error: Into<Id3Error>,
{
}

/// Grow `file` by `size` zero bytes at `offset`, moving everything after `offset` towards the end
///
/// # Errors
///
/// * `offset` is past the end of the file
/// * Any I/O error
///
/// # Examples
///
/// ```rust
/// use id3kit::io::insert_bytes;
/// use std::io::Cursor;
///
/// # fn main() -> id3kit::error::Result<()> {
/// let mut file = Cursor::new(vec![1, 2, 3]);
/// insert_bytes(&mut file, 2, 1)?;
///
/// assert_eq!(file.into_inner(), vec![1, 0, 0, 2, 3]);
/// # Ok(()) }
/// ```
pub fn insert_bytes<F>(file: &mut F, size: u64, offset: u64) -> Result<()>
where
	F: FileLike,
	Id3Error: From<<F as Truncate>::Error>,
	Id3Error: From<<F as Length>::Error>,
{
	let file_len = file.len()?;
	if offset > file_len {
		err!(SizeMismatch);
	}

	if size == 0 {
		return Ok(());
	}

	log::trace!("Inserting {size} bytes at offset {offset}");

	let mut buffer = vec![0; COPY_BUFFER_SIZE];

	// Walk backwards so no byte is overwritten before it is moved
	let mut end = file_len;
	while end > offset {
		let chunk_len = (end - offset).min(COPY_BUFFER_SIZE as u64);
		let chunk = &mut buffer[..chunk_len as usize];

		let chunk_start = end - chunk_len;
		file.seek(SeekFrom::Start(chunk_start))?;
		file.read_exact(chunk)?;

		file.seek(SeekFrom::Start(chunk_start + size))?;
		file.write_all(chunk)?;

		end = chunk_start;
	}

	buffer.fill(0);

	file.seek(SeekFrom::Start(offset))?;
	let mut remaining = size;
	while remaining > 0 {
		let chunk_len = remaining.min(COPY_BUFFER_SIZE as u64);
		file.write_all(&buffer[..chunk_len as usize])?;
		remaining -= chunk_len;
	}

	Ok(())
}

/// Remove `size` bytes at `offset` from `file`, moving everything after them towards the start
///
/// # Errors
///
/// * `offset + size` is past the end of the file
/// * Any I/O error
///
/// # Examples
///
/// ```rust
/// use id3kit::io::delete_bytes;
/// use std::io::Cursor;
///
/// # fn main() -> id3kit::error::Result<()> {
/// let mut file = Cursor::new(vec![1, 0, 0, 2, 3]);
/// delete_bytes(&mut file, 2, 1)?;
///
/// assert_eq!(file.into_inner(), vec![1, 2, 3]);
/// # Ok(()) }
/// ```
pub fn delete_bytes<F>(file: &mut F, size: u64, offset: u64) -> Result<()>
where
	F: FileLike,
	Id3Error: From<<F as Truncate>::Error>,
	Id3Error: From<<F as Length>::Error>,
{
	let file_len = file.len()?;
	let Some(removed_end) = offset.checked_add(size) else {
		err!(SizeMismatch);
	};

	if removed_end > file_len {
		err!(SizeMismatch);
	}

	if size == 0 {
		return Ok(());
	}

	log::trace!("Deleting {size} bytes at offset {offset}");

	let mut buffer = vec![0; COPY_BUFFER_SIZE];

	let mut read_pos = removed_end;
	while read_pos < file_len {
		let chunk_len = (file_len - read_pos).min(COPY_BUFFER_SIZE as u64);
		let chunk = &mut buffer[..chunk_len as usize];

		file.seek(SeekFrom::Start(read_pos))?;
		file.read_exact(chunk)?;

		file.seek(SeekFrom::Start(read_pos - size))?;
		file.write_all(chunk)?;

		read_pos += chunk_len;
	}

	file.truncate(file_len - size)?;
	file.seek(SeekFrom::Start(offset))?;

	Ok(())
}
