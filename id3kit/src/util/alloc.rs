use crate::config::global_options;
use crate::error::Result;
use crate::macros::err;

/// The largest buffer a single read may allocate, see `GlobalOptions::allocation_limit`
pub(crate) fn allocation_limit() -> usize {
	global_options().allocation_limit
}

/// Allocate `len` copies of `element`, for buffers sized by values read from a tag
///
/// Used through [`try_vec!`](crate::macros::try_vec).
pub(crate) fn bounded_vec<T>(element: T, len: usize) -> Result<Vec<T>>
where
	T: Clone,
{
	if len > allocation_limit() {
		log::debug!("Refusing to allocate {len} elements, over the allocation limit");
		err!(TooMuchData);
	}

	let mut buf = Vec::new();
	buf.try_reserve_exact(len)?;
	buf.resize(len, element);

	Ok(buf)
}
