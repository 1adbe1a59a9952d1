// `vec![elem; size]`, bounded by the allocation limit, propagating the error
macro_rules! try_vec {
	($elem:expr; $size:expr) => {{ $crate::util::alloc::bounded_vec($elem, $size)? }};
}

// Shorthand for return Err(Id3Error::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(Id3Error::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(Id3Error::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::Id3Error::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:literal)) => {
		return Err(crate::error::Id3Error::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for return Err(Id3Error::from(Id3v2ErrorKind::Foo))
//
// Usage:
// - id3v2_err!(Variant)            -> Id3Error::from(Id3v2ErrorKind::Variant)
// - id3v2_err!(Variant(Args, ..))  -> Id3Error::from(Id3v2ErrorKind::Variant(Args, ..))
//
// or bail:
//
// - id3v2_err!(@BAIL Variant)
// - id3v2_err!(@BAIL Variant(Args, ..))
macro_rules! id3v2_err {
	(@BAIL $($rest:tt)+) => {
		return Err(id3v2_err!($($rest)+))
	};
	($variant:ident) => {
		crate::error::Id3Error::from(crate::error::Id3v2ErrorKind::$variant)
	};
	($variant:ident($($arg:expr),+ $(,)?)) => {
		crate::error::Id3Error::from(crate::error::Id3v2ErrorKind::$variant($($arg),+))
	};
}

// Pick a block by `ParsingMode`
//
// `STRICT`, `BESTATTEMPT` and `RELAXED` are optional, any mode without a block runs `DEFAULT`.
//
// Usage:
//
// - parse_mode_choice!(
// 		parsing_mode,
// 		RELAXED: some_expr,
// 		DEFAULT: some_expr
// 	 )
macro_rules! parse_mode_choice {
	(
		$parse_mode:ident,
		$(STRICT: $strict_handler:expr,)?
		$(BESTATTEMPT: $best_attempt_handler:expr,)?
		$(RELAXED: $relaxed_handler:expr,)?
		DEFAULT: $default:expr
	) => {
		match $parse_mode {
			$(crate::config::ParsingMode::Strict => $strict_handler,)?
			$(crate::config::ParsingMode::BestAttempt => $best_attempt_handler,)?
			$(crate::config::ParsingMode::Relaxed => $relaxed_handler,)?
			#[allow(unreachable_patterns)]
			_ => $default,
		}
	};
}

pub(crate) use {err, id3v2_err, parse_mode_choice, try_vec};
