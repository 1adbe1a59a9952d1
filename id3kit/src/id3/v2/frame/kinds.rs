//! The static frame tables
//!
//! Every frame ID id3kit understands has a [`FrameKind`], describing its fields and how it is
//! identified within a tag. ID3v2.3 and ID3v2.4 share [`FrameTable::ID3V24`], while the three
//! character ID3v2.2 IDs live in [`FrameTable::ID3V22`].

use crate::id3::v2::spec::{Spec, SpecKind};

/// How the string form and pretty-print of a frame are produced
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FrameCategory {
	/// A list of text values
	Text,
	/// A list of numbers
	NumericText,
	/// A list of numbers, optionally with a total (`3/12`)
	NumericPartText,
	/// A list of timestamps
	TimeStampText,
	/// A described list of text values (`TXXX`)
	UserText,
	/// A single URL
	Url,
	/// A described URL (`WXXX`)
	UserUrl,
	/// A list of `(role, person)` pairs
	PairedText,
	/// Anything else
	Other,
}

/// The discriminator appended to a frame's ID to form its hash key
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HashKeyRule {
	/// The frame ID alone, the frame is unique within a tag
	Id,
	/// The frame ID, followed by the values of these fields
	Fields(&'static [&'static str]),
	/// The frame ID, followed by the hex encoded frame content
	Content,
}

/// A frame type
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FrameKind {
	/// The frame ID
	pub id: &'static str,
	/// A short description of the frame
	pub description: &'static str,
	/// The category of the frame
	pub category: FrameCategory,
	/// The mandatory fields
	pub specs: &'static [Spec],
	/// Fields that are only present while there is data left
	pub optional_specs: &'static [Spec],
	/// How the frame is identified in a tag
	pub hash_key: HashKeyRule,
	/// The ID3v2.4 frame ID this ID3v2.2 frame is upgraded to
	pub upgrade: Option<&'static str>,
}

impl FrameKind {
	const fn new(
		id: &'static str,
		description: &'static str,
		category: FrameCategory,
		specs: &'static [Spec],
	) -> Self {
		Self {
			id,
			description,
			category,
			specs,
			optional_specs: &[],
			hash_key: HashKeyRule::Id,
			upgrade: None,
		}
	}

	const fn text(id: &'static str, description: &'static str) -> Self {
		Self::new(id, description, FrameCategory::Text, TEXT)
	}

	const fn numeric(id: &'static str, description: &'static str) -> Self {
		Self::new(id, description, FrameCategory::NumericText, NUMERIC_TEXT)
	}

	const fn numeric_part(id: &'static str, description: &'static str) -> Self {
		Self::new(id, description, FrameCategory::NumericPartText, NUMERIC_PART_TEXT)
	}

	const fn timestamp(id: &'static str, description: &'static str) -> Self {
		Self::new(id, description, FrameCategory::TimeStampText, TIMESTAMP_TEXT)
	}

	const fn url(id: &'static str, description: &'static str) -> Self {
		Self::new(id, description, FrameCategory::Url, URL)
	}

	const fn paired(id: &'static str, description: &'static str) -> Self {
		Self::new(id, description, FrameCategory::PairedText, PAIRED_TEXT)
	}

	const fn other(id: &'static str, description: &'static str, specs: &'static [Spec]) -> Self {
		Self::new(id, description, FrameCategory::Other, specs)
	}

	const fn optional(self, optional_specs: &'static [Spec]) -> Self {
		Self {
			optional_specs,
			..self
		}
	}

	const fn keyed(self, fields: &'static [&'static str]) -> Self {
		Self {
			hash_key: HashKeyRule::Fields(fields),
			..self
		}
	}

	const fn keyed_by_content(self) -> Self {
		Self {
			hash_key: HashKeyRule::Content,
			..self
		}
	}

	const fn upgrades_to(self, id: &'static str) -> Self {
		Self {
			upgrade: Some(id),
			..self
		}
	}

	/// Find the spec of a field, mandatory or optional
	pub fn spec(&self, name: &str) -> Option<&'static Spec> {
		self.specs
			.iter()
			.chain(self.optional_specs)
			.find(|spec| spec.name == name)
	}

	/// Whether this frame holds text values (`T***` frames, excluding `TIPL`/`TMCL`)
	pub fn is_text(&self) -> bool {
		matches!(
			self.category,
			FrameCategory::Text
				| FrameCategory::NumericText
				| FrameCategory::NumericPartText
				| FrameCategory::TimeStampText
				| FrameCategory::UserText
		)
	}
}

/// A set of known frame kinds
///
/// # Examples
///
/// ```rust
/// use id3kit::id3::v2::FrameTable;
///
/// let title = FrameTable::ID3V24.get("TIT2").unwrap();
/// assert_eq!(title.description, "Title");
///
/// let title = FrameTable::ID3V22.get("TT2").unwrap();
/// assert_eq!(title.upgrade, Some("TIT2"));
///
/// assert!(FrameTable::EMPTY.get("TIT2").is_none());
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FrameTable {
	frames: &'static [FrameKind],
}

impl FrameTable {
	/// The ID3v2.3 and ID3v2.4 frames
	pub const ID3V24: Self = Self {
		frames: ID3V24_FRAMES,
	};
	/// The ID3v2.2 frames
	pub const ID3V22: Self = Self {
		frames: ID3V22_FRAMES,
	};
	/// A table without any frames, every frame is kept as opaque bytes
	pub const EMPTY: Self = Self { frames: &[] };

	/// Create a custom table
	pub const fn new(frames: &'static [FrameKind]) -> Self {
		Self { frames }
	}

	/// Find the kind of `id`
	pub fn get(&self, id: &str) -> Option<&'static FrameKind> {
		self.frames.iter().find(|kind| kind.id == id)
	}

	/// Whether `id` is in the table
	pub fn contains(&self, id: &str) -> bool {
		self.get(id).is_some()
	}

	/// All frame kinds in the table
	pub fn frames(&self) -> &'static [FrameKind] {
		self.frames
	}
}

// Field specs shared by many frames

const ENCODING: Spec = Spec::new("encoding", SpecKind::Encoding);

const TEXT: &[Spec] = &[
	ENCODING,
	Spec::new(
		"text",
		SpecKind::Multi {
			item: &SpecKind::EncodedText,
			separator: '\u{0}',
		},
	),
];

const NUMERIC_TEXT: &[Spec] = &[
	ENCODING,
	Spec::new(
		"text",
		SpecKind::Multi {
			item: &SpecKind::EncodedNumericText,
			separator: '\u{0}',
		},
	),
];

const NUMERIC_PART_TEXT: &[Spec] = &[
	ENCODING,
	Spec::new(
		"text",
		SpecKind::Multi {
			item: &SpecKind::EncodedNumericPartText,
			separator: '\u{0}',
		},
	),
];

const TIMESTAMP_TEXT: &[Spec] = &[
	ENCODING,
	Spec::new(
		"text",
		SpecKind::Multi {
			item: &SpecKind::TimeStamp,
			separator: ',',
		},
	),
];

const URL: &[Spec] = &[Spec::new("url", SpecKind::Latin1Text)];

const PAIRED_TEXT: &[Spec] = &[ENCODING, Spec::new("people", SpecKind::PairedText)];

const USER_TEXT: &[Spec] = &[
	ENCODING,
	Spec::new("desc", SpecKind::EncodedText),
	Spec::new(
		"text",
		SpecKind::Multi {
			item: &SpecKind::EncodedText,
			separator: '\u{0}',
		},
	),
];

const USER_URL: &[Spec] = &[
	ENCODING,
	Spec::new("desc", SpecKind::EncodedText),
	Spec::new("url", SpecKind::Latin1Text),
];

const BINARY: &[Spec] = &[Spec::new("data", SpecKind::Binary)];

const EVENT_TIMING_CODES: &[Spec] = &[
	Spec::new("format", SpecKind::Byte),
	Spec::new("events", SpecKind::KeyEvents),
];

const MPEG_LOOKUP_TABLE: &[Spec] = &[
	Spec::new("frames", SpecKind::SizedInteger(2)),
	Spec::new("bytes", SpecKind::SizedInteger(3)),
	Spec::new("milliseconds", SpecKind::SizedInteger(3)),
	Spec::new("bits_for_bytes", SpecKind::Byte),
	Spec::new("bits_for_milliseconds", SpecKind::Byte),
	Spec::new("data", SpecKind::Binary),
];

const SYNCED_TEMPO: &[Spec] = &[
	Spec::new("format", SpecKind::Byte),
	Spec::new("data", SpecKind::Binary),
];

const UNSYNCED_LYRICS: &[Spec] = &[
	ENCODING,
	Spec::new("lang", SpecKind::FixedString(3)),
	Spec::new("desc", SpecKind::EncodedText),
	Spec::new("text", SpecKind::EncodedText),
];

const SYNCED_LYRICS: &[Spec] = &[
	ENCODING,
	Spec::new("lang", SpecKind::FixedString(3)),
	Spec::new("format", SpecKind::Byte),
	Spec::new("type", SpecKind::Byte),
	Spec::new("desc", SpecKind::EncodedText),
	Spec::new("text", SpecKind::SynchronizedText),
];

const COMMENT: &[Spec] = &[
	ENCODING,
	Spec::new("lang", SpecKind::FixedString(3)),
	Spec::new("desc", SpecKind::EncodedText),
	Spec::new(
		"text",
		SpecKind::Multi {
			item: &SpecKind::EncodedText,
			separator: '\u{0}',
		},
	),
];

const RELATIVE_VOLUME: &[Spec] = &[
	Spec::new("desc", SpecKind::Latin1Text),
	Spec::new("channel", SpecKind::Byte),
	Spec::new("gain", SpecKind::VolumeAdjustment),
	Spec::new("peak", SpecKind::VolumePeak),
];

const EQUALISATION: &[Spec] = &[
	Spec::new("method", SpecKind::Byte),
	Spec::new("desc", SpecKind::Latin1Text),
	Spec::new("adjustments", SpecKind::VolumeAdjustments),
];

const REVERB: &[Spec] = &[
	Spec::new("left", SpecKind::SizedInteger(2)),
	Spec::new("right", SpecKind::SizedInteger(2)),
	Spec::new("bounce_left", SpecKind::Byte),
	Spec::new("bounce_right", SpecKind::Byte),
	Spec::new("feedback_ltl", SpecKind::Byte),
	Spec::new("feedback_ltr", SpecKind::Byte),
	Spec::new("feedback_rtr", SpecKind::Byte),
	Spec::new("feedback_rtl", SpecKind::Byte),
	Spec::new("premix_ltr", SpecKind::Byte),
	Spec::new("premix_rtl", SpecKind::Byte),
];

const ATTACHED_PICTURE: &[Spec] = &[
	ENCODING,
	Spec::new("mime", SpecKind::Latin1Text),
	Spec::new("type", SpecKind::Byte),
	Spec::new("desc", SpecKind::EncodedText),
	Spec::new("data", SpecKind::Binary),
];

const V22_PICTURE: &[Spec] = &[
	ENCODING,
	Spec::new("mime", SpecKind::FixedString(3)),
	Spec::new("type", SpecKind::Byte),
	Spec::new("desc", SpecKind::EncodedText),
	Spec::new("data", SpecKind::Binary),
];

const PLAY_COUNTER: &[Spec] = &[Spec::new("count", SpecKind::Integer)];

const POPULARIMETER: &[Spec] = &[
	Spec::new("email", SpecKind::Latin1Text),
	Spec::new("rating", SpecKind::Byte),
];

const POPULARIMETER_COUNT: &[Spec] = &[Spec::new("count", SpecKind::Integer)];

const ENCAPSULATED_OBJECT: &[Spec] = &[
	ENCODING,
	Spec::new("mime", SpecKind::Latin1Text),
	Spec::new("filename", SpecKind::EncodedText),
	Spec::new("desc", SpecKind::EncodedText),
	Spec::new("data", SpecKind::Binary),
];

const BUFFER_SIZE: &[Spec] = &[Spec::new("size", SpecKind::SizedInteger(3))];

const BUFFER_SIZE_TAIL: &[Spec] = &[
	Spec::new("info", SpecKind::Byte),
	Spec::new("offset", SpecKind::SizedInteger(4)),
];

const AUDIO_ENCRYPTION: &[Spec] = &[
	Spec::new("owner", SpecKind::Latin1Text),
	Spec::new("preview_start", SpecKind::SizedInteger(2)),
	Spec::new("preview_length", SpecKind::SizedInteger(2)),
	Spec::new("data", SpecKind::Binary),
];

const LINKED_INFO: &[Spec] = &[
	Spec::new("frameid", SpecKind::FixedString(4)),
	Spec::new("url", SpecKind::Latin1Text),
];

const V22_LINKED_INFO: &[Spec] = &[
	Spec::new("frameid", SpecKind::FixedString(3)),
	Spec::new("url", SpecKind::Latin1Text),
];

const POSITION_SYNC: &[Spec] = &[
	Spec::new("format", SpecKind::Byte),
	Spec::new("position", SpecKind::Integer),
];

const UNIQUE_FILE_ID: &[Spec] = &[
	Spec::new("owner", SpecKind::Latin1Text),
	Spec::new("data", SpecKind::Binary),
];

const TERMS_OF_USE: &[Spec] = &[
	ENCODING,
	Spec::new("lang", SpecKind::FixedString(3)),
	Spec::new("text", SpecKind::EncodedText),
];

const OWNERSHIP: &[Spec] = &[
	ENCODING,
	Spec::new("price", SpecKind::Latin1Text),
	Spec::new("date", SpecKind::FixedString(8)),
	Spec::new("seller", SpecKind::EncodedText),
];

const COMMERCIAL: &[Spec] = &[
	ENCODING,
	Spec::new("price", SpecKind::Latin1Text),
	Spec::new("valid_until", SpecKind::FixedString(8)),
	Spec::new("contact", SpecKind::Latin1Text),
	Spec::new("format", SpecKind::Byte),
	Spec::new("seller", SpecKind::EncodedText),
	Spec::new("desc", SpecKind::EncodedText),
];

const COMMERCIAL_LOGO: &[Spec] = &[
	Spec::new("mime", SpecKind::Latin1Text),
	Spec::new("logo", SpecKind::Binary),
];

const ENCRYPTION_METHOD: &[Spec] = &[
	Spec::new("owner", SpecKind::Latin1Text),
	Spec::new("method", SpecKind::Byte),
	Spec::new("data", SpecKind::Binary),
];

const GROUP_ID: &[Spec] = &[
	Spec::new("owner", SpecKind::Latin1Text),
	Spec::new("group", SpecKind::Byte),
	Spec::new("data", SpecKind::Binary),
];

const PRIVATE: &[Spec] = &[
	Spec::new("owner", SpecKind::Latin1Text),
	Spec::new("data", SpecKind::Binary),
];

const SIGNATURE: &[Spec] = &[
	Spec::new("group", SpecKind::Byte),
	Spec::new("sig", SpecKind::Binary),
];

const SEEK: &[Spec] = &[Spec::new("offset", SpecKind::Integer)];

const SEEK_POINT_INDEX: &[Spec] = &[
	Spec::new("S", SpecKind::SizedInteger(4)),
	Spec::new("L", SpecKind::SizedInteger(4)),
	Spec::new("N", SpecKind::SizedInteger(2)),
	Spec::new("b", SpecKind::Byte),
	Spec::new("Fi", SpecKind::AspiIndex),
];

const V22_ENCRYPTED_META: &[Spec] = &[
	Spec::new("owner", SpecKind::Latin1Text),
	Spec::new("desc", SpecKind::EncodedText),
	Spec::new("data", SpecKind::Binary),
];

const KEY_DESC: &[&str] = &["desc"];
const KEY_DESC_LANG: &[&str] = &["desc", "lang"];
const KEY_OWNER: &[&str] = &["owner"];
const KEY_URL: &[&str] = &["url"];

const ID3V24_FRAMES: &[FrameKind] = &[
	// Text
	FrameKind::text("TALB", "Album"),
	FrameKind::text("TCOM", "Composer"),
	FrameKind::text("TCON", "Content type (Genre)"),
	FrameKind::text("TCOP", "Copyright"),
	FrameKind::text("TDES", "Podcast description"),
	FrameKind::text("TENC", "Encoder"),
	FrameKind::text("TEXT", "Lyricist"),
	FrameKind::text("TFLT", "File type"),
	FrameKind::text("TGID", "Podcast identifier"),
	FrameKind::text("TIT1", "Content group description"),
	FrameKind::text("TIT2", "Title"),
	FrameKind::text("TIT3", "Subtitle/Description refinement"),
	FrameKind::text("TKEY", "Starting key"),
	FrameKind::text("TKWD", "Podcast keywords"),
	FrameKind::text("TCAT", "Podcast category"),
	FrameKind::text("TLAN", "Audio languages"),
	FrameKind::text("TMED", "Source media type"),
	FrameKind::text("TMOO", "Mood"),
	FrameKind::text("TOAL", "Original album"),
	FrameKind::text("TOFN", "Original filename"),
	FrameKind::text("TOLY", "Original lyricist"),
	FrameKind::text("TOPE", "Original artist/performer"),
	FrameKind::text("TOWN", "Owner/Licensee"),
	FrameKind::text("TPE1", "Lead artist/Performer/Soloist/Group"),
	FrameKind::text("TPE2", "Band/Orchestra/Accompaniment"),
	FrameKind::text("TPE3", "Conductor"),
	FrameKind::text("TPE4", "Interpreter/Remixer/Modifier"),
	FrameKind::text("TPRO", "Produced"),
	FrameKind::text("TPUB", "Publisher"),
	FrameKind::text("TRDA", "Recording dates"),
	FrameKind::text("TRSN", "Internet radio station name"),
	FrameKind::text("TRSO", "Internet radio station owner"),
	FrameKind::text("TSO2", "Album artist sort order"),
	FrameKind::text("TSOA", "Album sort order"),
	FrameKind::text("TSOC", "Composer sort order"),
	FrameKind::text("TSOP", "Performer sort order"),
	FrameKind::text("TSOT", "Title sort order"),
	FrameKind::text("TSRC", "International Standard Recording Code (ISRC)"),
	FrameKind::text("TSSE", "Encoder settings"),
	FrameKind::text("TSST", "Set subtitle"),
	FrameKind::text("TDAT", "Date of recording (DDMM)"),
	FrameKind::text("TIME", "Time of recording (HHMM)"),
	FrameKind::text("MVNM", "Movement name"),
	FrameKind::text("GRP1", "Grouping"),
	// Numeric text
	FrameKind::numeric("TBPM", "Beats per minute"),
	FrameKind::numeric("TCMP", "Compilation"),
	FrameKind::numeric("TDLY", "Audio delay (ms)"),
	FrameKind::numeric("TLEN", "Audio length (ms)"),
	FrameKind::numeric("TORY", "Original release year"),
	FrameKind::numeric("TSIZ", "Size of audio data (bytes)"),
	FrameKind::numeric("TYER", "Year of recording"),
	FrameKind::numeric_part("TPOS", "Part of set"),
	FrameKind::numeric_part("TRCK", "Track number"),
	FrameKind::numeric_part("MVIN", "Movement number/count"),
	// Timestamps
	FrameKind::timestamp("TDEN", "Encoding time"),
	FrameKind::timestamp("TDOR", "Original release time"),
	FrameKind::timestamp("TDRC", "Recording time"),
	FrameKind::timestamp("TDRL", "Release time"),
	FrameKind::timestamp("TDTG", "Tagging time"),
	FrameKind::new("TXXX", "User-defined text", FrameCategory::UserText, USER_TEXT).keyed(KEY_DESC),
	// URLs
	FrameKind::url("WCOM", "Commercial information").keyed(KEY_URL),
	FrameKind::url("WCOP", "Copyright information"),
	FrameKind::url("WFED", "Podcast feed"),
	FrameKind::url("WOAF", "Official file information"),
	FrameKind::url("WOAR", "Official artist/performer information").keyed(KEY_URL),
	FrameKind::url("WOAS", "Official source information"),
	FrameKind::url("WORS", "Official internet radio information"),
	FrameKind::url("WPAY", "Payment information"),
	FrameKind::url("WPUB", "Official publisher information"),
	FrameKind::new("WXXX", "User-defined URL", FrameCategory::UserUrl, USER_URL).keyed(KEY_DESC),
	// People
	FrameKind::paired("TIPL", "Involved people list"),
	FrameKind::paired("TMCL", "Musicians credits list"),
	FrameKind::paired("IPLS", "Involved people list"),
	// Everything else
	FrameKind::other("MCDI", "Binary dump of CD's TOC", BINARY),
	FrameKind::other("ETCO", "Event timing codes", EVENT_TIMING_CODES),
	FrameKind::other("MLLT", "MPEG location lookup table", MPEG_LOOKUP_TABLE),
	FrameKind::other("SYTC", "Synchronised tempo codes", SYNCED_TEMPO),
	FrameKind::other("USLT", "Unsynchronised lyrics/text transcription", UNSYNCED_LYRICS)
		.keyed(KEY_DESC_LANG),
	FrameKind::other("SYLT", "Synchronised lyrics/text", SYNCED_LYRICS).keyed(KEY_DESC_LANG),
	FrameKind::other("COMM", "Comments", COMMENT).keyed(KEY_DESC_LANG),
	FrameKind::other("RVA2", "Relative volume adjustment (2)", RELATIVE_VOLUME).keyed(KEY_DESC),
	FrameKind::other("EQU2", "Equalisation (2)", EQUALISATION).keyed(KEY_DESC),
	FrameKind::other("RVAD", "Relative volume adjustment", BINARY),
	FrameKind::other("EQUA", "Equalisation", BINARY),
	FrameKind::other("RVRB", "Reverb", REVERB),
	FrameKind::other("APIC", "Attached picture", ATTACHED_PICTURE).keyed(KEY_DESC),
	FrameKind::other("PCNT", "Play counter", PLAY_COUNTER),
	FrameKind::other("POPM", "Popularimeter", POPULARIMETER)
		.optional(POPULARIMETER_COUNT)
		.keyed(&["email"]),
	FrameKind::other("GEOB", "General encapsulated object", ENCAPSULATED_OBJECT).keyed(KEY_DESC),
	FrameKind::other("RBUF", "Recommended buffer size", BUFFER_SIZE).optional(BUFFER_SIZE_TAIL),
	FrameKind::other("AENC", "Audio encryption", AUDIO_ENCRYPTION).keyed(KEY_OWNER),
	FrameKind::other("LINK", "Linked information", LINKED_INFO)
		.optional(BINARY)
		.keyed(&["frameid", "url"]),
	FrameKind::other("POSS", "Position synchronisation frame", POSITION_SYNC),
	FrameKind::other("UFID", "Unique file identifier", UNIQUE_FILE_ID).keyed(KEY_OWNER),
	FrameKind::other("USER", "Terms of use", TERMS_OF_USE).keyed(&["lang"]),
	FrameKind::other("OWNE", "Ownership frame", OWNERSHIP),
	FrameKind::other("COMR", "Commercial frame", COMMERCIAL)
		.optional(COMMERCIAL_LOGO)
		.keyed_by_content(),
	FrameKind::other("ENCR", "Encryption method registration", ENCRYPTION_METHOD).keyed(KEY_OWNER),
	FrameKind::other("GRID", "Group identification registration", GROUP_ID).keyed(&["group"]),
	FrameKind::other("PRIV", "Private frame", PRIVATE).keyed(&["owner", "data"]),
	FrameKind::other("SIGN", "Signature frame", SIGNATURE).keyed(&["group", "sig"]),
	FrameKind::other("SEEK", "Seek frame", SEEK),
	FrameKind::other("ASPI", "Audio seek point index", SEEK_POINT_INDEX),
];

const ID3V22_FRAMES: &[FrameKind] = &[
	FrameKind::other("UFI", "Unique file identifier", UNIQUE_FILE_ID)
		.keyed(KEY_OWNER)
		.upgrades_to("UFID"),
	FrameKind::text("TT1", "Content group description").upgrades_to("TIT1"),
	FrameKind::text("TT2", "Title").upgrades_to("TIT2"),
	FrameKind::text("TT3", "Subtitle/Description refinement").upgrades_to("TIT3"),
	FrameKind::text("TP1", "Lead artist/Performer/Soloist/Group").upgrades_to("TPE1"),
	FrameKind::text("TP2", "Band/Orchestra/Accompaniment").upgrades_to("TPE2"),
	FrameKind::text("TP3", "Conductor").upgrades_to("TPE3"),
	FrameKind::text("TP4", "Interpreter/Remixer/Modifier").upgrades_to("TPE4"),
	FrameKind::text("TCM", "Composer").upgrades_to("TCOM"),
	FrameKind::text("TXT", "Lyricist").upgrades_to("TEXT"),
	FrameKind::text("TLA", "Audio languages").upgrades_to("TLAN"),
	FrameKind::text("TCO", "Content type (Genre)").upgrades_to("TCON"),
	FrameKind::text("TAL", "Album").upgrades_to("TALB"),
	FrameKind::numeric_part("TPA", "Part of set").upgrades_to("TPOS"),
	FrameKind::numeric_part("TRK", "Track number").upgrades_to("TRCK"),
	FrameKind::text("TRC", "International Standard Recording Code (ISRC)").upgrades_to("TSRC"),
	FrameKind::numeric("TYE", "Year of recording").upgrades_to("TYER"),
	FrameKind::text("TDA", "Date of recording (DDMM)").upgrades_to("TDAT"),
	FrameKind::text("TIM", "Time of recording (HHMM)").upgrades_to("TIME"),
	FrameKind::text("TRD", "Recording dates").upgrades_to("TRDA"),
	FrameKind::text("TMT", "Source media type").upgrades_to("TMED"),
	FrameKind::text("TFT", "File type").upgrades_to("TFLT"),
	FrameKind::numeric("TBP", "Beats per minute").upgrades_to("TBPM"),
	FrameKind::text("TCR", "Copyright").upgrades_to("TCOP"),
	FrameKind::text("TPB", "Publisher").upgrades_to("TPUB"),
	FrameKind::text("TEN", "Encoder").upgrades_to("TENC"),
	FrameKind::text("TSS", "Encoder settings").upgrades_to("TSSE"),
	FrameKind::text("TOF", "Original filename").upgrades_to("TOFN"),
	FrameKind::numeric("TLE", "Audio length (ms)").upgrades_to("TLEN"),
	FrameKind::numeric("TSI", "Size of audio data (bytes)").upgrades_to("TSIZ"),
	FrameKind::numeric("TDY", "Audio delay (ms)").upgrades_to("TDLY"),
	FrameKind::text("TKE", "Starting key").upgrades_to("TKEY"),
	FrameKind::text("TOT", "Original album").upgrades_to("TOAL"),
	FrameKind::text("TOA", "Original artist/performer").upgrades_to("TOPE"),
	FrameKind::text("TOL", "Original lyricist").upgrades_to("TOLY"),
	FrameKind::numeric("TOR", "Original release year").upgrades_to("TORY"),
	FrameKind::new("TXX", "User-defined text", FrameCategory::UserText, USER_TEXT)
		.keyed(KEY_DESC)
		.upgrades_to("TXXX"),
	// iTunes
	FrameKind::numeric("TCP", "Compilation").upgrades_to("TCMP"),
	FrameKind::text("TST", "Title sort order").upgrades_to("TSOT"),
	FrameKind::text("TSP", "Performer sort order").upgrades_to("TSOP"),
	FrameKind::text("TSA", "Album sort order").upgrades_to("TSOA"),
	FrameKind::text("TS2", "Album artist sort order").upgrades_to("TSO2"),
	FrameKind::text("TSC", "Composer sort order").upgrades_to("TSOC"),
	// URLs
	FrameKind::url("WAF", "Official file information").upgrades_to("WOAF"),
	FrameKind::url("WAR", "Official artist/performer information")
		.keyed(KEY_URL)
		.upgrades_to("WOAR"),
	FrameKind::url("WAS", "Official source information").upgrades_to("WOAS"),
	FrameKind::url("WCM", "Commercial information")
		.keyed(KEY_URL)
		.upgrades_to("WCOM"),
	FrameKind::url("WCP", "Copyright information").upgrades_to("WCOP"),
	FrameKind::url("WPB", "Official publisher information").upgrades_to("WPUB"),
	FrameKind::new("WXX", "User-defined URL", FrameCategory::UserUrl, USER_URL)
		.keyed(KEY_DESC)
		.upgrades_to("WXXX"),
	FrameKind::paired("IPL", "Involved people list").upgrades_to("IPLS"),
	// Everything else
	FrameKind::other("MCI", "Binary dump of CD's TOC", BINARY).upgrades_to("MCDI"),
	FrameKind::other("ETC", "Event timing codes", EVENT_TIMING_CODES).upgrades_to("ETCO"),
	FrameKind::other("MLL", "MPEG location lookup table", MPEG_LOOKUP_TABLE).upgrades_to("MLLT"),
	FrameKind::other("STC", "Synchronised tempo codes", SYNCED_TEMPO).upgrades_to("SYTC"),
	FrameKind::other("ULT", "Unsynchronised lyrics/text transcription", UNSYNCED_LYRICS)
		.keyed(KEY_DESC_LANG)
		.upgrades_to("USLT"),
	FrameKind::other("SLT", "Synchronised lyrics/text", SYNCED_LYRICS)
		.keyed(KEY_DESC_LANG)
		.upgrades_to("SYLT"),
	FrameKind::other("COM", "Comments", COMMENT)
		.keyed(KEY_DESC_LANG)
		.upgrades_to("COMM"),
	FrameKind::other("RVA", "Relative volume adjustment", BINARY).upgrades_to("RVAD"),
	FrameKind::other("EQU", "Equalisation", BINARY).upgrades_to("EQUA"),
	FrameKind::other("REV", "Reverb", REVERB).upgrades_to("RVRB"),
	FrameKind::other("PIC", "Attached picture", V22_PICTURE)
		.keyed(KEY_DESC)
		.upgrades_to("APIC"),
	FrameKind::other("GEO", "General encapsulated object", ENCAPSULATED_OBJECT)
		.keyed(KEY_DESC)
		.upgrades_to("GEOB"),
	FrameKind::other("CNT", "Play counter", PLAY_COUNTER).upgrades_to("PCNT"),
	FrameKind::other("POP", "Popularimeter", POPULARIMETER)
		.optional(POPULARIMETER_COUNT)
		.keyed(&["email"])
		.upgrades_to("POPM"),
	FrameKind::other("BUF", "Recommended buffer size", BUFFER_SIZE)
		.optional(BUFFER_SIZE_TAIL)
		.upgrades_to("RBUF"),
	FrameKind::other("CRM", "Encrypted meta frame", V22_ENCRYPTED_META),
	FrameKind::other("CRA", "Audio encryption", AUDIO_ENCRYPTION)
		.keyed(KEY_OWNER)
		.upgrades_to("AENC"),
	FrameKind::other("LNK", "Linked information", V22_LINKED_INFO)
		.optional(BINARY)
		.keyed(&["frameid", "url"])
		.upgrades_to("LINK"),
];

#[cfg(test)]
mod tests {
	use super::{FrameCategory, FrameTable, HashKeyRule};

	#[test_log::test]
	fn tables_have_unique_ids() {
		for table in [FrameTable::ID3V24, FrameTable::ID3V22] {
			let frames = table.frames();
			for (index, kind) in frames.iter().enumerate() {
				assert!(
					frames[index + 1..].iter().all(|other| other.id != kind.id),
					"duplicate frame ID {}",
					kind.id
				);
			}
		}
	}

	#[test_log::test]
	fn v22_frames_upgrade_to_known_frames() {
		for kind in FrameTable::ID3V22.frames() {
			assert_eq!(kind.id.len(), 3);

			let Some(upgrade) = kind.upgrade else {
				assert_eq!(kind.id, "CRM");
				continue;
			};

			let base = FrameTable::ID3V24.get(upgrade).unwrap();
			assert_eq!(base.hash_key, kind.hash_key, "{} -> {upgrade}", kind.id);
			assert_eq!(base.category, kind.category, "{} -> {upgrade}", kind.id);
		}
	}

	#[test_log::test]
	fn lookup() {
		let comment = FrameTable::ID3V24.get("COMM").unwrap();
		assert_eq!(comment.hash_key, HashKeyRule::Fields(&["desc", "lang"]));
		assert!(comment.spec("lang").is_some());
		assert!(comment.spec("nope").is_none());

		let popm = FrameTable::ID3V24.get("POPM").unwrap();
		assert!(popm.spec("count").is_some());

		assert_eq!(
			FrameTable::ID3V24.get("TDRC").unwrap().category,
			FrameCategory::TimeStampText
		);
		assert!(FrameTable::ID3V24.get("TT2").is_none());
	}
}
