//! Error types for [`Package`](super::Package) and [`Header`](crate::header::Header).
use std::borrow::Cow;

use deku::DekuError;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::format::{DataType, HEADER_MAGIC, LEAD_MAGIC};

/// Convenience return type.
pub type Result<T> = std::result::Result<T, Error>;

/// Combined return error type for decoding methods.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
	/// I/O error.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// Decoder error that's just a message.
	#[error(transparent)]
	Simple(#[from] SimpleError),

	/// Decoder error that includes source.
	#[error(transparent)]
	Source(#[from] SourceError),

	/// Error from the payload archive.
	#[error(transparent)]
	Archive(#[from] newc::error::Error),
}

impl Error {
	/// The error kind, if this is a decoder error.
	pub fn kind(&self) -> Option<&ErrorKind> {
		match self {
			Self::Simple(err) => Some(&err.kind),
			Self::Source(err) => Some(&err.kind),
			Self::Io(_) | Self::Archive(_) => None,
		}
	}

	/// Which broad class this error belongs to, if it isn't an I/O error.
	pub fn category(&self) -> Option<Category> {
		match self {
			Self::Simple(err) => Some(err.kind.category()),
			Self::Source(err) => Some(err.kind.category()),
			Self::Archive(err) => err.kind().map(|kind| match kind.category() {
				newc::error::Category::Format => Category::Format,
				newc::error::Category::Truncation => Category::Truncation,
				newc::error::Category::Protocol => Category::Protocol,
			}),
			Self::Io(_) => None,
		}
	}

	/// Whether this is a [`TagNotFound`](ErrorKind::TagNotFound) error.
	pub fn is_tag_not_found(&self) -> bool {
		matches!(self.kind(), Some(ErrorKind::TagNotFound(_)))
	}
}

/// Decoder error.
#[derive(Error, Diagnostic, Debug)]
#[error("rpm decode: {message}")]
pub struct SimpleError {
	/// Error kind.
	pub kind: ErrorKind,

	/// Error message.
	pub message: Cow<'static, str>,
}

/// Decoder error.
#[derive(Error, Diagnostic, Debug)]
#[error("rpm decode: {message}")]
pub struct SourceError {
	/// Error kind.
	pub kind: ErrorKind,

	/// Error message.
	pub message: Cow<'static, str>,

	/// Error location in the header data.
	#[label("here")]
	pub at: SourceSpan,

	/// Snippet of the header data.
	#[source_code]
	pub snippet: String,
}

impl SimpleError {
	/// New error without source.
	pub fn new(kind: ErrorKind) -> Self {
		Self {
			message: kind.default_message(),
			kind,
		}
	}

	/// New simple error from deku.
	pub fn from_deku(orig: DekuError) -> Self {
		Self::new(ErrorKind::Parse).with_message(orig.to_string())
	}

	/// Change the error message.
	pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
		self.message = message.into();
		self
	}
}

impl SourceError {
	/// New error with source snippet.
	pub fn new(kind: ErrorKind, snippet: &[u8], at_byte: usize) -> Self {
		Self {
			message: kind.default_message(),
			kind,
			snippet: format!("{snippet:02x?}"),
			at: SourceSpan::from((
				(at_byte * 4) + 1, // each byte is "xx, " after the [
				2,                 // always 2 chars for the hex value
			)),
		}
	}

	/// New error with source snippet, extracted from a larger source.
	pub fn from_source(kind: ErrorKind, source: &[u8], at_byte: usize, context: usize) -> Self {
		let at_byte = at_byte.min(source.len().saturating_sub(1));
		let start = at_byte.saturating_sub(context);
		let end = at_byte.saturating_add(context).min(source.len());
		Self::new(kind, &source[start..end], at_byte - start)
	}

	/// Change the error message.
	pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
		self.message = message.into();
		self
	}
}

/// Broad classes of errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
	/// The input is structurally invalid.
	Format,

	/// The input ended before a structure was complete, or a value runs off its data.
	Truncation,

	/// The decoder was used in a way its contract forbids.
	Protocol,

	/// The package is valid but uses something this decoder doesn't support.
	Unsupported,

	/// A requested tag isn't in the header.
	Lookup,
}

/// Decoder error kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// The lead doesn't start with [`LEAD_MAGIC`].
	BadLeadMagic {
		/// Value found instead.
		actual: u32,
	},

	/// A header doesn't start with [`HEADER_MAGIC`].
	BadHeaderMagic {
		/// Value found instead.
		actual: u32,
	},

	/// A header declares more entries or data than is sane.
	HeaderTooLarge {
		/// Declared number of index entries.
		index_count: u32,
		/// Declared size of the data blob.
		data_size: u32,
	},

	/// The stream ended in the middle of a structure.
	Truncated(&'static str),

	/// No entry with that tag in the header.
	TagNotFound(i32),

	/// An index entry has a data type outside of the known set.
	UnknownDataType {
		/// Tag of the entry.
		tag: i32,
		/// Raw data type value.
		raw: i32,
	},

	/// A typed accessor was used on an entry of another type.
	InvalidDataType {
		/// Tag of the entry.
		tag: i32,
		/// Type the accessor wants.
		expected: DataType,
		/// Type of the entry.
		actual: DataType,
	},

	/// A string value runs past the end of the data without its NUL terminator.
	TruncatedValue {
		/// Tag of the entry.
		tag: i32,
		/// Offset in the data where the unterminated string starts.
		offset: usize,
	},

	/// A value's offset or length places it outside of the data.
	ValueOutOfBounds {
		/// Tag of the entry.
		tag: i32,
		/// Offset of the value.
		offset: i32,
		/// Count of elements.
		count: i32,
	},

	/// A string array decoded to a different number of strings than its count.
	CorruptStringArray {
		/// Tag of the entry.
		tag: i32,
		/// Count from the index entry.
		expected: i32,
		/// Number of strings decoded.
		actual: usize,
	},

	/// The file list tags disagree with each other.
	CorruptFileList(&'static str),

	/// The payload compressor isn't one this decoder knows.
	UnsupportedCompressor(String),

	/// When using internal methods manually, you can read sections of a package out of order,
	/// which will cause this error. The public API guarantees this never occurs.
	ReadOrderViolation(&'static str),

	/// An archive entry would be extracted outside of the target directory.
	UnsafePath(String),

	/// Parse error.
	Parse,
}

impl ErrorKind {
	/// Get the default error message for this error kind.
	pub fn default_message(&self) -> Cow<'static, str> {
		match self {
			ErrorKind::BadLeadMagic { actual } => Cow::Owned(format!(
				"bad lead magic: expected 0x{LEAD_MAGIC:08X}, got 0x{actual:08X}"
			)),
			ErrorKind::BadHeaderMagic { actual } => Cow::Owned(format!(
				"bad header magic: expected 0x{HEADER_MAGIC:08X}, got 0x{actual:08X}"
			)),
			ErrorKind::HeaderTooLarge {
				index_count,
				data_size,
			} => Cow::Owned(format!(
				"header too large: {index_count} entries, {data_size} bytes of data"
			)),
			ErrorKind::Truncated(what) => Cow::Owned(format!("unexpected end of stream in {what}")),
			ErrorKind::TagNotFound(tag) => Cow::Owned(format!("tag {tag} not found")),
			ErrorKind::UnknownDataType { tag, raw } => {
				Cow::Owned(format!("tag {tag} has unknown data type {raw}"))
			}
			ErrorKind::InvalidDataType {
				tag,
				expected,
				actual,
			} => Cow::Owned(format!(
				"tag {tag} has data type {actual}, expected {expected}"
			)),
			ErrorKind::TruncatedValue { tag, offset } => Cow::Owned(format!(
				"tag {tag} has an unterminated string at data offset {offset}"
			)),
			ErrorKind::ValueOutOfBounds { tag, offset, count } => Cow::Owned(format!(
				"tag {tag} value (offset {offset}, count {count}) is outside of the header data"
			)),
			ErrorKind::CorruptStringArray {
				tag,
				expected,
				actual,
			} => Cow::Owned(format!(
				"tag {tag} string array has {actual} strings, expected {expected}"
			)),
			ErrorKind::CorruptFileList(what) => Cow::Owned(format!("corrupt file list: {what}")),
			ErrorKind::UnsupportedCompressor(name) => {
				Cow::Owned(format!("unsupported payload compressor {name:?}"))
			}
			ErrorKind::ReadOrderViolation(what) => {
				Cow::Owned(format!("read order violation: {what}"))
			}
			ErrorKind::UnsafePath(path) => {
				Cow::Owned(format!("refusing to extract outside of target: {path:?}"))
			}
			ErrorKind::Parse => Cow::Borrowed("parse error"),
		}
	}

	/// Which broad class this error belongs to.
	pub fn category(&self) -> Category {
		match self {
			ErrorKind::BadLeadMagic { .. }
			| ErrorKind::BadHeaderMagic { .. }
			| ErrorKind::HeaderTooLarge { .. }
			| ErrorKind::UnknownDataType { .. }
			| ErrorKind::InvalidDataType { .. }
			| ErrorKind::CorruptStringArray { .. }
			| ErrorKind::CorruptFileList(_)
			| ErrorKind::UnsafePath(_)
			| ErrorKind::Parse => Category::Format,
			ErrorKind::Truncated(_)
			| ErrorKind::TruncatedValue { .. }
			| ErrorKind::ValueOutOfBounds { .. } => Category::Truncation,
			ErrorKind::ReadOrderViolation(_) => Category::Protocol,
			ErrorKind::UnsupportedCompressor(_) => Category::Unsupported,
			ErrorKind::TagNotFound(_) => Category::Lookup,
		}
	}
}

impl From<ErrorKind> for SimpleError {
	fn from(ek: ErrorKind) -> Self {
		Self::new(ek)
	}
}

impl From<ErrorKind> for Error {
	fn from(ek: ErrorKind) -> Self {
		Self::Simple(ek.into())
	}
}

/// Map an I/O error from a `read_exact` into a truncation error if it's an early EOF.
pub(crate) fn truncated(what: &'static str) -> impl FnOnce(std::io::Error) -> Error {
	move |err| {
		if err.kind() == std::io::ErrorKind::UnexpectedEof {
			ErrorKind::Truncated(what).into()
		} else {
			Error::Io(err)
		}
	}
}
