//! Error types for [`Archive`](crate::Archive) and [`ByteCounter`](crate::ByteCounter).
use std::borrow::Cow;

use deku::DekuError;
use miette::Diagnostic;
use thiserror::Error;

/// Convenience return type.
pub type Result<T> = std::result::Result<T, Error>;

/// Combined return error type for archive methods.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
	/// I/O error.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// Decoder error.
	#[error(transparent)]
	Simple(#[from] SimpleError),
}

impl Error {
	/// The error kind, if this isn't an I/O error.
	pub fn kind(&self) -> Option<ErrorKind> {
		match self {
			Self::Io(_) => None,
			Self::Simple(err) => Some(err.kind),
		}
	}

	/// Record the stream offset where the error was detected.
	///
	/// Does nothing for I/O errors.
	pub fn at(self, offset: u64) -> Self {
		match self {
			Self::Simple(err) => Self::Simple(err.at(offset)),
			other => other,
		}
	}

	/// Convert into an [`std::io::Error`], keeping the original as the inner error.
	///
	/// Used to surface errors through [`Read`](std::io::Read) implementations.
	pub fn into_io(self) -> std::io::Error {
		match self {
			Self::Io(err) => err,
			Self::Simple(err) => {
				let kind = match err.kind.category() {
					Category::Truncation => std::io::ErrorKind::UnexpectedEof,
					Category::Protocol => std::io::ErrorKind::InvalidInput,
					Category::Format => std::io::ErrorKind::InvalidData,
				};
				std::io::Error::new(kind, err)
			}
		}
	}
}

/// Decoder error.
#[derive(Error, Diagnostic, Debug)]
#[error("cpio: {message}")]
pub struct SimpleError {
	/// Error kind.
	pub kind: ErrorKind,

	/// Error message.
	pub message: Cow<'static, str>,

	/// Offset in the archive stream where the error was detected, if known.
	pub offset: Option<u64>,
}

impl SimpleError {
	/// New error.
	pub fn new(kind: ErrorKind) -> Self {
		Self {
			kind,
			message: kind.default_message(),
			offset: None,
		}
	}

	/// New error from deku.
	pub fn from_deku(orig: DekuError) -> Self {
		Self::new(ErrorKind::Parse).with_message(orig.to_string())
	}

	/// Change the error message.
	pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
		self.message = message.into();
		self
	}

	/// Record the stream offset, and mention it in the message.
	pub fn at(mut self, offset: u64) -> Self {
		self.offset = Some(offset);
		self.message = format!("{} (at byte {offset})", self.message).into();
		self
	}
}

/// Broad classes of errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
	/// The input is structurally invalid.
	Format,

	/// The input ended before a structure was complete.
	Truncation,

	/// The reader was used in a way its contract forbids.
	Protocol,
}

/// Decoder error kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// The entry header doesn't start with `070701`.
	BadMagic {
		/// Bytes found instead.
		actual: [u8; 6],
	},

	/// A header field isn't 8 hexadecimal digits.
	BadHexField {
		/// Name of the field.
		field: &'static str,
		/// Bytes found.
		value: [u8; 8],
	},

	/// The entry name is empty, isn't NUL-terminated, or isn't UTF-8.
	BadName,

	/// The stream ended in the middle of a structure.
	Truncated(&'static str),

	/// An entry reader was read from while the stream wasn't where it left off.
	///
	/// This happens when an entry reader is kept around after the next entry is requested.
	OutOfOrderRead {
		/// Where the entry reader expected the stream to be.
		expected: u64,
		/// Where the stream actually is.
		actual: u64,
	},

	/// Asked to skip to an offset behind the current position.
	BackwardSkip {
		/// Current stream position.
		from: u64,
		/// Requested position.
		to: u64,
	},

	/// The archive already failed and can't make progress.
	ArchiveFailed,

	/// Parse error.
	Parse,
}

impl ErrorKind {
	/// Get the default error message for this error kind.
	pub fn default_message(self) -> Cow<'static, str> {
		match self {
			ErrorKind::BadMagic { actual } => Cow::Owned(format!(
				"bad entry magic: expected \"070701\", got {:?}",
				String::from_utf8_lossy(&actual)
			)),
			ErrorKind::BadHexField { field, value } => Cow::Owned(format!(
				"bad hex value in field {field}: {:?}",
				String::from_utf8_lossy(&value)
			)),
			ErrorKind::BadName => Cow::Borrowed("entry name is empty or not NUL-terminated"),
			ErrorKind::Truncated(what) => Cow::Owned(format!("unexpected end of stream in {what}")),
			ErrorKind::OutOfOrderRead { expected, actual } => Cow::Owned(format!(
				"out of order read: entry expected stream at {expected}, but it is at {actual}"
			)),
			ErrorKind::BackwardSkip { from, to } => {
				Cow::Owned(format!("cannot skip backward from {from} to {to}"))
			}
			ErrorKind::ArchiveFailed => Cow::Borrowed("archive has already failed"),
			ErrorKind::Parse => Cow::Borrowed("parse error"),
		}
	}

	/// Which broad class this error belongs to.
	pub fn category(self) -> Category {
		match self {
			ErrorKind::BadMagic { .. }
			| ErrorKind::BadHexField { .. }
			| ErrorKind::BadName
			| ErrorKind::Parse => Category::Format,
			ErrorKind::Truncated(_) => Category::Truncation,
			ErrorKind::OutOfOrderRead { .. }
			| ErrorKind::BackwardSkip { .. }
			| ErrorKind::ArchiveFailed => Category::Protocol,
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
