//! Decoder types and functions.

use newc::ByteCounter;

use crate::{format::Lead, header::Header};

#[doc(inline)]
pub use self::files::FileInfo;
#[doc(inline)]
pub use self::payload::{Compressor, Payload};

mod dump;
pub mod error;
mod files;
mod open;
mod payload;

/// Decoder context.
///
/// Holds the lead and both headers, and the stream positioned at the start of the payload. The
/// stream only ever moves forward, so the payload can be taken once.
#[derive(Debug)]
pub struct Package<R> {
	reader: ByteCounter<R>,

	lead: Lead,

	/// Signature header. Its values are decoded but not verified.
	signature: Header,

	/// Metadata header.
	header: Header,

	/// Offset of the first payload byte from the start of the package.
	payload_offset: u64,

	/// Whether [`payload()`](Package::payload) was called already.
	payload_taken: bool,
}

impl<R> Package<R> {
	/// The lead.
	pub fn lead(&self) -> &Lead {
		&self.lead
	}

	/// The signature header.
	pub fn signature(&self) -> &Header {
		&self.signature
	}

	/// The metadata header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Offset of the payload from the start of the package.
	pub fn payload_offset(&self) -> u64 {
		self.payload_offset
	}

	/// Package name.
	pub fn name(&self) -> error::Result<String> {
		self.header.get_string(crate::tag::NAME)
	}

	/// Package version.
	pub fn version(&self) -> error::Result<String> {
		self.header.get_string(crate::tag::VERSION)
	}

	/// Package release.
	pub fn release(&self) -> error::Result<String> {
		self.header.get_string(crate::tag::RELEASE)
	}

	/// Package architecture.
	pub fn arch(&self) -> error::Result<String> {
		self.header.get_string(crate::tag::ARCH)
	}

	/// Package epoch, if it has one.
	pub fn epoch(&self) -> error::Result<Option<u32>> {
		match self.header.get_u32s(crate::tag::EPOCH) {
			Ok(epochs) => Ok(epochs.first().copied()),
			Err(err) if err.is_tag_not_found() => Ok(None),
			Err(err) => Err(err),
		}
	}

	/// `name-[epoch:]version-release.arch`
	///
	/// Source packages use `src` as the arch.
	pub fn nevra(&self) -> error::Result<String> {
		let epoch = self
			.epoch()?
			.map(|epoch| format!("{epoch}:"))
			.unwrap_or_default();
		let arch = if self.is_source() {
			"src".into()
		} else {
			self.arch()?
		};

		Ok(format!(
			"{}-{epoch}{}-{}.{arch}",
			self.name()?,
			self.version()?,
			self.release()?
		))
	}

	/// Whether this is a source package.
	pub fn is_source(&self) -> bool {
		self.lead.is_source() || self.header.contains(crate::tag::SOURCEPACKAGE)
	}
}
