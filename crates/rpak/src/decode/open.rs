use std::{
	fs::File,
	io::{BufReader, Read},
	path::Path,
};

use deku::DekuContainerRead;
use newc::{format::align, ByteCounter};
use tracing::{debug, instrument, trace};

use crate::{
	format::{Lead, LEAD_LENGTH, SIGNATURE_ALIGNMENT},
	header::Header,
};

use super::{
	error::{truncated, ErrorKind, Result, SimpleError},
	Package,
};

impl<R: Read> Package<R> {
	/// Read the lead and check its magic.
	#[cfg_attr(feature = "expose-internals", visibility::make(pub))]
	#[instrument(level = "debug", skip(reader))]
	fn read_lead(reader: &mut ByteCounter<R>) -> Result<Lead> {
		let mut bytes = [0; LEAD_LENGTH];
		reader
			.read_exact(&mut bytes)
			.map_err(truncated("lead"))?;
		let (_, lead) = Lead::from_bytes((&bytes[..], 0)).map_err(SimpleError::from_deku)?;
		trace!(?lead, "read lead (raw)");

		if !lead.is_valid() {
			return Err(ErrorKind::BadLeadMagic { actual: lead.magic }.into());
		}

		debug!(name=%lead.name(), major=%lead.major, minor=%lead.minor, source=%lead.is_source(), "read lead");
		Ok(lead)
	}

	/// Read the signature header and the padding after it.
	///
	/// The stream must be at the end of the lead.
	#[cfg_attr(feature = "expose-internals", visibility::make(pub))]
	#[instrument(level = "debug", skip(reader))]
	fn read_signature(reader: &mut ByteCounter<R>) -> Result<Header> {
		let start = reader.position();
		if start != LEAD_LENGTH as u64 {
			return Err(ErrorKind::ReadOrderViolation("signature must follow the lead").into());
		}

		let signature = Header::read(reader)?;
		let end = start + signature.stored_length();
		let padded = start + align(signature.stored_length(), SIGNATURE_ALIGNMENT);
		trace!(%end, %padded, "skip signature padding");
		reader.skip_to(padded).map_err(|err| match err.kind() {
			Some(newc::error::ErrorKind::Truncated(_)) => {
				ErrorKind::Truncated("signature padding").into()
			}
			_ => super::error::Error::from(err),
		})?;

		Ok(signature)
	}

	/// Open a package for reading.
	///
	/// This reads the lead and both headers, leaving the stream at the start of the payload. Any
	/// failure aborts the whole decode.
	pub fn read(reader: R) -> Result<Self> {
		let mut reader = ByteCounter::new(reader);
		let lead = Self::read_lead(&mut reader)?;
		let signature = Self::read_signature(&mut reader)?;
		let header = Header::read(&mut reader)?;
		let payload_offset = reader.position();
		debug!(%payload_offset, "package headers read");

		Ok(Self {
			reader,
			lead,
			signature,
			header,
			payload_offset,
			payload_taken: false,
		})
	}
}

impl Package<BufReader<File>> {
	/// Open a package file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::read(BufReader::new(File::open(path)?))
	}
}
