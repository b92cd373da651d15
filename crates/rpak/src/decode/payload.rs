use std::{fmt, io::Read, str::FromStr};

use newc::Archive;
use tracing::{debug, instrument};

use crate::tag;

use super::{
	error::{ErrorKind, Result},
	Package,
};

/// Decompressed payload stream.
pub type Payload<'p> = Box<dyn Read + 'p>;

/// Payload compression, from the `PAYLOADCOMPRESSOR` tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Compressor {
	/// No compression.
	Uncompressed,

	/// Gzip, possibly multi-member.
	Gzip,

	/// Bzip2, possibly multi-stream.
	Bzip2,

	/// XZ.
	Xz,

	/// Legacy LZMA ("lzma alone" format).
	Lzma,

	/// Zstandard.
	Zstd,
}

impl Compressor {
	/// Parse the value of the `PAYLOADCOMPRESSOR` tag.
	pub fn from_name(name: &str) -> std::result::Result<Self, ErrorKind> {
		Ok(match name {
			"uncompressed" => Self::Uncompressed,
			"gzip" => Self::Gzip,
			"bzip2" => Self::Bzip2,
			"xz" => Self::Xz,
			"lzma" => Self::Lzma,
			"zstd" => Self::Zstd,
			other => return Err(ErrorKind::UnsupportedCompressor(other.into())),
		})
	}

	/// The name as used in the `PAYLOADCOMPRESSOR` tag.
	pub fn name(self) -> &'static str {
		match self {
			Self::Uncompressed => "uncompressed",
			Self::Gzip => "gzip",
			Self::Bzip2 => "bzip2",
			Self::Xz => "xz",
			Self::Lzma => "lzma",
			Self::Zstd => "zstd",
		}
	}

	/// Wrap a reader in the matching decompressor.
	pub fn decoder<'r, R: Read + 'r>(self, reader: R) -> Result<Payload<'r>> {
		Ok(match self {
			Self::Uncompressed => Box::new(reader),
			Self::Gzip => Box::new(flate2::read::MultiGzDecoder::new(reader)),
			Self::Bzip2 => Box::new(bzip2::read::MultiBzDecoder::new(reader)),
			Self::Xz => Box::new(xz2::read::XzDecoder::new_multi_decoder(reader)),
			Self::Lzma => {
				let stream = xz2::stream::Stream::new_lzma_decoder(u64::MAX)
					.map_err(std::io::Error::from)?;
				Box::new(xz2::read::XzDecoder::new_stream(reader, stream))
			}
			Self::Zstd => Box::new(zstd::Decoder::new(reader)?),
		})
	}
}

impl FromStr for Compressor {
	type Err = ErrorKind;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		Self::from_name(s)
	}
}

impl fmt::Display for Compressor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl<R> Package<R> {
	/// The payload compression.
	///
	/// There's no default: a package without the tag fails with
	/// [`TagNotFound`](ErrorKind::TagNotFound).
	pub fn compressor(&self) -> Result<Compressor> {
		let name = self.header.get_string(tag::PAYLOADCOMPRESSOR)?;
		Ok(Compressor::from_name(&name)?)
	}
}

impl<R: Read> Package<R> {
	/// The decompressed payload, a newc cpio archive.
	///
	/// Can only be called once: the stream doesn't go backward.
	#[instrument(level = "debug", skip(self))]
	pub fn payload(&mut self) -> Result<Payload<'_>> {
		if self.payload_taken {
			return Err(ErrorKind::ReadOrderViolation("payload can only be read once").into());
		}

		let compressor = self.compressor()?;
		debug!(%compressor, offset=%self.payload_offset, "open payload");
		self.payload_taken = true;
		compressor.decoder(&mut self.reader)
	}

	/// The payload as a cpio archive.
	pub fn archive(&mut self) -> Result<Archive<Payload<'_>>> {
		Ok(Archive::new(self.payload()?))
	}
}
