use deku::prelude::*;

use super::constants::{LEAD_MAGIC, PACKAGE_TYPE_SOURCE};

/// RPM lead.
///
/// Fixed 96-byte structure at the start of the file. Modern tools only use it to identify the
/// file; the authoritative metadata is in the headers.
#[derive(Clone, Debug, Eq, PartialEq, DekuRead)]
#[deku(endian = "big")]
pub struct Lead {
	/// Magic number. Should match [`LEAD_MAGIC`].
	pub magic: u32,

	/// Format major version.
	pub major: u8,

	/// Format minor version.
	pub minor: u8,

	/// 0 for binary packages, 1 for source packages.
	pub package_type: i16,

	/// Architecture number.
	pub arch: i16,

	/// Package name, NUL-padded.
	pub name: [u8; 66],

	/// Operating system number.
	pub os: i16,

	/// Signature type, 5 for a header-style signature.
	pub signature_type: i16,

	/// Reserved.
	pub reserved: [u8; 16],
}

impl Lead {
	/// Whether the magic number is correct.
	pub fn is_valid(&self) -> bool {
		self.magic == LEAD_MAGIC
	}

	/// Whether the lead says this is a source package.
	pub fn is_source(&self) -> bool {
		self.package_type == PACKAGE_TYPE_SOURCE
	}

	/// The name field, up to its first NUL.
	pub fn name(&self) -> String {
		let end = self
			.name
			.iter()
			.position(|b| *b == 0)
			.unwrap_or(self.name.len());
		String::from_utf8_lossy(&self.name[..end]).into_owned()
	}
}
