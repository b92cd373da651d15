//! The newc cpio entry header layout.
//!
//! Each entry is:
//!
//! - `070701` (6 ASCII bytes)
//! - 13 fields of 8 ASCII hexadecimal digits, zero-padded, unsigned
//! - the name, `namesize` bytes including its terminating NUL
//! - zero padding so that header + name is a multiple of 4 bytes
//! - the content, `filesize` bytes
//! - zero padding to a multiple of 4 bytes
//!
//! The archive ends with an entry named [`TRAILER_NAME`].

use deku::prelude::*;

/// Magic at the start of every newc entry header.
pub const NEWC_MAGIC: [u8; 6] = *b"070701";

/// Length of the fixed part of the header: the magic plus 13 hex fields.
pub const HEADER_LENGTH: u64 = 6 + 13 * 8;

/// Name of the entry that marks the end of the archive.
pub const TRAILER_NAME: &str = "TRAILER!!!";

/// Round `n` up to the next multiple of 4.
///
/// Multiples of 4 are returned as-is.
pub const fn pad4(n: u64) -> u64 {
	align(n, 4)
}

/// Round `n` up to the next multiple of `to`, which must be a power of two.
pub const fn align(n: u64, to: u64) -> u64 {
	debug_assert!(to.is_power_of_two());
	(n + to - 1) & !(to - 1)
}

/// Fixed part of a newc entry header, still as ASCII.
///
/// Use [`Entry::from_raw`](crate::Entry::from_raw) to decode the fields.
#[derive(Clone, Debug, Eq, PartialEq, DekuRead)]
pub struct RawHeader {
	/// Magic, should match [`NEWC_MAGIC`].
	pub magic: [u8; 6],

	/// Inode number.
	pub ino: [u8; 8],

	/// File mode and type.
	pub mode: [u8; 8],

	/// Owner user id.
	pub uid: [u8; 8],

	/// Owner group id.
	pub gid: [u8; 8],

	/// Number of hard links.
	pub nlink: [u8; 8],

	/// Modification time, seconds since the epoch.
	pub mtime: [u8; 8],

	/// Size of the content in bytes.
	pub filesize: [u8; 8],

	/// Major number of the device holding the file.
	pub devmajor: [u8; 8],

	/// Minor number of the device holding the file.
	pub devminor: [u8; 8],

	/// Major number of a device file.
	pub rdevmajor: [u8; 8],

	/// Minor number of a device file.
	pub rdevminor: [u8; 8],

	/// Length of the name including its NUL.
	pub namesize: [u8; 8],

	/// Checksum, only meaningful for the `070702` variant.
	pub check: [u8; 8],
}
