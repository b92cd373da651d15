use std::fmt;

use chrono::{DateTime, Utc};

use crate::{
	error::{ErrorKind, Result},
	format::{RawHeader, NEWC_MAGIC},
};

/// Decoded newc entry header.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
	/// Inode number.
	pub ino: u32,

	/// File mode and type bits.
	pub mode: FileMode,

	/// Owner user id.
	pub uid: u32,

	/// Owner group id.
	pub gid: u32,

	/// Number of hard links.
	pub nlink: u32,

	/// Modification time, seconds since the epoch.
	pub mtime: u32,

	/// Size of the content in bytes.
	pub size: u32,

	/// Major number of the device holding the file.
	pub dev_major: u32,

	/// Minor number of the device holding the file.
	pub dev_minor: u32,

	/// Major number of a device file.
	pub rdev_major: u32,

	/// Minor number of a device file.
	pub rdev_minor: u32,

	/// Length of the name on the wire, including its NUL.
	pub name_size: u32,

	/// Entry name, without the NUL.
	pub name: String,

	/// Header checksum field.
	pub checksum: u32,
}

impl Entry {
	/// Decode the fixed fields of a header.
	///
	/// The name is left empty: it's read separately, as its length is given by
	/// [`name_size`](Self::name_size).
	pub fn from_raw(raw: &RawHeader) -> Result<Self> {
		if raw.magic != NEWC_MAGIC {
			return Err(ErrorKind::BadMagic { actual: raw.magic }.into());
		}

		Ok(Self {
			ino: hex_field("ino", raw.ino)?,
			mode: FileMode(hex_field("mode", raw.mode)?),
			uid: hex_field("uid", raw.uid)?,
			gid: hex_field("gid", raw.gid)?,
			nlink: hex_field("nlink", raw.nlink)?,
			mtime: hex_field("mtime", raw.mtime)?,
			size: hex_field("filesize", raw.filesize)?,
			dev_major: hex_field("devmajor", raw.devmajor)?,
			dev_minor: hex_field("devminor", raw.devminor)?,
			rdev_major: hex_field("rdevmajor", raw.rdevmajor)?,
			rdev_minor: hex_field("rdevminor", raw.rdevminor)?,
			name_size: hex_field("namesize", raw.namesize)?,
			name: String::new(),
			checksum: hex_field("check", raw.check)?,
		})
	}

	/// Type of file this entry holds.
	pub fn file_type(&self) -> FileType {
		self.mode.file_type()
	}

	/// Modification time.
	pub fn modified(&self) -> Option<DateTime<Utc>> {
		DateTime::<Utc>::from_timestamp(self.mtime.into(), 0)
	}
}

/// Parse 8 ASCII hex digits.
///
/// `u32::from_str_radix` accepts a leading `+`, which isn't valid here, so digits are checked
/// first.
fn hex_field(field: &'static str, value: [u8; 8]) -> Result<u32> {
	let bad = || ErrorKind::BadHexField { field, value };
	if !value.iter().all(u8::is_ascii_hexdigit) {
		return Err(bad().into());
	}

	let text = std::str::from_utf8(&value).map_err(|_| bad())?;
	u32::from_str_radix(text, 16).map_err(|_| bad().into())
}

/// POSIX file mode bitfield.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct FileMode(pub u32);

impl FileMode {
	/// Mask for the file type bits.
	pub const TYPE_MASK: u32 = 0o170000;

	/// The file type.
	pub fn file_type(self) -> FileType {
		match self.0 & Self::TYPE_MASK {
			0o140000 => FileType::Socket,
			0o120000 => FileType::Symlink,
			0o100000 => FileType::Regular,
			0o060000 => FileType::BlockDevice,
			0o040000 => FileType::Directory,
			0o020000 => FileType::CharDevice,
			0o010000 => FileType::Fifo,
			other => FileType::Unknown(other),
		}
	}

	/// Permission bits, including setuid, setgid, and sticky.
	pub fn permissions(self) -> u32 {
		self.0 & 0o7777
	}
}

impl fmt::Octal for FileMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Octal::fmt(&self.0, f)
	}
}

/// Kind of file.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FileType {
	/// Regular file.
	Regular,

	/// Directory.
	Directory,

	/// Symbolic link. The content is the link target.
	Symlink,

	/// Character device.
	CharDevice,

	/// Block device.
	BlockDevice,

	/// Named pipe.
	Fifo,

	/// Unix socket.
	Socket,

	/// Unrecognised type bits.
	Unknown(u32),
}
