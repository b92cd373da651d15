use std::fmt;

use deku::prelude::*;

/// Fixed part of a header.
///
/// Followed by `index_count` [index entries](IndexEntry) and then `data_size` bytes of data.
#[derive(Clone, Copy, Debug, Eq, PartialEq, DekuRead)]
#[deku(endian = "big")]
pub struct HeaderInfo {
	/// Magic and version. Should match [`HEADER_MAGIC`][super::constants::HEADER_MAGIC].
	pub magic: u32,

	/// Reserved, should be zero.
	pub reserved: u32,

	/// Number of index entries.
	pub index_count: u32,

	/// Size of the data blob in bytes.
	pub data_size: u32,
}

/// One entry of a header index.
///
/// Describes where a tag's value lives in the header's data blob.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, DekuRead)]
#[deku(endian = "big")]
pub struct IndexEntry {
	/// Tag number.
	pub tag: i32,

	/// Raw data type, see [`DataType`].
	pub data_type: i32,

	/// Offset of the value in the data blob.
	pub offset: i32,

	/// Number of elements in the value.
	pub count: i32,
}

impl IndexEntry {
	/// The entry's data type, if it's a known one.
	pub fn data_type(&self) -> Option<DataType> {
		DataType::try_from(self.data_type).ok()
	}
}

/// Type of a header value.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum DataType {
	/// No value.
	Null = 0,

	/// Bytes interpreted as characters.
	Char = 1,

	/// Unsigned 8-bit integers.
	Int8 = 2,

	/// Unsigned 16-bit integers.
	Int16 = 3,

	/// Unsigned 32-bit integers.
	Int32 = 4,

	/// Unsigned 64-bit integers.
	Int64 = 5,

	/// One NUL-terminated string. The count is always 1.
	String = 6,

	/// Opaque bytes.
	Bin = 7,

	/// Sequence of NUL-terminated strings.
	StringArray = 8,

	/// Sequence of NUL-terminated strings, one per locale.
	I18nString = 9,
}

impl DataType {
	/// Size in bytes of one element, for fixed-size types.
	///
	/// Returns `None` for the string types, which are delimited by NULs.
	pub const fn element_size(self) -> Option<usize> {
		match self {
			Self::Null => Some(0),
			Self::Char | Self::Int8 | Self::Bin => Some(1),
			Self::Int16 => Some(2),
			Self::Int32 => Some(4),
			Self::Int64 => Some(8),
			Self::String | Self::StringArray | Self::I18nString => None,
		}
	}

	/// Whether values of this type are NUL-terminated strings.
	pub const fn is_string(self) -> bool {
		self.element_size().is_none()
	}

	/// Lowercase name.
	pub const fn name(self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Char => "char",
			Self::Int8 => "int8",
			Self::Int16 => "int16",
			Self::Int32 => "int32",
			Self::Int64 => "int64",
			Self::String => "string",
			Self::Bin => "bin",
			Self::StringArray => "string_array",
			Self::I18nString => "i18nstring",
		}
	}
}

impl TryFrom<i32> for DataType {
	type Error = i32;

	fn try_from(raw: i32) -> Result<Self, Self::Error> {
		Ok(match raw {
			0 => Self::Null,
			1 => Self::Char,
			2 => Self::Int8,
			3 => Self::Int16,
			4 => Self::Int32,
			5 => Self::Int64,
			6 => Self::String,
			7 => Self::Bin,
			8 => Self::StringArray,
			9 => Self::I18nString,
			other => return Err(other),
		})
	}
}

impl fmt::Display for DataType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn index_entry_is_big_endian() {
		let bytes = [
			0x00, 0x00, 0x03, 0xE8, // 1000
			0x00, 0x00, 0x00, 0x06, // string
			0x00, 0x00, 0x00, 0x10, // 16
			0x00, 0x00, 0x00, 0x01, // 1
		];
		let (_, entry) = IndexEntry::from_bytes((&bytes[..], 0)).unwrap();
		assert_eq!(
			entry,
			IndexEntry {
				tag: 1000,
				data_type: 6,
				offset: 16,
				count: 1
			}
		);
		assert_eq!(entry.data_type(), Some(DataType::String));
	}

	#[test]
	fn data_type_range() {
		for raw in 0..=9 {
			let dt = DataType::try_from(raw).unwrap();
			assert_eq!(dt as i32, raw);
		}
		assert_eq!(DataType::try_from(10), Err(10));
		assert_eq!(DataType::try_from(-1), Err(-1));
	}

	#[test]
	fn string_types_have_no_element_size() {
		assert!(DataType::String.is_string());
		assert!(DataType::StringArray.is_string());
		assert!(DataType::I18nString.is_string());
		assert_eq!(DataType::Int64.element_size(), Some(8));
		assert_eq!(DataType::Null.element_size(), Some(0));
	}
}
