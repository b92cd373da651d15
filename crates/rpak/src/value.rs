//! Typed header values.

use std::{fmt, ops::Range};

use crate::{decode::error::ErrorKind, format::DataType, format::IndexEntry};

/// Decoded value of a header entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TagValue {
	/// No value.
	Null,

	/// Characters, as raw bytes.
	Char(Vec<u8>),

	/// 8-bit integers.
	Int8(Vec<u8>),

	/// 16-bit integers.
	Int16(Vec<u16>),

	/// 32-bit integers.
	Int32(Vec<u32>),

	/// 64-bit integers.
	Int64(Vec<u64>),

	/// A single string.
	String(String),

	/// Opaque bytes.
	Bin(Vec<u8>),

	/// Several strings.
	StringArray(Vec<String>),

	/// Translated strings, the first one being the untranslated text.
	I18nString(Vec<String>),
}

impl TagValue {
	/// Decode a value from exactly the bytes it covers.
	///
	/// The bytes should come from [`byte_range`], which guarantees that fixed-size types have a
	/// whole number of elements and that string types end with a NUL.
	pub fn decode(data_type: DataType, bytes: &[u8]) -> Self {
		match data_type {
			DataType::Null => Self::Null,
			DataType::Char => Self::Char(bytes.to_vec()),
			DataType::Int8 => Self::Int8(bytes.to_vec()),
			DataType::Int16 => Self::Int16(
				bytes
					.chunks_exact(2)
					.map(|c| u16::from_be_bytes(array(c)))
					.collect(),
			),
			DataType::Int32 => Self::Int32(
				bytes
					.chunks_exact(4)
					.map(|c| u32::from_be_bytes(array(c)))
					.collect(),
			),
			DataType::Int64 => Self::Int64(
				bytes
					.chunks_exact(8)
					.map(|c| u64::from_be_bytes(array(c)))
					.collect(),
			),
			DataType::String => {
				Self::String(split_strings(bytes).into_iter().next().unwrap_or_default())
			}
			DataType::Bin => Self::Bin(bytes.to_vec()),
			DataType::StringArray => Self::StringArray(split_strings(bytes)),
			DataType::I18nString => Self::I18nString(split_strings(bytes)),
		}
	}

	/// The type of this value.
	pub fn data_type(&self) -> DataType {
		match self {
			Self::Null => DataType::Null,
			Self::Char(_) => DataType::Char,
			Self::Int8(_) => DataType::Int8,
			Self::Int16(_) => DataType::Int16,
			Self::Int32(_) => DataType::Int32,
			Self::Int64(_) => DataType::Int64,
			Self::String(_) => DataType::String,
			Self::Bin(_) => DataType::Bin,
			Self::StringArray(_) => DataType::StringArray,
			Self::I18nString(_) => DataType::I18nString,
		}
	}
}

impl fmt::Display for TagValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("(null)"),
			Self::Char(chars) => write!(f, "{:?}", String::from_utf8_lossy(chars)),
			Self::Int8(ints) => write!(f, "{ints:?}"),
			Self::Int16(ints) => write!(f, "{ints:?}"),
			Self::Int32(ints) => write!(f, "{ints:?}"),
			Self::Int64(ints) => write!(f, "{ints:?}"),
			Self::String(s) => f.write_str(s),
			Self::Bin(bytes) => {
				for byte in bytes {
					write!(f, "{byte:02x}")?;
				}
				Ok(())
			}
			Self::StringArray(strings) | Self::I18nString(strings) => write!(f, "{strings:?}"),
		}
	}
}

pub(crate) fn array<const N: usize>(chunk: &[u8]) -> [u8; N] {
	let mut out = [0; N];
	out.copy_from_slice(chunk);
	out
}

/// Split NUL-terminated strings.
///
/// The final NUL doesn't start a new string, so `a\0b\0` is two strings and an empty input is none.
pub fn split_strings(bytes: &[u8]) -> Vec<String> {
	let mut strings: Vec<String> = bytes
		.split(|b| *b == 0)
		.map(|s| String::from_utf8_lossy(s).into_owned())
		.collect();
	strings.pop();
	strings
}

/// Where an entry's value lives in the data blob.
///
/// Fixed-size types cover `count` elements; a String covers up to and including its first NUL
/// regardless of count; string arrays cover `count` consecutive NUL-terminated strings.
pub fn byte_range(
	entry: &IndexEntry,
	data_type: DataType,
	data: &[u8],
) -> Result<Range<usize>, ErrorKind> {
	let out_of_bounds = || ErrorKind::ValueOutOfBounds {
		tag: entry.tag,
		offset: entry.offset,
		count: entry.count,
	};

	let start = usize::try_from(entry.offset).map_err(|_| out_of_bounds())?;
	let count = usize::try_from(entry.count).map_err(|_| out_of_bounds())?;
	if start > data.len() {
		return Err(out_of_bounds());
	}

	let end = if let Some(size) = data_type.element_size() {
		size.checked_mul(count)
			.and_then(|len| start.checked_add(len))
			.filter(|end| *end <= data.len())
			.ok_or_else(out_of_bounds)?
	} else {
		let strings = if data_type == DataType::String {
			1
		} else {
			count
		};

		let mut end = start;
		for _ in 0..strings {
			let nul = data[end..]
				.iter()
				.position(|b| *b == 0)
				.ok_or(ErrorKind::TruncatedValue {
					tag: entry.tag,
					offset: end,
				})?;
			end += nul + 1;
		}
		end
	};

	Ok(start..end)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn entry(data_type: DataType, offset: i32, count: i32) -> IndexEntry {
		IndexEntry {
			tag: 1000,
			data_type: data_type as i32,
			offset,
			count,
		}
	}

	#[test]
	fn string_array_range() {
		let data = b"a.txt\0b.txt\0";
		let e = entry(DataType::StringArray, 0, 2);
		let range = byte_range(&e, DataType::StringArray, data).unwrap();
		assert_eq!(range, 0..12);
		assert_eq!(
			TagValue::decode(DataType::StringArray, &data[range]),
			TagValue::StringArray(vec!["a.txt".into(), "b.txt".into()])
		);
	}

	#[test]
	fn string_array_with_fewer_strings_is_truncated() {
		let data = b"a.txt\0b.txt";
		let e = entry(DataType::StringArray, 0, 2);
		assert_eq!(
			byte_range(&e, DataType::StringArray, data),
			Err(ErrorKind::TruncatedValue {
				tag: 1000,
				offset: 6
			})
		);
	}

	#[test]
	fn string_ignores_count() {
		let data = b"xhello\0world\0";
		let e = entry(DataType::String, 1, 5);
		let range = byte_range(&e, DataType::String, data).unwrap();
		assert_eq!(range, 1..7);
		assert_eq!(
			TagValue::decode(DataType::String, &data[range]),
			TagValue::String("hello".into())
		);
	}

	#[test]
	fn empty_string_array() {
		let e = entry(DataType::StringArray, 3, 0);
		let range = byte_range(&e, DataType::StringArray, b"abc").unwrap();
		assert_eq!(range, 3..3);
		assert_eq!(
			TagValue::decode(DataType::StringArray, &[]),
			TagValue::StringArray(Vec::new())
		);
	}

	#[test]
	fn integers_are_big_endian() {
		let data = [0x00, 0x01, 0x00, 0x00, 0x01, 0x00, 0xFF, 0xFF];
		let e = entry(DataType::Int32, 0, 2);
		let range = byte_range(&e, DataType::Int32, &data).unwrap();
		assert_eq!(
			TagValue::decode(DataType::Int32, &data[range]),
			TagValue::Int32(vec![0x0001_0000, 0x0100_FFFF])
		);

		let e = entry(DataType::Int16, 2, 3);
		let range = byte_range(&e, DataType::Int16, &data).unwrap();
		assert_eq!(
			TagValue::decode(DataType::Int16, &data[range]),
			TagValue::Int16(vec![0, 0x0100, 0xFFFF])
		);

		let e = entry(DataType::Int64, 0, 1);
		let range = byte_range(&e, DataType::Int64, &data).unwrap();
		let value = TagValue::decode(DataType::Int64, &data[range]);
		assert_eq!(value, TagValue::Int64(vec![0x0001_0000_0100_FFFF]));
		assert_eq!(value.data_type(), DataType::Int64);
	}

	#[test]
	fn fixed_range_past_end() {
		let e = entry(DataType::Int32, 4, 2);
		assert_eq!(
			byte_range(&e, DataType::Int32, &[0; 8]),
			Err(ErrorKind::ValueOutOfBounds {
				tag: 1000,
				offset: 4,
				count: 2
			})
		);
	}

	#[test]
	fn negative_offset_or_count() {
		let e = entry(DataType::Bin, -1, 2);
		assert!(matches!(
			byte_range(&e, DataType::Bin, &[0; 8]),
			Err(ErrorKind::ValueOutOfBounds { .. })
		));

		let e = entry(DataType::Bin, 0, -2);
		assert!(matches!(
			byte_range(&e, DataType::Bin, &[0; 8]),
			Err(ErrorKind::ValueOutOfBounds { .. })
		));
	}

	#[test]
	fn offset_at_end_of_data() {
		let e = entry(DataType::Null, 8, 1);
		assert_eq!(byte_range(&e, DataType::Null, &[0; 8]), Ok(8..8));

		let e = entry(DataType::String, 8, 1);
		assert!(matches!(
			byte_range(&e, DataType::String, &[0; 8]),
			Err(ErrorKind::TruncatedValue { offset: 8, .. })
		));
	}

	#[test]
	fn display() {
		assert_eq!(TagValue::String("hi".into()).to_string(), "hi");
		assert_eq!(TagValue::Bin(vec![0xde, 0xad]).to_string(), "dead");
		assert_eq!(TagValue::Int32(vec![1, 2]).to_string(), "[1, 2]");
		assert_eq!(
			TagValue::StringArray(vec!["a".into(), "b".into()]).to_string(),
			r#"["a", "b"]"#
		);
	}
}
