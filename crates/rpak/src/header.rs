//! Tag-indexed headers.
//!
//! Both the signature and the metadata of a package are stored as headers: a preamble, an index of
//! entries each pointing at a value, and a blob of data holding the values.

use std::io::{self, Read, Write};

use deku::DekuContainerRead;
use tracing::{debug, instrument, trace};

use crate::{
	decode::error::{truncated, Error, ErrorKind, Result, SimpleError, SourceError},
	format::{
		DataType, HeaderInfo, IndexEntry, HEADER_MAGIC, HEADER_PREAMBLE_LENGTH, INDEX_ENTRY_LENGTH,
		MAX_DATA_SIZE, MAX_INDEX_COUNT,
	},
	tag,
	value::{array, byte_range, split_strings, TagValue},
};

/// Bytes of context either side of an error location in the data blob.
const SNIPPET_CONTEXT: usize = 16;

/// A decoded header.
///
/// Entries are kept in file order; lookups return the first entry with the tag.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Header {
	entries: Vec<IndexEntry>,
	data: Vec<u8>,
}

impl Header {
	/// Read a header from the current position of a stream.
	///
	/// Reads exactly the preamble, the index, and the data; no padding after.
	///
	/// If the magic doesn't match, nothing after the preamble is read.
	#[instrument(level = "debug", skip(reader))]
	pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
		let mut preamble = [0; HEADER_PREAMBLE_LENGTH];
		reader
			.read_exact(&mut preamble)
			.map_err(truncated("header preamble"))?;
		let (_, info) =
			HeaderInfo::from_bytes((&preamble[..], 0)).map_err(SimpleError::from_deku)?;
		trace!(?info, "read header preamble");

		if info.magic != HEADER_MAGIC {
			return Err(ErrorKind::BadHeaderMagic { actual: info.magic }.into());
		}

		if info.index_count > MAX_INDEX_COUNT || info.data_size > MAX_DATA_SIZE {
			return Err(ErrorKind::HeaderTooLarge {
				index_count: info.index_count,
				data_size: info.data_size,
			}
			.into());
		}

		let mut index = vec![0; info.index_count as usize * INDEX_ENTRY_LENGTH];
		reader
			.read_exact(&mut index)
			.map_err(truncated("header index"))?;
		let entries = index
			.chunks_exact(INDEX_ENTRY_LENGTH)
			.map(|chunk| {
				IndexEntry::from_bytes((chunk, 0))
					.map(|(_, entry)| entry)
					.map_err(|err| Error::from(SimpleError::from_deku(err)))
			})
			.collect::<Result<Vec<_>>>()?;

		// grows as data arrives rather than trusting the declared size upfront
		let mut data = Vec::new();
		reader
			.take(u64::from(info.data_size))
			.read_to_end(&mut data)?;
		if data.len() != info.data_size as usize {
			return Err(ErrorKind::Truncated("header data").into());
		}

		debug!(entries=%entries.len(), data=%data.len(), "read header");
		Ok(Self { entries, data })
	}

	/// The index entries, in file order.
	pub fn entries(&self) -> &[IndexEntry] {
		&self.entries
	}

	/// The data blob.
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Tags present in this header, in file order.
	pub fn tags(&self) -> impl Iterator<Item = i32> + '_ {
		self.entries.iter().map(|entry| entry.tag)
	}

	/// Whether a lookup for this tag would find an entry.
	pub fn contains(&self, tag: i32) -> bool {
		self.find(tag).is_some()
	}

	/// Size of this header as stored in the file, excluding padding.
	pub fn stored_length(&self) -> u64 {
		(HEADER_PREAMBLE_LENGTH + self.entries.len() * INDEX_ENTRY_LENGTH + self.data.len()) as u64
	}

	fn find(&self, tag: i32) -> Option<&IndexEntry> {
		let by_tag = |wanted: i32| self.entries.iter().find(|entry| entry.tag == wanted);
		tag::alias_target(tag)
			.and_then(by_tag)
			.or_else(|| by_tag(tag))
	}

	fn source_error(&self, kind: ErrorKind, at: usize) -> Error {
		SourceError::from_source(kind, &self.data, at, SNIPPET_CONTEXT).into()
	}

	/// Locate the bytes of an entry's value.
	pub fn value_bytes(&self, entry: &IndexEntry) -> Result<(DataType, &[u8])> {
		let data_type = entry
			.data_type()
			.ok_or(ErrorKind::UnknownDataType {
				tag: entry.tag,
				raw: entry.data_type,
			})?;

		let range = byte_range(entry, data_type, &self.data).map_err(|kind| {
			let at = match kind {
				ErrorKind::TruncatedValue { offset, .. } => offset,
				_ => usize::try_from(entry.offset).unwrap_or_default(),
			};
			self.source_error(kind, at)
		})?;

		Ok((data_type, &self.data[range]))
	}

	/// Find an entry by tag and return it along with its value's bytes.
	///
	/// Aliased tags (see [`tag::ALIASES`]) are looked up by their target first.
	pub fn get_raw(&self, tag: i32) -> Result<(IndexEntry, &[u8])> {
		let entry = *self.find(tag).ok_or(ErrorKind::TagNotFound(tag))?;
		let (_, bytes) = self.value_bytes(&entry)?;
		Ok((entry, bytes))
	}

	/// Decode an entry's value.
	pub fn get(&self, tag: i32) -> Result<TagValue> {
		let entry = self.find(tag).ok_or(ErrorKind::TagNotFound(tag))?;
		let (data_type, bytes) = self.value_bytes(entry)?;
		Ok(TagValue::decode(data_type, bytes))
	}

	/// Find an entry whose type is one of `expected`, then locate its value.
	fn get_typed(&self, tag: i32, expected: &[DataType]) -> Result<(IndexEntry, &[u8])> {
		let entry = *self.find(tag).ok_or(ErrorKind::TagNotFound(tag))?;
		match entry.data_type() {
			Some(actual) if !expected.contains(&actual) => {
				return Err(ErrorKind::InvalidDataType {
					tag: entry.tag,
					expected: expected[0],
					actual,
				}
				.into());
			}
			_ => {}
		}

		let (_, bytes) = self.value_bytes(&entry)?;
		Ok((entry, bytes))
	}

	/// Get a string value.
	///
	/// For translated strings, this is the first (untranslated) one.
	pub fn get_string(&self, tag: i32) -> Result<String> {
		let (entry, bytes) = self.get_typed(tag, &[DataType::String, DataType::I18nString])?;
		split_strings(bytes).into_iter().next().ok_or_else(|| {
			ErrorKind::CorruptStringArray {
				tag: entry.tag,
				expected: entry.count,
				actual: 0,
			}
			.into()
		})
	}

	/// Get a string array value.
	pub fn get_strings(&self, tag: i32) -> Result<Vec<String>> {
		let (entry, bytes) = self.get_typed(tag, &[DataType::StringArray, DataType::I18nString])?;
		let strings = split_strings(bytes);
		if usize::try_from(entry.count).ok() != Some(strings.len()) {
			return Err(ErrorKind::CorruptStringArray {
				tag: entry.tag,
				expected: entry.count,
				actual: strings.len(),
			}
			.into());
		}

		Ok(strings)
	}

	/// Get a 16-bit integer array value.
	pub fn get_u16s(&self, tag: i32) -> Result<Vec<u16>> {
		let (_, bytes) = self.get_typed(tag, &[DataType::Int16])?;
		Ok(bytes
			.chunks_exact(2)
			.map(|c| u16::from_be_bytes(array(c)))
			.collect())
	}

	/// Get a 32-bit integer array value.
	pub fn get_u32s(&self, tag: i32) -> Result<Vec<u32>> {
		let (_, bytes) = self.get_typed(tag, &[DataType::Int32])?;
		Ok(bytes
			.chunks_exact(4)
			.map(|c| u32::from_be_bytes(array(c)))
			.collect())
	}

	/// Get a 64-bit integer array value.
	pub fn get_u64s(&self, tag: i32) -> Result<Vec<u64>> {
		let (_, bytes) = self.get_typed(tag, &[DataType::Int64])?;
		Ok(bytes
			.chunks_exact(8)
			.map(|c| u64::from_be_bytes(array(c)))
			.collect())
	}

	/// Get a binary value.
	pub fn get_bin(&self, tag: i32) -> Result<&[u8]> {
		let (_, bytes) = self.get_typed(tag, &[DataType::Bin])?;
		Ok(bytes)
	}

	/// Write every entry and its value, one per line.
	///
	/// Entries that fail to decode are printed with their error, and don't stop the listing.
	pub fn dump(&self, w: &mut impl Write, names: fn(i32) -> Option<&'static str>) -> io::Result<()> {
		for (i, entry) in self.entries.iter().enumerate() {
			writeln!(w, "{i}: ({}) {}", entry.tag, tag::display(entry.tag, names))?;
			match self.value_bytes(entry) {
				Ok((data_type, bytes)) => {
					writeln!(w, "\t{data_type}: {}", TagValue::decode(data_type, bytes))?
				}
				Err(err) => writeln!(w, "\terr: {err}")?,
			}
		}

		Ok(())
	}
}
