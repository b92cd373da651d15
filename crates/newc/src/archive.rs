//! Sequential archive reader.

use std::{cell::RefCell, io::Read, rc::Rc};

use deku::DekuContainerRead;
use tracing::{debug, instrument, trace};

use crate::{
	counter::ByteCounter,
	entry::Entry,
	error::{Error, ErrorKind, Result, SimpleError},
	format::{pad4, RawHeader, HEADER_LENGTH, TRAILER_NAME},
};

/// Longest entry name accepted, including its NUL.
pub const MAX_NAME_SIZE: u32 = 4096;

/// Where the archive reader is at.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
	/// Ready to read the next entry header.
	Positioned,

	/// An entry was returned and its content may still be partially unread.
	InEntry,

	/// The trailer was read.
	Exhausted,

	/// An error occurred; no further progress is possible.
	Failed,
}

/// Streaming reader for newc archives.
///
/// Entries are returned one at a time along with an [`EntryReader`] for their content. The content
/// doesn't need to be read: asking for the next entry skips whatever is left of the current one.
/// The stream is shared between the archive and the live entry reader, and is never seeked
/// backward, so an entry reader used after the next entry was requested fails with
/// [`OutOfOrderRead`](ErrorKind::OutOfOrderRead).
#[derive(Debug)]
pub struct Archive<R> {
	stream: Rc<RefCell<ByteCounter<R>>>,
	state: State,

	/// Offset where the archive starts; padding is relative to it.
	base: u64,

	/// Offset of the next entry header, once the current entry's content and padding are done.
	next_header: u64,
}

impl<R: Read> Archive<R> {
	/// Start reading an archive from the start of a stream.
	pub fn new(reader: R) -> Self {
		Self::from_counter(ByteCounter::new(reader))
	}

	/// Start reading an archive from a counted stream, at its current position.
	///
	/// Entries are aligned to 4 bytes from that position, not from the start of the stream.
	pub fn from_counter(counter: ByteCounter<R>) -> Self {
		let base = counter.position();
		Self {
			stream: Rc::new(RefCell::new(counter)),
			state: State::Positioned,
			base,
			next_header: base,
		}
	}

	/// Current state.
	pub fn state(&self) -> State {
		self.state
	}

	/// Number of bytes consumed from the stream so far.
	pub fn position(&self) -> u64 {
		self.stream.borrow().position()
	}

	/// Read the next entry header.
	///
	/// Returns `Ok(None)` once the trailer entry is reached, and forever after. Any error is
	/// fatal: further calls return [`ArchiveFailed`](ErrorKind::ArchiveFailed).
	#[instrument(level = "debug", skip(self))]
	pub fn next_entry(&mut self) -> Result<Option<(Entry, EntryReader<R>)>> {
		match self.state {
			State::Exhausted => return Ok(None),
			State::Failed => return Err(ErrorKind::ArchiveFailed.into()),
			State::Positioned | State::InEntry => {}
		}

		match self.read_entry() {
			Ok(Some(next)) => {
				self.state = State::InEntry;
				Ok(Some(next))
			}
			Ok(None) => {
				debug!("reached trailer");
				self.state = State::Exhausted;
				Ok(None)
			}
			Err(err) => {
				self.state = State::Failed;
				Err(err)
			}
		}
	}

	fn read_entry(&mut self) -> Result<Option<(Entry, EntryReader<R>)>> {
		let mut stream = self.stream.borrow_mut();

		if stream.position() != self.next_header {
			trace!(from=%stream.position(), to=%self.next_header, "skip rest of previous entry");
		}
		stream.skip_to(self.next_header)?;
		let start = stream.position();

		let mut fixed = [0; HEADER_LENGTH as usize];
		stream.read_exact_or(&mut fixed, "entry header")?;
		let (_, raw) = RawHeader::from_bytes((&fixed[..], 0))
			.map_err(|err| Error::from(SimpleError::from_deku(err)).at(start))?;
		let mut entry = Entry::from_raw(&raw).map_err(|err| err.at(start))?;

		if entry.name_size == 0 || entry.name_size > MAX_NAME_SIZE {
			return Err(Error::from(
				SimpleError::new(ErrorKind::BadName)
					.with_message(format!("bad entry name size {}", entry.name_size)),
			)
			.at(start));
		}

		let mut name = vec![0; entry.name_size as usize];
		stream.read_exact_or(&mut name, "entry name")?;
		if name.pop() != Some(0) {
			return Err(Error::from(ErrorKind::BadName).at(start));
		}
		entry.name = String::from_utf8(name).map_err(|_| {
			Error::from(
				SimpleError::new(ErrorKind::BadName).with_message("entry name is not valid UTF-8"),
			)
			.at(start)
		})?;
		debug!(name=%entry.name, size=%entry.size, mode=%format!("{:o}", entry.mode), %start, "read entry header");

		if entry.name == TRAILER_NAME {
			return Ok(None);
		}

		stream.skip_to(start + pad4(HEADER_LENGTH + u64::from(entry.name_size)))?;
		let content_start = stream.position();
		let size = u64::from(entry.size);
		self.next_header = self.base + pad4(content_start - self.base + size);
		trace!(%content_start, next_header=%self.next_header, "entry content");

		drop(stream);
		let reader = EntryReader {
			stream: Rc::clone(&self.stream),
			start: content_start,
			size,
			read: 0,
		};

		Ok(Some((entry, reader)))
	}
}

impl<R: Read> Iterator for Archive<R> {
	type Item = Result<(Entry, EntryReader<R>)>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.state == State::Failed {
			// the error was already returned once
			return None;
		}

		self.next_entry().transpose()
	}
}

/// Reader for the content of one entry.
///
/// Reads exactly the entry's size in bytes, then returns 0 (end of entry). Reads must happen
/// before the next entry is requested from the [`Archive`].
#[derive(Debug)]
pub struct EntryReader<R> {
	stream: Rc<RefCell<ByteCounter<R>>>,
	start: u64,
	size: u64,
	read: u64,
}

impl<R> EntryReader<R> {
	/// Size of the content in bytes.
	pub fn size(&self) -> u64 {
		self.size
	}

	/// Bytes not yet read.
	pub fn remaining(&self) -> u64 {
		self.size - self.read
	}

	/// Offset of the start of the content in the archive stream.
	pub fn start(&self) -> u64 {
		self.start
	}
}

impl<R: Read> EntryReader<R> {
	/// Read some content.
	///
	/// Returns 0 at the end of the entry. Reads longer than what's left are shortened.
	pub fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize> {
		let mut stream = self.stream.borrow_mut();

		let expected = self.start + self.read;
		let actual = stream.position();
		if actual != expected {
			return Err(ErrorKind::OutOfOrderRead { expected, actual }.into());
		}

		let want = buf.len().min(usize::try_from(self.remaining()).unwrap_or(usize::MAX));
		if want == 0 {
			return Ok(0);
		}

		let n = stream.read(&mut buf[..want])?;
		if n == 0 {
			return Err(Error::from(ErrorKind::Truncated("entry content")).at(actual));
		}

		self.read += n as u64;
		Ok(n)
	}
}

impl<R: Read> Read for EntryReader<R> {
	fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		self.read_chunk(buf).map_err(Error::into_io)
	}
}
