//! Counting reader with forward-only skip.
//!
//! Packages and archives are read from plain byte streams (files, pipes, decompressors) that can't
//! seek. All alignment is instead computed from the number of bytes consumed so far, which this
//! wrapper keeps track of, and "seeking" is done by reading and discarding.

use std::io::{self, Read};

use tracing::trace;

use crate::error::{truncated, ErrorKind, Result};

/// Reader that counts how many bytes have gone through it.
#[derive(Debug)]
pub struct ByteCounter<R> {
	reader: R,
	position: u64,
}

impl<R> ByteCounter<R> {
	/// Wrap a reader, starting the count at zero.
	pub fn new(reader: R) -> Self {
		Self {
			reader,
			position: 0,
		}
	}

	/// Number of bytes consumed so far.
	pub fn position(&self) -> u64 {
		self.position
	}

	/// Borrow the inner reader.
	pub fn get_ref(&self) -> &R {
		&self.reader
	}

	/// Unwrap the inner reader, losing the count.
	pub fn into_inner(self) -> R {
		self.reader
	}
}

impl<R: Read> ByteCounter<R> {
	/// Discard exactly `n` bytes.
	///
	/// Fails with [`Truncated`](ErrorKind::Truncated) if the stream ends first.
	pub fn skip(&mut self, n: u64) -> Result<()> {
		if n == 0 {
			return Ok(());
		}

		trace!(from=%self.position, bytes=%n, "skip");
		let skipped = io::copy(&mut self.by_ref().take(n), &mut io::sink())?;
		if skipped < n {
			return Err(ErrorKind::Truncated("skipped region").into());
		}

		Ok(())
	}

	/// Discard bytes until the position is `target`.
	///
	/// A target behind the current position is an error, never a no-op.
	pub fn skip_to(&mut self, target: u64) -> Result<()> {
		if target < self.position {
			return Err(ErrorKind::BackwardSkip {
				from: self.position,
				to: target,
			}
			.into());
		}

		self.skip(target - self.position)
	}

	/// Fill the buffer entirely, reporting an early end of stream as truncation of `what`.
	pub fn read_exact_or(&mut self, buf: &mut [u8], what: &'static str) -> Result<()> {
		self.read_exact(buf).map_err(truncated(what))
	}
}

impl<R: Read> Read for ByteCounter<R> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let n = self.reader.read(buf)?;
		self.position += n as u64;
		Ok(n)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_reads() {
		let mut counter = ByteCounter::new(&b"hello world"[..]);
		let mut buf = [0; 5];
		counter.read_exact(&mut buf).unwrap();
		assert_eq!(counter.position(), 5);
		assert_eq!(&buf, b"hello");
	}

	#[test]
	fn skip_discards() {
		let mut counter = ByteCounter::new(&b"hello world"[..]);
		counter.skip(6).unwrap();
		assert_eq!(counter.position(), 6);

		let mut rest = String::new();
		counter.read_to_string(&mut rest).unwrap();
		assert_eq!(rest, "world");
		assert_eq!(counter.position(), 11);
	}

	#[test]
	fn skip_past_end_is_truncation() {
		let mut counter = ByteCounter::new(&b"abc"[..]);
		let err = counter.skip(4).unwrap_err();
		assert_eq!(err.kind(), Some(ErrorKind::Truncated("skipped region")));
	}

	#[test]
	fn skip_to_forward_and_same() {
		let mut counter = ByteCounter::new(&b"abcdefgh"[..]);
		counter.skip_to(3).unwrap();
		counter.skip_to(3).unwrap();
		assert_eq!(counter.position(), 3);
	}

	#[test]
	fn skip_backward_fails() {
		let mut counter = ByteCounter::new(&b"abcdefgh"[..]);
		counter.skip(4).unwrap();
		let err = counter.skip_to(2).unwrap_err();
		assert_eq!(
			err.kind(),
			Some(ErrorKind::BackwardSkip { from: 4, to: 2 })
		);
		assert_eq!(counter.position(), 4);
	}
}
