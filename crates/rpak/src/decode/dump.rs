use std::io::{self, Write};

use crate::tag;

use super::Package;

impl<R> Package<R> {
	/// Write every metadata header entry and its value.
	///
	/// Entries which can't be decoded are listed with their error.
	pub fn dump(&self, w: &mut impl Write) -> io::Result<()> {
		self.header.dump(w, tag::name)
	}

	/// Write every signature header entry and its value.
	pub fn dump_signature(&self, w: &mut impl Write) -> io::Result<()> {
		self.signature.dump(w, tag::signature::name)
	}
}
