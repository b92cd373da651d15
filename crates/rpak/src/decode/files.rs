use tracing::{debug, instrument};

use crate::tag;

use super::{
	error::{ErrorKind, Result},
	Package,
};

/// A file listed in the package header.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FileInfo {
	/// Path of the file, as listed.
	pub name: String,
}

impl<R> Package<R> {
	/// List the files in the package.
	///
	/// This is the `FILENAMES` tag, which resolves to base names in modern packages, falling back to
	/// `OLDFILENAMES` for old ones. See [`full_paths`](Self::full_paths) for installed paths.
	#[instrument(level = "debug", skip(self))]
	pub fn files(&self) -> Result<Vec<FileInfo>> {
		let names = match self.header.get_strings(tag::FILENAMES) {
			Err(err) if err.is_tag_not_found() => {
				debug!("no FILENAMES, trying OLDFILENAMES");
				self.header.get_strings(tag::OLDFILENAMES)?
			}
			other => other?,
		};

		Ok(names.into_iter().map(|name| FileInfo { name }).collect())
	}

	/// List the full installed paths of the files in the package.
	///
	/// Joins each base name with its directory, falling back to `OLDFILENAMES` for old packages.
	#[instrument(level = "debug", skip(self))]
	pub fn full_paths(&self) -> Result<Vec<String>> {
		let basenames = match self.header.get_strings(tag::BASENAMES) {
			Err(err) if err.is_tag_not_found() => {
				debug!("no BASENAMES, trying OLDFILENAMES");
				return self.header.get_strings(tag::OLDFILENAMES);
			}
			other => other?,
		};

		let dirnames = self.header.get_strings(tag::DIRNAMES)?;
		let dirindexes = self.header.get_u32s(tag::DIRINDEXES)?;
		if dirindexes.len() != basenames.len() {
			return Err(ErrorKind::CorruptFileList("dir indexes and base names differ in length").into());
		}

		basenames
			.into_iter()
			.zip(dirindexes)
			.map(|(base, index)| {
				let dir = dirnames
					.get(index as usize)
					.ok_or(ErrorKind::CorruptFileList("dir index out of range"))?;
				Ok(format!("{dir}{base}"))
			})
			.collect()
	}
}
