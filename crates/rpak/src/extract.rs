//! Unpack a payload archive into a directory.

use std::{
	collections::HashMap,
	fs::{self, File},
	io::{self, Read},
	path::{Component, Path, PathBuf},
};

use newc::{Archive, Entry, FileType};
use tracing::{debug, instrument, trace, warn};

use crate::decode::error::{ErrorKind, Result};

/// What [`extract`] did.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Extracted {
	/// Paths written, in archive order.
	pub written: Vec<PathBuf>,

	/// Names of entries that were skipped because of their type.
	pub skipped: Vec<String>,
}

/// Turn an archive entry name into a path under `dir`.
///
/// Leading `./` and `/` are dropped. Parent components are refused, as are prefixes on Windows.
pub fn safe_join(dir: &Path, name: &str) -> Result<PathBuf> {
	let mut path = dir.to_path_buf();
	for component in Path::new(name).components() {
		match component {
			Component::Normal(part) => path.push(part),
			Component::CurDir | Component::RootDir => {}
			Component::ParentDir | Component::Prefix(_) => {
				return Err(ErrorKind::UnsafePath(name.into()).into());
			}
		}
	}

	Ok(path)
}

/// Write every entry of an archive under `dir`.
///
/// Directories are created, regular files are written with their content, symlinks are created
/// (on unix). Nothing is ever written through a symlink, whether it came from the archive or was
/// already in `dir`. Device files, fifos and sockets are skipped with a warning. Hard links in newc
/// archives carry their content on the last link only; earlier links are linked to it once it
/// arrives.
#[instrument(level = "debug", skip(archive))]
pub fn extract<R: Read>(archive: &mut Archive<R>, dir: &Path) -> Result<Extracted> {
	let mut extracted = Extracted::default();
	let mut pending_links: HashMap<(u32, u32, u32), Vec<PathBuf>> = HashMap::new();
	let mut directories = Vec::new();

	while let Some((entry, mut content)) = archive.next_entry()? {
		let path = safe_join(dir, &entry.name)?;
		guard_symlinks(dir, &path, &entry.name)?;
		trace!(name=%entry.name, ?path, file_type=?entry.file_type(), "extract entry");

		match entry.file_type() {
			FileType::Directory => {
				fs::create_dir_all(&path)?;
				// applied last, so read-only directories can still be filled
				directories.push((entry, path.clone()));
				extracted.written.push(path);
				continue;
			}
			FileType::Regular => {
				create_parent(&path)?;
				let key = (entry.dev_major, entry.dev_minor, entry.ino);
				if entry.nlink > 1 && entry.size == 0 {
					// written once the link with the content shows up
					pending_links.entry(key).or_default().push(path.clone());
					File::create(&path)?;
				} else {
					let mut file = File::create(&path)?;
					io::copy(&mut content, &mut file)?;
					if let Some(links) = pending_links.remove(&key) {
						for link in links {
							fs::remove_file(&link)?;
							fs::hard_link(&path, &link)?;
						}
					}
				}
			}
			FileType::Symlink => {
				let mut target = String::new();
				content.read_to_string(&mut target)?;
				create_parent(&path)?;
				if !symlink(&target, &path)? {
					extracted.skipped.push(entry.name);
					continue;
				}
			}
			other => {
				warn!(name=%entry.name, file_type=?other, "skipping unsupported entry type");
				extracted.skipped.push(entry.name);
				continue;
			}
		}

		set_permissions(&entry, &path)?;
		extracted.written.push(path);
	}

	for (entry, path) in directories.iter().rev() {
		set_permissions(entry, path)?;
	}

	debug!(written=%extracted.written.len(), skipped=%extracted.skipped.len(), "extracted");
	Ok(extracted)
}

/// Refuse to write through a symlink on the way from `dir` to `path`.
///
/// A symlink already sitting at `path` itself is removed, so the entry replaces it instead of
/// writing to its target.
fn guard_symlinks(dir: &Path, path: &Path, name: &str) -> Result<()> {
	let relative = path
		.strip_prefix(dir)
		.map_err(|_| ErrorKind::UnsafePath(name.into()))?;

	let mut current = dir.to_path_buf();
	let mut components = relative.components().peekable();
	while let Some(component) = components.next() {
		current.push(component);
		let meta = match fs::symlink_metadata(&current) {
			Ok(meta) => meta,
			Err(err) if err.kind() == io::ErrorKind::NotFound => break,
			Err(err) => return Err(err.into()),
		};

		if meta.file_type().is_symlink() {
			if components.peek().is_some() {
				return Err(ErrorKind::UnsafePath(name.into()).into());
			}

			trace!(path=?current, "replacing existing symlink");
			fs::remove_file(&current)?;
		}
	}

	Ok(())
}

fn create_parent(path: &Path) -> io::Result<()> {
	match path.parent() {
		Some(parent) => fs::create_dir_all(parent),
		None => Ok(()),
	}
}

#[cfg(unix)]
fn symlink(target: &str, path: &Path) -> io::Result<bool> {
	if fs::symlink_metadata(path).is_ok() {
		fs::remove_file(path)?;
	}
	std::os::unix::fs::symlink(target, path)?;
	Ok(true)
}

#[cfg(not(unix))]
fn symlink(target: &str, path: &Path) -> io::Result<bool> {
	warn!(?path, %target, "symlinks are only extracted on unix");
	Ok(false)
}

#[cfg(unix)]
fn set_permissions(entry: &Entry, path: &Path) -> io::Result<()> {
	use std::os::unix::fs::PermissionsExt;

	if entry.file_type() == FileType::Symlink {
		return Ok(());
	}

	fs::set_permissions(path, fs::Permissions::from_mode(entry.mode.permissions()))
}

#[cfg(not(unix))]
fn set_permissions(_entry: &Entry, _path: &Path) -> io::Result<()> {
	Ok(())
}
