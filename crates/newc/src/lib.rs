//! Newc: streaming reader for SVR4 "newc" cpio archives.
//!
//! This is the archive format used for RPM payloads. The reader works over any
//! [`Read`](std::io::Read) and never seeks: entry content that isn't read is skipped by reading and
//! discarding it when the next entry is requested.
//!
//! ```no_run
//! use std::io::Read;
//!
//! # fn main() -> newc::error::Result<()> {
//! let file = std::fs::File::open("payload.cpio")?;
//! let mut archive = newc::Archive::new(file);
//! while let Some((entry, mut content)) = archive.next_entry()? {
//! 	let mut data = Vec::new();
//! 	content.read_to_end(&mut data)?;
//! 	println!("{} ({} bytes)", entry.name, data.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(clippy::unwrap_used, missing_docs)]
#![deny(rust_2018_idioms)]

#[doc(inline)]
pub use self::archive::{Archive, EntryReader, State, MAX_NAME_SIZE};
#[doc(inline)]
pub use self::counter::ByteCounter;
#[doc(inline)]
pub use self::entry::{Entry, FileMode, FileType};

mod archive;
mod counter;
mod entry;
pub mod error;
pub mod format;
