//! Rpak: decoder for RPM packages.
//!
//! Reads the lead, the signature and metadata headers, and gives access to the decompressed
//! payload as a [newc] cpio archive. Everything is read front to back from a plain [`Read`], so
//! packages can come from pipes as well as files.
//!
//! ```no_run
//! # fn main() -> rpak::decode::error::Result<()> {
//! let mut package = rpak::Package::open("hello-1.0-1.x86_64.rpm")?;
//! println!("{}", package.nevra()?);
//! for file in package.files()? {
//! 	println!("{}", file.name);
//! }
//!
//! let mut archive = package.archive()?;
//! while let Some((entry, _content)) = archive.next_entry()? {
//! 	println!("{} {:o}", entry.name, entry.mode);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`Read`]: std::io::Read

#![warn(clippy::unwrap_used, missing_docs)]
#![deny(rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[doc(inline)]
pub use self::decode::Package;
#[doc(inline)]
pub use self::header::Header;
#[doc(inline)]
pub use self::value::TagValue;

pub mod decode;
pub mod extract;
pub mod format;
pub mod header;
pub mod tag;
pub mod value;
