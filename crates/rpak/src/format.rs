//! Binary layout of RPM packages.
//!
//! A package is, in order:
//!
//! - the [lead](Lead), 96 bytes, mostly obsolete
//! - the signature header, a [header](HeaderInfo) padded with zeroes to a multiple of 8 bytes
//! - the metadata header, same structure, unpadded
//! - the payload, a compressed cpio archive, up to the end of the file
//!
//! All integers are big-endian.

#[doc(inline)]
pub use self::constants::*;
#[doc(inline)]
pub use self::header::*;
#[doc(inline)]
pub use self::lead::*;

mod constants;
mod header;
mod lead;
