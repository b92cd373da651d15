use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::{
	dump::DumpArgs, extract::ExtractArgs, files::FilesArgs, list::ListArgs, payload::PayloadArgs,
};

/// Inspect and unpack RPM packages.
///
/// Reads packages front to back, so they can be piped in as well as read from files: use `-` as
/// the path to read from standard input.
#[derive(Debug, Clone, Parser)]
#[command(
	name = "rpak",
	bin_name = "rpak",
	author,
	version,
	after_help = "Want more detail? Try the long '--help' flag!",
	after_long_help = "Didn't expect this much output? Use the short '-h' flag to get short help."
)]
#[cfg_attr(debug_assertions, command(before_help = "⚠ DEBUG BUILD ⚠"))]
pub struct Args {
	/// Set diagnostic log level.
	///
	/// This enables diagnostic logging, which is useful for investigating bugs or gaining more
	/// insight into a package. Use multiple times to increase verbosity.
	///
	/// Goes up to '-vvvv'. When submitting bug reports, default to a '-vvv' log level.
	///
	/// You may want to use with '--log-file' to avoid polluting your terminal.
	///
	/// If $RUST_LOG is set, this flag is ignored.
	#[arg(
		long,
		short,
		action = ArgAction::Count,
		default_value = "0",
		num_args = 0,
		global = true,
	)]
	pub verbose: Option<u8>,

	/// Write diagnostic logs to a file.
	///
	/// This writes diagnostic logs to a file, instead of the terminal, in JSON format. If a log
	/// level was not already specified, this will set it to '-vvv'.
	///
	/// If a path is not provided, the default is the working directory.
	///
	/// If the path provided is a directory, a file will be created in that directory. The file name
	/// will be the current date and time, in the format 'rpak.YYYY-MM-DDTHH-MM-SSZ.log'.
	#[arg(
		long,
		num_args = 0..=1,
		default_missing_value = ".",
		value_hint = ValueHint::AnyPath,
		value_name = "PATH",
		global = true,
	)]
	pub log_file: Option<PathBuf>,

	/// What to do.
	#[command(subcommand)]
	pub action: Action,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
	/// List the files recorded in the package header.
	Files(FilesArgs),

	/// Print every header entry and its value.
	Dump(DumpArgs),

	/// Write the decompressed payload (a cpio archive), like rpm2cpio.
	Payload(PayloadArgs),

	/// List the entries of the payload archive.
	List(ListArgs),

	/// Unpack the payload into a directory.
	Extract(ExtractArgs),
}
