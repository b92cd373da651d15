use std::{io::stdout, path::PathBuf};

use clap::{Parser, ValueHint};
use miette::IntoDiagnostic;

#[derive(Debug, Clone, Parser)]
pub struct DumpArgs {
	/// Input package, or '-' for stdin.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "RPM",
	)]
	pub input: PathBuf,

	/// Dump the signature header instead of the metadata header.
	#[arg(long)]
	pub signature: bool,
}

pub(crate) fn dump(args: DumpArgs) -> miette::Result<()> {
	let package = crate::open_package(&args.input)?;
	let mut out = stdout().lock();

	if args.signature {
		package.dump_signature(&mut out).into_diagnostic()
	} else {
		package.dump(&mut out).into_diagnostic()
	}
}
