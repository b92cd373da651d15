use std::{
	fs::File,
	io::{copy, stdout, Write},
	path::PathBuf,
};

use clap::{Parser, ValueHint};
use miette::IntoDiagnostic;
use tracing::info;

#[derive(Debug, Clone, Parser)]
pub struct PayloadArgs {
	/// Input package, or '-' for stdin.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "RPM",
	)]
	pub input: PathBuf,

	/// Write to a file instead of stdout.
	#[arg(long,
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub output: Option<PathBuf>,
}

pub(crate) fn payload(args: PayloadArgs) -> miette::Result<()> {
	let mut package = crate::open_package(&args.input)?;
	info!(compressor=%package.compressor()?, "decompress payload");
	let mut payload = package.payload()?;

	let mut out: Box<dyn Write> = match &args.output {
		Some(path) => Box::new(File::create(path).into_diagnostic()?),
		None => Box::new(stdout().lock()),
	};

	let bytes = copy(&mut payload, &mut out).into_diagnostic()?;
	out.flush().into_diagnostic()?;
	info!(%bytes, "wrote payload");
	Ok(())
}
