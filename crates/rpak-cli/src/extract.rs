use std::path::PathBuf;

use clap::{Parser, ValueHint};
use tracing::{info, warn};

#[derive(Debug, Clone, Parser)]
pub struct ExtractArgs {
	/// Input package, or '-' for stdin.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "RPM",
	)]
	pub input: PathBuf,

	/// Directory to extract into. Created if missing.
	#[arg(long,
		value_hint = ValueHint::DirPath,
		value_name = "PATH",
	)]
	pub dir: PathBuf,
}

pub(crate) fn extract(args: ExtractArgs) -> miette::Result<()> {
	let mut package = crate::open_package(&args.input)?;
	let mut archive = package.archive()?;

	info!(dir=?args.dir, "extract payload");
	let extracted = rpak::extract::extract(&mut archive, &args.dir)?;
	for name in &extracted.skipped {
		warn!(%name, "not extracted");
	}

	info!(written=%extracted.written.len(), "done");
	Ok(())
}
