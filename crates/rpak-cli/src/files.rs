use std::path::PathBuf;

use clap::{Parser, ValueHint};
use tracing::info;

#[derive(Debug, Clone, Parser)]
pub struct FilesArgs {
	/// Input package, or '-' for stdin.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "RPM",
	)]
	pub input: PathBuf,

	/// Print full installed paths instead of base names.
	#[arg(long)]
	pub full: bool,
}

pub(crate) fn files(args: FilesArgs) -> miette::Result<()> {
	let package = crate::open_package(&args.input)?;

	info!(full=%args.full, "list files");
	let names = if args.full {
		package.full_paths()?
	} else {
		package
			.files()?
			.into_iter()
			.map(|file| file.name)
			.collect()
	};

	for name in names {
		println!("{name}");
	}

	Ok(())
}
