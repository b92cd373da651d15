use std::path::PathBuf;

use clap::{Parser, ValueHint};
use newc::{Entry, FileType};
use regex::Regex;
use tracing::info;
use umask::Mode;

#[derive(Debug, Clone, Parser)]
pub struct ListArgs {
	/// Input package, or '-' for stdin.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "RPM",
	)]
	pub input: PathBuf,

	/// Show mode, owner, size and modification time, like `ls -l`.
	#[arg(long, short)]
	pub long: bool,

	/// Filter entries by name (with a regex).
	///
	/// Can be given multiple times, and entries will be matched if they match any of the regexes.
	#[arg(long, value_name = "REGEX")]
	pub filter: Vec<Regex>,
}

pub(crate) fn list(args: ListArgs) -> miette::Result<()> {
	let mut package = crate::open_package(&args.input)?;

	info!("list payload entries");
	let mut archive = package.archive()?;
	while let Some((entry, _)) = archive.next_entry()? {
		if !args.filter.is_empty() && !args.filter.iter().any(|filter| filter.is_match(&entry.name))
		{
			continue;
		}

		if args.long {
			println!("{}", long_line(&entry));
		} else {
			println!("{}", entry.name);
		}
	}

	Ok(())
}

fn long_line(entry: &Entry) -> String {
	let kind = match entry.file_type() {
		FileType::Regular => '-',
		FileType::Directory => 'd',
		FileType::Symlink => 'l',
		FileType::CharDevice => 'c',
		FileType::BlockDevice => 'b',
		FileType::Fifo => 'p',
		FileType::Socket => 's',
		FileType::Unknown(_) => '?',
	};

	let mtime = entry
		.modified()
		.map(|time| time.format("%Y-%m-%d %H:%M").to_string())
		.unwrap_or_else(|| "-".into());

	format!(
		"{kind}{} {:>5} {:>5} {:>10} {mtime} {}",
		Mode::from(entry.mode.permissions()),
		entry.uid,
		entry.gid,
		entry.size,
		entry.name,
	)
}
