#![warn(clippy::unwrap_used)]
#![deny(rust_2018_idioms)]

use std::{
	fs::File,
	io::{stdin, BufReader, Read},
	path::Path,
};

use clap::Parser;
use miette::IntoDiagnostic;
use rpak::Package;
use tracing::{debug, info, warn};

use crate::args::Action;

mod args;
mod dump;
mod extract;
mod files;
mod list;
mod logs;
mod payload;

fn main() -> miette::Result<()> {
	let logs_on = logs::from_env().into_diagnostic()?;

	debug!("parsing arguments");
	let args = args::Args::parse();

	if logs_on {
		warn!("ignoring logging options from args");
	} else {
		logs::from_args(&args).into_diagnostic()?;
	}

	debug!(?args, "got arguments");

	match args.action {
		Action::Files(args) => files::files(args),
		Action::Dump(args) => dump::dump(args),
		Action::Payload(args) => payload::payload(args),
		Action::List(args) => list::list(args),
		Action::Extract(args) => extract::extract(args),
	}
}

/// Open a package from a path, or from stdin if the path is `-`.
pub(crate) fn open_package(path: &Path) -> miette::Result<Package<Box<dyn Read>>> {
	let reader: Box<dyn Read> = if path == Path::new("-") {
		info!("read package from stdin");
		Box::new(BufReader::new(stdin().lock()))
	} else {
		info!(?path, "open package file");
		Box::new(BufReader::new(File::open(path).into_diagnostic()?))
	};

	Ok(Package::read(reader)?)
}
