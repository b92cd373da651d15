#![allow(dead_code)]

use std::io::Write;

use rpak::format::{DataType, HEADER_MAGIC, LEAD_LENGTH, LEAD_MAGIC};

/// Builds a header the way rpmbuild lays them out: index in insertion order, values appended to
/// the data blob with integers aligned to their size.
#[derive(Clone, Debug, Default)]
pub struct HeaderBuilder {
	index: Vec<[i32; 4]>,
	data: Vec<u8>,
}

impl HeaderBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	fn push(
		mut self,
		tag: i32,
		data_type: DataType,
		align: usize,
		count: usize,
		value: &[u8],
	) -> Self {
		while self.data.len() % align != 0 {
			self.data.push(0);
		}
		self.index.push([
			tag,
			data_type as i32,
			self.data.len() as i32,
			count as i32,
		]);
		self.data.extend_from_slice(value);
		self
	}

	pub fn string(self, tag: i32, value: &str) -> Self {
		let mut bytes = value.as_bytes().to_vec();
		bytes.push(0);
		self.push(tag, DataType::String, 1, 1, &bytes)
	}

	fn nul_joined(values: &[&str]) -> Vec<u8> {
		let mut bytes = Vec::new();
		for value in values {
			bytes.extend_from_slice(value.as_bytes());
			bytes.push(0);
		}
		bytes
	}

	pub fn strings(self, tag: i32, values: &[&str]) -> Self {
		let bytes = Self::nul_joined(values);
		self.push(tag, DataType::StringArray, 1, values.len(), &bytes)
	}

	pub fn i18n(self, tag: i32, values: &[&str]) -> Self {
		let bytes = Self::nul_joined(values);
		self.push(tag, DataType::I18nString, 1, values.len(), &bytes)
	}

	pub fn u32s(self, tag: i32, values: &[u32]) -> Self {
		let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
		self.push(tag, DataType::Int32, 4, values.len(), &bytes)
	}

	pub fn bin(self, tag: i32, value: &[u8]) -> Self {
		self.push(tag, DataType::Bin, 1, value.len(), value)
	}

	pub fn build(&self) -> Vec<u8> {
		let mut out = Vec::new();
		out.extend_from_slice(&HEADER_MAGIC.to_be_bytes());
		out.extend_from_slice(&[0; 4]);
		out.extend_from_slice(&(self.index.len() as u32).to_be_bytes());
		out.extend_from_slice(&(self.data.len() as u32).to_be_bytes());
		for entry in &self.index {
			for field in entry {
				out.extend_from_slice(&field.to_be_bytes());
			}
		}
		out.extend_from_slice(&self.data);
		out
	}
}

pub fn lead(source: bool) -> Vec<u8> {
	let mut out = vec![0; LEAD_LENGTH];
	out[..4].copy_from_slice(&LEAD_MAGIC.to_be_bytes());
	out[4] = 3;
	out[7] = u8::from(source);
	out[10..15].copy_from_slice(b"hello");
	out[79] = 5;
	out
}

pub fn signature() -> HeaderBuilder {
	HeaderBuilder::new()
		.u32s(rpak::tag::signature::SIZE, &[1234])
		.bin(rpak::tag::signature::MD5, &[0xAB; 16])
}

pub fn metadata(compressor: &str) -> HeaderBuilder {
	HeaderBuilder::new()
		.string(rpak::tag::NAME, "hello")
		.string(rpak::tag::VERSION, "1.0")
		.string(rpak::tag::RELEASE, "1")
		.i18n(rpak::tag::SUMMARY, &["Says hello", "Dit bonjour"])
		.string(rpak::tag::ARCH, "x86_64")
		.u32s(rpak::tag::DIRINDEXES, &[0, 1, 1])
		.strings(rpak::tag::BASENAMES, &["hello", "README", "link"])
		.strings(rpak::tag::DIRNAMES, &["/usr/bin/", "/usr/share/doc/hello/"])
		.string(rpak::tag::PAYLOADFORMAT, "cpio")
		.string(rpak::tag::PAYLOADCOMPRESSOR, compressor)
}

/// Append one newc entry.
pub fn push_entry(out: &mut Vec<u8>, name: &str, mode: u32, ino: u32, nlink: u32, content: &[u8]) {
	let start = out.len();
	out.extend_from_slice(b"070701");
	let fields = [
		ino,
		mode,
		0,
		0,
		nlink,
		1_700_000_000,
		content.len() as u32,
		0,
		0,
		0,
		0,
		name.len() as u32 + 1,
		0,
	];
	for field in fields {
		out.extend_from_slice(format!("{field:08x}").as_bytes());
	}
	out.extend_from_slice(name.as_bytes());
	out.push(0);
	while (out.len() - start) % 4 != 0 {
		out.push(0);
	}
	out.extend_from_slice(content);
	while out.len() % 4 != 0 {
		out.push(0);
	}
}

pub fn finish_cpio(out: &mut Vec<u8>) {
	push_entry(out, "TRAILER!!!", 0, 0, 1, &[]);
}

pub const HELLO_SCRIPT: &[u8] = b"#!/bin/sh\necho hello\n";
pub const README: &[u8] = b"read me\n";

pub fn sample_cpio() -> Vec<u8> {
	let mut out = Vec::new();
	push_entry(&mut out, "./usr", 0o040755, 1, 2, &[]);
	push_entry(&mut out, "./usr/bin", 0o040755, 2, 2, &[]);
	push_entry(&mut out, "./usr/bin/hello", 0o100755, 3, 1, HELLO_SCRIPT);
	push_entry(&mut out, "./usr/share/doc/hello/README", 0o100644, 4, 1, README);
	push_entry(&mut out, "./usr/share/doc/hello/link", 0o120777, 5, 1, b"README");
	finish_cpio(&mut out);
	out
}

pub fn compress(compressor: &str, data: &[u8]) -> Vec<u8> {
	match compressor {
		"uncompressed" => data.to_vec(),
		"gzip" => {
			let mut enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
			enc.write_all(data).unwrap();
			enc.finish().unwrap()
		}
		"bzip2" => {
			let mut enc = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::fast());
			enc.write_all(data).unwrap();
			enc.finish().unwrap()
		}
		"xz" => {
			let mut enc = xz2::write::XzEncoder::new(Vec::new(), 6);
			enc.write_all(data).unwrap();
			enc.finish().unwrap()
		}
		"zstd" => zstd::encode_all(data, 3).unwrap(),
		other => panic!("no test compressor for {other}"),
	}
}

/// Lead, signature with padding, metadata header, payload.
pub fn build_package(
	source: bool,
	signature: &HeaderBuilder,
	metadata: &HeaderBuilder,
	payload: &[u8],
) -> Vec<u8> {
	let mut out = lead(source);
	let sig = signature.build();
	out.extend_from_slice(&sig);
	while (out.len() - LEAD_LENGTH) % 8 != 0 {
		out.push(0);
	}
	out.extend_from_slice(&metadata.build());
	out.extend_from_slice(payload);
	out
}

pub fn sample_package(compressor: &str) -> Vec<u8> {
	build_package(
		false,
		&signature(),
		&metadata(compressor),
		&compress(compressor, &sample_cpio()),
	)
}
