use std::io::Read;

use newc::{
	error::{Category, ErrorKind},
	Archive, ByteCounter, FileType, State,
};

/// Append one newc entry to an archive under construction.
fn push_entry(out: &mut Vec<u8>, name: &str, mode: u32, content: &[u8]) {
	let start = out.len();
	out.extend_from_slice(b"070701");
	let fields = [
		1,                     // ino
		mode,                  // mode
		0,                     // uid
		0,                     // gid
		1,                     // nlink
		0x5f5e1000,            // mtime
		content.len() as u32,  // filesize
		0,                     // devmajor
		0,                     // devminor
		0,                     // rdevmajor
		0,                     // rdevminor
		name.len() as u32 + 1, // namesize
		0,                     // check
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

fn build(entries: &[(&str, u32, &[u8])]) -> Vec<u8> {
	let mut out = Vec::new();
	for (name, mode, content) in entries {
		push_entry(&mut out, name, *mode, content);
	}
	push_entry(&mut out, "TRAILER!!!", 0, &b""[..]);
	out
}

fn sample() -> Vec<u8> {
	let big: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();
	let entries: Vec<(&str, u32, &[u8])> = vec![
		("./usr", 0o040755, &b""[..]),
		("./usr/share/doc/hello/README", 0o100644, &b"read me\n"[..]),
		("./usr/bin/data", 0o100755, &big[..]),
		("./usr/bin/link", 0o120777, &b"data"[..]),
		("./empty", 0o100644, &b""[..]),
	];
	build(&entries)
}

#[test]
fn reads_entry_and_pads_to_next() {
	let archive_bytes = build(&[
		("hi.txt", 0o100644, &b"hello"[..]),
		("next.txt", 0o100644, &b"abc"[..]),
	]);
	// 110 + 7 = 117 bytes of header, padded to 120
	assert_eq!(&archive_bytes[120..125], &b"hello"[..]);
	assert_eq!(&archive_bytes[125..128], &[0u8, 0, 0][..]);

	let mut archive = Archive::new(&archive_bytes[..]);
	let (entry, mut content) = archive.next_entry().unwrap().unwrap();
	assert_eq!(entry.name, "hi.txt");
	assert_eq!(entry.name_size, 7);
	assert_eq!(entry.size, 5);
	assert_eq!(content.start(), 120);

	let mut data = String::new();
	content.read_to_string(&mut data).unwrap();
	assert_eq!(data, "hello");
	assert_eq!(archive.state(), State::InEntry);

	let (entry, _) = archive.next_entry().unwrap().unwrap();
	assert_eq!(entry.name, "next.txt");
	assert_eq!(archive.position(), 128 + 120);
}

#[test]
fn content_is_independent_of_chunk_size() {
	let bytes = sample();
	let mut runs = Vec::new();

	for chunk in [1, 3, 7, 64, 999, 1000, 4096] {
		let mut archive = Archive::new(&bytes[..]);
		let mut contents = Vec::new();
		while let Some((entry, mut reader)) = archive.next_entry().unwrap() {
			let mut data = Vec::new();
			let mut buf = vec![0; chunk];
			loop {
				let n = reader.read_chunk(&mut buf).unwrap();
				if n == 0 {
					break;
				}
				data.extend_from_slice(&buf[..n]);
			}
			assert_eq!(data.len() as u64, u64::from(entry.size));
			assert_eq!(reader.remaining(), 0);
			contents.push((entry.name, data));
		}

		runs.push(contents);
	}

	for run in &runs[1..] {
		similar_asserts::assert_eq!(&runs[0], run);
	}
}

#[test]
fn skipping_matches_draining() {
	let bytes = sample();

	let mut drained = Vec::new();
	let mut archive = Archive::new(&bytes[..]);
	while let Some((entry, mut reader)) = archive.next_entry().unwrap() {
		std::io::copy(&mut reader, &mut std::io::sink()).unwrap();
		drained.push(entry);
	}

	let mut skipped = Vec::new();
	let mut archive = Archive::new(&bytes[..]);
	while let Some((entry, _reader)) = archive.next_entry().unwrap() {
		skipped.push(entry);
	}

	similar_asserts::assert_eq!(drained, skipped);
	assert_eq!(skipped.len(), 5);
}

#[test]
fn partial_read_then_next() {
	let bytes = sample();
	let mut archive = Archive::new(&bytes[..]);
	archive.next_entry().unwrap();
	archive.next_entry().unwrap();

	let (entry, mut reader) = archive.next_entry().unwrap().unwrap();
	assert_eq!(entry.name, "./usr/bin/data");
	let mut buf = [0; 10];
	reader.read_exact(&mut buf).unwrap();
	assert_eq!(reader.remaining(), 990);

	let (entry, mut reader) = archive.next_entry().unwrap().unwrap();
	assert_eq!(entry.file_type(), FileType::Symlink);
	let mut target = String::new();
	reader.read_to_string(&mut target).unwrap();
	assert_eq!(target, "data");
}

#[test]
fn trailer_ends_archive() {
	let bytes = sample();
	let mut archive = Archive::new(&bytes[..]);
	let names: Vec<String> = archive
		.by_ref()
		.map(|next| next.map(|(entry, _)| entry.name))
		.collect::<Result<_, _>>()
		.unwrap();

	let expected: Vec<String> = [
		"./usr",
		"./usr/share/doc/hello/README",
		"./usr/bin/data",
		"./usr/bin/link",
		"./empty",
	]
	.iter()
	.map(|name| name.to_string())
	.collect();
	similar_asserts::assert_eq!(names, expected);
	assert_eq!(archive.state(), State::Exhausted);
	assert!(archive.next_entry().unwrap().is_none());
	assert!(archive.next_entry().unwrap().is_none());
}

#[test]
fn stale_reader_is_out_of_order() {
	let bytes = sample();
	let mut archive = Archive::new(&bytes[..]);
	archive.next_entry().unwrap();
	let (_, mut readme) = archive.next_entry().unwrap().unwrap();
	let (_, _data) = archive.next_entry().unwrap().unwrap();

	let mut buf = [0; 4];
	let err = readme.read_chunk(&mut buf).unwrap_err();
	assert!(matches!(err.kind(), Some(ErrorKind::OutOfOrderRead { .. })));
	assert_eq!(err.kind().map(ErrorKind::category), Some(Category::Protocol));

	let io_err = readme.read(&mut buf).unwrap_err();
	assert_eq!(io_err.kind(), std::io::ErrorKind::InvalidInput);
}

#[test]
fn drained_reader_is_stale_after_next() {
	let bytes = sample();
	let mut archive = Archive::new(&bytes[..]);
	archive.next_entry().unwrap();
	let (_, mut readme) = archive.next_entry().unwrap().unwrap();
	let mut data = Vec::new();
	readme.read_to_end(&mut data).unwrap();
	assert_eq!(readme.read(&mut [0; 4]).unwrap(), 0);

	archive.next_entry().unwrap();
	assert!(readme.read_chunk(&mut [0; 4]).is_err());
}

#[test]
fn bad_magic_fails_archive() {
	let mut bytes = sample();
	bytes[5] = b'7';
	let mut archive = Archive::new(&bytes[..]);

	let err = archive.next_entry().unwrap_err();
	assert_eq!(
		err.kind(),
		Some(ErrorKind::BadMagic { actual: *b"070707" })
	);
	assert_eq!(archive.state(), State::Failed);
	assert_eq!(
		archive.next_entry().unwrap_err().kind(),
		Some(ErrorKind::ArchiveFailed)
	);
	assert!(archive.next().is_none());
}

#[test]
fn bad_hex_field() {
	let mut bytes = sample();
	// first byte of the filesize field
	bytes[6 + 6 * 8] = b'z';
	let mut archive = Archive::new(&bytes[..]);
	let err = archive.next_entry().unwrap_err();
	assert!(matches!(
		err.kind(),
		Some(ErrorKind::BadHexField {
			field: "filesize",
			..
		})
	));
}

#[test]
fn unterminated_name() {
	let mut bytes = build(&[("hi.txt", 0o100644, &b"hello"[..])]);
	// the name's NUL
	bytes[110 + 6] = b'!';
	let mut archive = Archive::new(&bytes[..]);
	assert_eq!(
		archive.next_entry().unwrap_err().kind(),
		Some(ErrorKind::BadName)
	);
}

#[test]
fn missing_trailer_is_truncation() {
	let mut bytes = Vec::new();
	push_entry(&mut bytes, "only", 0o100644, &b"data"[..]);
	let mut archive = Archive::new(&bytes[..]);
	archive.next_entry().unwrap().unwrap();
	let err = archive.next_entry().unwrap_err();
	assert_eq!(err.kind(), Some(ErrorKind::Truncated("entry header")));
}

#[test]
fn truncated_content() {
	let bytes = build(&[("hi.txt", 0o100644, &b"hello"[..])]);
	let cut = &bytes[..122];
	let mut archive = Archive::new(cut);
	let (_, mut reader) = archive.next_entry().unwrap().unwrap();
	let mut data = Vec::new();
	let err = reader.read_to_end(&mut data).unwrap_err();
	assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
	assert_eq!(data, b"he");
}

#[test]
fn alignment_is_relative_to_archive_start() {
	let mut bytes = vec![0xAA, 0xBB];
	bytes.extend(build(&[
		("a", 0o100644, &b"xyz"[..]),
		("b", 0o100644, &b"hello"[..]),
	]));

	let mut counter = ByteCounter::new(&bytes[..]);
	counter.skip(2).unwrap();
	let mut archive = Archive::from_counter(counter);

	let mut seen = Vec::new();
	while let Some((entry, mut reader)) = archive.next_entry().unwrap() {
		let mut data = Vec::new();
		reader.read_to_end(&mut data).unwrap();
		seen.push((entry.name, data));
	}

	similar_asserts::assert_eq!(
		seen,
		vec![
			("a".to_string(), b"xyz".to_vec()),
			("b".to_string(), b"hello".to_vec()),
		]
	);
	assert_eq!(archive.state(), State::Exhausted);
}

#[test]
fn non_utf8_name_is_rejected() {
	let mut bytes = build(&[("hi.txt", 0o100644, &b"hello"[..])]);
	bytes[110] = 0xFF;
	let mut archive = Archive::new(&bytes[..]);
	let err = archive.next_entry().unwrap_err();
	assert_eq!(err.kind(), Some(ErrorKind::BadName));
	assert_eq!(archive.state(), State::Failed);
}
