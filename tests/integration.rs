use std::{
    fs,
    path::Path,
};

use bwx::Bwx;

fn path_str(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}

/// Compress then decompress a file, checking the output matches the
/// input byte for byte. Cross-mode: fast compression is decompressed in
/// low memory mode and vice versa, since both modes speak the same
/// stream.
fn roundtrip(data: &[u8], block_size: usize) {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("original");
    let archive = dir.path().join("original.bwx");
    let restored = dir.path().join("restored");
    fs::write(&original, data).unwrap();

    Bwx::default()
        .quiet()
        .fast()
        .block_size(block_size).unwrap()
        .input(&path_str(&original)).unwrap()
        .compress().unwrap();

    Bwx::default()
        .quiet()
        .input(&path_str(&archive)).unwrap()
        .output(&path_str(&restored))
        .decompress().unwrap();

    assert_eq!(fs::read(&restored).unwrap(), data, "fast -> low");

    fs::remove_file(&archive).unwrap();
    fs::remove_file(&restored).unwrap();

    Bwx::default()
        .quiet()
        .block_size(block_size).unwrap()
        .input(&path_str(&original)).unwrap()
        .compress().unwrap();

    Bwx::default()
        .quiet()
        .fast()
        .input(&path_str(&archive)).unwrap()
        .output(&path_str(&restored))
        .decompress().unwrap();

    assert_eq!(fs::read(&restored).unwrap(), data, "low -> fast");
}

fn sample_text(len: usize) -> Vec<u8> {
    const WORDS: [&str; 8] = [
        "banana", "abracadabra", "wheel", "rotation", "the",
        "transform", "block", "sorted",
    ];
    fastrand::seed(1234);
    let mut text = String::new();
    while text.len() < len {
        text.push_str(WORDS[fastrand::usize(..WORDS.len())]);
        text.push(if fastrand::u8(..10) == 0 { '\n' } else { ' ' });
    }
    text.into_bytes()
}

#[test]
fn text_multiblock() {
    // Block size far below the file size, so several blocks are framed.
    roundtrip(&sample_text(300_000), 1 << 16);
}

#[test]
fn text_single_block() {
    roundtrip(&sample_text(50_000), 1 << 20);
}

#[test]
fn empty_file() {
    roundtrip(b"", 1 << 16);
}

#[test]
fn single_byte() {
    roundtrip(b"z", 1 << 16);
}

#[test]
fn block_size_one() {
    roundtrip(b"to be or not to be", 1);
}

#[test]
fn uniform_bytes() {
    // Every rotation compares equal, the worst case for the sort.
    roundtrip(&vec![0u8; 30_000], 1 << 14);
}

#[test]
fn random_binary() {
    fastrand::seed(99);
    let data: Vec<u8> = (0..200_000).map(|_| fastrand::u8(..)).collect();
    roundtrip(&data, 1 << 16);
}

#[test]
fn compresses_text() {
    let data = sample_text(1 << 19);
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("original");
    fs::write(&original, &data).unwrap();

    let archive_size = Bwx::default()
        .quiet()
        .fast()
        .input(&path_str(&original)).unwrap()
        .compress().unwrap();

    assert!(
        archive_size < data.len() as u64 / 2,
        "{} bytes compressed to {}", data.len(), archive_size
    );
}

#[test]
fn refuses_clobbering() {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("original");
    let archive = dir.path().join("original.bwx");
    fs::write(&original, b"some data worth keeping").unwrap();
    fs::write(&archive, b"an existing archive").unwrap();

    let result = Bwx::default()
        .quiet()
        .input(&path_str(&original)).unwrap()
        .compress();
    assert!(result.is_err());

    // With clobbering allowed, compression overwrites and the archive
    // round-trips.
    Bwx::default()
        .quiet()
        .clobber()
        .input(&path_str(&original)).unwrap()
        .compress().unwrap();

    let restored = dir.path().join("restored");
    Bwx::default()
        .quiet()
        .input(&path_str(&archive)).unwrap()
        .output(&path_str(&restored))
        .decompress().unwrap();
    assert_eq!(fs::read(&restored).unwrap(), b"some data worth keeping");
}

#[test]
fn rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bogus.bwx");
    fs::write(&bogus, b"this is not an archive at all").unwrap();

    let result = Bwx::default()
        .quiet()
        .input(&path_str(&bogus)).unwrap()
        .decompress();
    assert!(result.is_err());
}
