use std::{io::ErrorKind, path::Path};

use rstest::rstest;
use unique_file::{file_hash, file_name, write, write_sync, Encoding, WriteOptions};
use unique_file_digest::{compute_bytes_digest, format_digest, Sha256};

const DATA: &str = "Hello, world!";
const EXTENSION: &str = "txt";

fn utf8() -> WriteOptions {
    WriteOptions::from(Encoding::Utf8)
}

fn entries(dir: &Path) -> usize {
    fs_entries(dir).len()
}

fn fs_entries(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn writes_file_sync() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();

    let output = write_sync(dir, EXTENSION, DATA, &utf8()).unwrap();
    assert_eq!(std::fs::read_to_string(dir.join(output)).unwrap(), DATA);
}

#[tokio::test]
async fn writes_file_async() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();

    let output = write(dir, EXTENSION, DATA, &utf8()).await.unwrap();
    assert_eq!(std::fs::read_to_string(dir.join(output)).unwrap(), DATA);
}

#[test]
fn writes_same_file_once() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();

    let first = write_sync(dir, EXTENSION, DATA, &utf8()).unwrap();
    let second = write_sync(dir, EXTENSION, DATA, &utf8()).unwrap();

    assert_eq!(first, second);
    assert_eq!(std::fs::read_to_string(dir.join(&first)).unwrap(), DATA);
    assert_eq!(entries(dir), 1);
}

#[test]
fn writes_different_files_separately() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();

    let output1 = write_sync(dir, EXTENSION, "Data 1", &utf8()).unwrap();
    let output2 = write_sync(dir, EXTENSION, "Data 2", &utf8()).unwrap();

    assert_ne!(output1, output2);
    assert_eq!(std::fs::read_to_string(dir.join(output1)).unwrap(), "Data 1");
    assert_eq!(std::fs::read_to_string(dir.join(output2)).unwrap(), "Data 2");
    assert_eq!(entries(dir), 2);
}

#[test]
fn fails_when_file_passed_as_extension() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();
    let file_path = dir.join("file.txt");
    std::fs::write(&file_path, "existing").unwrap();

    let err = write_sync(dir, file_path.to_str().unwrap(), DATA, &utf8()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(entries(dir), 1);
}

#[tokio::test]
async fn async_fails_when_file_passed_as_extension() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();
    let file_path = dir.join("file.txt");
    std::fs::write(&file_path, "existing").unwrap();

    let err = write(dir, file_path.to_str().unwrap(), DATA, &utf8())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[case(".test")]
#[case("test")]
fn uses_right_file_name(#[case] extension: &str) {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();

    let output = write_sync(dir, extension, DATA, &utf8()).unwrap();
    let (hash, ext) = output.split_once('.').unwrap();
    assert_eq!(hash, file_hash(DATA));
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(ext, "test");
}

#[test]
fn supports_relative_paths() {
    let temp_dir = tempfile::Builder::new()
        .prefix("relative-")
        .tempdir_in(".")
        .unwrap();
    // The directory is created in the working directory, so its name alone is
    // a relative path to it.
    let dir = Path::new(temp_dir.path().file_name().unwrap());
    assert!(dir.is_relative());

    let output = write_sync(dir, EXTENSION, DATA, &utf8()).unwrap();
    assert_eq!(std::fs::read_to_string(dir.join(output)).unwrap(), DATA);
}

#[tokio::test]
async fn sync_and_async_agree() {
    let sync_dir = tempfile::tempdir().unwrap();
    let async_dir = tempfile::tempdir().unwrap();
    let data: Vec<u8> = (0..=255).collect();

    let sync_name = write_sync(sync_dir.path(), "bin", &data, &WriteOptions::default()).unwrap();
    let async_name = write(async_dir.path(), "bin", &data, &WriteOptions::default())
        .await
        .unwrap();

    assert_eq!(sync_name, async_name);
    assert_eq!(
        std::fs::read(sync_dir.path().join(&sync_name)).unwrap(),
        std::fs::read(async_dir.path().join(&async_name)).unwrap()
    );
}

#[test]
fn stored_content_matches_its_name() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();

    let name = write_sync(dir, "bin", b"\xde\xad\xbe\xef", &WriteOptions::default()).unwrap();
    let stored = std::fs::read(dir.join(&name)).unwrap();
    let hash = compute_bytes_digest::<Sha256>(stored);
    assert_eq!(name, format!("{}.bin", format_digest(hash)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_identical_writes_leave_one_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();
    let options = WriteOptions::default();

    let (first, second) = tokio::join!(
        write(dir, EXTENSION, DATA, &options),
        write(dir, EXTENSION, DATA, &options)
    );

    assert_eq!(first.unwrap(), second.unwrap());
    assert_eq!(fs_entries(dir), vec![file_name(EXTENSION, DATA)]);
    assert_eq!(
        std::fs::read_to_string(dir.join(file_name(EXTENSION, DATA))).unwrap(),
        DATA
    );
}

#[tokio::test]
async fn hello_world_scenario() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();
    assert_eq!(entries(dir), 0);

    let name_pattern = regex::Regex::new(r"^[0-9a-f]+\.txt$").unwrap();

    let name = write(dir, "txt", DATA, &utf8()).await.unwrap();
    assert!(name_pattern.is_match(&name));
    assert_eq!(std::fs::read_to_string(dir.join(&name)).unwrap(), DATA);
    assert_eq!(entries(dir), 1);

    let again = write_sync(dir, "txt", DATA, &utf8()).unwrap();
    assert_eq!(again, name);
    assert_eq!(entries(dir), 1);
}
