//! Derives file names and paths from the content of a file.

use std::path::{Component, Path, PathBuf};

use unique_file_digest::{compute_bytes_digest, format_digest, Sha256, Sha256Hash};

use crate::{data::Data, error::WriteError};

/// Separates the content hash from the extension in a file name.
pub const EXTENSION_SEPARATOR: char = '.';

/// Computes the SHA-256 hash of the data.
pub fn content_hash<'a>(data: impl Into<Data<'a>>) -> Sha256Hash {
    compute_bytes_digest::<Sha256>(data.into().hash_bytes())
}

/// Computes the SHA-256 hash of the data as a lowercase hex string.
pub fn file_hash<'a>(data: impl Into<Data<'a>>) -> String {
    format_digest(content_hash(data))
}

/// Returns the name of the file that stores `data`: the content hash followed
/// by the extension.
///
/// A [`EXTENSION_SEPARATOR`] is inserted unless `extension` already starts
/// with one, so `"txt"` and `".txt"` give the same name. An empty extension
/// yields a name that ends with the separator.
pub fn file_name<'a>(extension: &str, data: impl Into<Data<'a>>) -> String {
    let hash = file_hash(data);
    if extension.starts_with(EXTENSION_SEPARATOR) {
        format!("{hash}{extension}")
    } else {
        format!("{hash}{EXTENSION_SEPARATOR}{extension}")
    }
}

/// Returns the absolute path of the file that stores `data` inside
/// `directory`.
///
/// Relative directories are resolved against the current working directory.
/// The directory is not required to exist. This only fails if the current
/// working directory cannot be determined.
pub fn file_path<'a>(
    directory: impl AsRef<Path>,
    extension: &str,
    data: impl Into<Data<'a>>,
) -> std::io::Result<PathBuf> {
    resolve(directory.as_ref(), &file_name(extension, data))
}

/// Joins `file_name` onto `directory` and makes the result absolute.
fn resolve(directory: &Path, file_name: &str) -> std::io::Result<PathBuf> {
    let joined = directory.join(file_name);
    if joined.is_absolute() {
        Ok(normalize(&joined))
    } else {
        Ok(normalize(&std::env::current_dir()?.join(joined)))
    }
}

/// Lexically removes `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other),
        }
    }
    normalized
}

/// The location a write goes to.
#[derive(Debug)]
pub(crate) struct Target {
    pub path: PathBuf,

    /// The final component of `path`. This only differs from [`file_name`]
    /// when the extension contains path separators.
    pub file_name: String,
}

impl Target {
    pub fn new(directory: &Path, extension: &str, data: Data<'_>) -> Result<Self, WriteError> {
        let name = file_name(extension, data);
        let path = resolve(directory, &name).map_err(WriteError::ResolvePath)?;
        let file_name = path
            .file_name()
            .map_or(name, |base| base.to_string_lossy().into_owned());
        Ok(Self { path, file_name })
    }
}
