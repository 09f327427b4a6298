//! Blocking writes.

use std::{io::Write, path::Path};

use crate::{data::Data, error::WriteError, name::Target, options::WriteOptions};

/// Writes `data` to a file named after its content hash inside `directory`
/// and returns the name of that file.
///
/// If the file already exists nothing is written, its contents are trusted to
/// match. Otherwise the file is created according to `options`. The directory
/// itself must already exist.
///
/// # Arguments
///
/// * `directory` - The directory to store the file in
/// * `extension` - The extension of the file, with or without a leading `.`
/// * `data` - The contents of the file
/// * `options` - How a missing file is created
pub fn write_sync<'a>(
    directory: impl AsRef<Path>,
    extension: &str,
    data: impl Into<Data<'a>>,
    options: &WriteOptions,
) -> Result<String, WriteError> {
    let data = data.into();
    let Target { path, file_name } = Target::new(directory.as_ref(), extension, data)?;

    // Errors while checking are treated as a missing file.
    if path.exists() {
        tracing::trace!(path = %path.display(), "file already exists, skipping write");
        return Ok(file_name);
    }

    let contents = data.encode(options.encoding)?;
    let write = || -> std::io::Result<()> {
        let mut open_options = fs_err::OpenOptions::new();
        options.configure(&mut open_options);
        let mut file = open_options.open(&path)?;
        file.write_all(&contents)?;
        file.flush()
    };
    write().map_err(WriteError::Write)?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(file_name)
}
