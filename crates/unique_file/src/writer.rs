//! Non-blocking writes on top of [`fs_err::tokio`].

use std::path::Path;

use fs_err::tokio as fs;
use tokio::io::AsyncWriteExt;

use crate::{data::Data, error::WriteError, name::Target, options::WriteOptions};

/// Asynchronously writes `data` to a file named after its content hash inside
/// `directory` and returns the name of that file.
///
/// This behaves like [`crate::write_sync`]: the existence check completes
/// before anything is written, a failing check counts as a missing file and
/// only errors from the write itself are returned.
///
/// Concurrent calls for the same content are not coordinated. Both may find
/// the file missing and both write it, which is harmless because the bytes
/// are identical.
///
/// # Arguments
///
/// * `directory` - The directory to store the file in
/// * `extension` - The extension of the file, with or without a leading `.`
/// * `data` - The contents of the file
/// * `options` - How a missing file is created
pub async fn write<'a>(
    directory: impl AsRef<Path>,
    extension: &str,
    data: impl Into<Data<'a>>,
    options: &WriteOptions,
) -> Result<String, WriteError> {
    let data = data.into();
    let Target { path, file_name } = Target::new(directory.as_ref(), extension, data)?;

    if fs::metadata(&path).await.is_ok() {
        tracing::trace!(path = %path.display(), "file already exists, skipping write");
        return Ok(file_name);
    }

    let contents = data.encode(options.encoding)?;
    let write = async {
        let mut open_options = fs::OpenOptions::new();
        options.configure(&mut open_options);
        let mut file = open_options.open(&path).await?;
        file.write_all(&contents).await?;
        // Make sure the buffered bytes reach the file before it is dropped.
        file.flush().await
    };
    write.await.map_err(WriteError::Write)?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(file_name)
}
