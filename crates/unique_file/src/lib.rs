#![deny(missing_docs)]

//! Writes data to files that are named after a hash of their content.
//!
//! Every file is stored as `<sha256 hex digest>.<extension>` inside a caller
//! provided directory:
//! ```text
//! <directory>/
//!   315f5bdb76d078c43b8ac0064e4a0164612b1fce77c869345bfc94c75894edd3.txt
//! ```
//!
//! Writing the same data twice results in the same file name. The second
//! write notices that the file already exists and returns immediately without
//! touching the disk, so repeated writes are idempotent and cheap. Different
//! data ends up in different files.
//!
//! # Components
//!
//! - [`file_hash`]: The hex encoded SHA-256 hash of some data
//! - [`file_name`]: The file name for some data and an extension
//! - [`file_path`]: The absolute path of that file inside a directory
//! - [`write_sync`]: Writes the file unless it exists (blocking)
//! - [`write`]: Writes the file unless it exists (async)
//!
//! # Usage
//!
//! ```rust,no_run
//! use unique_file::{write_sync, WriteOptions};
//!
//! let name = write_sync("/path/to/dir", "txt", "Hello, world!", &WriteOptions::default()).unwrap();
//! assert_eq!(
//!     name,
//!     "315f5bdb76d078c43b8ac0064e4a0164612b1fce77c869345bfc94c75894edd3.txt"
//! );
//! ```
//!
//! # Limitations
//!
//! An existing file is never compared against the data, its name is trusted.
//! Concurrent writes of the same data are not coordinated, both may write the
//! (identical) file.

mod data;
mod encoding;
mod error;
mod name;
mod options;
mod sync_writer;
mod writer;

pub use data::Data;
pub use encoding::{DecodeError, Encoding, ParseEncodingError};
pub use error::WriteError;
pub use name::{content_hash, file_hash, file_name, file_path, EXTENSION_SEPARATOR};
pub use options::{OpenFlag, ParseOpenFlagError, WriteOptions, DEFAULT_MODE};
pub use sync_writer::write_sync;
pub use unique_file_digest::Sha256Hash;
pub use writer::write;
