#![deny(missing_docs)]

//! Helpers for computing the content hashes that name uniquely written files,
//! built on the [RustCrypto/hashes](https://github.com/RustCrypto/hashes)
//! library.
//!
//! Any algorithm implementing [`Digest`] can be used, but file names are
//! always derived from [`Sha256`].
//!
//! # Examples
//!
//! ```
//! use unique_file_digest::{compute_bytes_digest, format_digest, Sha256};
//!
//! let hash = compute_bytes_digest::<Sha256>("Hello, world!");
//! assert_eq!(
//!     format_digest(hash),
//!     "315f5bdb76d078c43b8ac0064e4a0164612b1fce77c869345bfc94c75894edd3"
//! );
//! ```

use digest::{Digest, Output};

pub use sha2::Sha256;

/// A type alias for the output of a SHA256 hash.
pub type Sha256Hash = Output<Sha256>;

/// Compute a hash of the specified bytes.
pub fn compute_bytes_digest<D: Digest + Default>(bytes: impl AsRef<[u8]>) -> Output<D> {
    let mut hasher = D::default();
    hasher.update(bytes);
    hasher.finalize()
}

/// Renders a digest as a lowercase hexadecimal string.
pub fn format_digest(hash: impl AsRef<[u8]>) -> String {
    hex::encode(hash)
}
