use std::borrow::Cow;

use crate::encoding::{DecodeError, Encoding};

/// The contents of a file, either raw bytes or text.
///
/// Text is always hashed as UTF-8, regardless of the [`Encoding`] it is
/// written with.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Data<'a> {
    /// Raw bytes, written as-is.
    Bytes(&'a [u8]),

    /// Text, converted to bytes with an [`Encoding`] when written.
    Text(&'a str),
}

impl<'a> Data<'a> {
    /// Returns the bytes the content hash is computed over.
    pub fn hash_bytes(&self) -> &'a [u8] {
        match *self {
            Data::Bytes(bytes) => bytes,
            Data::Text(text) => text.as_bytes(),
        }
    }

    /// Returns the bytes that should end up on disk. The encoding is ignored
    /// for [`Data::Bytes`].
    pub fn encode(&self, encoding: Encoding) -> Result<Cow<'a, [u8]>, DecodeError> {
        match *self {
            Data::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
            Data::Text(text) => encoding.encode(text),
        }
    }
}

impl<'a> From<&'a str> for Data<'a> {
    fn from(text: &'a str) -> Self {
        Data::Text(text)
    }
}

impl<'a> From<&'a String> for Data<'a> {
    fn from(text: &'a String) -> Self {
        Data::Text(text.as_str())
    }
}

impl<'a> From<&'a [u8]> for Data<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Data::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Data<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Data::Bytes(bytes.as_slice())
    }
}

impl<'a> From<&'a Vec<u8>> for Data<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Data::Bytes(bytes.as_slice())
    }
}
