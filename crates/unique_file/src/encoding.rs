//! Text encodings used to turn string data into the bytes that are written to
//! disk.

use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

/// Decodes base64 without padding and ignores non-zero trailing bits.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

/// Describes how text data is converted to bytes before it is written.
///
/// The encoding only affects what ends up on disk. The file name is always
/// derived from the UTF-8 bytes of the text.
#[derive(EnumIter, Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_with::SerializeDisplay, serde_with::DeserializeFromStr)
)]
pub enum Encoding {
    /// The UTF-8 bytes of the text.
    #[default]
    Utf8,
    /// UTF-16 code units in little endian byte order.
    Utf16Le,
    /// The low byte of every UTF-16 code unit.
    Latin1,
    /// Encoded exactly like [`Encoding::Latin1`].
    Ascii,
    /// The text is a sequence of hexadecimal byte pairs.
    ///
    /// Decoding stops at the first character that is not a hex digit, an odd
    /// trailing digit is ignored.
    Hex,
    /// The text is base64, in either the standard or the URL-safe alphabet.
    ///
    /// Padding is optional, characters outside the alphabet are skipped and
    /// decoding stops at the first `=`.
    Base64,
    /// Decoded exactly like [`Encoding::Base64`].
    Base64Url,
}

impl Encoding {
    /// Returns the canonical name of the encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Utf16Le => "utf16le",
            Encoding::Latin1 => "latin1",
            Encoding::Ascii => "ascii",
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
            Encoding::Base64Url => "base64url",
        }
    }

    /// Returns an iterator over all supported encodings.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Converts `text` into the bytes that should be written to disk.
    pub fn encode(self, text: &str) -> Result<Cow<'_, [u8]>, DecodeError> {
        Ok(match self {
            Encoding::Utf8 => Cow::Borrowed(text.as_bytes()),
            Encoding::Utf16Le => Cow::Owned(
                text.encode_utf16()
                    .flat_map(u16::to_le_bytes)
                    .collect::<Vec<_>>(),
            ),
            Encoding::Latin1 | Encoding::Ascii => {
                Cow::Owned(text.encode_utf16().map(|unit| unit as u8).collect())
            }
            Encoding::Hex => Cow::Owned(decode_hex_prefix(text)),
            Encoding::Base64 | Encoding::Base64Url => {
                Cow::Owned(decode_base64(text).map_err(|source| DecodeError {
                    encoding: self,
                    source,
                })?)
            }
        })
    }
}

/// Decodes the longest even-length run of hex digits at the start of `text`.
fn decode_hex_prefix(text: &str) -> Vec<u8> {
    let digits = text.bytes().take_while(u8::is_ascii_hexdigit).count();
    // The prefix is ascii so the slice always lands on a char boundary.
    hex::decode(&text[..digits - digits % 2]).unwrap_or_default()
}

fn decode_base64(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let mut normalized: String = text
        .chars()
        .take_while(|c| *c != '=')
        .filter_map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '+' | '/' => Some(c),
            '-' => Some('+'),
            '_' => Some('/'),
            _ => None,
        })
        .collect();

    // A single dangling character cannot encode a full byte.
    if normalized.len() % 4 == 1 {
        normalized.pop();
    }

    LENIENT_BASE64.decode(normalized)
}

impl Display for Encoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error that can occur when parsing an [`Encoding`] from a string.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub struct ParseEncodingError {
    /// The string that could not be parsed.
    pub string: String,
}

impl Display for ParseEncodingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a known encoding. Valid encodings are {}",
            self.string,
            Encoding::all()
                .map(|e| format!("'{e}'"))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl FromStr for Encoding {
    type Err = ParseEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Encoding::Utf8,
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Encoding::Utf16Le,
            "latin1" | "binary" => Encoding::Latin1,
            "ascii" => Encoding::Ascii,
            "hex" => Encoding::Hex,
            "base64" => Encoding::Base64,
            "base64url" => Encoding::Base64Url,
            _ => {
                return Err(ParseEncodingError {
                    string: s.to_owned(),
                });
            }
        })
    }
}

/// An error that is returned when text cannot be decoded with the requested
/// [`Encoding`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("the data is not valid {encoding}")]
pub struct DecodeError {
    /// The encoding that was requested.
    pub encoding: Encoding,

    /// The underlying decoder error.
    #[source]
    pub source: base64::DecodeError,
}
