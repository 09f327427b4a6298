//! Options that are forwarded to the filesystem when a file is created.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

use crate::encoding::Encoding;

/// The permission bits a newly created file receives before the umask is
/// applied.
pub const DEFAULT_MODE: u32 = 0o666;

/// Configures how a file is written when it does not exist yet.
///
/// None of the values are validated, they are handed to the filesystem as-is.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct WriteOptions {
    /// How text data is converted to bytes. Defaults to [`Encoding::Utf8`].
    pub encoding: Encoding,

    /// Permission bits of a newly created file. Defaults to
    /// [`DEFAULT_MODE`]. Only used on unix.
    pub mode: u32,

    /// How the file is opened. Defaults to [`OpenFlag::Write`].
    pub flag: OpenFlag,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            encoding: Encoding::default(),
            mode: DEFAULT_MODE,
            flag: OpenFlag::default(),
        }
    }
}

impl WriteOptions {
    /// Sets the encoding used for text data.
    pub fn with_encoding(self, encoding: Encoding) -> Self {
        Self { encoding, ..self }
    }

    /// Sets the permission bits of newly created files.
    pub fn with_mode(self, mode: u32) -> Self {
        Self { mode, ..self }
    }

    /// Sets how the file is opened.
    pub fn with_flag(self, flag: OpenFlag) -> Self {
        Self { flag, ..self }
    }

    /// Applies the flag and the mode to a blocking or an async open options
    /// builder.
    pub(crate) fn configure<O: OpenOptionsBuilder>(&self, options: &mut O) {
        self.flag.configure(options);
        options.set_mode(self.mode);
    }
}

impl From<Encoding> for WriteOptions {
    fn from(encoding: Encoding) -> Self {
        Self::default().with_encoding(encoding)
    }
}

/// Determines how the target file is opened, named after the conventional
/// `fopen` style flag strings.
#[derive(EnumIter, Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_with::SerializeDisplay, serde_with::DeserializeFromStr)
)]
pub enum OpenFlag {
    /// `r`: open for reading, fails if the file does not exist.
    Read,
    /// `r+`: open for reading and writing, fails if the file does not exist.
    ReadWrite,
    /// `w`: create or truncate the file and open it for writing.
    #[default]
    Write,
    /// `wx`: like [`OpenFlag::Write`] but fails if the file exists.
    WriteExclusive,
    /// `w+`: create or truncate the file and open it for reading and writing.
    WriteRead,
    /// `wx+`: like [`OpenFlag::WriteRead`] but fails if the file exists.
    WriteReadExclusive,
    /// `a`: create the file if needed and open it for appending.
    Append,
    /// `ax`: like [`OpenFlag::Append`] but fails if the file exists.
    AppendExclusive,
    /// `a+`: create the file if needed and open it for reading and appending.
    AppendRead,
    /// `ax+`: like [`OpenFlag::AppendRead`] but fails if the file exists.
    AppendReadExclusive,
}

impl OpenFlag {
    /// Returns the flag string of this flag.
    pub fn as_str(self) -> &'static str {
        match self {
            OpenFlag::Read => "r",
            OpenFlag::ReadWrite => "r+",
            OpenFlag::Write => "w",
            OpenFlag::WriteExclusive => "wx",
            OpenFlag::WriteRead => "w+",
            OpenFlag::WriteReadExclusive => "wx+",
            OpenFlag::Append => "a",
            OpenFlag::AppendExclusive => "ax",
            OpenFlag::AppendRead => "a+",
            OpenFlag::AppendReadExclusive => "ax+",
        }
    }

    /// Returns an iterator over all flags.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Returns true if opening with this flag fails when the file already
    /// exists.
    pub fn is_exclusive(self) -> bool {
        matches!(
            self,
            OpenFlag::WriteExclusive
                | OpenFlag::WriteReadExclusive
                | OpenFlag::AppendExclusive
                | OpenFlag::AppendReadExclusive
        )
    }

    fn configure<O: OpenOptionsBuilder>(self, options: &mut O) {
        match self {
            OpenFlag::Read => options.set_read(true),
            OpenFlag::ReadWrite => options.set_read(true).set_write(true),
            OpenFlag::Write | OpenFlag::WriteExclusive => {
                options.set_write(true).set_create(true).set_truncate(true)
            }
            OpenFlag::WriteRead | OpenFlag::WriteReadExclusive => options
                .set_read(true)
                .set_write(true)
                .set_create(true)
                .set_truncate(true),
            OpenFlag::Append | OpenFlag::AppendExclusive => {
                options.set_append(true).set_create(true)
            }
            OpenFlag::AppendRead | OpenFlag::AppendReadExclusive => {
                options.set_read(true).set_append(true).set_create(true)
            }
        };

        // `create_new` takes precedence over `create` and `truncate`.
        if self.is_exclusive() {
            options.set_create_new(true);
        }
    }
}

/// The builder methods shared by [`fs_err::OpenOptions`] and
/// [`fs_err::tokio::OpenOptions`].
pub(crate) trait OpenOptionsBuilder {
    fn set_read(&mut self, read: bool) -> &mut Self;
    fn set_write(&mut self, write: bool) -> &mut Self;
    fn set_append(&mut self, append: bool) -> &mut Self;
    fn set_truncate(&mut self, truncate: bool) -> &mut Self;
    fn set_create(&mut self, create: bool) -> &mut Self;
    fn set_create_new(&mut self, create_new: bool) -> &mut Self;

    /// Sets the permission bits of a new file. Ignored on non-unix platforms.
    fn set_mode(&mut self, mode: u32) -> &mut Self;
}

macro_rules! impl_open_options_builder {
    ($ty:ty) => {
        impl OpenOptionsBuilder for $ty {
            fn set_read(&mut self, read: bool) -> &mut Self {
                self.read(read)
            }

            fn set_write(&mut self, write: bool) -> &mut Self {
                self.write(write)
            }

            fn set_append(&mut self, append: bool) -> &mut Self {
                self.append(append)
            }

            fn set_truncate(&mut self, truncate: bool) -> &mut Self {
                self.truncate(truncate)
            }

            fn set_create(&mut self, create: bool) -> &mut Self {
                self.create(create)
            }

            fn set_create_new(&mut self, create_new: bool) -> &mut Self {
                self.create_new(create_new)
            }

            #[cfg(unix)]
            fn set_mode(&mut self, mode: u32) -> &mut Self {
                #[allow(unused_imports)]
                use fs_err::os::unix::fs::OpenOptionsExt;
                self.mode(mode)
            }

            #[cfg(not(unix))]
            fn set_mode(&mut self, _mode: u32) -> &mut Self {
                self
            }
        }
    };
}

impl_open_options_builder!(fs_err::OpenOptions);
impl_open_options_builder!(fs_err::tokio::OpenOptions);

impl Display for OpenFlag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error that can occur when parsing an [`OpenFlag`] from a string.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub struct ParseOpenFlagError {
    /// The string that could not be parsed.
    pub string: String,
}

impl Display for ParseOpenFlagError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a known open flag. Valid flags are {}",
            self.string,
            OpenFlag::all()
                .map(|flag| format!("'{flag}'"))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl FromStr for OpenFlag {
    type Err = ParseOpenFlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "r" => OpenFlag::Read,
            "r+" => OpenFlag::ReadWrite,
            "w" => OpenFlag::Write,
            "wx" | "xw" => OpenFlag::WriteExclusive,
            "w+" => OpenFlag::WriteRead,
            "wx+" | "xw+" => OpenFlag::WriteReadExclusive,
            "a" => OpenFlag::Append,
            "ax" | "xa" => OpenFlag::AppendExclusive,
            "a+" => OpenFlag::AppendRead,
            "ax+" | "xa+" => OpenFlag::AppendReadExclusive,
            string => {
                return Err(ParseOpenFlagError {
                    string: string.to_owned(),
                });
            }
        })
    }
}
