//! Access mode of a bit-field or command parameter.

use std::fmt;

/// The three-valued access mode, mapped from the `r`/`w`/`rw` input tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Readable only.
    Read,
    /// Writable only.
    Write,
    /// Readable and writable.
    ReadWrite,
}

impl Access {
    /// Map a declarative-file token to an access mode.
    ///
    /// Returns `None` for anything other than `r`, `w`, or `rw`; the caller
    /// turns that into a structural validation error carrying the field path.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "r" => Some(Self::Read),
            "w" => Some(Self::Write),
            "rw" => Some(Self::ReadWrite),
            _ => None,
        }
    }

    /// The token this mode was declared with.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::Write => "w",
            Self::ReadWrite => "rw",
        }
    }

    /// Whether a holder with this mode can be read.
    #[must_use]
    pub fn can_read(self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite)
    }

    /// Whether a holder with this mode can be written.
    #[must_use]
    pub fn can_write(self) -> bool {
        matches!(self, Self::Write | Self::ReadWrite)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
