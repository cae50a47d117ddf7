use std::fmt;

use serde::{Deserialize, Serialize};

/// Lengths a generated short ID may have.
pub const SHORT_ID_LENGTHS: [usize; 8] = [2, 4, 6, 8, 10, 12, 14, 16];

pub const SHORT_ID_ALPHABET: &str = "0123456789abcdef";

pub const MAX_SHORT_ID_LEN: usize = 16;

/// Most short IDs handed out by a single batch request.
pub const MAX_SHORT_ID_BATCH: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortIdError {
    #[error("short id is empty")]
    Empty,

    #[error("short id length {0} is odd")]
    OddLength(usize),

    #[error("short id length {0} exceeds 16")]
    TooLong(usize),

    #[error("short id contains non lowercase hex character {0:?}")]
    InvalidCharacter(char),
}

/// Reality short ID: lowercase hex, even length, at most 16 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortId(String);

impl ShortId {
    pub fn parse(value: &str) -> Result<Self, ShortIdError> {
        if value.is_empty() {
            return Err(ShortIdError::Empty);
        }
        if let Some(c) = value.chars().find(|c| !SHORT_ID_ALPHABET.contains(*c)) {
            return Err(ShortIdError::InvalidCharacter(c));
        }
        if value.len() > MAX_SHORT_ID_LEN {
            return Err(ShortIdError::TooLong(value.len()));
        }
        if value.len() % 2 != 0 {
            return Err(ShortIdError::OddLength(value.len()));
        }
        Ok(Self(value.to_string()))
    }

    /// For generators that build the value from `SHORT_ID_ALPHABET` and
    /// `SHORT_ID_LENGTHS` themselves.
    pub(crate) fn from_generated(value: String) -> Self {
        debug_assert!(Self::parse(&value).is_ok(), "generated short id {value:?}");
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    // never empty, so no `is_empty`
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ShortId {
    type Error = ShortIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShortId> for String {
    fn from(id: ShortId) -> Self {
        id.0
    }
}

/// Source of fresh short IDs.
pub trait ShortIdGenerator: Send + Sync {
    fn generate(&self) -> ShortId;
}
