use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One named, counted inventory entry.
///
/// This is also the persisted shape: the stored blob is a JSON array of
/// `{"name": ..., "inventory": ...}` objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub inventory: u64,
}

impl Item {
    /// A freshly added item starts at zero.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inventory: 0,
        }
    }

    #[must_use]
    pub fn with_inventory(name: impl Into<String>, inventory: u64) -> Self {
        Self {
            name: name.into(),
            inventory,
        }
    }

    /// Apply a signed delta, clamping at zero (and at `u64::MAX`).
    pub const fn adjust(&mut self, delta: i64) {
        self.inventory = self.inventory.saturating_add_signed(delta);
    }
}

/// Ordering applied to displayed rows. Cycles
/// `unsorted -> ascending -> descending -> unsorted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl SortMode {
    pub const ALL: [Self; 3] = [Self::Unsorted, Self::Ascending, Self::Descending];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unsorted => "unsorted",
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }

    /// Next mode in the fixed cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Unsorted => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Unsorted,
        }
    }

    /// Compact glyph for the list header.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Unsorted => "≡",
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl FromStr for SortMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unsorted" | "none" => Ok(Self::Unsorted),
            "ascending" | "asc" => Ok(Self::Ascending),
            "descending" | "desc" => Ok(Self::Descending),
            _ => Err(ParseEnumError {
                expected: "sort mode",
                got: s.to_string(),
            }),
        }
    }
}
