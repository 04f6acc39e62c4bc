use std::fmt;

/// Machine-readable error codes shared by the core and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    DataDirUnavailable,
    EmptyItemName,
    ItemNotFound,
    CorruptBlob,
    InvalidStorageKey,
    StorageReadFailed,
    StorageWriteFailed,
    LockContention,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::DataDirUnavailable => "E1002",
            Self::EmptyItemName => "E2001",
            Self::ItemNotFound => "E2002",
            Self::CorruptBlob => "E3001",
            Self::InvalidStorageKey => "E3002",
            Self::StorageReadFailed => "E5001",
            Self::StorageWriteFailed => "E5002",
            Self::LockContention => "E5003",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::DataDirUnavailable => "Data directory unavailable",
            Self::EmptyItemName => "Enter item name",
            Self::ItemNotFound => "Item not found",
            Self::CorruptBlob => "Stored item list could not be decoded",
            Self::InvalidStorageKey => "Invalid storage key",
            Self::StorageReadFailed => "Storage read failed",
            Self::StorageWriteFailed => "Storage write failed",
            Self::LockContention => "Lock contention",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => {
                Some("Fix syntax in ~/.config/stockpile/config.toml and retry.")
            }
            Self::DataDirUnavailable => {
                Some("Pass --data-dir or set STOCKPILE_DATA_DIR to a writable directory.")
            }
            Self::EmptyItemName => Some("Pass a non-empty item name."),
            Self::ItemNotFound => Some("Run `stock list` to see the exact item names."),
            Self::CorruptBlob => {
                Some("The stored list is ignored; the next change overwrites it.")
            }
            Self::InvalidStorageKey => {
                Some("Use only letters, digits, '-', '_' and '.' in storage.key.")
            }
            Self::StorageReadFailed | Self::StorageWriteFailed => {
                Some("Check disk space and permissions on the data directory.")
            }
            Self::LockContention => Some("Retry after the other `stock` process exits."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
