use thiserror::Error;

/// Error type shared by the selectors, the grouping session and the
/// DataFrame engine underneath them.
#[derive(Error, Debug)]
pub enum Error {
    /// A strict selector (`all_of`) asked for columns that do not exist
    #[error("Selected columns do not exist: {}", .missing.join(", "))]
    SelectionValidation { missing: Vec<String> },

    /// A statistic or session probe was used outside a `GroupBy` scope
    #[error("No active GroupBy")]
    NoActiveSession,

    /// A second `GroupBy` scope was entered on a thread that already has one
    #[error("A GroupBy is already active on this thread")]
    SessionAlreadyActive,

    #[error("Statistic '{0}' has already been added to the active GroupBy")]
    DuplicateStatistic(String),

    #[error("Cannot align grouped results: {0}")]
    Alignment(String),

    #[error("Index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("Inconsistent row count: expected {expected}, found {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("Invalid regular expression: {0}")]
    InvalidRegex(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("No data: {0}")]
    EmptyData(String),

    #[error("Type conversion error: {0}")]
    Cast(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error")]
    Io(#[source] std::io::Error),

    #[error("CSV error")]
    Csv(#[source] csv::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::InvalidRegex(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}
