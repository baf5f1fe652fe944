use thiserror::Error;

/// Why a raw value was rejected by an option's reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// The text is not a valid representation of the target type.
    #[error("cannot read {input:?} as {type_name}")]
    Conversion { input: String, type_name: String },

    #[error("{value} is out of range [{low}, {high}]")]
    OutOfRange {
        value: String,
        low: String,
        high: String,
    },

    #[error("{value} is not one of: {candidates}")]
    NotOneOf { value: String, candidates: String },

    /// A flag was given a value with `--flag=value`.
    #[error("option does not take a value")]
    FlagValue,

    /// Free-form rejection from a caller-supplied reader.
    #[error("{0}")]
    Custom(String),
}

impl ReadError {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}

/// Every failure the parser can report.
///
/// Declaration (`DuplicateOption`, `EmptyOptionName`) and query
/// (`UnknownOption`, `TypeMismatch`) failures are returned directly from the
/// call. Everything else is recorded in the parser's error list during
/// `parse`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("multiple definition: {0}")]
    DuplicateOption(String),

    #[error("option name must not be empty")]
    EmptyOptionName,

    #[error("short option '{0}' is ambiguous")]
    AmbiguousShortName(char),

    #[error("undefined option: --{0}")]
    UndefinedOption(String),

    #[error("undefined short option: -{0}")]
    UndefinedShortOption(char),

    #[error("option needs value: --{0}")]
    MissingOptionValue(String),

    #[error("option value is invalid: --{name}={value}")]
    InvalidOptionValue {
        name: String,
        value: String,
        #[source]
        source: ReadError,
    },

    #[error("need option: --{0}")]
    MissingRequiredOption(String),

    #[error("there is no flag: --{0}")]
    UnknownOption(String),

    #[error("type mismatch flag '{0}'")]
    TypeMismatch(String),

    #[error("quote is not closed")]
    UnterminatedQuote,

    #[error("unexpected occurrence of '\\' at end of string")]
    UnterminatedEscape,

    #[error("argument number must be longer than 0")]
    EmptyArguments,
}

pub type Result<T> = std::result::Result<T, Error>;
