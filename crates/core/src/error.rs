//! Coded errors shared by every waitroom crate
//!
//! Each crate keeps its own `thiserror` enum and maps it onto an
//! [`ErrorCode`]. The CLI turns any of them into an [`Error`] to print a
//! report and pick an exit status.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Stable error codes, grouped by the thousands digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A remote call ran out of time
    Timeout = 1003,

    /// Local I/O failed
    IoError = 2000,
    /// A file did not exist
    FileNotFound = 2001,
    /// A file could not be opened
    PermissionDenied = 2002,

    /// Settings that are not tied to a file
    ConfigError = 3000,
    /// An explicitly named config file did not exist
    ConfigNotFound = 3001,
    /// A config file was not valid TOML for the schema
    ConfigParseError = 3002,
    /// A config value was out of range
    ConfigValidationError = 3003,

    /// The feed could not be reached
    FeedUnreachable = 4001,
    /// The feed answered with something other than a city map
    FeedMalformed = 4002,
    /// The feed answered with an error status
    FeedRejected = 4003,

    /// The user's location could not be resolved
    LocationUnavailable = 5001,

    /// Input from the caller was out of range
    ValidationError = 6000,
}

impl ErrorCode {
    /// Numeric value, e.g. `4001`
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Group name for the thousands digit
    pub fn category(self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Configuration",
            4 => "Feed",
            5 => "Location",
            _ => "Validation",
        }
    }

    /// Process exit status for a CLI run that ended with this code
    pub fn exit_code(self) -> u8 {
        match self.code() / 1000 {
            3 => exit_codes::CONFIG_ERROR,
            6 => exit_codes::VALIDATION_ERROR,
            _ => exit_codes::FAILURE,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// A coded error with optional context and a hint for the user
#[derive(Error, Debug)]
pub struct Error {
    /// What went wrong, for programs
    pub code: ErrorCode,
    /// What went wrong, for people
    pub message: String,
    /// What was being done at the time
    pub context: Option<String>,
    /// What the user can try next
    pub suggestion: Option<String>,
    /// Underlying cause
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(context) => write!(f, "{context}: {} ({})", self.message, self.code)?,
            None => write!(f, "{} ({})", self.message, self.code)?,
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  hint: {suggestion}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Create an error with no context, hint or cause
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Say what was being done when the error happened
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attach a hint for the user
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Serializable form for `--json` output
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code.to_string(),
            kind: self.code,
            category: self.code.category(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(ToString::to_string),
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        self.code.exit_code()
    }

    /// Named config file is missing
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a waitroom.toml file or use --config to specify a path")
    }

    /// Config value out of range
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigValidationError, message)
    }

    /// Feed failure; `code` comes from the feed error itself
    pub fn feed(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code, message)
            .with_suggestion("Check network access to the wait-time feed or pass --feed-file")
    }

    /// Location lookup failed
    pub fn location_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::LocationUnavailable, message)
            .with_suggestion("Supply the patient location with --lat and --lng")
    }

    /// Caller input out of range
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }
}

/// What `waitroom --json` prints to stderr when a command fails
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    /// Display form, e.g. `E4001`
    pub code: String,
    /// Symbolic form, e.g. `FEED_UNREACHABLE`
    pub kind: ErrorCode,
    /// See [`ErrorCode::category`]
    pub category: &'static str,
    /// See [`Error::message`]
    pub message: String,
    /// See [`Error::context`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// See [`Error::suggestion`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Display form of the underlying cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit statuses used by the CLI
#[allow(missing_docs)]
pub mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const FAILURE: u8 = 1;
    pub const VALIDATION_ERROR: u8 = 2;
    pub const CONFIG_ERROR: u8 = 3;
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, err.message().to_string()).with_source(err)
    }
}

/// Decorate any error convertible into [`Error`] while propagating it
pub trait ResultExt<T> {
    /// Say what was being done when the error happened
    fn context(self, context: impl Into<String>) -> Result<T>;
    /// Attach a hint for the user
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_suggestion(suggestion))
    }
}
