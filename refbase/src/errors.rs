use backtrace::Backtrace;
use parking_lot::RwLock;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

/// Error kinds for Refbase operations.
///
/// Each kind describes one category of failure, so callers can classify an
/// error without string matching. The caller-facing taxonomy distinguishes
/// caller bugs (`InvalidPath`, `NotACollection`, `InvalidConfig`), retryable
/// conflicts (`Conflict`), data integrity failures (`CorruptDocument`), and
/// wrapped transport faults (`DocumentRead`, `DocumentWrite`,
/// `DocumentDelete`). `NotFound` is a store-level signal consumed inside the
/// engine; it never reaches callers of `get()` or `delete()`.
///
/// # Examples
///
/// ```rust,ignore
/// use refbase::errors::{RefbaseError, ErrorKind, RefbaseResult};
///
/// fn example() -> RefbaseResult<()> {
///     Err(RefbaseError::new("odd segment count", ErrorKind::InvalidPath))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Path Errors - malformed document/collection paths, caller bugs
    /// The document or collection path is malformed
    InvalidPath,
    /// The collection path resolves to a single file, not a directory listing
    NotACollection,

    // Concurrency Errors - optimistic version check failed
    /// The expected version token was stale; re-read and retry at the application layer
    Conflict,

    // Data Integrity Errors
    /// Stored content is not valid JSON
    CorruptDocument,

    // Wrapped Store Failures - transport/backing-store faults with cause attached
    /// A document read failed for a reason other than absence
    DocumentRead,
    /// A document write failed for a reason other than a version conflict
    DocumentWrite,
    /// A document delete failed for a reason other than absence
    DocumentDelete,

    // Store Signals - produced by store providers, consumed by the engine
    /// The requested content does not exist in the backing store
    NotFound,
    /// A transport or backend fault inside a store provider
    StoreError,

    // Configuration Errors - builder misuse
    /// A required configuration value is missing or empty
    InvalidConfig,
    /// No content store provider was configured
    StoreNotConfigured,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidPath => write!(f, "Invalid path"),
            ErrorKind::NotACollection => write!(f, "Not a collection"),
            ErrorKind::Conflict => write!(f, "Version conflict"),
            ErrorKind::CorruptDocument => write!(f, "Corrupt document"),
            ErrorKind::DocumentRead => write!(f, "Document read error"),
            ErrorKind::DocumentWrite => write!(f, "Document write error"),
            ErrorKind::DocumentDelete => write!(f, "Document delete error"),
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::StoreError => write!(f, "Store error"),
            ErrorKind::InvalidConfig => write!(f, "Invalid configuration"),
            ErrorKind::StoreNotConfigured => write!(f, "Store not configured"),
        }
    }
}

/// Custom Refbase error type.
///
/// `RefbaseError` encapsulates the error message, kind, and optional cause.
/// It supports error chaining and backtraces for debugging. Wrapped store
/// failures always carry the original provider error as their cause.
///
/// # Type alias
///
/// The `RefbaseResult<T>` type alias is equivalent to `Result<T, RefbaseError>`
/// and is used throughout the codebase for operations that can fail.
#[derive(Clone)]
pub struct RefbaseError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<RefbaseError>>,
    backtrace: Arc<RwLock<Backtrace>>,
}

impl RefbaseError {
    /// Creates a new `RefbaseError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        RefbaseError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Arc::new(RwLock::new(Backtrace::new())),
        }
    }

    /// Creates a new `RefbaseError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for
    /// debugging and for callers that need the original store failure.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: RefbaseError) -> Self {
        RefbaseError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Arc::new(RwLock::new(Backtrace::new())),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&Box<RefbaseError>> {
        self.cause.as_ref()
    }
}

impl Display for RefbaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for RefbaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for RefbaseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for Refbase operations.
pub type RefbaseResult<T> = Result<T, RefbaseError>;
