use std::path::PathBuf;

/// Every error strmatch can produce outside the matchers themselves.
/// The matchers are total: "not found" is a value, never an error.
#[derive(Debug)]
pub enum MatchError {
    NotFound {
        path: PathBuf,
    },
    PermissionDenied {
        path: PathBuf,
    },
    InvalidArgument {
        arg: String,
        reason: String,
    },
    InvalidConfig {
        path: PathBuf,
        reason: String,
    },
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        reason: String,
    },
    /// A matcher disagreed with the reference search during verification.
    Mismatch {
        algorithm: &'static str,
        scenario: String,
        got: Option<usize>,
        expected: Option<usize>,
    },
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "not found: {}", path.display()),
            Self::PermissionDenied { path } => {
                write!(f, "{} [permission denied]", path.display())
            }
            Self::InvalidArgument { arg, reason } => {
                write!(f, "invalid {arg}: {reason}")
            }
            Self::InvalidConfig { path, reason } => {
                write!(f, "invalid config {}: {reason}", path.display())
            }
            Self::IoError { path, source } => {
                write!(f, "{}: {source}", path.display())
            }
            Self::ParseError { path, reason } => {
                write!(f, "parse error in {}: {reason}", path.display())
            }
            Self::Mismatch {
                algorithm,
                scenario,
                got,
                expected,
            } => write!(
                f,
                "{algorithm} returned {} on {scenario}, expected {}",
                crate::types::index_or_sentinel(*got),
                crate::types::index_or_sentinel(*expected)
            ),
        }
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl MatchError {
    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } | Self::IoError { .. } => 2,
            Self::InvalidArgument { .. } | Self::InvalidConfig { .. } | Self::ParseError { .. } => 3,
            Self::PermissionDenied { .. } => 4,
            Self::Mismatch { .. } => 5,
        }
    }

    /// Classify an I/O failure on `path` the same way everywhere.
    pub(crate) fn from_io(path: &std::path::Path, e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::IoError {
                path: path.to_path_buf(),
                source: e,
            },
        }
    }
}
