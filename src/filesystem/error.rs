use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use snafu::Snafu;

use crate::ext::BestEffortPathExt;

pub type EntityResult<T> = Result<T, EntityError>;

/// The type an operation expected to find at an existing path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    File,
    Directory,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::File => f.write_str("file"),
            EntityKind::Directory => f.write_str("directory"),
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EntityError {
    /// The stat query failed. Absence and every other access failure land here.
    #[snafu(display("Path {} is not found or inaccessible", path.best_effort_path_display()))]
    StatError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Path {} exists but is not a {}", path.best_effort_path_display(), expected))]
    TypeMismatch { path: PathBuf, expected: EntityKind },
    #[snafu(display("Failed to create directory {}", path.best_effort_path_display()))]
    CreateDirectoryError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to read directory {}", path.best_effort_path_display()))]
    ReadDirectoryError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to read an entry of directory {}", path.best_effort_path_display()))]
    ReadDirectoryEntryError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to write file {}", path.best_effort_path_display()))]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to read file {}", path.best_effort_path_display()))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to append to file {}", path.best_effort_path_display()))]
    AppendError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("File {} does not contain valid UTF-8", path.best_effort_path_display()))]
    InvalidUtf8Error {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
}

impl EntityError {
    /// The path the failed operation was addressing.
    pub fn path(&self) -> &Path {
        match self {
            EntityError::StatError { path, .. }
            | EntityError::TypeMismatch { path, .. }
            | EntityError::CreateDirectoryError { path, .. }
            | EntityError::ReadDirectoryError { path, .. }
            | EntityError::ReadDirectoryEntryError { path, .. }
            | EntityError::WriteError { path, .. }
            | EntityError::ReadError { path, .. }
            | EntityError::AppendError { path, .. }
            | EntityError::InvalidUtf8Error { path, .. } => path.as_path(),
        }
    }

    /// True when the underlying primitive reported that nothing exists at the path.
    pub fn is_not_found(&self) -> bool {
        match self {
            EntityError::StatError { source, .. }
            | EntityError::CreateDirectoryError { source, .. }
            | EntityError::ReadDirectoryError { source, .. }
            | EntityError::ReadDirectoryEntryError { source, .. }
            | EntityError::WriteError { source, .. }
            | EntityError::ReadError { source, .. }
            | EntityError::AppendError { source, .. } => source.kind() == ErrorKind::NotFound,
            EntityError::TypeMismatch { .. } | EntityError::InvalidUtf8Error { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn type_mismatch_message_names_path_and_expectation() {
        let error = EntityError::TypeMismatch {
            path: PathBuf::from("/tmp/a.txt"),
            expected: EntityKind::Directory,
        };

        let message = error.to_string();
        assert!(message.contains("a.txt"));
        assert!(message.contains("exists but is not a directory"));
    }

    #[test]
    fn stat_error_reports_absence() {
        let missing = EntityError::StatError {
            path: PathBuf::from("/this/path/does/not/exist"),
            source: io::Error::new(ErrorKind::NotFound, "not found"),
        };
        let denied = EntityError::StatError {
            path: PathBuf::from("/root/secret"),
            source: io::Error::new(ErrorKind::PermissionDenied, "denied"),
        };

        assert!(missing.is_not_found());
        assert!(!denied.is_not_found());
        assert!(missing.to_string().contains("not found or inaccessible"));
    }

    #[test]
    fn path_accessor_returns_offending_path() {
        let error = EntityError::AppendError {
            path: PathBuf::from("/tmp/log.txt"),
            source: io::Error::new(ErrorKind::NotFound, "not found"),
        };

        assert_eq!(error.path(), Path::new("/tmp/log.txt"));
    }
}
