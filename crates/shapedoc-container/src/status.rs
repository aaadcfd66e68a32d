//! Status taxonomies reported by the container driver.
//!
//! Both enums are closed sets: exactly one variant means success, every other
//! variant is a distinct failure reason. Callers keep the tag as-is rather
//! than flattening it into a message.

use std::fmt;
use std::io;

/// Outcome of opening a container for reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReaderStatus {
    Ok,
    NoDriver,
    UnknownFileDriver,
    OpenError,
    NoVersion,
    NoSchema,
    NoDocument,
    ExtensionFailure,
    WrongStreamMode,
    FormatFailure,
    TypeFailure,
    TypeNotFoundInSchema,
    UnrecognizedFileFormat,
    MakeFailure,
    PermissionDenied,
    DriverFailure,
    AlreadyRetrievedAndModified,
    AlreadyRetrieved,
    UnknownDocument,
    WrongResource,
    ReaderException,
    NoModel,
    UserBreak,
}

impl ReaderStatus {
    pub fn is_ok(self) -> bool {
        self == ReaderStatus::Ok
    }

    /// Map an I/O failure while opening the file
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => ReaderStatus::PermissionDenied,
            _ => ReaderStatus::OpenError,
        }
    }

    /// Stable identifier for logs and diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            ReaderStatus::Ok => "ok",
            ReaderStatus::NoDriver => "no-driver",
            ReaderStatus::UnknownFileDriver => "unknown-file-driver",
            ReaderStatus::OpenError => "open-error",
            ReaderStatus::NoVersion => "no-version",
            ReaderStatus::NoSchema => "no-schema",
            ReaderStatus::NoDocument => "no-document",
            ReaderStatus::ExtensionFailure => "extension-failure",
            ReaderStatus::WrongStreamMode => "wrong-stream-mode",
            ReaderStatus::FormatFailure => "format-failure",
            ReaderStatus::TypeFailure => "type-failure",
            ReaderStatus::TypeNotFoundInSchema => "type-not-found-in-schema",
            ReaderStatus::UnrecognizedFileFormat => "unrecognized-file-format",
            ReaderStatus::MakeFailure => "make-failure",
            ReaderStatus::PermissionDenied => "permission-denied",
            ReaderStatus::DriverFailure => "driver-failure",
            ReaderStatus::AlreadyRetrievedAndModified => "already-retrieved-and-modified",
            ReaderStatus::AlreadyRetrieved => "already-retrieved",
            ReaderStatus::UnknownDocument => "unknown-document",
            ReaderStatus::WrongResource => "wrong-resource",
            ReaderStatus::ReaderException => "reader-exception",
            ReaderStatus::NoModel => "no-model",
            ReaderStatus::UserBreak => "user-break",
        }
    }
}

impl fmt::Display for ReaderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of writing a container to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreStatus {
    Ok,
    DriverFailure,
    WriteFailure,
    Failure,
    DocIsNull,
    NoObj,
    InfoSectionError,
    UserBreak,
}

impl StoreStatus {
    pub fn is_ok(self) -> bool {
        self == StoreStatus::Ok
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StoreStatus::Ok => "ok",
            StoreStatus::DriverFailure => "driver-failure",
            StoreStatus::WriteFailure => "write-failure",
            StoreStatus::Failure => "failure",
            StoreStatus::DocIsNull => "doc-is-null",
            StoreStatus::NoObj => "no-obj",
            StoreStatus::InfoSectionError => "info-section-error",
            StoreStatus::UserBreak => "user-break",
        }
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_ok_is_success() {
        assert!(ReaderStatus::Ok.is_ok());
        assert!(!ReaderStatus::NoDriver.is_ok());
        assert!(StoreStatus::Ok.is_ok());
        assert!(!StoreStatus::WriteFailure.is_ok());
    }

    #[test]
    fn io_errors_map_to_distinct_statuses() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        let missing = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(ReaderStatus::from_io(&denied), ReaderStatus::PermissionDenied);
        assert_eq!(ReaderStatus::from_io(&missing), ReaderStatus::OpenError);
    }

    #[test]
    fn display_uses_stable_names() {
        assert_eq!(ReaderStatus::UnrecognizedFileFormat.to_string(), "unrecognized-file-format");
        assert_eq!(StoreStatus::InfoSectionError.to_string(), "info-section-error");
    }
}
