//! Part archive naming.
//!
//! Callers address an archive by an extension-less base path. The file on
//! disk is `<base>.part.<format extension>`, so saving and loading the same
//! base always touch the same file.

use std::ffi::OsString;
use std::path::PathBuf;

use shapedoc_container::Format;

use crate::error::{Error, Result};

const PART_SUFFIX: &str = "part";

/// A validated, extension-less archive base path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePath {
    base: PathBuf,
}

impl ArchivePath {
    /// Fails if `base` already has an extension
    pub fn new(base: impl Into<PathBuf>) -> Result<Self> {
        let base = base.into();
        if base.extension().is_some() || base.file_name().is_none() {
            return Err(Error::InvalidArchivePath(base));
        }
        Ok(Self { base })
    }

    /// Path of the file written for `format`
    pub fn file_for(&self, format: Format) -> PathBuf {
        let mut name = OsString::from(self.base.as_os_str());
        name.push(".");
        name.push(PART_SUFFIX);
        name.push(".");
        name.push(format.extension);
        PathBuf::from(name)
    }
}
