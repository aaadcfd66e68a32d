//! Container lifecycle: create, open, store, close.

use std::fs;
use std::path::Path;

use automerge::AutoCommit;
use tracing::{debug, warn};

use crate::container::Container;
use crate::envelope::{self, Header};
use crate::format::{Format, DEFAULT_FORMATS};
use crate::status::{ReaderStatus, StoreStatus};

/// Entry point to the container driver. Only formats that were defined on
/// the app can be created, opened or stored.
#[derive(Debug, Clone, Default)]
pub struct ContainerApp {
    formats: Vec<Format>,
}

impl ContainerApp {
    /// An app that knows no formats
    pub fn new() -> Self {
        Self::default()
    }

    /// An app with every built-in format defined
    pub fn with_default_formats() -> Self {
        let mut app = Self::new();
        for format in DEFAULT_FORMATS {
            app.define_format(*format);
        }
        app
    }

    pub fn define_format(&mut self, format: Format) {
        if !self.formats.contains(&format) {
            self.formats.push(format);
        }
    }

    /// Find a defined format by name
    pub fn format(&self, name: &str) -> Option<Format> {
        self.formats.iter().copied().find(|f| f.name == name)
    }

    /// Create an empty document. `None` when the format is not defined.
    pub fn create(&self, format_name: &str) -> Option<Container> {
        let format = self.format(format_name)?;
        match Container::new(format) {
            Ok(container) => Some(container),
            Err(e) => {
                warn!(format = format_name, error = %e, "failed to initialise container");
                None
            }
        }
    }

    /// Read a container from disk
    pub fn open(&self, path: &Path) -> Result<Container, ReaderStatus> {
        let bytes = fs::read(path).map_err(|e| ReaderStatus::from_io(&e))?;
        let (header, body) = envelope::decode(&bytes)?;

        let format = self.format(&header.format).ok_or(ReaderStatus::NoDriver)?;
        let doc = AutoCommit::load(body).map_err(|e| {
            debug!(path = %path.display(), error = %e, "automerge load failed");
            ReaderStatus::ReaderException
        })?;

        let container = Container::from_doc(doc, format).ok_or(ReaderStatus::NoDocument)?;
        match container.label_count() {
            Ok(count) if count != header.label_count => {
                warn!(
                    path = %path.display(),
                    expected = header.label_count,
                    found = count,
                    "label count does not match header"
                );
                return Err(ReaderStatus::FormatFailure);
            }
            // Unwalkable trees are left to the label reader
            Ok(_) | Err(_) => {}
        }

        debug!(
            path = %path.display(),
            format = format.name,
            labels = header.label_count,
            "opened container"
        );
        Ok(container)
    }

    /// Write a container to `path`, replacing any existing file
    pub fn store(&self, container: &mut Container, path: &Path) -> StoreStatus {
        if container.is_closed() {
            return StoreStatus::DocIsNull;
        }
        if self.format(container.format().name).is_none() {
            return StoreStatus::DriverFailure;
        }

        let label_count = match container.label_count() {
            Ok(count) => count,
            Err(e) => {
                warn!(error = %e, "label tree is unreadable");
                return StoreStatus::NoObj;
            }
        };

        let header = Header {
            format: container.format().name.to_string(),
            label_count,
        };
        let body = container.save_bytes();
        let bytes = match envelope::encode(&header, &body) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "failed to encode container header");
                return StoreStatus::InfoSectionError;
            }
        };

        match fs::write(path, bytes) {
            Ok(()) => {
                debug!(path = %path.display(), labels = label_count, "stored container");
                StoreStatus::Ok
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to write container");
                StoreStatus::WriteFailure
            }
        }
    }

    /// Release a container. Closing twice is a no-op.
    pub fn close(&self, container: &mut Container) {
        container.close();
    }
}
