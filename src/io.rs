//! Loading and saving documents through the container driver.
//!
//! Each call opens or creates its own container and closes it before
//! returning, on success and on every error path.

use std::fs;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use shapedoc_container::{Container, ContainerApp};
use tracing::{info, info_span, warn};

use crate::config::IoConfig;
use crate::error::{Error, Result};
use crate::model::ShapeDocument;
use crate::paths::ArchivePath;
use crate::tree;

/// Closes the wrapped container when dropped
struct OpenContainer<'a> {
    app: &'a ContainerApp,
    container: Container,
}

impl<'a> OpenContainer<'a> {
    fn new(app: &'a ContainerApp, container: Container) -> Self {
        Self { app, container }
    }
}

impl Deref for OpenContainer<'_> {
    type Target = Container;

    fn deref(&self) -> &Container {
        &self.container
    }
}

impl DerefMut for OpenContainer<'_> {
    fn deref_mut(&mut self) -> &mut Container {
        &mut self.container
    }
}

impl Drop for OpenContainer<'_> {
    fn drop(&mut self) {
        self.app.close(&mut self.container);
    }
}

/// Load a document from the container at `path`
pub fn load(path: &Path) -> Result<ShapeDocument> {
    let _span = info_span!("load", path = %path.display()).entered();
    let app = ContainerApp::with_default_formats();

    let container = app.open(path).map_err(|status| {
        warn!(%status, "container open failed");
        Error::ContainerOpenFailure {
            path: path.to_path_buf(),
            status,
        }
    })?;
    let container = OpenContainer::new(&app, container);

    let doc = tree::read_document(&container)?;
    info!(
        collections = doc.collection_count(),
        shapes = doc.shape_count(),
        "loaded document"
    );
    Ok(doc)
}

/// Save a document to `path`, replacing any existing file
pub fn save(doc: &ShapeDocument, path: &Path, config: &IoConfig) -> Result<()> {
    let _span = info_span!("save", path = %path.display()).entered();
    doc.check_saveable()?;

    let app = ContainerApp::with_default_formats();
    let container = app.create(&config.format).ok_or_else(|| Error::DocumentCreateFailure {
        format: config.format.clone(),
    })?;
    let mut container = OpenContainer::new(&app, container);

    tree::write_document(&mut container, doc, &config.root_label_name)?;

    if config.create_parent_dirs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let status = app.store(&mut container, path);
    if !status.is_ok() {
        warn!(%status, "container store failed");
        return Err(Error::StoreFailure {
            path: path.to_path_buf(),
            status,
        });
    }

    info!(
        collections = doc.collection_count(),
        shapes = doc.shape_count(),
        "saved document"
    );
    Ok(())
}

/// Save a document as a part archive, returning the file written
pub fn save_archive(doc: &ShapeDocument, archive: &ArchivePath, config: &IoConfig) -> Result<PathBuf> {
    let app = ContainerApp::with_default_formats();
    let format = app.format(&config.format).ok_or_else(|| Error::DocumentCreateFailure {
        format: config.format.clone(),
    })?;
    let path = archive.file_for(format);
    save(doc, &path, config)?;
    Ok(path)
}

/// Load a part archive written by [`save_archive`]
pub fn load_archive(archive: &ArchivePath, config: &IoConfig) -> Result<ShapeDocument> {
    let app = ContainerApp::with_default_formats();
    let format = app.format(&config.format).ok_or_else(|| Error::DocumentCreateFailure {
        format: config.format.clone(),
    })?;
    load(&archive.file_for(format))
}

impl ShapeDocument {
    /// Load with the default configuration
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        load(path.as_ref())
    }

    /// Save with the default configuration
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        save(self, path.as_ref(), &IoConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use shapedoc_container::{ReaderStatus, StoreStatus};
    use tempfile::TempDir;

    fn sample() -> ShapeDocument {
        let mut doc = ShapeDocument::new();
        doc.set_uuid("4b8e6a8c-4f8e-4bb1-9c1e-0d2b6f3f7a10");
        doc.set_root_shape(Shape::from(vec![1, 2, 3]), r#"{"name": "box"}"#);
        doc.append_shape("xmin", Shape::from(vec![4]), r#"{"baz": "qux"}"#);
        doc
    }

    #[test]
    fn save_without_root_fails_before_touching_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.sdoc");
        let mut doc = ShapeDocument::new();
        doc.set_uuid("u");

        let err = save(&doc, &path, &IoConfig::default()).unwrap_err();
        assert!(matches!(err, Error::PreconditionFailed { missing: "root shape" }));
        assert!(!path.exists());
    }

    #[test]
    fn unknown_format_is_a_create_failure() {
        let dir = TempDir::new().unwrap();
        let config = IoConfig {
            format: "XmlShapeDoc".to_string(),
            ..IoConfig::default()
        };
        let err = save(&sample(), &dir.path().join("doc.sdoc"), &config).unwrap_err();
        assert!(matches!(err, Error::DocumentCreateFailure { format } if format == "XmlShapeDoc"));
    }

    #[test]
    fn open_failure_keeps_reader_status() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("absent.sdoc")).unwrap_err();
        assert!(matches!(
            err,
            Error::ContainerOpenFailure { status: ReaderStatus::OpenError, .. }
        ));
    }

    #[test]
    fn store_failure_keeps_store_status() {
        let dir = TempDir::new().unwrap();
        let config = IoConfig {
            create_parent_dirs: false,
            ..IoConfig::default()
        };
        let path = dir.path().join("missing").join("doc.sdoc");
        let err = save(&sample(), &path, &config).unwrap_err();
        assert!(matches!(
            err,
            Error::StoreFailure { status: StoreStatus::WriteFailure, .. }
        ));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("doc.sdoc");
        sample().save_to(&path).unwrap();
        assert_eq!(ShapeDocument::load_from(&path).unwrap(), sample());
    }

    #[test]
    fn archive_round_trip() {
        let dir = TempDir::new().unwrap();
        let archive = ArchivePath::new(dir.path().join("bracket")).unwrap();
        let config = IoConfig::default();

        let written = save_archive(&sample(), &archive, &config).unwrap();
        assert_eq!(written, dir.path().join("bracket.part.sdoc"));
        assert_eq!(load_archive(&archive, &config).unwrap(), sample());
    }
}
