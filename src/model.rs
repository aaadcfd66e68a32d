//! In-memory shape document.
//!
//! Holds the root shape, the named shape collections and the document UUID.
//! Unset fields are `None` and reading them fails instead of returning a
//! placeholder.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::shape::{AnnotatedShape, Shape};

/// Shapes stored under one name, in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeCollection {
    name: String,
    shapes: Vec<AnnotatedShape>,
}

impl ShapeCollection {
    fn new(name: String) -> Self {
        Self {
            name,
            shapes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shapes(&self) -> &[AnnotatedShape] {
        &self.shapes
    }
}

/// The document: root shape, named collections and UUID
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeDocument {
    root: Option<AnnotatedShape>,
    /// Collections in the order their names were first used
    collections: Vec<ShapeCollection>,
    /// Name -> position in `collections`
    index: HashMap<String, usize>,
    uuid: Option<String>,
}

impl ShapeDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    // --- Root shape ---

    /// Set the root shape, replacing any previous one
    pub fn set_root_shape(&mut self, shape: Shape, annotation: impl Into<String>) {
        self.root = Some(AnnotatedShape::new(shape, annotation));
    }

    pub fn root_shape(&self) -> Result<&AnnotatedShape> {
        self.root.as_ref().ok_or(Error::RootShapeUnset)
    }

    pub fn has_root_shape(&self) -> bool {
        self.root.is_some()
    }

    // --- UUID ---

    pub fn set_uuid(&mut self, uuid: impl Into<String>) {
        self.uuid = Some(uuid.into());
    }

    pub fn uuid(&self) -> Result<&str> {
        self.uuid.as_deref().ok_or(Error::UuidUnset)
    }

    /// Assign a fresh random UUID and return it
    pub fn assign_random_uuid(&mut self) -> &str {
        self.uuid.insert(Uuid::new_v4().to_string())
    }

    // --- Collections ---

    /// Append a shape to the named collection, creating the collection if needed
    pub fn append_shape(&mut self, name: &str, shape: Shape, annotation: impl Into<String>) {
        let position = self.ensure_collection(name);
        self.collections[position]
            .shapes
            .push(AnnotatedShape::new(shape, annotation));
    }

    /// Register a collection name without adding shapes to it.
    /// Returns the position of the collection.
    pub(crate) fn ensure_collection(&mut self, name: &str) -> usize {
        if let Some(&position) = self.index.get(name) {
            return position;
        }
        let position = self.collections.len();
        self.collections.push(ShapeCollection::new(name.to_string()));
        self.index.insert(name.to_string(), position);
        position
    }

    /// Names of every collection, in insertion order
    pub fn shape_names(&self) -> Vec<&str> {
        self.collections.iter().map(|c| c.name()).collect()
    }

    pub fn shapes_for_name(&self, name: &str) -> Result<&[AnnotatedShape]> {
        self.index
            .get(name)
            .map(|&position| self.collections[position].shapes())
            .ok_or_else(|| Error::UnknownCollection(name.to_string()))
    }

    /// Iterate over collections in insertion order
    pub fn collections(&self) -> impl Iterator<Item = &ShapeCollection> {
        self.collections.iter()
    }

    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    /// Total shapes across all collections, root excluded
    pub fn shape_count(&self) -> usize {
        self.collections.iter().map(|c| c.shapes.len()).sum()
    }

    /// Check the fields a save needs are present
    pub(crate) fn check_saveable(&self) -> Result<(&str, &AnnotatedShape)> {
        let root = self
            .root
            .as_ref()
            .ok_or(Error::PreconditionFailed { missing: "root shape" })?;
        let uuid = self
            .uuid
            .as_deref()
            .ok_or(Error::PreconditionFailed { missing: "uuid" })?;
        Ok((uuid, root))
    }
}
