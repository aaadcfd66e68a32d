//! Opaque shape payloads and their annotations.

use std::fmt;
use std::sync::Arc;

/// Serialized geometry owned by the modelling kernel.
///
/// The engine never looks inside the payload. Cloning shares the same
/// allocation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Shape(Arc<[u8]>);

impl Shape {
    pub fn new(payload: impl Into<Arc<[u8]>>) -> Self {
        Self(payload.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether two handles point at the same payload allocation
    pub fn ptr_eq(&self, other: &Shape) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Vec<u8>> for Shape {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for Shape {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({} bytes)", self.0.len())
    }
}

/// A shape paired with its free-text annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedShape {
    shape: Shape,
    annotation: String,
}

impl AnnotatedShape {
    pub fn new(shape: Shape, annotation: impl Into<String>) -> Self {
        Self {
            shape,
            annotation: annotation.into(),
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn annotation(&self) -> &str {
        &self.annotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_payload() {
        let shape = Shape::from(vec![1, 2, 3]);
        let copy = shape.clone();
        assert!(shape.ptr_eq(&copy));
        assert_eq!(copy.as_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn equality_compares_payload_bytes() {
        let a = Shape::from(vec![7, 7]);
        let b = Shape::from(&[7u8, 7][..]);
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn debug_hides_payload() {
        assert_eq!(format!("{:?}", Shape::from(vec![0; 12])), "Shape(12 bytes)");
    }
}
