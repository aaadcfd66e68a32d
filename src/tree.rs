//! Fixed three-level label schema.
//!
//! ```text
//! main label        name "DOCUMENT ROOT", text array [uuid, root annotation], shape
//! ├── collection    name <collection key>
//! │   ├── tag 0     text array [annotation], shape
//! │   ├── tag 1     text array [annotation], shape
//! │   └── ...
//! └── collection    name <collection key>
//! ```
//!
//! Writing goes through [`RootWriter`] and [`CollectionWriter`], which only
//! ever append the next shape index, so the tree can't end up sparse or out
//! of order. Reading validates every cardinality and stops at the first
//! violation.

use shapedoc_container::{Container, ContainerError, Label};
use tracing::debug;

use crate::codec;
use crate::error::{CodecError, Error, Result};
use crate::model::ShapeDocument;
use crate::shape::AnnotatedShape;

/// Length of the main label's text array: uuid, root annotation
const ROOT_ARRAY_LEN: usize = 2;
/// Length of a shape label's text array: annotation
const SHAPE_ARRAY_LEN: usize = 1;

/// Writes the main label and hands out collection writers
pub struct RootWriter<'c> {
    container: &'c mut Container,
    main: Label,
}

impl<'c> RootWriter<'c> {
    /// Write the main label's name, metadata and root shape
    pub fn begin(
        container: &'c mut Container,
        root_label_name: &str,
        uuid: &str,
        root: &AnnotatedShape,
    ) -> Result<Self> {
        let main = container.main_label();
        codec::write_name(container, &main, root_label_name)?;
        codec::write_text_array(
            container,
            &main,
            &[uuid.to_string(), root.annotation().to_string()],
        )?;
        codec::write_shape(container, &main, root.shape())?;
        Ok(Self { container, main })
    }

    /// Start a new collection label under main
    pub fn collection(&mut self, name: &str) -> Result<CollectionWriter<'_>> {
        let label = self.container.new_child(&self.main).map_err(CodecError::from)?;
        codec::write_name(self.container, &label, name)?;
        Ok(CollectionWriter {
            container: &mut *self.container,
            label,
        })
    }
}

/// Appends shape labels to one collection, tagged 0, 1, 2, ...
pub struct CollectionWriter<'c> {
    container: &'c mut Container,
    label: Label,
}

impl CollectionWriter<'_> {
    pub fn push_shape(&mut self, shape: &AnnotatedShape) -> Result<()> {
        let label = self.container.push_child(&self.label).map_err(CodecError::from)?;
        codec::write_text_array(self.container, &label, &[shape.annotation().to_string()])?;
        codec::write_shape(self.container, &label, shape.shape())?;
        Ok(())
    }
}

/// Write a whole document into a fresh container
pub fn write_document(container: &mut Container, doc: &ShapeDocument, root_label_name: &str) -> Result<()> {
    let (uuid, root) = doc.check_saveable()?;
    let mut writer = RootWriter::begin(container, root_label_name, uuid, root)?;

    for collection in doc.collections() {
        let mut shapes = writer.collection(collection.name())?;
        for shape in collection.shapes() {
            shapes.push_shape(shape)?;
        }
        debug!(collection = collection.name(), shapes = collection.shapes().len(), "wrote collection");
    }
    Ok(())
}

/// Read a document from a container, failing on the first schema violation
pub fn read_document(container: &Container) -> Result<ShapeDocument> {
    let main = container.main_label();
    let mut doc = ShapeDocument::new();

    let metadata = codec::read_text_array(container, &main)
        .map_err(|e| Error::corrupt(format!("root metadata: {e}")))?;
    let [uuid, annotation]: [String; ROOT_ARRAY_LEN] = metadata.try_into().map_err(|values: Vec<String>| {
        Error::corrupt(format!(
            "root text array has {} entries, expected {ROOT_ARRAY_LEN}",
            values.len()
        ))
    })?;
    let root_shape = codec::read_shape(container, &main)
        .map_err(|e| Error::corrupt(format!("root shape: {e}")))?;

    doc.set_uuid(uuid);
    doc.set_root_shape(root_shape, annotation);

    let collections = container
        .children(&main)
        .map_err(|e| malformed("main label", e))?;
    for collection in &collections {
        read_collection(container, collection, &mut doc)?;
    }

    Ok(doc)
}

fn read_collection(container: &Container, label: &Label, doc: &mut ShapeDocument) -> Result<()> {
    let name = codec::read_name(container, label)
        .map_err(|_| Error::corrupt("could not retrieve label name"))?;
    doc.ensure_collection(&name);

    let shape_labels = container
        .children(label)
        .map_err(|e| malformed(&format!("collection {name:?}"), e))?;
    for (index, shape_label) in shape_labels.iter().enumerate() {
        let tag = container
            .tag(shape_label)
            .map_err(|e| malformed(&format!("shape {index} of {name:?}"), e))?;
        if tag != index as i64 {
            return Err(Error::corrupt(format!(
                "collection {name:?} has no shape label {index} (found tag {tag})"
            )));
        }

        let shape = codec::read_shape(container, shape_label)
            .map_err(|_| Error::corrupt(format!("could not retrieve shape {index} of {name:?}")))?;

        let annotation = codec::read_text_array(container, shape_label)
            .map_err(|_| Error::corrupt(format!("annotation for shape {index} of {name:?} is missing")))?;
        let [annotation]: [String; SHAPE_ARRAY_LEN] = annotation.try_into().map_err(|values: Vec<String>| {
            Error::corrupt(format!(
                "annotation for shape {index} of {name:?} has {} entries, expected {SHAPE_ARRAY_LEN}",
                values.len()
            ))
        })?;

        doc.append_shape(&name, shape, annotation);
    }

    debug!(collection = %name, shapes = shape_labels.len(), "read collection");
    Ok(())
}

fn malformed(context: &str, err: ContainerError) -> Error {
    Error::corrupt(format!("{context} is malformed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use shapedoc_container::ContainerApp;

    fn container() -> Container {
        ContainerApp::with_default_formats().create("BinShapeDoc").unwrap()
    }

    fn sample() -> ShapeDocument {
        let mut doc = ShapeDocument::new();
        doc.set_uuid("c0ffee");
        doc.set_root_shape(Shape::from(vec![0]), "{}");
        doc.append_shape("faces", Shape::from(vec![1]), "a");
        doc.append_shape("faces", Shape::from(vec![2]), "b");
        doc.append_shape("edges", Shape::from(vec![3]), "c");
        doc
    }

    #[test]
    fn written_tree_matches_schema() {
        let mut c = container();
        write_document(&mut c, &sample(), "DOCUMENT ROOT").unwrap();

        let main = c.main_label();
        assert_eq!(c.name(&main).unwrap().as_deref(), Some("DOCUMENT ROOT"));
        assert_eq!(
            c.text_array(&main).unwrap(),
            Some(vec!["c0ffee".to_string(), "{}".to_string()])
        );

        let collections = c.children(&main).unwrap();
        assert_eq!(collections.len(), 2);
        assert_eq!(c.name(&collections[0]).unwrap().as_deref(), Some("faces"));
        assert_eq!(c.name(&collections[1]).unwrap().as_deref(), Some("edges"));

        let faces = c.children(&collections[0]).unwrap();
        let tags: Vec<i64> = faces.iter().map(|l| c.tag(l).unwrap()).collect();
        assert_eq!(tags, [0, 1]);
        assert_eq!(c.text_array(&faces[1]).unwrap(), Some(vec!["b".to_string()]));
    }

    #[test]
    fn read_reverses_write() {
        let mut c = container();
        write_document(&mut c, &sample(), "DOCUMENT ROOT").unwrap();
        assert_eq!(read_document(&c).unwrap(), sample());
    }

    #[test]
    fn write_requires_root_and_uuid() {
        let mut c = container();
        let mut doc = ShapeDocument::new();
        doc.set_uuid("only-uuid");
        let err = write_document(&mut c, &doc, "DOCUMENT ROOT").unwrap_err();
        assert!(matches!(err, Error::PreconditionFailed { .. }));
        assert_eq!(c.child_count(&c.main_label()).unwrap(), 0);
    }

    #[test]
    fn empty_collection_keeps_its_name() {
        let mut c = container();
        let mut doc = sample();
        doc.ensure_collection("holes");
        write_document(&mut c, &doc, "DOCUMENT ROOT").unwrap();

        let loaded = read_document(&c).unwrap();
        assert!(loaded.shapes_for_name("holes").unwrap().is_empty());
    }

    #[test]
    fn wrong_root_array_length_is_corrupt() {
        for len in [1, 3] {
            let mut c = container();
            write_document(&mut c, &sample(), "DOCUMENT ROOT").unwrap();
            let main = c.main_label();
            let values: Vec<String> = (0..len).map(|i| i.to_string()).collect();
            c.set_text_array(&main, &values).unwrap();

            let err = read_document(&c).unwrap_err();
            assert!(matches!(err, Error::CorruptDocument { .. }), "length {len}: {err}");
        }
    }

    #[test]
    fn missing_root_metadata_is_corrupt() {
        let c = container();
        assert!(matches!(read_document(&c), Err(Error::CorruptDocument { .. })));
    }

    #[test]
    fn missing_root_shape_is_corrupt() {
        let mut c = container();
        let main = c.main_label();
        c.set_text_array(&main, &["u".to_string(), "a".to_string()]).unwrap();
        assert!(matches!(read_document(&c), Err(Error::CorruptDocument { .. })));
    }

    #[test]
    fn unnamed_collection_is_corrupt() {
        let mut c = container();
        write_document(&mut c, &sample(), "DOCUMENT ROOT").unwrap();
        let main = c.main_label();
        c.new_child(&main).unwrap();

        let err = read_document(&c).unwrap_err();
        assert_eq!(err.to_string(), "corrupt document: could not retrieve label name");
    }

    #[test]
    fn shape_label_without_shape_is_corrupt() {
        let mut c = container();
        write_document(&mut c, &sample(), "DOCUMENT ROOT").unwrap();
        let main = c.main_label();
        let collection = c.new_child(&main).unwrap();
        c.set_name(&collection, "broken").unwrap();
        let shape = c.child_label(&collection, 0, true).unwrap().unwrap();
        c.set_text_array(&shape, &["a".to_string()]).unwrap();

        assert!(matches!(read_document(&c), Err(Error::CorruptDocument { .. })));
    }

    #[test]
    fn shape_label_without_annotation_is_corrupt() {
        let mut c = container();
        write_document(&mut c, &sample(), "DOCUMENT ROOT").unwrap();
        let main = c.main_label();
        let collection = c.new_child(&main).unwrap();
        c.set_name(&collection, "bare").unwrap();
        let shape = c.push_child(&collection).unwrap();
        c.set_shape(&shape, &[7]).unwrap();

        let err = read_document(&c).unwrap_err();
        assert!(matches!(err, Error::CorruptDocument { .. }));
        assert!(err.to_string().contains("annotation for shape 0 of \"bare\" is missing"), "{err}");
    }

    #[test]
    fn shape_annotation_must_have_one_entry() {
        let mut c = container();
        write_document(&mut c, &sample(), "DOCUMENT ROOT").unwrap();
        let main = c.main_label();
        let faces = c.children(&main).unwrap().remove(0);
        let first = c.find_child(&faces, 0).unwrap().unwrap();
        c.set_text_array(&first, &["a".to_string(), "extra".to_string()]).unwrap();

        assert!(matches!(read_document(&c), Err(Error::CorruptDocument { .. })));
    }

    #[test]
    fn large_collection_round_trips_in_order() {
        let mut doc = ShapeDocument::new();
        doc.set_uuid("bulk");
        doc.set_root_shape(Shape::from(vec![0]), "{}");
        for i in 0..3000u32 {
            doc.append_shape("faces", Shape::from(i.to_le_bytes().to_vec()), i.to_string());
        }

        let mut c = container();
        write_document(&mut c, &doc, "DOCUMENT ROOT").unwrap();
        let faces = c.children(&c.main_label()).unwrap().remove(0);
        let last = c.children(&faces).unwrap().pop().unwrap();
        assert_eq!(c.tag(&last).unwrap(), 2999);

        let loaded = read_document(&c).unwrap();
        assert_eq!(loaded.shapes_for_name("faces").unwrap()[2999].annotation(), "2999");
        assert_eq!(loaded, doc);
    }

    #[test]
    fn sparse_shape_tags_are_corrupt() {
        let mut c = container();
        write_document(&mut c, &sample(), "DOCUMENT ROOT").unwrap();
        let main = c.main_label();
        let collection = c.new_child(&main).unwrap();
        c.set_name(&collection, "sparse").unwrap();
        let shape = c.child_label(&collection, 3, true).unwrap().unwrap();
        c.set_text_array(&shape, &["a".to_string()]).unwrap();
        c.set_shape(&shape, &[1]).unwrap();

        let err = read_document(&c).unwrap_err();
        assert!(err.to_string().contains("no shape label 0"), "{err}");
    }
}
