//! Label tree stored in an automerge document.
//!
//! Every label is a map object:
//!
//! ```text
//! { tag: int, children: [label, ...], name?: str, text_array?: [str, ...], shape?: bytes }
//! ```
//!
//! Children are kept sorted by tag. The main label hangs off the document
//! root under `main`.

use std::fmt::Write as _;

use automerge::{transaction::Transactable, AutoCommit, ObjId, ObjType, ReadDoc, ScalarValue, Value, ROOT};

use crate::error::{ContainerError, ContainerResult};
use crate::format::Format;

const MAIN_KEY: &str = "main";
const TAG_KEY: &str = "tag";
const CHILDREN_KEY: &str = "children";
const NAME_KEY: &str = "name";
const TEXT_ARRAY_KEY: &str = "text_array";
const SHAPE_KEY: &str = "shape";

/// Tag of the main label
pub const MAIN_TAG: i64 = 1;

/// Handle to a label inside a [`Container`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label(ObjId);

/// An open container document
pub struct Container {
    doc: AutoCommit,
    format: Format,
    main: Label,
    closed: bool,
}

impl Container {
    /// Create an empty container with just a main label
    pub(crate) fn new(format: Format) -> ContainerResult<Self> {
        let mut doc = AutoCommit::new();
        doc.put(ROOT, "format", format.name)?;
        let main = doc.put_object(ROOT, MAIN_KEY, ObjType::Map)?;
        doc.put(&main, TAG_KEY, MAIN_TAG)?;
        doc.put_object(&main, CHILDREN_KEY, ObjType::List)?;

        Ok(Self {
            doc,
            format,
            main: Label(main),
            closed: false,
        })
    }

    /// Wrap a loaded document. Returns `None` when there is no main label.
    pub(crate) fn from_doc(doc: AutoCommit, format: Format) -> Option<Self> {
        let main = match doc.get(ROOT, MAIN_KEY) {
            Ok(Some((Value::Object(ObjType::Map), main))) => main,
            _ => return None,
        };

        Some(Self {
            doc,
            format,
            main: Label(main),
            closed: false,
        })
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Release the document. Further label operations fail with `Closed`.
    pub(crate) fn close(&mut self) {
        if !self.closed {
            self.doc = AutoCommit::new();
            self.closed = true;
        }
    }

    pub(crate) fn save_bytes(&mut self) -> Vec<u8> {
        self.doc.save()
    }

    fn ensure_open(&self) -> ContainerResult<()> {
        if self.closed {
            Err(ContainerError::Closed)
        } else {
            Ok(())
        }
    }

    // --- Tree structure ---

    /// The root of the label tree
    pub fn main_label(&self) -> Label {
        self.main.clone()
    }

    /// Tag of a label within its parent
    pub fn tag(&self, label: &Label) -> ContainerResult<i64> {
        self.ensure_open()?;
        match self.doc.get(&label.0, TAG_KEY)? {
            Some((Value::Scalar(s), _)) => match &*s {
                ScalarValue::Int(tag) => Ok(*tag),
                _ => Err(ContainerError::MalformedLabel(TAG_KEY)),
            },
            _ => Err(ContainerError::MalformedLabel(TAG_KEY)),
        }
    }

    fn children_list(&self, label: &Label) -> ContainerResult<ObjId> {
        match self.doc.get(&label.0, CHILDREN_KEY)? {
            Some((Value::Object(ObjType::List), list)) => Ok(list),
            _ => Err(ContainerError::MalformedLabel(CHILDREN_KEY)),
        }
    }

    /// Children of a label in tree order
    pub fn children(&self, parent: &Label) -> ContainerResult<Vec<Label>> {
        self.ensure_open()?;
        let list = self.children_list(parent)?;
        let len = self.doc.length(&list);
        let mut children = Vec::with_capacity(len);
        for i in 0..len {
            match self.doc.get(&list, i)? {
                Some((Value::Object(ObjType::Map), child)) => children.push(Label(child)),
                _ => return Err(ContainerError::MalformedLabel(CHILDREN_KEY)),
            }
        }
        Ok(children)
    }

    pub fn child_count(&self, parent: &Label) -> ContainerResult<usize> {
        self.ensure_open()?;
        let list = self.children_list(parent)?;
        Ok(self.doc.length(&list))
    }

    /// Look up the child with `tag` without creating it
    pub fn find_child(&self, parent: &Label, tag: i64) -> ContainerResult<Option<Label>> {
        for child in self.children(parent)? {
            if self.tag(&child)? == tag {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    /// Look up the child with `tag`, creating it in tag order when asked to
    pub fn child_label(&mut self, parent: &Label, tag: i64, create: bool) -> ContainerResult<Option<Label>> {
        let children = self.children(parent)?;
        let mut insert_at = children.len();
        for (index, child) in children.iter().enumerate() {
            let child_tag = self.tag(child)?;
            if child_tag == tag {
                return Ok(Some(child.clone()));
            }
            if child_tag > tag {
                insert_at = index;
                break;
            }
        }

        if !create {
            return Ok(None);
        }

        let list = self.children_list(parent)?;
        self.insert_label(&list, insert_at, tag).map(Some)
    }

    /// Append a child tagged one past the last existing child
    pub fn new_child(&mut self, parent: &Label) -> ContainerResult<Label> {
        self.ensure_open()?;
        let list = self.children_list(parent)?;
        let len = self.doc.length(&list);
        let tag = match len.checked_sub(1) {
            Some(last) => match self.doc.get(&list, last)? {
                Some((Value::Object(ObjType::Map), last)) => self.tag(&Label(last))? + 1,
                _ => return Err(ContainerError::MalformedLabel(CHILDREN_KEY)),
            },
            None => 1,
        };
        self.insert_label(&list, len, tag)
    }

    /// Append a child whose tag is its position, so children are tagged
    /// 0, 1, 2, ... as long as nothing else inserts under `parent`
    pub fn push_child(&mut self, parent: &Label) -> ContainerResult<Label> {
        self.ensure_open()?;
        let list = self.children_list(parent)?;
        let len = self.doc.length(&list);
        self.insert_label(&list, len, len as i64)
    }

    fn insert_label(&mut self, list: &ObjId, index: usize, tag: i64) -> ContainerResult<Label> {
        let label = self.doc.insert_object(list, index, ObjType::Map)?;
        self.doc.put(&label, TAG_KEY, tag)?;
        self.doc.put_object(&label, CHILDREN_KEY, ObjType::List)?;
        Ok(Label(label))
    }

    /// Number of labels in the tree, main label included
    pub fn label_count(&self) -> ContainerResult<u64> {
        let mut count = 0;
        let mut pending = vec![self.main_label()];
        while let Some(label) = pending.pop() {
            count += 1;
            pending.extend(self.children(&label)?);
        }
        Ok(count)
    }

    // --- Attributes ---

    pub fn set_name(&mut self, label: &Label, name: &str) -> ContainerResult<()> {
        self.ensure_open()?;
        self.doc.put(&label.0, NAME_KEY, name)?;
        Ok(())
    }

    pub fn name(&self, label: &Label) -> ContainerResult<Option<String>> {
        self.ensure_open()?;
        self.get_str(&label.0, NAME_KEY)
    }

    /// Replace the text array attribute with exactly `values`
    pub fn set_text_array(&mut self, label: &Label, values: &[String]) -> ContainerResult<()> {
        self.ensure_open()?;
        let array = self.doc.put_object(&label.0, TEXT_ARRAY_KEY, ObjType::List)?;
        for (i, value) in values.iter().enumerate() {
            self.doc.insert(&array, i, value.as_str())?;
        }
        Ok(())
    }

    pub fn text_array(&self, label: &Label) -> ContainerResult<Option<Vec<String>>> {
        self.ensure_open()?;
        let array = match self.doc.get(&label.0, TEXT_ARRAY_KEY)? {
            Some((Value::Object(ObjType::List), array)) => array,
            Some(_) => return Err(ContainerError::MalformedLabel(TEXT_ARRAY_KEY)),
            None => return Ok(None),
        };

        let len = self.doc.length(&array);
        let mut values = Vec::with_capacity(len);
        for i in 0..len {
            match self.get_str(&array, i)? {
                Some(value) => values.push(value),
                None => return Err(ContainerError::MalformedLabel(TEXT_ARRAY_KEY)),
            }
        }
        Ok(Some(values))
    }

    pub fn set_shape(&mut self, label: &Label, payload: &[u8]) -> ContainerResult<()> {
        self.ensure_open()?;
        self.doc.put(&label.0, SHAPE_KEY, payload.to_vec())?;
        Ok(())
    }

    pub fn shape(&self, label: &Label) -> ContainerResult<Option<Vec<u8>>> {
        self.ensure_open()?;
        match self.doc.get(&label.0, SHAPE_KEY)? {
            Some((Value::Scalar(s), _)) => match &*s {
                ScalarValue::Bytes(bytes) => Ok(Some(bytes.clone())),
                _ => Err(ContainerError::MalformedLabel(SHAPE_KEY)),
            },
            Some(_) => Err(ContainerError::MalformedLabel(SHAPE_KEY)),
            None => Ok(None),
        }
    }

    fn get_str<P: Into<automerge::Prop>>(&self, obj: &ObjId, prop: P) -> ContainerResult<Option<String>> {
        match self.doc.get(obj, prop)? {
            Some((Value::Scalar(s), _)) => match &*s {
                ScalarValue::Str(text) => Ok(Some(text.to_string())),
                _ => Ok(None),
            },
            _ => Ok(None),
        }
    }

    // --- Diagnostics ---

    /// Render the label tree as indented text
    pub fn dump(&self) -> ContainerResult<String> {
        let mut out = String::new();
        self.dump_label(&self.main_label(), "", &mut out)?;
        Ok(out)
    }

    fn dump_label(&self, label: &Label, prefix: &str, out: &mut String) -> ContainerResult<()> {
        let children = self.children(label)?;

        match self.name(label)? {
            Some(name) => {
                let _ = write!(out, "{prefix}LABEL ({name})");
            }
            None => {
                let _ = write!(out, "{prefix}Label unnamed");
            }
        }
        let _ = write!(out, " (tag {}) {} children", self.tag(label)?, children.len());
        if let Some(values) = self.text_array(label)? {
            let _ = write!(out, " text_array[{}]", values.len());
        }
        if self.shape(label)?.is_some() {
            out.push_str(" shape");
        }
        out.push('\n');

        let nested = format!("{prefix}    ");
        for child in &children {
            self.dump_label(child, &nested, out)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("format", &self.format.name)
            .field("closed", &self.closed)
            .finish()
    }
}
