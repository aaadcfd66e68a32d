//! Attribute codec: typed values to and from container label attributes.

use shapedoc_container::{Container, Label};

use crate::error::CodecError;
use crate::shape::Shape;

type CodecResult<T> = std::result::Result<T, CodecError>;

fn describe(container: &Container, label: &Label) -> String {
    match container.tag(label) {
        Ok(tag) => format!("tag {tag}"),
        Err(_) => "<unreadable>".to_string(),
    }
}

fn missing(container: &Container, label: &Label, attribute: &'static str) -> CodecError {
    CodecError::AttributeMissing {
        attribute,
        label: describe(container, label),
    }
}

/// Store `values` as the label's text array, sized exactly to `values`
pub fn write_text_array(container: &mut Container, label: &Label, values: &[String]) -> CodecResult<()> {
    if values.is_empty() {
        return Err(CodecError::EmptyArray);
    }
    container.set_text_array(label, values)?;
    Ok(())
}

pub fn read_text_array(container: &Container, label: &Label) -> CodecResult<Vec<String>> {
    container
        .text_array(label)?
        .ok_or_else(|| missing(container, label, "text array"))
}

pub fn write_shape(container: &mut Container, label: &Label, shape: &Shape) -> CodecResult<()> {
    container.set_shape(label, shape.as_bytes())?;
    Ok(())
}

pub fn read_shape(container: &Container, label: &Label) -> CodecResult<Shape> {
    container
        .shape(label)?
        .map(Shape::from)
        .ok_or_else(|| missing(container, label, "shape"))
}

pub fn write_name(container: &mut Container, label: &Label, name: &str) -> CodecResult<()> {
    container.set_name(label, name)?;
    Ok(())
}

pub fn read_name(container: &Container, label: &Label) -> CodecResult<String> {
    container
        .name(label)?
        .ok_or_else(|| missing(container, label, "name"))
}
