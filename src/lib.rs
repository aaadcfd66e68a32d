//! Persistence engine for named, annotated shape collections.
//!
//! A [`ShapeDocument`] holds one root shape, any number of named collections
//! of shapes and a document UUID. It is saved as a fixed three-level label
//! tree inside a binary container:
//!
//! ```text
//! main label (uuid, root annotation, root shape)
//! ├── collection "faces"
//! │   ├── 0 (annotation, shape)
//! │   └── 1 (annotation, shape)
//! └── collection "edges"
//!     └── 0 (annotation, shape)
//! ```
//!
//! Shapes are opaque byte payloads produced by a modelling kernel. Loading
//! validates the tree and fails on the first schema violation; no partial
//! document is ever returned.
//!
//! ```no_run
//! use shapedoc::{Shape, ShapeDocument};
//!
//! # fn main() -> shapedoc::Result<()> {
//! let mut doc = ShapeDocument::new();
//! doc.assign_random_uuid();
//! doc.set_root_shape(Shape::from(vec![0u8; 16]), "{}");
//! doc.append_shape("faces", Shape::from(vec![1u8; 8]), r#"{"name": "top"}"#);
//! doc.save_to("bracket.sdoc")?;
//!
//! let loaded = ShapeDocument::load_from("bracket.sdoc")?;
//! assert_eq!(loaded.shape_names(), ["faces"]);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod paths;
pub mod shape;
pub mod tree;

pub use shapedoc_container as container;

pub use config::IoConfig;
pub use error::{CodecError, ConfigSource, Error, Result};
pub use io::{load, load_archive, save, save_archive};
pub use model::{ShapeCollection, ShapeDocument};
pub use paths::ArchivePath;
pub use shape::{AnnotatedShape, Shape};
