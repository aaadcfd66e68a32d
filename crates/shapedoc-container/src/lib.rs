//! Binary label-tree container for shapedoc.
//!
//! A container is a tree of labels. Each label has an integer tag, an
//! ordered list of children and a small set of typed attributes (name, text
//! array, shape payload). The tree lives in an automerge document which is
//! wrapped in a small binary envelope on disk.
//!
//! ```text
//! ContainerApp ── create / open ──▶ Container ── store ──▶ file
//!                                     │
//!                                 main label
//!                                  ├── child (tag 1)
//!                                  │    ├── child (tag 0)
//!                                  │    └── child (tag 1)
//!                                  └── child (tag 2)
//! ```
//!
//! Opening and storing report [`ReaderStatus`] / [`StoreStatus`] tags rather
//! than errors so callers can keep the exact reason.

mod app;
mod container;
mod envelope;
mod error;
mod format;
mod status;

pub use app::ContainerApp;
pub use container::{Container, Label, MAIN_TAG};
pub use error::{ContainerError, ContainerResult};
pub use format::{Format, BIN_SHAPEDOC, DEFAULT_FORMATS};
pub use status::{ReaderStatus, StoreStatus};
