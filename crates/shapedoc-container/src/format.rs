//! Container formats a [`ContainerApp`](crate::ContainerApp) can be taught to handle.

/// A named storage format and the file extension it writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Format {
    pub name: &'static str,
    pub extension: &'static str,
}

/// Binary label-tree format
pub const BIN_SHAPEDOC: Format = Format {
    name: "BinShapeDoc",
    extension: "sdoc",
};

/// Formats registered by [`ContainerApp::with_default_formats`](crate::ContainerApp::with_default_formats)
pub const DEFAULT_FORMATS: &[Format] = &[BIN_SHAPEDOC];
