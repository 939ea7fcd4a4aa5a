//! Names shared by every stage of the package lifecycle

/// File name of the manifest document at the package root
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Fixed name of the documentation payload folder
pub const DOCS_FOLDER: &str = "docs";

/// Prefix marking directories created by the extraction routine.
/// Only directories carrying it are ever removed recursively.
pub const WORKDIR_PREFIX: &str = "docf-";

/// File extension of a package
pub const PACKAGE_EXTENSION: &str = "docf";

/// Version written when a manifest does not name one
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Theme written into synthesized manifests
pub const DEFAULT_THEME: &str = "light";

pub const REQUIRED_FIELDS: [&str; 2] = ["title", "entryFile"];

/// Extensions recognized as Markdown (lowercase, without the dot)
pub const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];
