//! Docf Package Lifecycle
//!
//! Orchestrates the two flows a documentation package goes through:
//!
//! - **export**: source folder → validated manifest → `.docf` archive
//! - **open**: `.docf` archive → fresh working directory → validated manifest
//!
//! Working directories are owned by a [`WorkingDir`] handle and, in an
//! interactive shell, by a [`Session`] that keeps at most one of them alive.

pub mod errors;
pub mod export;
pub mod open;
pub mod progress;
pub mod session;
pub mod workdir;

pub use errors::{PackageError, Result};
pub use export::{export_package, plan_export, ExportedPackage};
pub use open::{open_package, unpack_package, OpenedPackage, UnpackedPackage};
pub use progress::ExportStage;
pub use session::Session;
pub use workdir::{
    close_working_dir, purge_stale_working_dirs, remove_working_dir, WorkingDir,
};
