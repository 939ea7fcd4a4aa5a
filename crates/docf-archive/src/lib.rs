//! Docf Archive Codec
//!
//! Bidirectional transcoding between a directory tree and a single ZIP
//! container. Extraction is the safety boundary for untrusted packages: every
//! entry goes through the extension denylist and a path containment check
//! before anything touches the disk.

pub mod create;
pub mod errors;
pub mod extract;
pub mod inspect;
pub mod policy;

pub use create::create;
pub use errors::ArchiveError;
pub use extract::{extract, ExtractionReport, SkippedEntry};
pub use inspect::{inspect, EntryInfo};
pub use policy::{EntryVerdict, SkipReason};
