//! Per-entry safety policy applied during extraction

use std::path::{Component, Path, PathBuf};

/// Extensions never written to disk (lowercase, without the dot)
pub const DENIED_EXTENSIONS: &[&str] = &[
    "exe", "bat", "cmd", "com", "sh", "bash", "ps1", "vbs", "scr", "msi", "app", "dmg", "pkg",
    "deb", "rpm",
];

/// Asset types expected in a payload. Advisory only, nothing is rejected for
/// falling outside this list.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "md", "markdown", "png", "jpg", "jpeg", "gif", "svg", "webp", "css", "js", "json", "txt",
];

/// Why an entry was left out of an extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    DeniedExtension,
    EscapesDestination,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::DeniedExtension => write!(f, "denied extension"),
            SkipReason::EscapesDestination => write!(f, "escapes destination"),
        }
    }
}

/// Outcome of running the policy over one archive entry name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryVerdict {
    /// Safe to write at this path, relative to the destination root
    Extract(PathBuf),
    Skip(SkipReason),
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

pub fn is_denied(path: &Path) -> bool {
    extension_of(path).is_some_and(|ext| DENIED_EXTENSIONS.contains(&ext.as_str()))
}

pub fn is_allowed_asset(path: &Path) -> bool {
    extension_of(path).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// `C:` or `C:foo` as the leading component names a Windows drive
fn is_drive_designator(part: &str) -> bool {
    let bytes = part.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Resolve an archive entry name to a path relative to the destination root.
///
/// Resolution is lexical: `.` is dropped and `..` pops the previous component.
/// Returns `None` when the name is absolute, carries a drive prefix, or pops
/// past the root.
pub fn contained_path(entry_name: &str) -> Option<PathBuf> {
    let normalized = entry_name.replace('\\', "/");
    let mut resolved = PathBuf::new();

    for (index, component) in Path::new(&normalized).components().enumerate() {
        match component {
            Component::Normal(part) => {
                // Not parsed as a prefix on unix
                if index == 0 && is_drive_designator(&part.to_string_lossy()) {
                    return None;
                }
                resolved.push(part);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(resolved)
}

/// Apply the extension check, then the containment check
pub fn classify(entry_name: &str) -> EntryVerdict {
    if is_denied(Path::new(entry_name.trim_end_matches(['/', '\\']))) {
        return EntryVerdict::Skip(SkipReason::DeniedExtension);
    }
    match contained_path(entry_name) {
        Some(relative) => EntryVerdict::Extract(relative),
        None => EntryVerdict::Skip(SkipReason::EscapesDestination),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denied_extensions_case_insensitive() {
        assert_eq!(
            classify("payload.exe"),
            EntryVerdict::Skip(SkipReason::DeniedExtension)
        );
        assert_eq!(
            classify("docs/INSTALL.SH"),
            EntryVerdict::Skip(SkipReason::DeniedExtension)
        );
        assert_eq!(
            classify("Tool.app/"),
            EntryVerdict::Skip(SkipReason::DeniedExtension)
        );
    }

    #[test]
    fn test_traversal_rejected() {
        assert_eq!(
            classify("../../evil.md"),
            EntryVerdict::Skip(SkipReason::EscapesDestination)
        );
        assert_eq!(
            classify("docs/../../evil.md"),
            EntryVerdict::Skip(SkipReason::EscapesDestination)
        );
        assert_eq!(
            classify("/etc/passwd.md"),
            EntryVerdict::Skip(SkipReason::EscapesDestination)
        );
        assert_eq!(
            classify("..\\..\\evil.md"),
            EntryVerdict::Skip(SkipReason::EscapesDestination)
        );
        assert_eq!(
            classify("C:/Windows/evil.md"),
            EntryVerdict::Skip(SkipReason::EscapesDestination)
        );
    }

    #[test]
    fn test_inner_parent_components_resolve() {
        assert_eq!(
            classify("docs/img/../README.md"),
            EntryVerdict::Extract(PathBuf::from("docs/README.md"))
        );
        assert_eq!(
            classify("./docs/"),
            EntryVerdict::Extract(PathBuf::from("docs"))
        );
    }

    #[test]
    fn test_colons_inside_names_are_kept() {
        assert_eq!(
            classify("docs/notes:2024.md"),
            EntryVerdict::Extract(PathBuf::from("docs/notes:2024.md"))
        );
        assert_eq!(
            classify("docs/C:/x.md"),
            EntryVerdict::Extract(PathBuf::from("docs/C:/x.md"))
        );
        assert_eq!(
            classify("c:evil.md"),
            EntryVerdict::Skip(SkipReason::EscapesDestination)
        );
    }

    #[test]
    fn test_allowed_assets_are_advisory() {
        assert!(is_allowed_asset(Path::new("docs/logo.PNG")));
        assert!(!is_allowed_asset(Path::new("docs/data.csv")));
        assert_eq!(
            classify("docs/data.csv"),
            EntryVerdict::Extract(PathBuf::from("docs/data.csv"))
        );
    }
}
