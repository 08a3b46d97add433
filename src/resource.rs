//! Resource-file resolution relative to a type's declaring source.
//!
//! Peripheral helper, consumed as a collaborator by enumeration types that
//! ship data files next to their source.  It assumes the conventional
//! layout where the module path mirrors the source tree: the type path
//! `crate::a::b::Type` declares its source in `<root>/a/b.rs`.  Types
//! whose source does not follow that convention are rejected with a
//! configuration error instead of silently resolving a wrong path.
//!
//! An absolute locator (`/data/schema.json`) resolves against the source
//! root; a relative one resolves against the declaring source's directory.

use std::path::{Path, PathBuf};

use crate::error::EnumError;
use crate::symbol::EnumClass;

/// The source file that declares `type_path`, under `root`.
///
/// `type_path` is a fully qualified `crate::module::Type` string; the
/// leading crate segment and the trailing type segment are dropped, the
/// module segments in between map onto directories, and the last module
/// segment names the file.  Fails with `EnumError::Configuration` when the
/// path is too short to name a module or the mirrored file does not exist.
pub fn source_file(root: &Path, type_path: &str) -> Result<PathBuf, EnumError> {
    let segments: Vec<&str> = type_path.split("::").collect();
    if segments.len() < 3 || segments.iter().any(|s| s.is_empty()) {
        return Err(EnumError::Configuration {
            type_name: type_path.to_string(),
            reason: "type path does not follow the crate::module::Type convention".to_string(),
        });
    }

    let modules = &segments[1..segments.len() - 1];
    let mut file = root.to_path_buf();
    for module in modules {
        file.push(module);
    }
    file.set_extension("rs");

    if !file.is_file() {
        return Err(EnumError::Configuration {
            type_name: type_path.to_string(),
            reason: format!(
                "declaring source '{}' not found; the module layout must mirror the type path",
                file.display()
            ),
        });
    }
    Ok(file)
}

/// Resolve a resource locator relative to the type's declaring source.
///
/// Returns `Ok(None)` when the convention holds but the target file does
/// not exist.
pub fn resolve(root: &Path, type_path: &str, locator: &str) -> Result<Option<PathBuf>, EnumError> {
    let source = source_file(root, type_path)?;
    let candidate = match locator.strip_prefix('/') {
        Some(rooted) => root.join(rooted),
        None => match source.parent() {
            Some(dir) => dir.join(locator),
            None => root.join(locator),
        },
    };
    Ok(candidate.is_file().then_some(candidate))
}

/// Typed wrapper over [`resolve`] using the type's canonical identifier.
pub fn resolve_for<T: EnumClass>(root: &Path, locator: &str) -> Result<Option<PathBuf>, EnumError> {
    resolve(root, T::type_name(), locator)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("util/concurrent")).unwrap();
        fs::write(dir.path().join("util/concurrent/time_unit.rs"), "").unwrap();
        fs::write(dir.path().join("util/concurrent/factors.toml"), "").unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data/shared.json"), "{}").unwrap();
        dir
    }

    #[test]
    fn source_file_mirrors_the_type_path() {
        let dir = fixture_tree();
        let source =
            source_file(dir.path(), "mycrate::util::concurrent::time_unit::TimeUnit").unwrap();
        assert_eq!(source, dir.path().join("util/concurrent/time_unit.rs"));
    }

    #[test]
    fn nonconforming_layout_rejected() {
        let dir = fixture_tree();
        assert!(matches!(
            source_file(dir.path(), "mycrate::missing::Type"),
            Err(EnumError::Configuration { .. })
        ));
        assert!(matches!(
            source_file(dir.path(), "JustAType"),
            Err(EnumError::Configuration { .. })
        ));
        assert!(matches!(
            source_file(dir.path(), "mycrate::TopLevel"),
            Err(EnumError::Configuration { .. })
        ));
    }

    #[test]
    fn relative_locator_resolves_beside_the_source() {
        let dir = fixture_tree();
        let found = resolve(
            dir.path(),
            "mycrate::util::concurrent::time_unit::TimeUnit",
            "factors.toml",
        )
        .unwrap();
        assert_eq!(
            found,
            Some(dir.path().join("util/concurrent/factors.toml"))
        );
    }

    #[test]
    fn absolute_locator_resolves_from_the_root() {
        let dir = fixture_tree();
        let found = resolve(
            dir.path(),
            "mycrate::util::concurrent::time_unit::TimeUnit",
            "/data/shared.json",
        )
        .unwrap();
        assert_eq!(found, Some(dir.path().join("data/shared.json")));
    }

    #[test]
    fn resolve_for_uses_the_canonical_identifier() {
        use crate::symbol::ArgValue;

        struct Probe;

        impl EnumClass for Probe {
            fn type_name() -> &'static str {
                "probe::util::Probe"
            }

            fn declaration() -> Vec<(&'static str, Vec<ArgValue>)> {
                Vec::new()
            }

            fn construct(_name: &str, _args: &[ArgValue]) -> Result<Self, EnumError> {
                Ok(Probe)
            }
        }

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("util.rs"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        let found = resolve_for::<Probe>(dir.path(), "notes.txt").unwrap();
        assert_eq!(found, Some(dir.path().join("notes.txt")));
    }

    #[test]
    fn missing_target_is_absent_not_an_error() {
        let dir = fixture_tree();
        let found = resolve(
            dir.path(),
            "mycrate::util::concurrent::time_unit::TimeUnit",
            "nothing_here.txt",
        )
        .unwrap();
        assert_eq!(found, None);
    }
}
