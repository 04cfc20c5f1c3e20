//! Structural checks keeping `tests/unit` a mirror of `src`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SOURCE_ROOT: &str = "src";
    const UNIT_ROOT: &str = "tests/unit";

    // Entry points and module declarations carry no logic of their own
    fn needs_counterpart(relative: &Path) -> bool {
        let name = relative.file_name().and_then(|n| n.to_str());
        let at_root = relative.parent() == Some(Path::new(""));
        !(name == Some("mod.rs") || (at_root && matches!(name, Some("main.rs" | "lib.rs"))))
    }

    // Every .rs file below `root`, relative to `root`
    fn rust_files(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    let relative = path
                        .strip_prefix(root)
                        .map_err(|e| io::Error::other(e.to_string()))?;
                    found.insert(relative.to_path_buf());
                }
            }
        }

        Ok(found)
    }

    fn listing<'a>(paths: impl Iterator<Item = &'a PathBuf>, prefix: &str) -> String {
        paths
            .map(|p| format!("  - {prefix}/{}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Tests each source module has a unit test file at the same relative path
    // Verified by adding a source file without tests
    #[test]
    fn test_sources_have_unit_tests() {
        let sources = rust_files(Path::new(SOURCE_ROOT)).unwrap();
        let units = rust_files(Path::new(UNIT_ROOT)).unwrap();

        let missing: Vec<_> = sources
            .iter()
            .filter(|p| needs_counterpart(p) && !units.contains(*p))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            listing(missing.into_iter(), SOURCE_ROOT)
        );
    }

    // Tests no unit test file outlives the module it covers
    // Verified by adding a unit test file with no source module
    #[test]
    fn test_unit_tests_have_sources() {
        let sources = rust_files(Path::new(SOURCE_ROOT)).unwrap();
        let units = rust_files(Path::new(UNIT_ROOT)).unwrap();

        let orphaned: Vec<_> = units
            .iter()
            .filter(|p| needs_counterpart(p) && !sources.contains(*p))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a source module:\n{}",
            listing(orphaned.into_iter(), UNIT_ROOT)
        );
    }

    // Tests every test file actually declares tests
    // Verified by adding an empty test file
    #[test]
    fn test_test_files_declare_tests() {
        let root = Path::new("tests");
        let empty: Vec<_> = rust_files(root)
            .unwrap()
            .into_iter()
            .filter(|p| p.file_name().is_some_and(|n| n != "mod.rs"))
            .filter(|p| {
                !fs::read_to_string(root.join(p)).is_ok_and(|text| text.contains("#[test]"))
            })
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] functions:\n{}",
            listing(empty.iter(), "tests")
        );
    }
}
