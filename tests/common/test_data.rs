//! Test fixture generation for badmap integration tests.
//!
//! Builds temporary colormap source directories with known contents so
//! the full discovery/registration pass can be exercised end to end.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Write one colormap source file into `dir`.
pub fn write_source(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(format!("{}.json", name)), content).unwrap();
}

/// Create a source directory with a small set of well-formed palettes.
///
/// Contains:
/// - `banana`: three samples in the 0-255 range
/// - `gray`: a two-sample unit-range ramp
/// - `flat`: a degenerate single-sample palette
pub fn create_source_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_source(
        dir.path(),
        "banana",
        "[[0, 0, 0], [128, 128, 0], [255, 255, 0]]",
    );
    write_source(dir.path(), "gray", "[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]");
    write_source(dir.path(), "flat", "[[0.25, 0.5, 0.75]]");
    dir
}

/// Add a malformed source (mixed arity) to an existing directory.
pub fn add_broken_source(dir: &Path) {
    write_source(dir, "broken", "[[0, 0, 0], [1, 2]]");
}
