//! Path utilities for locating test data files.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

/// Returns the directory holding the shared fixture files.
pub fn testdata_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

/// Path of the small boundary GeoJSON fixture (France, Spain, Germany).
pub fn boundary_fixture_path() -> PathBuf {
    testdata_dir().join("countries.geojson")
}

/// Write `contents` to a temporary file that lives as long as the handle.
pub fn temp_file_with(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}
