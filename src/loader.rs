//! Colormap source discovery and loading.
//!
//! A colormap source store is a directory of JSON files, one file per
//! colormap. Each file holds an `n × {3,4}` array of channel values,
//! either already in `[0, 1]` or in the `[0, 255]` integer range. This
//! module enumerates whatever sources are present, validates each one
//! and normalizes it into a [`ColorSequence`].

use ndarray::Array2;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::colormap::ColorSequence;
use crate::error::{BadmapError, Result};

/// One discovered colormap source: a name (file stem) and its raw,
/// not-yet-normalized sample rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSource {
    /// Colormap name, taken from the file stem.
    pub name: String,
    /// Raw sample rows as parsed from the file.
    pub rows: Vec<Vec<f64>>,
}

impl RawSource {
    /// Build an in-memory source, mainly for tests and embedding.
    pub fn new(name: impl Into<String>, rows: Vec<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

/// Enumerate all colormap sources in a directory.
///
/// Every `*.json` entry is parsed into a [`RawSource`]; no fixed file
/// count or set of names is assumed. Results are ordered by name so
/// repeated discovery passes over an unchanged store enumerate sources
/// identically. A file that cannot be read or parsed is returned as a
/// per-source Load error by [`load_source_file`]; this function only
/// fails if the directory itself cannot be read.
pub fn discover_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().map(|ext| ext == "json").unwrap_or(false)
        })
        .collect();
    paths.sort();

    debug!(
        dir = %dir.display(),
        count = paths.len(),
        "Discovered colormap sources"
    );
    Ok(paths)
}

/// Read and parse one source file into a [`RawSource`].
pub fn load_source_file(path: &Path) -> Result<RawSource> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| BadmapError::load(path.display().to_string(), "invalid file name"))?
        .to_string();

    let content = fs::read_to_string(path)
        .map_err(|e| BadmapError::load(&name, format!("unreadable source: {}", e)))?;
    let rows: Vec<Vec<f64>> = serde_json::from_str(&content)
        .map_err(|e| BadmapError::load(&name, format!("malformed source: {}", e)))?;

    Ok(RawSource::new(name, rows))
}

/// Validate and normalize one raw source into a [`ColorSequence`].
///
/// Rejects empty sources, mixed per-sample arity and non-finite values.
/// If any channel exceeds 1.0 the whole sequence is assumed to use the
/// `[0, 255]` scale and every channel is divided by 255.0; the rescale
/// is all-or-nothing for the sequence. A sequence already in `[0, 1]`
/// passes through unchanged.
pub fn load(source: &RawSource) -> Result<ColorSequence> {
    let name = &source.name;
    let n = source.rows.len();
    if n == 0 {
        return Err(BadmapError::load(name, "source contains no samples"));
    }

    let channels = source.rows[0].len();
    if channels != 3 && channels != 4 {
        return Err(BadmapError::load(
            name,
            format!("samples must have 3 or 4 channels, got {}", channels),
        ));
    }
    for (i, row) in source.rows.iter().enumerate() {
        if row.len() != channels {
            return Err(BadmapError::load(
                name,
                format!(
                    "inconsistent sample arity: sample 0 has {} channels, sample {} has {}",
                    channels,
                    i,
                    row.len()
                ),
            ));
        }
        if let Some(&bad) = row.iter().find(|v| !v.is_finite()) {
            return Err(BadmapError::load(
                name,
                format!("non-finite channel value {} in sample {}", bad, i),
            ));
        }
    }

    let flat: Vec<f64> = source.rows.iter().flatten().copied().collect();
    let mut samples = Array2::from_shape_vec((n, channels), flat)
        .map_err(|e| BadmapError::load(name, format!("bad array shape: {}", e)))?;

    // Scale inference: any channel above 1.0 means the source uses the
    // 0-255 integer range.
    let max = samples.iter().cloned().fold(f64::MIN, f64::max);
    if max > 1.0 {
        samples.mapv_inplace(|v| v / 255.0);
        debug!(name = %name, max = max, "Rescaled source from 0-255 range");
    }

    ColorSequence::new(samples).map_err(|e| BadmapError::load(name, e.to_string()))
}

/// Read, parse, validate and normalize one source file.
pub fn load_file(path: &Path) -> Result<(String, ColorSequence)> {
    let source = load_source_file(path)?;
    let sequence = load(&source)?;
    Ok((source.name, sequence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(format!("{}.json", name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_discover_sources_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        write_source(dir.path(), "zebra", "[[0,0,0]]");
        write_source(dir.path(), "aron", "[[0,0,0]]");
        fs::write(dir.path().join("notes.txt"), "not a colormap").unwrap();

        let paths = discover_sources(dir.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_stem().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["aron", "zebra"]);
    }

    #[test]
    fn test_discover_missing_dir_is_io_error() {
        let result = discover_sources(Path::new("/nonexistent/badmap-sources"));
        assert!(matches!(result, Err(BadmapError::Io(_))));
    }

    #[test]
    fn test_load_normalizes_255_range() {
        let source = RawSource::new(
            "banana",
            vec![
                vec![0.0, 0.0, 0.0],
                vec![128.0, 128.0, 0.0],
                vec![255.0, 255.0, 0.0],
            ],
        );
        let seq = load(&source).unwrap();
        assert_eq!(seq.sample(0), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(seq.sample(2), [1.0, 1.0, 0.0, 1.0]);
        let mid = seq.sample(1);
        assert!((mid[0] - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn test_load_is_noop_for_unit_range() {
        let rows = vec![vec![0.0, 0.25, 1.0], vec![0.5, 0.5, 0.5]];
        let source = RawSource::new("unit", rows.clone());
        let seq = load(&source).unwrap();
        for (i, row) in rows.iter().enumerate() {
            let sample = seq.sample(i);
            assert_eq!(&sample[..3], row.as_slice());
        }
    }

    #[test]
    fn test_load_rejects_empty_source() {
        let source = RawSource::new("empty", vec![]);
        assert!(matches!(load(&source), Err(BadmapError::Load { .. })));
    }

    #[test]
    fn test_load_rejects_mixed_arity() {
        let source = RawSource::new(
            "mixed",
            vec![vec![0.0, 0.0, 0.0], vec![0.1, 0.2, 0.3, 0.4]],
        );
        assert!(matches!(load(&source), Err(BadmapError::Load { .. })));
    }

    #[test]
    fn test_load_rejects_non_finite_values() {
        let source = RawSource::new("nan", vec![vec![0.0, f64::NAN, 0.0]]);
        assert!(matches!(load(&source), Err(BadmapError::Load { .. })));
    }

    #[test]
    fn test_load_rejects_values_beyond_255() {
        // 300 alongside <=255 values would rescale past 1.0.
        let source = RawSource::new("hot", vec![vec![300.0, 10.0, 0.0]]);
        assert!(matches!(load(&source), Err(BadmapError::Load { .. })));
    }

    #[test]
    fn test_load_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = write_source(dir.path(), "gray", "[[0, 0, 0], [255, 255, 255]]");

        let (name, seq) = load_file(&path).unwrap();
        assert_eq!(name, "gray");
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.sample(1), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_load_file_malformed_json() {
        let dir = tempdir().unwrap();
        let path = write_source(dir.path(), "broken", "[[0, 0, 'oops']]");

        let result = load_file(&path);
        assert!(matches!(result, Err(BadmapError::Load { .. })));
    }
}
