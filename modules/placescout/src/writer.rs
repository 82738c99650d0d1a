use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;

use placescout_common::{PlaceRecord, Result, ScoutError};

/// Write `records` as a 4-space-indented JSON array.
///
/// The array goes to a temp file next to `path` and is renamed into place only
/// after it has been fully written and synced, so a failure never leaves a
/// partial file behind.
pub fn write_records(path: &Path, records: &[PlaceRecord]) -> Result<()> {
    let output_err = |source: std::io::Error| ScoutError::Output {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(output_err)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        let mut serializer =
            Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        records
            .serialize(&mut serializer)
            .map_err(|e| output_err(e.into()))?;
        writer.write_all(b"\n").map_err(output_err)?;
        writer.flush().map_err(output_err)?;
    }
    tmp.as_file().sync_all().map_err(output_err)?;
    tmp.persist(path).map_err(|e| output_err(e.error))?;

    tracing::info!(path = %path.display(), records = records.len(), "Wrote place records");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use placescout_common::OperationalStatus;

    fn record(name: &str) -> PlaceRecord {
        PlaceRecord {
            name: name.to_string(),
            rating: Some(4.2),
            price_score: Some(1),
            place_id: Some(format!("id-{name}")),
            place_url: format!("https://example.test/details?place_id=id-{name}"),
            map_link: "https://www.google.com/maps?q=1,2".to_string(),
            distance: "0.3 km".to_string(),
            status: OperationalStatus::DineIn(true),
            description: None,
            raw_reviews: None,
            summary: Some(String::new()),
        }
    }

    #[test]
    fn writes_four_space_indented_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_records(&path, &[record("Cafe")]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n    {\n        \"Name\": \"Cafe\""), "got:\n{text}");
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_records(&path, &[record("A"), record("B")]).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn missing_directory_is_an_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.json");
        let err = write_records(&path, &[record("A")]).unwrap_err();
        assert!(matches!(err, ScoutError::Output { .. }));
        assert!(!path.exists());
    }
}
