//! Directory-level pipeline: list reports, build one row per report, write the table.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::SummaryError;
use crate::output::{print_pretty, summary_file_name, write_summary};
use crate::report::load_report;
use crate::summary::SummaryRow;

/// Default input directory, relative to the working directory.
pub const DEFAULT_INPUT_DIR: &str = "../reports";

/// Lists the `.json` files directly inside `dir`, sorted by file name.
pub fn list_report_files(dir: &Path) -> Result<Vec<PathBuf>, SummaryError> {
    let access = |source| SummaryError::InputAccess {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(access)? {
        let entry = entry.map_err(access)?;
        let path = entry.path();

        let is_json = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(".json"));
        if !is_json {
            debug!(path = %path.display(), "Skipping non-JSON entry");
            continue;
        }
        // Follows symlinks; a dangling link is kept and fails on read.
        if path.is_dir() {
            debug!(path = %path.display(), "Skipping directory");
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

/// Builds one summary row per report in `dir`, in listing order.
///
/// The first unreadable or malformed report aborts the whole run.
#[tracing::instrument(skip_all, fields(input_dir = %dir.display()))]
pub fn collect_rows(dir: &Path) -> Result<Vec<SummaryRow>, SummaryError> {
    let files = list_report_files(dir)?;
    info!(reports = files.len(), "Report files found");

    let mut rows = Vec::with_capacity(files.len());
    for path in &files {
        let report = load_report(path)?;
        let row = SummaryRow::from_report(&report);
        print_pretty(&row);
        rows.push(row);
    }

    Ok(rows)
}

/// Summarises every report in `input_dir` into a timestamped CSV inside
/// `output_dir` and returns the path of the written file.
#[tracing::instrument(skip_all, fields(input_dir = %input_dir.display(), output_dir = %output_dir.display()))]
pub fn aggregate<C: Clock>(
    input_dir: &Path,
    output_dir: &Path,
    clock: &C,
) -> Result<PathBuf, SummaryError> {
    let rows = collect_rows(input_dir)?;

    let path = output_dir.join(summary_file_name(clock.now()));
    write_summary(&path, &rows)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_list_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("c.json.bak"), "{}").unwrap();
        fs::write(dir.path().join(".json"), "{}").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let files = list_report_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec![".json", "a.json", "b.json"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_follows_symlinked_reports() {
        let dir = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let target = elsewhere.path().join("report.json");
        fs::write(&target, r#"{"finalUrl": "https://linked.test"}"#).unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("linked.json")).unwrap();
        std::os::unix::fs::symlink(elsewhere.path(), dir.path().join("dir.json")).unwrap();

        let files = list_report_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.json"), dir.path().join("linked.json")]
        );

        let rows = collect_rows(dir.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].url, "https://linked.test");
    }

    #[test]
    fn test_list_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_report_files(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, SummaryError::InputAccess { .. }));
    }

    #[test]
    fn test_collect_rows_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_rows(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_collect_rows_aborts_on_malformed_report() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), r#"{"finalUrl": "https://a.test"}"#).unwrap();
        fs::write(dir.path().join("b.json"), "{ broken").unwrap();

        let err = collect_rows(dir.path()).unwrap_err();
        assert!(matches!(err, SummaryError::Decode { .. }));
    }
}
