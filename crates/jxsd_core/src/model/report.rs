//! Invocation report produced after a generator run.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

/// Outcome of a completed generator invocation.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationReport {
    /// Exit code of the generator process.
    pub exit_code: i32,
    /// The command line that was executed, for diagnostics.
    pub command: String,
    /// Schema and episode files found under the output directory.
    pub generated_files: Vec<PathBuf>,
    /// Wall-clock start of the invocation, RFC 3339.
    pub started_at: String,
    /// Log file the run was written to, if a logger was attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
}

impl InvocationReport {
    pub fn file_count(&self) -> usize {
        self.generated_files.len()
    }
}

/// Collects generated schema artifacts under `output_dir`.
///
/// Walks the directory recursively and returns every `.xsd` and
/// `.episode` file, sorted by path. Collection is best-effort:
/// unreadable entries are skipped rather than failing the run that
/// already succeeded.
pub fn collect_generated_files(output_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(output_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("xsd") | Some("episode")
            )
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn collects_xsd_files_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("zeta.xsd"), "<xs:schema/>").unwrap();
        fs::write(dir.path().join("alpha.xsd"), "<xs:schema/>").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a schema").unwrap();

        let files = collect_generated_files(dir.path());
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("alpha.xsd"));
        assert!(files[1].ends_with("zeta.xsd"));
    }

    #[test]
    fn collects_episode_files_in_subdirectories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("META-INF");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("sun-jaxb.episode"), "<bindings/>").unwrap();

        let files = collect_generated_files(dir.path());
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("sun-jaxb.episode"));
    }

    #[test]
    fn missing_directory_yields_no_files() {
        let dir = TempDir::new().unwrap();
        let files = collect_generated_files(&dir.path().join("does-not-exist"));
        assert!(files.is_empty());
    }
}
