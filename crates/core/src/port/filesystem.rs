// Probe Filesystem Port
// Directory preparation, artifact listing and report persistence

use std::io;
use std::path::Path;

/// Handle to an opened report file
///
/// Opened before the compiler runs so an unwritable path fails early;
/// consumed when the report content is known.
pub trait ReportWriter: Send {
    fn write_report(self: Box<Self>, contents: &str) -> io::Result<()>;

    /// Give up on the report; a file created by `open_report` is removed,
    /// a pre-existing one is left untouched
    fn discard(self: Box<Self>) -> io::Result<()>;
}

/// Filesystem operations needed by the probe
pub trait ProbeFilesystem: Send + Sync {
    /// True if `path` exists and is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Create `path` and missing parents; succeeds if it already exists
    fn ensure_dir(&self, path: &Path) -> io::Result<()>;

    /// Immediate entry names of `path`, sorted
    ///
    /// Returns `Ok(None)` when the directory does not exist.
    fn list_entries(&self, path: &Path) -> io::Result<Option<Vec<String>>>;

    /// Open the report file for writing, creating it if needed
    ///
    /// Existing contents are kept until `ReportWriter::write_report`
    /// replaces them.
    fn open_report(&self, path: &Path) -> io::Result<Box<dyn ReportWriter>>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::{BTreeMap, HashMap, HashSet};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    /// In-memory filesystem
    pub struct MockFilesystem {
        dirs: Mutex<BTreeMap<PathBuf, Vec<String>>>,
        reports: Arc<Mutex<HashMap<PathBuf, String>>>,
        unwritable: Mutex<HashSet<PathBuf>>,
        discarded: Arc<Mutex<Vec<PathBuf>>>,
        /// When false, `ensure_dir` succeeds but the directory is gone by listing time
        retain_created: bool,
    }

    impl MockFilesystem {
        pub fn new() -> Self {
            Self {
                dirs: Mutex::new(BTreeMap::new()),
                reports: Arc::new(Mutex::new(HashMap::new())),
                unwritable: Mutex::new(HashSet::new()),
                discarded: Arc::new(Mutex::new(Vec::new())),
                retain_created: true,
            }
        }

        /// Simulates the output directory being deleted after creation
        pub fn with_vanishing_dirs() -> Self {
            Self {
                retain_created: false,
                ..Self::new()
            }
        }

        pub fn add_dir(&self, path: impl Into<PathBuf>, entries: &[&str]) {
            let mut entries: Vec<String> = entries.iter().map(|s| s.to_string()).collect();
            entries.sort();
            self.dirs.lock().unwrap().insert(path.into(), entries);
        }

        pub fn deny_write(&self, path: impl Into<PathBuf>) {
            self.unwritable.lock().unwrap().insert(path.into());
        }

        pub fn report(&self, path: impl AsRef<Path>) -> Option<String> {
            self.reports.lock().unwrap().get(path.as_ref()).cloned()
        }

        pub fn was_discarded(&self, path: impl AsRef<Path>) -> bool {
            self.discarded
                .lock()
                .unwrap()
                .iter()
                .any(|p| p == path.as_ref())
        }

        pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
            self.dirs.lock().unwrap().contains_key(path.as_ref())
        }
    }

    impl Default for MockFilesystem {
        fn default() -> Self {
            Self::new()
        }
    }

    struct MockReportWriter {
        path: PathBuf,
        reports: Arc<Mutex<HashMap<PathBuf, String>>>,
        discarded: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl ReportWriter for MockReportWriter {
        fn write_report(self: Box<Self>, contents: &str) -> io::Result<()> {
            self.reports
                .lock()
                .unwrap()
                .insert(self.path, contents.to_string());
            Ok(())
        }

        fn discard(self: Box<Self>) -> io::Result<()> {
            self.discarded.lock().unwrap().push(self.path);
            Ok(())
        }
    }

    impl ProbeFilesystem for MockFilesystem {
        fn is_dir(&self, path: &Path) -> bool {
            self.dirs.lock().unwrap().contains_key(path)
        }

        fn ensure_dir(&self, path: &Path) -> io::Result<()> {
            if self.retain_created {
                self.dirs
                    .lock()
                    .unwrap()
                    .entry(path.to_path_buf())
                    .or_default();
            }
            Ok(())
        }

        fn list_entries(&self, path: &Path) -> io::Result<Option<Vec<String>>> {
            Ok(self.dirs.lock().unwrap().get(path).cloned())
        }

        fn open_report(&self, path: &Path) -> io::Result<Box<dyn ReportWriter>> {
            if self.unwritable.lock().unwrap().contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "read-only location",
                ));
            }
            if let Some(parent) = path.parent() {
                if !self.dirs.lock().unwrap().contains_key(parent) {
                    return Err(io::Error::new(io::ErrorKind::NotFound, "parent missing"));
                }
            }

            Ok(Box::new(MockReportWriter {
                path: path.to_path_buf(),
                reports: self.reports.clone(),
                discarded: self.discarded.clone(),
            }))
        }
    }
}
