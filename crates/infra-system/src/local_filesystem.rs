// Local filesystem adapter
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use buildprobe_core::port::filesystem::{ProbeFilesystem, ReportWriter};

/// ProbeFilesystem backed by std::fs
pub struct LocalFilesystem;

/// Report opened without truncation; replaced wholesale on write
struct FileReportWriter {
    file: File,
    path: PathBuf,
    /// True when `open_report` created the file
    created: bool,
}

impl ReportWriter for FileReportWriter {
    fn write_report(mut self: Box<Self>, contents: &str) -> io::Result<()> {
        self.file.set_len(0)?;
        self.file.write_all(contents.as_bytes())?;
        self.file.flush()
    }

    fn discard(self: Box<Self>) -> io::Result<()> {
        let FileReportWriter {
            file,
            path,
            created,
        } = *self;
        drop(file);

        if created {
            debug!(path = %path.display(), "Removing unused report file");
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

impl ProbeFilesystem for LocalFilesystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn list_entries(&self, path: &Path) -> io::Result<Option<Vec<String>>> {
        let read_dir = match fs::read_dir(path) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Directory not found");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            entries.push(entry.file_name().to_string_lossy().into_owned());
        }
        entries.sort();

        Ok(Some(entries))
    }

    fn open_report(&self, path: &Path) -> io::Result<Box<dyn ReportWriter>> {
        let (file, created) = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => (file, true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                (OpenOptions::new().write(true).open(path)?, false)
            }
            Err(e) => return Err(e),
        };

        Ok(Box::new(FileReportWriter {
            file,
            path: path.to_path_buf(),
            created,
        }))
    }
}
