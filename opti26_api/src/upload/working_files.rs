use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::warn;

/// The files one upload works with. All of them are deleted when this is dropped.
pub struct WorkingFiles {
    spreadsheet: NamedTempFile,
    input: PathBuf,
    output: PathBuf,
}

impl WorkingFiles {
    /// `<results_dir>/<name>_in.json` and `<name>_out.json`, where `<name>` is the
    /// temporary spreadsheet's file stem.
    pub fn new(spreadsheet: NamedTempFile, results_dir: &Path) -> Self {
        let base = spreadsheet
            .path()
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_owned());

        Self {
            input: results_dir.join(format!("{base}_in.json")),
            output: results_dir.join(format!("{base}_out.json")),
            spreadsheet,
        }
    }

    pub fn spreadsheet(&self) -> &Path {
        self.spreadsheet.path()
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl Drop for WorkingFiles {
    fn drop(&mut self) {
        // the spreadsheet is removed by NamedTempFile
        for path in [&self.input, &self.output] {
            if let Err(err) = std::fs::remove_file(path) {
                if err.kind() != ErrorKind::NotFound {
                    warn!(path = %path.display(), "Failed to remove working file: {}", err);
                }
            }
        }
    }
}
