use std::path::{Path, PathBuf};

pub const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

pub fn read_folder(folder_path: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder_path)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        } else if path.is_dir() {
            files.extend(read_folder(&path)?);
        }
    }

    files.sort();

    Ok(files)
}

pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// `input` itself when it is a file, otherwise every spreadsheet below it.
pub fn spreadsheet_paths(input: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files = read_folder(input)?;
    files.retain(|path| is_spreadsheet(path));
    Ok(files)
}
