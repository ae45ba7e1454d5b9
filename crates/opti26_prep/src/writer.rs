use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use tracing::debug;

use crate::{domain_document::DomainDocument, error::PrepError};

/// Writes the optimizer input JSON to `path`, creating its parent directory.
pub fn write_document(path: &Path, document: &DomainDocument) -> Result<(), PrepError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, document)?;
    writer.flush()?;

    debug!(path = %path.display(), "Wrote optimizer input");
    Ok(())
}

pub fn to_json_string(document: &DomainDocument) -> Result<String, PrepError> {
    Ok(serde_json::to_string(document)?)
}
