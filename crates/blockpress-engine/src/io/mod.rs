use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

use crate::editing::{Document, EditError};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Draft not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed draft {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid draft {path}: {source}")]
    Invalid { path: PathBuf, source: EditError },
    #[error("Invalid drafts directory: {0}")]
    InvalidDraftsDir(String),
}

/// Save a document as a draft file (JSON) under the drafts root.
pub fn save_draft(
    relative_path: &RelativePath,
    drafts_root: &Path,
    doc: &Document,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(drafts_root);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    let json = serde_json::to_string_pretty(doc).map_err(|source| IoError::Malformed {
        path: absolute_path.clone(),
        source,
    })?;
    fs::write(&absolute_path, json).map_err(IoError::Io)
}

/// Load a draft back into a document.
///
/// Drafts are external data: the structural invariants are re-checked and
/// the id counter re-seated above the largest id present, so a loaded
/// document keeps handing out unique ids.
pub fn load_draft(relative_path: &RelativePath, drafts_root: &Path) -> Result<Document, IoError> {
    let absolute_path = relative_path.to_path(drafts_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }

    let content = fs::read_to_string(&absolute_path).map_err(IoError::Io)?;
    let mut doc: Document =
        serde_json::from_str(&content).map_err(|source| IoError::Malformed {
            path: absolute_path.clone(),
            source,
        })?;

    doc.check_invariants().map_err(|source| IoError::Invalid {
        path: absolute_path,
        source,
    })?;
    doc.reseat_counter();
    Ok(doc)
}

/// Scan for draft files in the drafts directory
pub fn list_drafts(drafts_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !drafts_root.exists() {
        return Err(IoError::InvalidDraftsDir(
            "drafts directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(drafts_root, &mut files)?;
    files.sort();
    Ok(files)
}

/// Write published HTML next to the drafts, under the export root.
pub fn write_export(
    relative_path: &RelativePath,
    export_root: &Path,
    html: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(export_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, html).map_err(IoError::Io)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "json"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_drafts_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidDraftsDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
