//! Output directory handling

use std::path::Path;

use qr_batch_types::Result;

/// Create `path` and any missing parents.
///
/// Returns `true` if the directory had to be created.
pub fn ensure_output_directory(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_nested_directory_once() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("a").join("codigos_qr");

        assert!(ensure_output_directory(&out).unwrap());
        assert!(out.is_dir());
        assert!(!ensure_output_directory(&out).unwrap());
    }

    #[test]
    fn test_fails_when_path_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taken");
        std::fs::write(&file, b"x").unwrap();

        assert!(ensure_output_directory(&file).is_err());
    }
}
