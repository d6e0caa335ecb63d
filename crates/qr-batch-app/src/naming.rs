//! Artifact naming: `<output_dir>/<identifier>.png`
//!
//! The identifier becomes a single path segment, so anything that could
//! escape the output directory or is not a portable file name is refused.

use std::path::{Path, PathBuf};

use qr_batch_types::{Error, Result};

use crate::constants::ARTIFACT_EXTENSION;

const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Check that `identifier` is usable as a file stem
pub fn validate_identifier(identifier: &str) -> Result<()> {
    let reason = if identifier.is_empty() {
        Some("identifier is empty".to_string())
    } else if identifier == "." || identifier == ".." {
        Some("relative path component".to_string())
    } else if identifier.contains(['/', '\\']) {
        Some("contains a path separator".to_string())
    } else if identifier.chars().any(char::is_control) {
        Some("contains a control character".to_string())
    } else {
        identifier
            .chars()
            .find(|c| RESERVED_CHARS.contains(c))
            .map(|c| format!("contains reserved character '{}'", c))
    };

    match reason {
        Some(reason) => Err(Error::InvalidIdentifier {
            identifier: identifier.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Path of the artifact for `identifier` inside `output_dir`
pub fn artifact_path(output_dir: &Path, identifier: &str) -> Result<PathBuf> {
    validate_identifier(identifier)?;
    Ok(output_dir.join(format!("{}.{}", identifier, ARTIFACT_EXTENSION)))
}
