//! Input file reading
//!
//! The export occasionally carries stray non-UTF-8 bytes, so the file is
//! decoded lossily instead of failing the whole run on one bad byte.

use crate::domain::types::PipelineError;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read the input file into a string, replacing invalid UTF-8 sequences.
///
/// An unreadable file is a terminal condition for the pipeline.
pub fn read_input(path: &Path) -> Result<String, PipelineError> {
    match fs::read(path) {
        Ok(bytes) => {
            debug!(path = %path.display(), bytes = bytes.len(), "input_read");
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        Err(source) => Err(PipelineError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_file_contents() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"a;b;c;d\n").unwrap();
        file.flush().unwrap();

        let text = read_input(file.path()).unwrap();
        assert_eq!(text, "a;b;c;d\n");
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_fatal() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"AABB;dev;1;2024\xFF\n").unwrap();
        file.flush().unwrap();

        let text = read_input(file.path()).unwrap();
        assert!(text.contains("AABB;dev;1;2024"));
    }

    #[test]
    fn test_missing_file_is_terminal() {
        let err = read_input(Path::new("/nonexistent/input.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::InputUnreadable { .. }));
    }
}
