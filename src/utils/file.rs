//! File reading helpers for ingestion.

use std::fs;
use std::path::Path;

use crate::error::LoadError;

/// Read a file's full contents as UTF-8 text, refusing oversized files.
pub fn read_file_content(path: &Path, max_size: u64) -> Result<String, LoadError> {
    let metadata = fs::metadata(path)?;

    if metadata.len() > max_size {
        return Err(LoadError::TooLarge {
            size: metadata.len(),
            max_size,
        });
    }

    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_file_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "hello").unwrap();
        let content = read_file_content(file.path(), 1024).unwrap();
        assert_eq!(content, "hello");
    }

    #[test]
    fn test_read_rejects_oversized_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "0123456789").unwrap();
        let err = read_file_content(file.path(), 5).unwrap_err();
        assert!(matches!(err, LoadError::TooLarge { size: 10, .. }));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = read_file_content(Path::new("/nonexistent/file.txt"), 1024).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_read_rejects_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0xfd]).unwrap();
        let err = read_file_content(file.path(), 1024).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
