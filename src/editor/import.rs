use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Existing content, a blank line, then the addition. Empty content is
/// simply replaced.
pub fn append_block(existing: &str, addition: &str) -> String {
    if existing.is_empty() {
        addition.to_string()
    } else {
        format!("{}\n\n{}", existing, addition)
    }
}

pub fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}

/// Full contents of a plain-text file. Only `.txt` files that decode as
/// UTF-8 are accepted.
pub async fn read_text_file(path: &Path) -> Result<String> {
    if !is_text_file(path) {
        return Err(Error::UnsupportedFileType(path.to_path_buf()));
    }
    let bytes = tokio::fs::read(path).await?;
    let text = String::from_utf8(bytes).map_err(|_| Error::NotPlainText(path.to_path_buf()))?;
    debug!(path = %path.display(), chars = text.len(), "imported text file");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_block_separates_with_blank_line() {
        assert_eq!(append_block("intro", "more"), "intro\n\nmore");
    }

    #[test]
    fn append_block_replaces_empty_content() {
        assert_eq!(append_block("", "more"), "more");
    }

    #[test]
    fn only_txt_extension_is_text() {
        assert!(is_text_file(Path::new("speech.txt")));
        assert!(is_text_file(Path::new("SPEECH.TXT")));
        assert!(!is_text_file(Path::new("speech.md")));
        assert!(!is_text_file(Path::new("speech")));
    }

    #[tokio::test]
    async fn reads_txt_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speech.txt");
        std::fs::write(&path, "Good evening.\n").unwrap();
        assert_eq!(read_text_file(&path).await.unwrap(), "Good evening.\n");
    }

    #[tokio::test]
    async fn rejects_other_file_types_without_reading() {
        let err = read_text_file(Path::new("/does/not/exist.pdf")).await;
        assert!(matches!(err, Err(Error::UnsupportedFileType(_))));
    }

    #[tokio::test]
    async fn rejects_binary_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            read_text_file(&path).await,
            Err(Error::NotPlainText(_))
        ));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_text_file(&dir.path().join("gone.txt")).await;
        assert!(matches!(err, Err(Error::Io(_))));
    }
}
