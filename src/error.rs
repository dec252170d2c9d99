use std::path::PathBuf;

/// Everything that can go wrong outside of terminal setup.
///
/// None of these are fatal: the app turns them into a status message and
/// leaves its state as it was before the failed operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Please choose a .txt file ({})", .0.display())]
    UnsupportedFileType(PathBuf),

    #[error("{} is not a plain-text file", .0.display())]
    NotPlainText(PathBuf),

    #[error("Could not paste from the clipboard: {0}")]
    Clipboard(String),

    #[error("Could not paste from the clipboard: it holds no text")]
    ClipboardEmpty,

    #[error("Error attempting to enable full-screen mode: {0}")]
    Fullscreen(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
