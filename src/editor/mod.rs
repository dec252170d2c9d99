mod buffer;
mod clipboard;
mod cursor;
mod editor;
mod file_picker;
mod import;
mod mode;
mod title;

pub use buffer::Buffer;
pub use clipboard::{SystemClipboard, paste};
pub use cursor::Cursor;
pub use editor::{Editor, EditorCommand};
pub use file_picker::FilePicker;
pub use import::read_text_file;
pub use mode::{Focus, Mode};
pub use title::TitleField;
