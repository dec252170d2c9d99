use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::import::append_block;
use super::{Buffer, Cursor, FilePicker, Focus, Mode, TitleField};
use crate::config::expand_home;
use crate::error::{Error, Result};
use crate::library::{Script, ScriptId};

/// What a `:` command asks the app to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    Save,
    Cancel,
    Import(PathBuf),
    Paste,
    Nothing,
}

/// Identity of the script being edited, kept so a save updates it in place
#[derive(Debug, Clone, PartialEq, Eq)]
struct Original {
    id: ScriptId,
    created_at: i64,
}

/// Uncommitted title and body of the script being written or edited
pub struct Editor {
    original: Option<Original>,
    pub title: TitleField,
    pub body: Buffer,
    pub cursor: Cursor,
    pub focus: Focus,
    pub mode: Mode,
    pub command_buffer: String,
    pub scroll_offset: usize,
    pub picker: Option<FilePicker>,
}

impl Editor {
    /// Fresh, empty fields for a new script
    pub fn new() -> Self {
        Self {
            original: None,
            title: TitleField::default(),
            body: Buffer::new(),
            cursor: Cursor::new(),
            focus: Focus::Title,
            mode: Mode::Insert,
            command_buffer: String::new(),
            scroll_offset: 0,
            picker: None,
        }
    }

    /// Fields seeded from an existing script
    pub fn edit(script: &Script) -> Self {
        Self {
            original: Some(Original {
                id: script.id.clone(),
                created_at: script.created_at,
            }),
            title: TitleField::new(&script.title),
            body: Buffer::from_text(&script.content),
            cursor: Cursor::new(),
            focus: Focus::Body,
            mode: Mode::Normal,
            command_buffer: String::new(),
            scroll_offset: 0,
            picker: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.original.is_none()
    }

    /// Build the script to store. Rejected when the title is blank.
    pub fn save(&self) -> Result<Script> {
        self.save_at(Utc::now())
    }

    pub fn save_at(&self, now: DateTime<Utc>) -> Result<Script> {
        let title = self.title.text().trim();
        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }
        let content = self.body.text();
        Ok(match &self.original {
            Some(original) => Script {
                id: original.id.clone(),
                title: title.to_string(),
                content,
                created_at: original.created_at,
            },
            None => Script::create_at(now, title, content),
        })
    }

    /// Adjust scroll offset to keep the body cursor visible
    pub fn adjust_scroll(&mut self, viewport_height: usize) {
        if self.cursor.line < self.scroll_offset {
            self.scroll_offset = self.cursor.line;
        }
        if viewport_height > 0 && self.cursor.line >= self.scroll_offset + viewport_height {
            self.scroll_offset = self.cursor.line - viewport_height + 1;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Title => Focus::Body,
            Focus::Body => Focus::Title,
        };
        self.clamp_cursor_col();
    }

    // Mode changes

    pub fn enter_insert_mode(&mut self) {
        self.mode = Mode::Insert;
    }

    /// Append after cursor (a)
    pub fn append(&mut self) {
        match self.focus {
            Focus::Title => self.title.move_right(),
            Focus::Body => {
                let line_len = self.body.line_len(self.cursor.line);
                self.cursor.move_right(line_len);
            }
        }
        self.enter_insert_mode();
    }

    /// Append at end of line (A)
    pub fn append_end_of_line(&mut self) {
        match self.focus {
            Focus::Title => self.title.move_end(),
            Focus::Body => self.cursor.col = self.body.line_len(self.cursor.line),
        }
        self.enter_insert_mode();
    }

    /// Open line below (o)
    pub fn open_line_below(&mut self) {
        self.focus = Focus::Body;
        self.cursor.col = self.body.line_len(self.cursor.line);
        self.insert_newline();
        self.enter_insert_mode();
    }

    pub fn enter_normal_mode(&mut self) {
        self.mode = Mode::Normal;
        self.command_buffer.clear();
        self.clamp_cursor_col();
    }

    pub fn enter_command_mode(&mut self) {
        self.mode = Mode::Command;
        self.command_buffer.clear();
    }

    pub fn open_picker(&mut self) {
        self.picker = Some(FilePicker::in_current_dir());
        self.mode = Mode::FilePicker;
    }

    pub fn close_picker(&mut self) {
        self.picker = None;
        self.mode = Mode::Normal;
    }

    /// Choose the selected picker entry; a file closes the picker and is
    /// handed back for import
    pub fn pick_selected(&mut self) -> Option<PathBuf> {
        let path = self.picker.as_mut()?.select()?;
        self.close_picker();
        Some(path)
    }

    pub fn execute_command(&mut self) -> EditorCommand {
        let cmd = self.command_buffer.trim().to_string();
        self.command_buffer.clear();
        self.mode = Mode::Normal;

        let (name, arg) = match cmd.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (cmd.as_str(), ""),
        };

        match name {
            "w" | "write" | "wq" | "x" => EditorCommand::Save,
            "q" | "quit" | "q!" => EditorCommand::Cancel,
            "paste" | "p" => EditorCommand::Paste,
            "import" | "e" | "r" if arg.is_empty() => {
                self.open_picker();
                EditorCommand::Nothing
            }
            "import" | "e" | "r" => EditorCommand::Import(expand_home(arg)),
            _ => EditorCommand::Nothing,
        }
    }

    // Movement

    pub fn move_left(&mut self) {
        match self.focus {
            Focus::Title => self.title.move_left(),
            Focus::Body => self.cursor.move_left(),
        }
    }

    pub fn move_right(&mut self) {
        match self.focus {
            Focus::Title => self.title.move_right(),
            Focus::Body => {
                let line_len = self.body.line_len(self.cursor.line);
                self.cursor.move_right(line_len);
            }
        }
    }

    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Title => {}
            Focus::Body if self.cursor.line == 0 => self.focus = Focus::Title,
            Focus::Body => {
                self.cursor.move_up();
                self.clamp_cursor_col();
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Title => self.focus = Focus::Body,
            Focus::Body => {
                self.cursor.move_down(self.body.line_count());
                self.clamp_cursor_col();
            }
        }
    }

    pub fn move_to_line_start(&mut self) {
        match self.focus {
            Focus::Title => self.title.move_home(),
            Focus::Body => self.cursor.col = 0,
        }
    }

    pub fn move_to_line_end(&mut self) {
        match self.focus {
            Focus::Title => self.title.move_end(),
            Focus::Body => self.cursor.col = self.body.line_len(self.cursor.line),
        }
    }

    pub fn move_to_first_line(&mut self) {
        self.cursor.line = 0;
        self.clamp_cursor_col();
    }

    pub fn move_to_last_line(&mut self) {
        self.cursor.line = self.body.line_count().saturating_sub(1);
        self.clamp_cursor_col();
    }

    fn clamp_cursor_col(&mut self) {
        let line_len = self.body.line_len(self.cursor.line);
        if self.cursor.col > line_len {
            self.cursor.col = line_len;
        }
    }

    // Text editing

    pub fn insert_char(&mut self, ch: char) {
        match self.focus {
            Focus::Title => self.title.insert_char(ch),
            Focus::Body => {
                self.body.insert_char(self.cursor.line, self.cursor.col, ch);
                self.cursor.col += 1;
            }
        }
    }

    /// Insert typed or bracket-pasted text at the caret
    pub fn insert_text(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        match self.focus {
            Focus::Title => self.title.insert_str(&text),
            Focus::Body => {
                let (line, col) = self.body.insert_str(self.cursor.line, self.cursor.col, &text);
                self.cursor = Cursor::at(line, col);
            }
        }
    }

    pub fn delete_char_backward(&mut self) {
        match self.focus {
            Focus::Title => self.title.delete_backward(),
            Focus::Body if self.cursor.col > 0 => {
                self.body.delete_char_backward(self.cursor.line, self.cursor.col);
                self.cursor.col -= 1;
            }
            Focus::Body if self.cursor.line > 0 => {
                let prev_line_len = self.body.line_len(self.cursor.line - 1);
                self.body.delete_char_backward(self.cursor.line, 0);
                self.cursor.line -= 1;
                self.cursor.col = prev_line_len;
            }
            Focus::Body => {}
        }
    }

    /// Delete under the caret (x)
    pub fn delete_char_forward(&mut self) {
        match self.focus {
            Focus::Title => {
                let len = self.title.text().chars().count();
                if self.title.cursor() < len {
                    self.title.move_right();
                    self.title.delete_backward();
                }
            }
            Focus::Body => {
                self.body.delete_char(self.cursor.line, self.cursor.col);
                self.clamp_cursor_col();
            }
        }
    }

    pub fn insert_newline(&mut self) {
        match self.focus {
            // Enter on the title moves on to the body
            Focus::Title => self.focus = Focus::Body,
            Focus::Body => {
                self.body.insert_newline(self.cursor.line, self.cursor.col);
                self.cursor.line += 1;
                self.cursor.col = 0;
            }
        }
    }

    /// Add imported or pasted text after the existing body, separated by a
    /// blank line, and put the caret at the end
    pub fn append_block(&mut self, addition: &str) {
        let content = append_block(&self.body.text(), addition);
        self.body.set_text(&content);
        let (line, col) = self.body.end();
        self.cursor = Cursor::at(line, col);
        self.focus = Focus::Body;
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
