use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::import::is_text_file;

#[derive(Debug, Clone)]
pub struct PickerEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub is_text: bool,
    pub depth: usize,
}

/// Directory tree for choosing a text file to import
pub struct FilePicker {
    pub entries: Vec<PickerEntry>,
    pub selected: usize,
    pub root_dir: PathBuf,
    expanded: HashSet<PathBuf>,
}

impl FilePicker {
    pub fn new(root_dir: PathBuf) -> Self {
        let mut picker = Self {
            entries: Vec::new(),
            selected: 0,
            root_dir,
            expanded: HashSet::new(),
        };
        picker.refresh();
        picker
    }

    /// Picker rooted at the working directory
    pub fn in_current_dir() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    pub fn refresh(&mut self) {
        self.entries.clear();
        let root = self.root_dir.clone();
        self.build_tree(&root, 0);
        if self.selected >= self.entries.len() {
            self.selected = self.entries.len().saturating_sub(1);
        }
    }

    fn build_tree(&mut self, dir: &Path, depth: usize) {
        let Ok(read_dir) = fs::read_dir(dir) else {
            return;
        };

        let mut entries: Vec<PickerEntry> = read_dir
            .filter_map(|e| e.ok())
            .map(|e| {
                let path = e.path();
                let is_dir = path.is_dir();
                PickerEntry {
                    name: e.file_name().to_string_lossy().to_string(),
                    is_text: !is_dir && is_text_file(&path),
                    path,
                    is_dir,
                    depth,
                }
            })
            .filter(|e| !e.name.starts_with('.'))
            .collect();

        // Directories first, then alphabetically
        entries.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        for entry in entries {
            let recurse = entry.is_dir && self.expanded.contains(&entry.path);
            let path = entry.path.clone();
            self.entries.push(entry);
            if recurse {
                self.build_tree(&path, depth + 1);
            }
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    /// Toggle a directory open or closed, or return the chosen file
    pub fn select(&mut self) -> Option<PathBuf> {
        let entry = self.entries.get(self.selected).cloned()?;
        if !entry.is_dir {
            return Some(entry.path);
        }
        if !self.expanded.remove(&entry.path) {
            self.expanded.insert(entry.path);
        }
        self.refresh();
        None
    }

    pub fn is_expanded(&self, path: &Path) -> bool {
        self.expanded.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("drafts").join("old.txt"), "old").unwrap();
        fs::write(dir.path().join("speech.txt"), "hi").unwrap();
        fs::write(dir.path().join("notes.md"), "# hi").unwrap();
        fs::write(dir.path().join(".hidden.txt"), "").unwrap();
        dir
    }

    fn names(picker: &FilePicker) -> Vec<&str> {
        picker.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn lists_directories_first_and_skips_hidden() {
        let dir = fixture();
        let picker = FilePicker::new(dir.path().to_path_buf());
        assert_eq!(names(&picker), vec!["drafts", "notes.md", "speech.txt"]);
        assert!(picker.entries[2].is_text);
        assert!(!picker.entries[1].is_text);
    }

    #[test]
    fn selecting_a_directory_expands_it() {
        let dir = fixture();
        let mut picker = FilePicker::new(dir.path().to_path_buf());
        assert_eq!(picker.select(), None);
        assert_eq!(names(&picker), vec!["drafts", "old.txt", "notes.md", "speech.txt"]);
        assert_eq!(picker.entries[1].depth, 1);

        assert_eq!(picker.select(), None);
        assert_eq!(picker.entries.len(), 3);
    }

    #[test]
    fn selecting_a_file_returns_its_path() {
        let dir = fixture();
        let mut picker = FilePicker::new(dir.path().to_path_buf());
        picker.move_down();
        picker.move_down();
        assert_eq!(picker.select(), Some(dir.path().join("speech.txt")));
    }
}
