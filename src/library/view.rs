use super::{ScriptId, ScriptRepository};

/// Selection, search and delete-confirmation state of the library screen
#[derive(Debug, Default)]
pub struct LibraryView {
    pub search: String,
    pub searching: bool,
    pub selected: usize,
    pending_delete: Option<ScriptId>,
}

impl LibraryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self, repo: &ScriptRepository) {
        if self.selected + 1 < repo.list(&self.search).len() {
            self.selected += 1;
        }
    }

    /// Keep the selection inside the filtered list after it shrinks
    pub fn clamp(&mut self, repo: &ScriptRepository) {
        let len = repo.list(&self.search).len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn selected_id(&self, repo: &ScriptRepository) -> Option<ScriptId> {
        repo.list(&self.search)
            .get(self.selected)
            .map(|s| s.id.clone())
    }

    pub fn start_search(&mut self) {
        self.searching = true;
    }

    pub fn finish_search(&mut self) {
        self.searching = false;
    }

    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        self.selected = 0;
    }

    pub fn pop_search(&mut self) {
        self.search.pop();
        self.selected = 0;
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.searching = false;
        self.selected = 0;
    }

    /// Ask for confirmation before deleting `id`
    pub fn request_delete(&mut self, id: ScriptId) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<&ScriptId> {
        self.pending_delete.as_ref()
    }

    /// The user said yes: delete the pending script, if any
    pub fn confirm_delete(&mut self, repo: &mut ScriptRepository) -> bool {
        let removed = match self.pending_delete.take() {
            Some(id) => repo.delete(&id),
            None => false,
        };
        self.clamp(repo);
        removed
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Script;
    use crate::store::Store;

    fn repo() -> ScriptRepository {
        let mut repo = ScriptRepository::load(Store::in_memory());
        for (id, title, at) in [("a", "Alpha", 1), ("b", "Beta", 2), ("c", "Gamma", 3)] {
            repo.save(Script {
                id: id.to_string(),
                title: title.to_string(),
                content: String::new(),
                created_at: at,
            });
        }
        repo
    }

    #[test]
    fn selection_follows_newest_first_order() {
        let repo = repo();
        let mut view = LibraryView::new();
        assert_eq!(view.selected_id(&repo).as_deref(), Some("c"));
        view.move_down(&repo);
        view.move_down(&repo);
        view.move_down(&repo);
        assert_eq!(view.selected_id(&repo).as_deref(), Some("a"));
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut repo = repo();
        let mut view = LibraryView::new();
        view.request_delete("b".to_string());
        assert_eq!(repo.len(), 3);

        view.cancel_delete();
        assert!(!view.confirm_delete(&mut repo));
        assert_eq!(repo.len(), 3);

        view.request_delete("b".to_string());
        assert!(view.confirm_delete(&mut repo));
        assert!(!repo.contains("b"));
        assert!(view.pending_delete().is_none());
    }

    #[test]
    fn confirming_delete_of_missing_id_changes_nothing() {
        let mut repo = repo();
        let mut view = LibraryView::new();
        view.request_delete("zzz".to_string());
        assert!(!view.confirm_delete(&mut repo));
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn selection_is_clamped_after_delete() {
        let mut repo = repo();
        let mut view = LibraryView::new();
        view.selected = 2;
        view.request_delete("a".to_string());
        view.confirm_delete(&mut repo);
        assert_eq!(view.selected, 1);
    }

    #[test]
    fn search_filters_and_resets_selection() {
        let repo = repo();
        let mut view = LibraryView::new();
        view.selected = 2;
        view.push_search('M');
        assert_eq!(view.selected, 0);
        assert_eq!(view.selected_id(&repo).as_deref(), Some("c"));
        view.pop_search();
        assert_eq!(repo.list(&view.search).len(), 3);
    }
}
