use tracing::{debug, info};

use super::Script;
use crate::store::{SCRIPTS_KEY, Store};

/// The script collection. Sole owner of every `Script`; each mutation is a
/// whole-collection replace that is persisted right away.
pub struct ScriptRepository {
    scripts: Vec<Script>,
    store: Store,
}

impl ScriptRepository {
    pub fn load(store: Store) -> Self {
        let scripts: Vec<Script> = store.get(SCRIPTS_KEY, Vec::new());
        debug!(count = scripts.len(), "loaded scripts");
        Self { scripts, store }
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Script> {
        self.scripts.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Replace the script with the same id in place, or append it
    pub fn save(&mut self, script: Script) {
        match self.scripts.iter_mut().find(|s| s.id == script.id) {
            Some(existing) => {
                info!(id = %script.id, "updated script");
                *existing = script;
            }
            None => {
                info!(id = %script.id, "created script");
                self.scripts.push(script);
            }
        }
        self.persist();
    }

    /// Remove a script. Callers gate this behind a user confirmation.
    /// Returns whether anything was removed; an unknown id is a no-op.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.scripts.len();
        self.scripts.retain(|s| s.id != id);
        let removed = self.scripts.len() != before;
        if removed {
            info!(%id, "deleted script");
            self.persist();
        }
        removed
    }

    /// Scripts whose title contains `term` (case-insensitive), newest first
    pub fn list(&self, term: &str) -> Vec<&Script> {
        let needle = term.to_lowercase();
        let mut found: Vec<&Script> = self
            .scripts
            .iter()
            .filter(|s| s.title.to_lowercase().contains(&needle))
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }

    #[cfg(test)]
    pub fn ids(&self) -> impl Iterator<Item = &super::ScriptId> {
        self.scripts.iter().map(|s| &s.id)
    }

    fn persist(&self) {
        self.store.set(SCRIPTS_KEY, &self.scripts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(id: &str, title: &str, created_at: i64) -> Script {
        Script {
            id: id.to_string(),
            title: title.to_string(),
            content: format!("{} body", title),
            created_at,
        }
    }

    fn repo_with(scripts: &[Script]) -> ScriptRepository {
        let mut repo = ScriptRepository::load(Store::in_memory());
        for s in scripts {
            repo.save(s.clone());
        }
        repo
    }

    #[test]
    fn saved_script_survives_a_reload() {
        let store = Store::in_memory();
        let original = script("1", "My Speech", 1_000);
        {
            let mut repo = ScriptRepository::load(store.clone());
            repo.save(original.clone());
        }
        let reloaded = ScriptRepository::load(store);
        assert_eq!(reloaded.get("1"), Some(&original));
    }

    #[test]
    fn save_with_existing_id_replaces_in_place() {
        let mut repo = repo_with(&[script("1", "A", 1), script("2", "B", 2)]);
        let mut edited = script("1", "A edited", 1);
        edited.content = "new".to_string();
        repo.save(edited.clone());

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.ids().next().map(String::as_str), Some("1"));
        assert_eq!(repo.get("1"), Some(&edited));
    }

    #[test]
    fn save_with_new_id_appends() {
        let mut repo = repo_with(&[script("1", "A", 1)]);
        repo.save(script("2", "B", 2));
        let ids: Vec<&str> = repo.ids().map(String::as_str).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn delete_removes_and_persists() {
        let store = Store::in_memory();
        let mut repo = ScriptRepository::load(store.clone());
        repo.save(script("1", "A", 1));
        assert!(repo.delete("1"));
        assert!(ScriptRepository::load(store).is_empty());
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let mut repo = repo_with(&[script("1", "A", 1)]);
        assert!(!repo.delete("missing"));
        assert!(!repo.delete("missing"));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn list_empty_term_is_everything_newest_first() {
        let repo = repo_with(&[
            script("a", "Old", 10),
            script("b", "Newest", 30),
            script("c", "Middle", 20),
        ]);
        let ids: Vec<&str> = repo.list("").iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn list_matches_substrings_case_insensitively() {
        let repo = repo_with(&[
            script("a", "My Speech", 1),
            script("b", "Wedding toast", 2),
            script("c", "SPECIAL notes", 3),
        ]);
        let ids: Vec<&str> = repo.list("spe").iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
        assert!(repo.list("nothing like it").is_empty());
    }
}
