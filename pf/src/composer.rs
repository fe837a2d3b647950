//! The prompt composer
//!
//! `Composer` is the single owner of everything the user edits: the form, the
//! saved prompt collection, the preferences record and the transient "copied"
//! flag. Every mutation goes through a named operation here; the CLI and the
//! TUI are thin callers.
//!
//! Persistence is write-through: each operation that changes the saved
//! collection or the preferences immediately rewrites the stored value.
//! Nothing in here is fatal. Clipboard and store failures are logged and leave
//! the in-memory state as it was.

use std::path::{Path, PathBuf};

use eyre::Result;
use keystore::KeyValueStore;
use tracing::{debug, error, info};

use crate::clipboard::Clipboard;
use crate::dialogs::{NamePrompt, Notifier};
use crate::export;
use crate::library::{self, IdGenerator, Preferences, PromptId, SavedPrompt};
use crate::prompt::{Field, FormState, Template};

/// Notice shown after the preferences have been saved
pub const PREFERENCES_SAVED_NOTICE: &str = "Preferences saved! These will be your defaults for new prompts.";

pub struct Composer {
    form: FormState,
    saved: Vec<SavedPrompt>,
    preferences: Preferences,
    copied: bool,
    ids: IdGenerator,
    store: Box<dyn KeyValueStore>,
    clipboard: Box<dyn Clipboard>,
}

impl std::fmt::Debug for Composer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composer")
            .field("form", &self.form)
            .field("saved", &self.saved.len())
            .field("preferences", &self.preferences)
            .field("copied", &self.copied)
            .finish_non_exhaustive()
    }
}

impl Composer {
    /// Create a composer with an empty form and nothing loaded from the store
    pub fn new(store: Box<dyn KeyValueStore>, clipboard: Box<dyn Clipboard>) -> Self {
        debug!("Composer::new: called");
        Self {
            form: FormState::default(),
            saved: Vec::new(),
            preferences: Preferences::default(),
            copied: false,
            ids: IdGenerator::default(),
            store,
            clipboard,
        }
    }

    /// Startup: load saved prompts and preferences, then pre-fill the form
    pub fn hydrate(store: Box<dyn KeyValueStore>, clipboard: Box<dyn Clipboard>) -> Self {
        debug!("Composer::hydrate: called");
        let mut composer = Self::new(store, clipboard);
        composer.saved = library::load_saved(composer.store.as_ref());
        composer.ids = IdGenerator::seeded(&composer.saved);
        composer.preferences = library::load_preferences(composer.store.as_ref());
        composer.preferences.apply_to(&mut composer.form);
        info!(
            saved = composer.saved.len(),
            has_preferences = !composer.preferences.is_empty(),
            "Composer hydrated"
        );
        composer
    }

    // === Form ===

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Replace one field; any string is accepted
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Rendered prompt as shown in the preview (untrimmed)
    pub fn preview(&self) -> String {
        self.form.render()
    }

    /// Rendered prompt with surrounding whitespace trimmed
    pub fn full_prompt(&self) -> String {
        self.form.render_trimmed()
    }

    pub fn is_complete(&self) -> bool {
        self.form.is_complete()
    }

    pub fn word_count(&self) -> usize {
        self.form.word_count()
    }

    /// Whether copy, save and export have anything to work with
    ///
    /// This is the one gate for all three actions: at least one section must
    /// have non-whitespace text (the section labels do not count).
    /// Completeness is informational only.
    pub fn has_content(&self) -> bool {
        !self.form.is_empty()
    }

    // === Clipboard ===

    /// Copy the trimmed prompt to the clipboard
    ///
    /// Returns true on success, in which case the copied flag is set and the
    /// caller is expected to schedule `reset_copied`. On failure the error is
    /// logged and nothing changes.
    pub fn copy_to_clipboard(&mut self) -> bool {
        debug!("Composer::copy_to_clipboard: called");
        let text = self.full_prompt();
        match self.clipboard.write_text(&text) {
            Ok(()) => {
                info!(len = text.len(), "Copied prompt to clipboard");
                self.copied = true;
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to copy text");
                false
            }
        }
    }

    pub fn copied(&self) -> bool {
        self.copied
    }

    /// Clear the copied flag (the deferred half of `copy_to_clipboard`)
    pub fn reset_copied(&mut self) {
        debug!("Composer::reset_copied: called");
        self.copied = false;
    }

    // === Saved prompts ===

    pub fn saved(&self) -> &[SavedPrompt] {
        &self.saved
    }

    pub fn find_saved(&self, id: PromptId) -> Option<&SavedPrompt> {
        self.saved.iter().find(|p| p.id == id)
    }

    /// Save the current form under a name supplied by `namer`
    ///
    /// No-op (returns `None`) when the name is cancelled or blank, or when the
    /// prompt has no content. Otherwise appends the snapshot, persists the
    /// whole collection and returns the new id.
    pub fn save_prompt(&mut self, namer: &mut dyn NamePrompt) -> Option<PromptId> {
        debug!("Composer::save_prompt: called");
        let Some(name) = namer.ask_name() else {
            debug!("Composer::save_prompt: name prompt cancelled");
            return None;
        };
        if name.trim().is_empty() {
            debug!("Composer::save_prompt: blank name");
            return None;
        }
        if !self.has_content() {
            debug!("Composer::save_prompt: blank prompt");
            return None;
        }

        let id = self.ids.next();
        let prompt = SavedPrompt::new(id, name, self.form.clone(), chrono::Utc::now());
        info!(id, name = %prompt.name, "Saved prompt");
        self.saved.push(prompt);
        library::store_saved(self.store.as_ref(), &self.saved);
        Some(id)
    }

    /// Replace the whole form with a saved prompt's fields
    ///
    /// Returns false (and changes nothing) for an unknown id.
    pub fn load_saved(&mut self, id: PromptId) -> bool {
        debug!(id, "Composer::load_saved: called");
        match self.find_saved(id) {
            Some(prompt) => {
                self.form = prompt.form.clone();
                info!(id, "Loaded saved prompt");
                true
            }
            None => {
                debug!(id, "Composer::load_saved: unknown id");
                false
            }
        }
    }

    /// Remove the saved prompt with this id and persist the rest
    ///
    /// Returns false for an unknown id; the stored collection is still rewritten.
    pub fn delete_saved(&mut self, id: PromptId) -> bool {
        debug!(id, "Composer::delete_saved: called");
        let before = self.saved.len();
        self.saved.retain(|p| p.id != id);
        let removed = self.saved.len() != before;
        library::store_saved(self.store.as_ref(), &self.saved);
        if removed {
            info!(id, "Deleted saved prompt");
        }
        removed
    }

    // === Templates ===

    /// Replace the whole form with a template's fields
    pub fn load_template(&mut self, template: &Template) {
        debug!(name = template.name, "Composer::load_template: called");
        self.form = template.form();
    }

    // === Export ===

    /// Export the current prompt into `dir`
    pub fn export_to(&self, dir: &Path) -> Result<PathBuf> {
        debug!(?dir, "Composer::export_to: called");
        export::write_export(&self.form, dir)
    }

    // === Preferences ===

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Remember the current role and format as defaults for future sessions
    ///
    /// The live form is not touched.
    pub fn save_preferences(&mut self, notifier: &mut dyn Notifier) {
        debug!("Composer::save_preferences: called");
        let prefs = Preferences::new(self.form.role.clone(), self.form.format.clone());
        library::store_preferences(self.store.as_ref(), &prefs);
        info!(?prefs, "Saved preferences");
        self.preferences = prefs;
        notifier.notify(PREFERENCES_SAVED_NOTICE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::library::{PREFERENCES_KEY, SAVED_KEY};
    use crate::prompt::TEMPLATES;
    use keystore::MemoryStore;

    fn composer() -> (Composer, MemoryStore, MemoryClipboard) {
        let store = MemoryStore::new();
        let clipboard = MemoryClipboard::new();
        let composer = Composer::hydrate(Box::new(store.clone()), Box::new(clipboard.clone()));
        (composer, store, clipboard)
    }

    fn fill(composer: &mut Composer) {
        composer.set_field(Field::Role, "Data Analyst");
        composer.set_field(Field::Task, "Summarize sales");
        composer.set_field(Field::Context, "Q3 report");
        composer.set_field(Field::Reasoning, "step by step");
        composer.set_field(Field::Format, "bullet points");
    }

    fn named(name: &str) -> impl NamePrompt + use<> {
        let name = name.to_string();
        move || Some(name.clone())
    }

    #[test]
    fn test_full_prompt_scenario() {
        let (mut composer, _, _) = composer();
        fill(&mut composer);
        assert_eq!(
            composer.full_prompt(),
            "Role: Data Analyst\n\nTask: Summarize sales\n\nContext: Q3 report\n\nReasoning: step by step\n\nOutput Format: bullet points"
        );
        assert!(composer.is_complete());
    }

    #[test]
    fn test_empty_composer() {
        let (composer, _, _) = composer();
        assert_eq!(composer.form(), &FormState::default());
        assert!(!composer.is_complete());
        assert_eq!(composer.word_count(), 6);
        assert!(composer.saved().is_empty());
    }

    #[test]
    fn test_copy_sets_flag_and_writes_trimmed_prompt() {
        let (mut composer, _, clipboard) = composer();
        fill(&mut composer);

        assert!(composer.copy_to_clipboard());
        assert!(composer.copied());
        assert_eq!(clipboard.last(), Some(composer.full_prompt()));

        composer.reset_copied();
        assert!(!composer.copied());
    }

    #[test]
    fn test_copy_failure_changes_nothing() {
        let mut composer = Composer::new(Box::new(MemoryStore::new()), Box::new(MemoryClipboard::failing()));
        fill(&mut composer);
        let before = composer.form().clone();

        assert!(!composer.copy_to_clipboard());
        assert!(!composer.copied());
        assert_eq!(composer.form(), &before);
    }

    #[test]
    fn test_save_appends_and_persists() {
        let (mut composer, store, _) = composer();
        fill(&mut composer);

        let id = composer.save_prompt(&mut named("My Prompt")).unwrap();
        assert_eq!(composer.saved().len(), 1);
        let saved = &composer.saved()[0];
        assert_eq!(saved.id, id);
        assert_eq!(saved.name, "My Prompt");
        assert_eq!(&saved.form, composer.form());

        let raw = store.get(SAVED_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let arr = json.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["name"], "My Prompt");
        assert_eq!(arr[0]["task"], "Summarize sales");
    }

    #[test]
    fn test_save_noops() {
        let (mut composer, store, _) = composer();
        fill(&mut composer);

        assert!(composer.save_prompt(&mut || None::<String>).is_none());
        assert!(composer.save_prompt(&mut named("")).is_none());
        assert!(composer.save_prompt(&mut named("   ")).is_none());
        assert!(composer.saved().is_empty());
        assert!(store.get(SAVED_KEY).unwrap().is_none());
    }

    #[test]
    fn test_save_rejects_empty_form() {
        let (mut composer, store, _) = composer();
        composer.set_field(Field::Task, "   ");
        assert!(!composer.has_content());
        assert!(composer.save_prompt(&mut named("Empty")).is_none());
        assert!(store.get(SAVED_KEY).unwrap().is_none());
    }

    #[test]
    fn test_save_does_not_require_complete_form() {
        let (mut composer, _, _) = composer();
        composer.set_field(Field::Task, "Only a task");
        assert!(!composer.is_complete());
        assert!(composer.has_content());
        assert!(composer.save_prompt(&mut named("Partial")).is_some());
    }

    #[test]
    fn test_rapid_saves_get_unique_ids() {
        let (mut composer, _, _) = composer();
        fill(&mut composer);
        let ids: Vec<_> = (0..5)
            .map(|i| composer.save_prompt(&mut named(&format!("p{}", i))).unwrap())
            .collect();
        for pair in ids.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (mut composer, _, _) = composer();
        fill(&mut composer);
        let snapshot = composer.form().clone();
        let id = composer.save_prompt(&mut named("Sales")).unwrap();

        composer.load_template(&TEMPLATES[0]);
        assert_ne!(composer.form(), &snapshot);

        assert!(composer.load_saved(id));
        assert_eq!(composer.form(), &snapshot);
    }

    #[test]
    fn test_load_unknown_id_is_noop() {
        let (mut composer, _, _) = composer();
        fill(&mut composer);
        let before = composer.form().clone();
        assert!(!composer.load_saved(42));
        assert_eq!(composer.form(), &before);
    }

    #[test]
    fn test_delete_removes_only_matching_entry() {
        let (mut composer, store, _) = composer();
        fill(&mut composer);
        let first = composer.save_prompt(&mut named("first")).unwrap();
        composer.set_field(Field::Task, "Second task");
        let second = composer.save_prompt(&mut named("second")).unwrap();
        let kept = composer.find_saved(second).unwrap().clone();

        assert!(composer.delete_saved(first));
        assert_eq!(composer.saved(), std::slice::from_ref(&kept));

        let persisted = library::load_saved(&store);
        assert_eq!(persisted, vec![kept]);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let (mut composer, _, _) = composer();
        fill(&mut composer);
        composer.save_prompt(&mut named("only")).unwrap();
        let before = composer.saved().to_vec();

        assert!(!composer.delete_saved(-1));
        assert_eq!(composer.saved(), before.as_slice());
    }

    #[test]
    fn test_load_template_overwrites_and_is_idempotent() {
        let (mut composer, _, _) = composer();
        composer.set_field(Field::Context, "will be replaced");

        composer.load_template(&TEMPLATES[1]);
        let once = composer.form().clone();
        composer.load_template(&TEMPLATES[1]);

        assert_eq!(composer.form(), &once);
        assert_eq!(once, TEMPLATES[1].form());
    }

    #[test]
    fn test_hydrate_applies_default_role_only() {
        let store = MemoryStore::with_entries([(PREFERENCES_KEY, r#"{"defaultRole":"X"}"#)]);
        let composer = Composer::hydrate(Box::new(store), Box::new(MemoryClipboard::new()));

        assert_eq!(composer.form().role, "X");
        assert_eq!(composer.form().format, "");
        assert_eq!(composer.preferences(), &Preferences::new("X", ""));
    }

    #[test]
    fn test_hydrate_tolerates_garbage() {
        let store = MemoryStore::with_entries([(SAVED_KEY, "{{{"), (PREFERENCES_KEY, "nope")]);
        let composer = Composer::hydrate(Box::new(store), Box::new(MemoryClipboard::new()));
        assert!(composer.saved().is_empty());
        assert_eq!(composer.form(), &FormState::default());
    }

    #[test]
    fn test_save_preferences_persists_and_notifies() {
        let (mut composer, store, _) = composer();
        composer.set_field(Field::Role, "Legal Expert");
        composer.set_field(Field::Format, "Memo");
        composer.set_field(Field::Task, "Review");

        let mut notices: Vec<String> = Vec::new();
        composer.save_preferences(&mut notices);

        assert_eq!(notices, vec![PREFERENCES_SAVED_NOTICE]);
        assert_eq!(composer.preferences(), &Preferences::new("Legal Expert", "Memo"));
        assert_eq!(library::load_preferences(&store), Preferences::new("Legal Expert", "Memo"));
        // The live form is untouched
        assert_eq!(composer.form().task, "Review");

        // Next session pre-fills from them
        let next = Composer::hydrate(Box::new(store), Box::new(MemoryClipboard::new()));
        assert_eq!(next.form().role, "Legal Expert");
        assert_eq!(next.form().format, "Memo");
        assert_eq!(next.form().task, "");
    }

    #[test]
    fn test_hydrate_keeps_saved_ids_unique() {
        let (mut composer, store, _) = composer();
        fill(&mut composer);
        let first = composer.save_prompt(&mut named("a")).unwrap();

        let mut next = Composer::hydrate(Box::new(store), Box::new(MemoryClipboard::new()));
        next.set_field(Field::Task, "x");
        let second = next.save_prompt(&mut named("b")).unwrap();
        assert!(second > first);
        assert_eq!(next.saved().len(), 2);
    }

    #[test]
    fn test_export_to() {
        let temp = tempfile::TempDir::new().unwrap();
        let (mut composer, _, _) = composer();
        fill(&mut composer);

        let path = composer.export_to(temp.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "Data Analyst.txt");
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("# Data Analyst Prompt\n\nRole: Data Analyst"));
    }
}
