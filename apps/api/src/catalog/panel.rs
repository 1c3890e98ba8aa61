use serde::Serialize;

use super::form::{Commit, EditTarget, FormController, FormError};
use super::store::{EntityStore, StoreError};
use crate::models::{Entity, RecordId};
use crate::notify::NotificationLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Browsing,
    Editing,
}

/// Serializable view of a panel for the admin client.
#[derive(Debug, Clone, Serialize)]
pub struct PanelSnapshot<T> {
    pub mode: ViewMode,
    pub target: EditTarget,
    pub working: T,
    pub dirty: bool,
}

/// List/form admin screen for one record kind: a browse/edit mode flag on
/// top of a [`FormController`].
///
/// "Show list" keeps the draft; it is only replaced by the next Add/Edit or
/// cleared by a successful submit.
#[derive(Debug)]
pub struct AdminPanel<T: Entity> {
    mode: ViewMode,
    form: FormController<T>,
    notifications: NotificationLog,
}

impl<T: Entity> AdminPanel<T> {
    pub fn new(notifications: NotificationLog) -> Self {
        Self {
            mode: ViewMode::Browsing,
            form: FormController::new(),
            notifications,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn form(&self) -> &FormController<T> {
        &self.form
    }

    /// Field edits are only accepted while a form is open.
    pub fn form_mut(&mut self) -> Result<&mut FormController<T>, FormError> {
        match self.mode {
            ViewMode::Editing => Ok(&mut self.form),
            ViewMode::Browsing => Err(FormError::NotEditing),
        }
    }

    pub fn snapshot(&self) -> PanelSnapshot<T> {
        PanelSnapshot {
            mode: self.mode,
            target: self.form.target().clone(),
            working: self.form.working().clone(),
            dirty: self.form.is_dirty(),
        }
    }

    /// "Add": open an empty draft.
    pub fn add(&mut self) {
        self.form.begin_create();
        self.mode = ViewMode::Editing;
    }

    /// "Edit row k": open a copy of `store[index]`.
    pub fn edit(&mut self, store: &EntityStore<T>, index: usize) -> Result<(), FormError> {
        self.form.begin_edit(store, index)?;
        self.mode = ViewMode::Editing;
        Ok(())
    }

    /// "Show list": back to browsing, keeping the draft.
    pub fn show_list(&mut self) {
        self.mode = ViewMode::Browsing;
    }

    /// Reopens the draft kept by [`show_list`](Self::show_list).
    pub fn resume(&mut self) {
        self.mode = ViewMode::Editing;
    }

    /// Removes `store[index]` immediately; there is no confirmation step.
    pub fn delete(&mut self, store: &mut EntityStore<T>, index: usize) -> Result<T, StoreError> {
        let removed = store.remove_at(index)?;
        self.notifications
            .success(format!("{} deleted", T::schema().label));
        Ok(removed)
    }

    /// Submits locally: validate, write to the store, reset, browse.
    pub fn submit(&mut self, store: &mut EntityStore<T>) -> Result<RecordId, FormError> {
        let creating = self.ensure_editing()?;
        let id = self.form.submit(store)?;
        self.mode = ViewMode::Browsing;
        self.notify_saved(creating);
        Ok(id)
    }

    /// First half of a remote submit: validated commit, form untouched.
    pub fn prepare_submit(&self) -> Result<Commit<T>, FormError> {
        self.ensure_editing()?;
        self.form.prepare()
    }

    /// Second half of a remote submit, once the remote call succeeded.
    pub fn complete_submit(&mut self) {
        self.form.finish();
        self.mode = ViewMode::Browsing;
    }

    fn ensure_editing(&self) -> Result<bool, FormError> {
        match self.mode {
            ViewMode::Editing => Ok(*self.form.target() == EditTarget::Create),
            ViewMode::Browsing => Err(FormError::NotEditing),
        }
    }

    fn notify_saved(&self, created: bool) {
        let label = T::schema().label;
        if created {
            self.notifications.success(format!("{label} added successfully"));
        } else {
            self.notifications.success(format!("{label} updated successfully"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, Exam, Institute};
    use crate::notify::NotificationLevel;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            description: format!("{title} body"),
            ..Article::default()
        }
    }

    fn panel() -> (AdminPanel<Article>, NotificationLog) {
        let log = NotificationLog::new();
        (AdminPanel::new(log.clone()), log)
    }

    #[test]
    fn test_starts_browsing() {
        let (panel, _) = panel();
        assert_eq!(panel.mode(), ViewMode::Browsing);
    }

    #[test]
    fn test_add_then_submit_returns_to_browsing() {
        let (mut panel, log) = panel();
        let mut store = EntityStore::with_records([article("A")]);

        panel.add();
        assert_eq!(panel.mode(), ViewMode::Editing);
        let form = panel.form_mut().unwrap();
        form.set_field("title", "CUET results announced").unwrap();
        form.set_field("description", "NTA has published scorecards").unwrap();
        panel.submit(&mut store).unwrap();

        assert_eq!(panel.mode(), ViewMode::Browsing);
        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[1].title, "CUET results announced");
        let pending = log.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].level, NotificationLevel::Success);
        assert_eq!(pending[0].message, "Article added successfully");
    }

    #[test]
    fn test_edit_row_submits_update() {
        let (mut panel, log) = panel();
        let mut store = EntityStore::with_records([article("A"), article("B")]);

        panel.edit(&store, 1).unwrap();
        panel.form_mut().unwrap().set_field("link", "https://example.org/b").unwrap();
        panel.submit(&mut store).unwrap();

        assert_eq!(store.list()[1].link, "https://example.org/b");
        assert_eq!(store.list()[1].title, "B");
        assert_eq!(log.pending()[0].message, "Article updated successfully");
    }

    #[test]
    fn test_failed_validation_stays_editing() {
        let (mut panel, log) = panel();
        let mut store = EntityStore::<Article>::new();
        panel.add();
        let err = panel.submit(&mut store).unwrap_err();
        assert!(matches!(err, FormError::MissingRequired(_)));
        assert_eq!(panel.mode(), ViewMode::Editing);
        assert!(log.pending().is_empty());
    }

    #[test]
    fn test_show_list_keeps_draft_until_resumed() {
        let (mut panel, _) = panel();
        panel.add();
        panel.form_mut().unwrap().set_field("title", "Half written").unwrap();

        panel.show_list();
        assert_eq!(panel.mode(), ViewMode::Browsing);
        assert!(panel.form_mut().is_err());

        panel.resume();
        assert_eq!(panel.form().working().title, "Half written");
        assert!(panel.form().is_dirty());
    }

    #[test]
    fn test_add_replaces_kept_draft() {
        let (mut panel, _) = panel();
        panel.add();
        panel.form_mut().unwrap().set_field("title", "Half written").unwrap();
        panel.show_list();
        panel.add();
        assert_eq!(panel.form().working().title, "");
    }

    #[test]
    fn test_delete_is_immediate() {
        let (mut panel, log) = panel();
        let mut store = EntityStore::with_records([article("A"), article("B")]);

        let removed = panel.delete(&mut store, 0).unwrap();
        assert_eq!(removed.title, "A");
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list()[0].title, "B");
        assert_eq!(log.pending()[0].message, "Article deleted");

        assert!(panel.delete(&mut store, 1).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_submit_while_browsing_is_rejected() {
        let (mut panel, _) = panel();
        let mut store = EntityStore::<Article>::new();
        assert_eq!(panel.submit(&mut store), Err(FormError::NotEditing));
    }

    #[test]
    fn test_remote_halves_leave_form_until_completed() {
        let mut panel = AdminPanel::<Exam>::new(NotificationLog::new());
        panel.add();
        let form = panel.form_mut().unwrap();
        form.set_field("title", "NEET UG").unwrap();
        form.set_field("date", "2025-05-04").unwrap();

        let commit = panel.prepare_submit().unwrap();
        assert!(matches!(commit, Commit::Create(ref e) if e.title == "NEET UG"));
        assert_eq!(panel.mode(), ViewMode::Editing);

        panel.complete_submit();
        assert_eq!(panel.mode(), ViewMode::Browsing);
        assert_eq!(panel.form().working().title, "");
    }

    #[test]
    fn test_institute_add_seeds_one_course_row() {
        let mut panel = AdminPanel::<Institute>::new(NotificationLog::new());
        panel.add();
        assert_eq!(panel.snapshot().working.courses.len(), 1);
    }
}
