//! The edit session controller: the create-vs-update mode and target id
//! governing what the shared domain form commits to.

use crate::domain::Domain;
use crate::error::{Result, ShoeboxError};
use crate::model::{Record, RecordId};
use crate::store::records::RecordStore;
use crate::store::BlobStore;

/// Mode of the shared form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Commit creates a new record.
    Idle,
    /// Commit updates the targeted record.
    Editing(RecordId),
}

/// Per-domain edit session.
///
/// Owns the form draft and the mode explicitly — there is no ambient
/// "currently editing" global. At most one record per collection is being
/// edited at any time, and editing is non-destructive for every domain:
/// the store is only touched on [`EditSession::commit`], so a cancelled
/// edit never loses the original record.
pub struct EditSession<D: Domain> {
    mode: EditMode,
    draft: D::Draft,
}

impl<D: Domain> Default for EditSession<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Domain> EditSession<D> {
    pub fn new() -> Self {
        Self {
            mode: EditMode::Idle,
            draft: D::Draft::default(),
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditMode::Editing(_))
    }

    /// Current form draft, for the renderer to display.
    pub fn draft(&self) -> &D::Draft {
        &self.draft
    }

    /// Switch to create mode, resetting the form to domain defaults.
    pub fn begin_create(&mut self) {
        self.mode = EditMode::Idle;
        self.draft = D::Draft::default();
    }

    /// Enter edit mode for `id`, hydrating the form draft from the stored
    /// record. On a missing id the session keeps its previous mode and
    /// draft, and the renderer surfaces the notice.
    pub fn begin_edit<B: BlobStore>(
        &mut self,
        store: &RecordStore<D, B>,
        id: RecordId,
    ) -> Result<&D::Draft> {
        let record = store.get(id).ok_or(ShoeboxError::NotFound(id))?;
        self.draft = D::draft(&record.fields);
        self.mode = EditMode::Editing(id);
        Ok(&self.draft)
    }

    /// Commit the submitted form values: update when editing, create when
    /// idle. On success the session returns to Idle with a cleared form; on
    /// failure mode and draft are kept so the form can be corrected and
    /// resubmitted.
    pub fn commit<B: BlobStore>(
        &mut self,
        store: &mut RecordStore<D, B>,
        draft: &D::Draft,
    ) -> Result<Record<D::Fields>> {
        let record = match self.mode {
            EditMode::Editing(id) => store.update(id, draft)?,
            EditMode::Idle => store.create(draft)?,
        };
        self.mode = EditMode::Idle;
        self.draft = D::Draft::default();
        Ok(record)
    }

    /// Abandon the current edit, returning to Idle with a cleared form.
    pub fn cancel(&mut self) {
        self.mode = EditMode::Idle;
        self.draft = D::Draft::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Note, NoteDraft};
    use crate::error::ErrorKind;
    use crate::store::fixtures::StoreFixture;

    fn note(title: &str) -> NoteDraft {
        NoteDraft {
            title: title.into(),
            content: "body".into(),
            ..NoteDraft::default()
        }
    }

    #[test]
    fn commit_in_idle_creates() {
        let mut fx = StoreFixture::new();
        let mut session = EditSession::<Note>::new();
        assert_eq!(session.mode(), EditMode::Idle);

        let record = session.commit(&mut fx.notes, &note("Fresh")).unwrap();
        assert_eq!(fx.notes.get(record.id).unwrap().fields.title, "Fresh");
        assert_eq!(session.mode(), EditMode::Idle);
    }

    #[test]
    fn commit_in_editing_updates_and_returns_to_idle() {
        let mut fx = StoreFixture::new();
        let created = fx.notes.create(&note("Original")).unwrap();
        let mut session = EditSession::<Note>::new();

        let hydrated = session.begin_edit(&fx.notes, created.id).unwrap();
        assert_eq!(hydrated.title, "Original");
        assert_eq!(session.mode(), EditMode::Editing(created.id));

        let record = session.commit(&mut fx.notes, &note("Edited")).unwrap();
        assert_eq!(record.id, created.id);
        assert_eq!(fx.notes.len(), 1);
        assert_eq!(session.mode(), EditMode::Idle);
        assert_eq!(session.draft(), &NoteDraft::default());
    }

    #[test]
    fn begin_edit_of_missing_id_keeps_prior_state() {
        let mut fx = StoreFixture::new();
        let created = fx.notes.create(&note("Kept")).unwrap();
        let mut session = EditSession::<Note>::new();

        // Idle stays Idle.
        let err = session
            .begin_edit(&fx.notes, crate::model::RecordId::from_millis(404))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(session.mode(), EditMode::Idle);

        // An active edit survives a failed retarget, draft included.
        session.begin_edit(&fx.notes, created.id).unwrap();
        session
            .begin_edit(&fx.notes, crate::model::RecordId::from_millis(404))
            .unwrap_err();
        assert_eq!(session.mode(), EditMode::Editing(created.id));
        assert_eq!(session.draft().title, "Kept");
    }

    #[test]
    fn validation_failure_keeps_mode_and_draft() {
        let mut fx = StoreFixture::new();
        let created = fx.notes.create(&note("Original")).unwrap();
        let mut session = EditSession::<Note>::new();
        session.begin_edit(&fx.notes, created.id).unwrap();

        let err = session
            .commit(&mut fx.notes, &NoteDraft::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(session.mode(), EditMode::Editing(created.id));
        assert_eq!(session.draft().title, "Original");
        // The collection is untouched.
        assert_eq!(fx.notes.get(created.id).unwrap().fields.title, "Original");
    }

    #[test]
    fn cancel_is_non_destructive() {
        let mut fx = StoreFixture::new();
        let created = fx.notes.create(&note("Survivor")).unwrap();
        let mut session = EditSession::<Note>::new();

        session.begin_edit(&fx.notes, created.id).unwrap();
        session.cancel();

        assert_eq!(session.mode(), EditMode::Idle);
        assert_eq!(session.draft(), &NoteDraft::default());
        assert!(fx.notes.get(created.id).is_some());
    }

    #[test]
    fn begin_create_resets_an_active_edit() {
        let mut fx = StoreFixture::new();
        let created = fx.notes.create(&note("Target")).unwrap();
        let mut session = EditSession::<Note>::new();

        session.begin_edit(&fx.notes, created.id).unwrap();
        session.begin_create();

        assert_eq!(session.mode(), EditMode::Idle);
        assert_eq!(session.draft().category, "Study");
    }
}
