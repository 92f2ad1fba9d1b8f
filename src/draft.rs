use crate::task::DraftTask;
use std::fmt;

type Observer = Box<dyn FnMut(&DraftTask)>;

/// Owns the single uncommitted task being composed.
///
/// Every operation replaces the draft with a new complete record. An
/// optional observer sees the draft after each transition.
#[derive(Default)]
pub struct DraftTaskManager {
    draft: DraftTask,
    observer: Option<Observer>,
}

impl fmt::Debug for DraftTaskManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraftTaskManager")
            .field("draft", &self.draft)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl DraftTaskManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(observer: impl FnMut(&DraftTask) + 'static) -> Self {
        Self {
            draft: DraftTask::default(),
            observer: Some(Box::new(observer)),
        }
    }

    pub fn draft(&self) -> &DraftTask {
        &self.draft
    }

    pub fn set_finished(&mut self, is_finished: bool) {
        self.replace(|draft| draft.with_finished(is_finished));
    }

    pub fn set_pinned(&mut self, is_pinned: bool) {
        self.replace(|draft| draft.with_pinned(is_pinned));
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.replace(|draft| draft.with_title(title));
    }

    pub fn reset(&mut self) {
        self.replace(|_| DraftTask::default());
    }

    /// Hands the current draft to `create`, then resets.
    ///
    /// The reset happens whatever `create` returns, so a failed create
    /// still clears the draft. No validation is done; an empty title is
    /// passed through.
    pub fn commit<R>(&mut self, create: impl FnOnce(DraftTask) -> R) -> R {
        let outcome = create(self.draft.clone());
        self.reset();
        outcome
    }

    fn replace(&mut self, update: impl FnOnce(DraftTask) -> DraftTask) {
        self.draft = update(std::mem::take(&mut self.draft));
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.draft);
        }
    }
}
