use crate::task::{DraftTask, Task, TaskId};
use chrono::Local;
use std::{fs, io, path::PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access task file: {0}")]
    Io(#[from] io::Error),

    #[error("task file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// Owner of the persisted task collection and its mutations.
pub trait TaskStore {
    fn tasks(&self) -> &[Task];

    /// Creates a task from the draft's fields and returns its new id.
    fn create_task(&mut self, fields: DraftTask) -> StoreResult<TaskId>;

    fn set_finish_task(&mut self, id: TaskId, is_finished: bool) -> StoreResult<()>;

    fn set_pin_task(&mut self, id: TaskId, is_pinned: bool) -> StoreResult<()>;

    fn change_task_title(&mut self, id: TaskId, title: String) -> StoreResult<()>;

    fn delete_task(&mut self, id: TaskId) -> StoreResult<()>;
}

/// Task store kept in memory and written to a JSON file on [`save`](Self::save).
#[derive(Debug, Default)]
pub struct JsonTaskStore {
    tasks: Vec<Task>,
    path: Option<PathBuf>,
}

impl JsonTaskStore {
    /// A store that never touches the disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads tasks from `path`. A missing file starts an empty collection.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let tasks: Vec<Task> = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            Vec::new()
        };
        info!(path = %path.display(), task_count = tasks.len(), "loaded tasks");
        Ok(Self {
            tasks,
            path: Some(path),
        })
    }

    pub fn save(&self) -> StoreResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        fs::write(path, serde_json::to_string_pretty(&self.tasks)?)?;
        info!(path = %path.display(), task_count = self.tasks.len(), "saved tasks");
        Ok(())
    }

    fn next_id(&self) -> TaskId {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    fn task_mut(&mut self, id: TaskId) -> StoreResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}

impl TaskStore for JsonTaskStore {
    fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn create_task(&mut self, fields: DraftTask) -> StoreResult<TaskId> {
        let id = self.next_id();
        let created_at = Local::now().format("%Y-%m-%d").to_string();
        self.tasks.push(Task {
            id,
            title: fields.title,
            is_finished: fields.is_finished,
            is_pinned: fields.is_pinned,
            created_at,
        });
        debug!(task_id = id, "created task");
        Ok(id)
    }

    fn set_finish_task(&mut self, id: TaskId, is_finished: bool) -> StoreResult<()> {
        self.task_mut(id)?.is_finished = is_finished;
        debug!(task_id = id, is_finished, "set finished");
        Ok(())
    }

    fn set_pin_task(&mut self, id: TaskId, is_pinned: bool) -> StoreResult<()> {
        self.task_mut(id)?.is_pinned = is_pinned;
        debug!(task_id = id, is_pinned, "set pinned");
        Ok(())
    }

    fn change_task_title(&mut self, id: TaskId, title: String) -> StoreResult<()> {
        self.task_mut(id)?.title = title;
        debug!(task_id = id, "changed title");
        Ok(())
    }

    fn delete_task(&mut self, id: TaskId) -> StoreResult<()> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        self.tasks.remove(index);
        debug!(task_id = id, "deleted task");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> JsonTaskStore {
        let mut store = JsonTaskStore::in_memory();
        store
            .create_task(DraftTask::default().with_title("first"))
            .unwrap();
        store
            .create_task(DraftTask::default().with_title("second").with_pinned(true))
            .unwrap();
        store
    }

    #[rstest]
    fn create_appends_with_sequential_ids(store: JsonTaskStore) {
        let ids: Vec<_> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(store.tasks()[1].is_pinned);
        assert!(!store.tasks()[0].created_at.is_empty());
    }

    #[rstest]
    fn ids_stay_unique_after_delete(mut store: JsonTaskStore) {
        store.delete_task(1).unwrap();
        let id = store.create_task(DraftTask::default()).unwrap();
        assert_eq!(id, 3);
    }

    #[rstest]
    fn mutations_apply_to_the_named_task(mut store: JsonTaskStore) {
        store.set_finish_task(1, true).unwrap();
        store.set_pin_task(2, false).unwrap();
        store.change_task_title(1, "renamed".to_string()).unwrap();

        assert!(store.tasks()[0].is_finished);
        assert_eq!(store.tasks()[0].title, "renamed");
        assert!(!store.tasks()[1].is_pinned);
        assert!(!store.tasks()[1].is_finished);
    }

    #[rstest]
    #[case::finish(|s: &mut JsonTaskStore| s.set_finish_task(9, true))]
    #[case::pin(|s: &mut JsonTaskStore| s.set_pin_task(9, true))]
    #[case::title(|s: &mut JsonTaskStore| s.change_task_title(9, String::new()))]
    #[case::delete(|s: &mut JsonTaskStore| s.delete_task(9))]
    fn unknown_id_is_not_found(
        mut store: JsonTaskStore,
        #[case] op: fn(&mut JsonTaskStore) -> StoreResult<()>,
    ) {
        assert!(matches!(op(&mut store), Err(StoreError::NotFound(9))));
        assert_eq!(store.tasks().len(), 2);
    }

    #[rstest]
    fn save_and_reopen_keeps_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");

        let mut store = JsonTaskStore::open(&path).unwrap();
        assert!(store.tasks().is_empty());
        store
            .create_task(DraftTask::default().with_title("persist me"))
            .unwrap();
        store.save().unwrap();

        let reopened = JsonTaskStore::open(&path).unwrap();
        assert_eq!(reopened.tasks(), store.tasks());
    }

    #[rstest]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            JsonTaskStore::open(&path),
            Err(StoreError::Json(_))
        ));
    }
}
