use crate::store::{StoreResult, TaskStore};
use crate::task::{Task, TaskId};

/// Orders tasks for display: pinned tasks first, then the rest.
///
/// This is a stable partition, so tasks with the same pin status keep
/// their input order.
pub fn order<'a, I>(tasks: I) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let (mut pinned, unpinned): (Vec<_>, Vec<_>) =
        tasks.into_iter().partition(|task| task.is_pinned);
    pinned.extend(unpinned);
    pinned
}

/// A task with its 1-based position in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberedTask<'a> {
    pub position: usize,
    pub task: &'a Task,
}

pub fn numbered<'a, I>(tasks: I) -> Vec<NumberedTask<'a>>
where
    I: IntoIterator<Item = &'a Task>,
{
    order(tasks)
        .into_iter()
        .enumerate()
        .map(|(index, task)| NumberedTask {
            position: index + 1,
            task,
        })
        .collect()
}

/// Per-task interaction forwarded to the store as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskIntent {
    SetPinned { id: TaskId, is_pinned: bool },
    SetFinished { id: TaskId, is_finished: bool },
    ChangeTitle { id: TaskId, title: String },
    Delete { id: TaskId },
}

impl TaskIntent {
    pub fn id(&self) -> TaskId {
        match self {
            Self::SetPinned { id, .. }
            | Self::SetFinished { id, .. }
            | Self::ChangeTitle { id, .. }
            | Self::Delete { id } => *id,
        }
    }

    /// Sends the intent to the matching store operation and returns the
    /// store's result unchanged.
    pub fn dispatch<S: TaskStore + ?Sized>(self, store: &mut S) -> StoreResult<()> {
        match self {
            Self::SetPinned { id, is_pinned } => store.set_pin_task(id, is_pinned),
            Self::SetFinished { id, is_finished } => store.set_finish_task(id, is_finished),
            Self::ChangeTitle { id, title } => store.change_task_title(id, title),
            Self::Delete { id } => store.delete_task(id),
        }
    }
}
