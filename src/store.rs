//! The task store: sole owner and mutator of the task collection.
//!
//! Every mutation validates its input, rebuilds the snapshot, then persists
//! the new snapshot best-effort. Unknown ids and empty-after-trim input are
//! silent no-ops rather than errors, since the caller may race a deletion
//! against a pending edit. Titles and tags are trimmed before storage.

use crate::domain::{Subtask, Task, TaskDraft, TaskPatch};
use crate::persistence::codec;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// An immutable view of the full task collection at a point in time.
/// Every successful mutation installs a fresh `Arc`, so observers can use
/// `Arc::ptr_eq` to detect change.
pub type Snapshot = Arc<Vec<Task>>;

pub struct TaskStore {
    tasks: Snapshot,
    path: PathBuf,
}

impl TaskStore {
    /// Open a store backed by the given file, loading whatever is persisted
    /// there. Corrupt or missing data yields an empty collection, never an
    /// error.
    pub fn open(path: PathBuf) -> Self {
        let tasks = codec::load(&path);
        Self {
            tasks: Arc::new(tasks),
            path,
        }
    }

    /// Current snapshot of the collection
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.tasks)
    }

    /// Look up a task by id
    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Install a new snapshot and persist it. Persistence failures are logged
    /// and swallowed; the in-memory snapshot stays authoritative.
    fn commit(&mut self, tasks: Vec<Task>) {
        self.tasks = Arc::new(tasks);
        if let Err(e) = codec::save(&self.path, &self.tasks) {
            eprintln!("Warning: failed to save tasks: {:#}", e);
        }
    }

    /// Run a mutation against one task. Commits only when the closure reports
    /// that something changed; unknown ids leave the snapshot untouched.
    fn with_task<F>(&mut self, id: Uuid, mutate: F)
    where
        F: FnOnce(&mut Task) -> bool,
    {
        let mut tasks = (*self.tasks).clone();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return;
        };
        if mutate(task) {
            self.commit(tasks);
        }
    }

    /// Create a new task from a draft. Returns the fresh id, or `None` when
    /// the title is empty after trimming (the collection is left unchanged).
    pub fn add_task(&mut self, mut draft: TaskDraft) -> Option<Uuid> {
        draft.title = draft.title.trim().to_string();
        if draft.title.is_empty() {
            return None;
        }
        draft.tags = draft
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let task = Task::new(draft);
        let id = task.id;
        let mut tasks = (*self.tasks).clone();
        tasks.push(task);
        self.commit(tasks);
        Some(id)
    }

    /// Flip a task's completed flag
    pub fn toggle_task(&mut self, id: Uuid) {
        self.with_task(id, |task| {
            task.completed = !task.completed;
            true
        });
    }

    /// Merge a partial field set into a task. Id and created_at cannot be
    /// altered; a patch title that trims to empty rejects the whole update.
    pub fn update_task(&mut self, id: Uuid, mut patch: TaskPatch) {
        if let Some(title) = patch.title.take() {
            let title = title.trim().to_string();
            if title.is_empty() {
                return;
            }
            patch.title = Some(title);
        }
        self.with_task(id, |task| {
            task.apply(patch);
            true
        });
    }

    /// Remove a task and all its subtasks
    pub fn delete_task(&mut self, id: Uuid) {
        if !self.tasks.iter().any(|t| t.id == id) {
            return;
        }
        let mut tasks = (*self.tasks).clone();
        tasks.retain(|t| t.id != id);
        self.commit(tasks);
    }

    /// Append a new subtask to a task. Returns the fresh subtask id, or
    /// `None` when the title is empty after trimming or the task is unknown.
    pub fn add_subtask(&mut self, task_id: Uuid, title: &str) -> Option<Uuid> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let mut created = None;
        self.with_task(task_id, |task| {
            let subtask = Subtask::new(title.to_string());
            created = Some(subtask.id);
            task.subtasks.push(subtask);
            true
        });
        created
    }

    /// Flip a subtask's completed flag
    pub fn toggle_subtask(&mut self, task_id: Uuid, subtask_id: Uuid) {
        self.with_task(task_id, |task| match task.subtask_mut(subtask_id) {
            Some(subtask) => {
                subtask.completed = !subtask.completed;
                true
            }
            None => false,
        });
    }

    /// Remove a subtask from its parent
    pub fn delete_subtask(&mut self, task_id: Uuid, subtask_id: Uuid) {
        self.with_task(task_id, |task| task.remove_subtask(subtask_id));
    }

    /// Append a tag unless empty after trimming or already present
    pub fn add_tag(&mut self, task_id: Uuid, tag: &str) {
        let tag = tag.trim();
        if tag.is_empty() {
            return;
        }
        self.with_task(task_id, |task| task.push_tag(tag.to_string()));
    }

    /// Remove an exact-match tag
    pub fn remove_tag(&mut self, task_id: Uuid, tag: &str) {
        self.with_task(task_id, |task| task.remove_tag(tag));
    }
}
