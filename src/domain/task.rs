use super::enums::Priority;
use chrono::{DateTime, Local};
use uuid::Uuid;

/// A child checklist item owned by exactly one task
#[derive(Debug, Clone, PartialEq)]
pub struct Subtask {
    /// Unique within the parent's subtask list
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
}

impl Subtask {
    pub fn new(title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            completed: false,
        }
    }
}

/// A user-defined unit of work
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Unique ID, assigned at creation, never reused
    pub id: Uuid,
    /// Display title (non-empty, trimmed)
    pub title: String,
    /// Optional free-text notes
    pub description: Option<String>,
    /// Free-form label; no fixed set is enforced
    pub category: String,
    /// Priority level (defaults to medium)
    pub priority: Priority,
    /// Whether the task is done
    pub completed: bool,
    /// Set once at creation, never mutated
    pub created_at: DateTime<Local>,
    /// Optional deadline
    pub due_date: Option<DateTime<Local>>,
    /// Presentation hint, not validated against a palette
    pub color: Option<String>,
    /// Unique values, insertion order preserved
    pub tags: Vec<String>,
    /// Creation order preserved
    pub subtasks: Vec<Subtask>,
}

/// Creation-time fields for a task (everything except id and created_at)
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub priority: Priority,
    pub due_date: Option<DateTime<Local>>,
    pub color: Option<String>,
    pub tags: Vec<String>,
}

/// Field-wise update for a task. Outer `None` leaves the field untouched;
/// for clearable fields the inner `Option` distinguishes "set" from "clear".
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub due_date: Option<Option<DateTime<Local>>>,
    pub color: Option<Option<String>>,
}

impl Task {
    /// Build a new task from a draft with a fresh id and creation timestamp.
    /// Title validation happens at the store boundary, not here.
    pub fn new(draft: TaskDraft) -> Self {
        let mut task = Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            priority: draft.priority,
            completed: false,
            created_at: Local::now(),
            due_date: draft.due_date,
            color: draft.color,
            tags: Vec::new(),
            subtasks: Vec::new(),
        };
        for tag in draft.tags {
            task.push_tag(tag);
        }
        task
    }

    /// Append a tag unless it is already present (case-sensitive exact match).
    /// Returns whether the tag was added.
    pub fn push_tag(&mut self, tag: String) -> bool {
        if self.tags.iter().any(|t| t == &tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Remove an exact-match tag. Returns whether anything was removed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn subtask_mut(&mut self, subtask_id: Uuid) -> Option<&mut Subtask> {
        self.subtasks.iter_mut().find(|s| s.id == subtask_id)
    }

    /// Remove a subtask by id. Returns whether anything was removed.
    pub fn remove_subtask(&mut self, subtask_id: Uuid) -> bool {
        let before = self.subtasks.len();
        self.subtasks.retain(|s| s.id != subtask_id);
        self.subtasks.len() != before
    }

    /// Merge a patch into this task. Id and created_at are not touchable.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }

    /// Whether the task is past its due date and still open
    pub fn is_overdue(&self, now: DateTime<Local>) -> bool {
        match self.due_date {
            Some(due) => !self.completed && due < now,
            None => false,
        }
    }
}
