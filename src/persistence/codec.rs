//! JSON codec for the task collection.
//!
//! The persisted form is a single JSON array of task objects with camelCase
//! keys and RFC 3339 timestamp strings, matching the historical wire format.
//! Loading is deliberately forgiving: a missing file is the normal first-run
//! state, and corrupt content degrades to an empty collection with a stderr
//! diagnostic instead of a startup failure.

use crate::domain::{Priority, Subtask, Task};
use crate::persistence::files::{atomic_write, read_file};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },
}

/// Wire representation of a task. Optional collections default to empty so
/// that records written by older versions (no tags/subtasks/color) still load.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: Uuid,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    completed: bool,
    created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    subtasks: Vec<SubtaskRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubtaskRecord {
    id: Uuid,
    title: String,
    #[serde(default)]
    completed: bool,
}

fn format_timestamp(dt: DateTime<Local>) -> String {
    dt.to_rfc3339()
}

fn parse_timestamp(value: &str) -> Result<DateTime<Local>, CodecError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|source| CodecError::Timestamp {
            value: value.to_string(),
            source,
        })
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            category: task.category.clone(),
            priority: task.priority,
            completed: task.completed,
            created_at: format_timestamp(task.created_at),
            due_date: task.due_date.map(format_timestamp),
            color: task.color.clone(),
            tags: task.tags.clone(),
            subtasks: task.subtasks.iter().map(SubtaskRecord::from).collect(),
        }
    }
}

impl From<&Subtask> for SubtaskRecord {
    fn from(subtask: &Subtask) -> Self {
        Self {
            id: subtask.id,
            title: subtask.title.clone(),
            completed: subtask.completed,
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = CodecError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            title: record.title,
            description: record.description,
            category: record.category,
            priority: record.priority,
            completed: record.completed,
            created_at: parse_timestamp(&record.created_at)?,
            due_date: record
                .due_date
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
            color: record.color,
            tags: record.tags,
            subtasks: record
                .subtasks
                .into_iter()
                .map(|s| Subtask {
                    id: s.id,
                    title: s.title,
                    completed: s.completed,
                })
                .collect(),
        })
    }
}

/// Serialize a task collection to the persisted JSON form
pub fn encode(tasks: &[Task]) -> Result<String, CodecError> {
    let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Parse the persisted JSON form back into a task collection
pub fn decode(text: &str) -> Result<Vec<Task>, CodecError> {
    let records: Vec<TaskRecord> = serde_json::from_str(text)?;
    records.into_iter().map(Task::try_from).collect()
}

/// Load the task collection from disk.
///
/// Missing file means first run and yields an empty collection. Malformed
/// content is logged and also yields an empty collection, so startup never
/// fails because of corrupt persisted data.
pub fn load(path: &Path) -> Vec<Task> {
    let text = match read_file(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!(
                "Warning: could not read {}, starting with an empty collection: {:#}",
                path.display(),
                e
            );
            return Vec::new();
        }
    };
    if text.trim().is_empty() {
        // Missing or empty file is the normal first-run state
        return Vec::new();
    }
    match decode(&text) {
        Ok(tasks) => tasks,
        Err(e) => {
            eprintln!(
                "Warning: could not parse {}, starting with an empty collection: {}",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

/// Write the full task collection to disk, overwriting the previous contents
pub fn save(path: &Path, tasks: &[Task]) -> anyhow::Result<()> {
    let text = encode(tasks)?;
    atomic_write(path, &text)?;
    Ok(())
}
