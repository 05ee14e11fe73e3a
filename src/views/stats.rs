use crate::domain::{Priority, Task};

/// Completed vs pending counts across a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionStats {
    pub completed: usize,
    pub pending: usize,
}

impl CompletionStats {
    pub fn total(&self) -> usize {
        self.completed + self.pending
    }
}

/// Count completed and pending tasks
pub fn completion_stats(tasks: &[Task]) -> CompletionStats {
    let completed = tasks.iter().filter(|t| t.completed).count();
    CompletionStats {
        completed,
        pending: tasks.len() - completed,
    }
}

/// Task count per category, in first-seen order while scanning the input
pub fn category_breakdown(tasks: &[Task]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for task in tasks {
        match counts.iter_mut().find(|(c, _)| c == &task.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((task.category.clone(), 1)),
        }
    }
    counts
}

/// Task count per priority, high first
pub fn priority_breakdown(tasks: &[Task]) -> Vec<(Priority, usize)> {
    Priority::all()
        .iter()
        .map(|&p| (p, tasks.iter().filter(|t| t.priority == p).count()))
        .collect()
}

/// Distinct category values present, sorted for deterministic output
pub fn distinct_categories(tasks: &[Task]) -> Vec<String> {
    let mut categories: Vec<String> = tasks.iter().map(|t| t.category.clone()).collect();
    categories.sort();
    categories.dedup();
    categories
}

/// Count of open high-priority tasks
pub fn high_priority_open_count(tasks: &[Task]) -> usize {
    tasks
        .iter()
        .filter(|t| t.priority == Priority::High && !t.completed)
        .count()
}
