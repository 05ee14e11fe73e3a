//! Filtering and sorting over a task snapshot.
//!
//! All functions are pure and accept anything that iterates task references,
//! so filters compose in any order (each one is a predicate over independent
//! fields, so the intersection is the same whichever way they are chained).

use crate::domain::{Priority, Task};
use std::cmp::Ordering;

/// Sort key for task listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    DueDate,
    Priority,
}

impl SortKey {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "created" | "createdat" => Some(Self::CreatedAt),
            "due" | "duedate" => Some(Self::DueDate),
            "priority" => Some(Self::Priority),
            _ => None,
        }
    }
}

/// Case-insensitive substring match against title or description.
/// An empty term matches everything.
pub fn search<'a, I>(tasks: I, term: &str) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let term = term.to_lowercase();
    tasks
        .into_iter()
        .filter(|task| {
            term.is_empty()
                || task.title.to_lowercase().contains(&term)
                || task
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&term))
        })
        .collect()
}

/// Exact category match; `None` means no filtering
pub fn by_category<'a, I>(tasks: I, category: Option<&str>) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| category.map_or(true, |c| task.category == c))
        .collect()
}

/// Exact priority match; `None` means no filtering
pub fn by_priority<'a, I>(tasks: I, priority: Option<Priority>) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| priority.map_or(true, |p| task.priority == p))
        .collect()
}

/// When `include_completed` is false, completed tasks are excluded
pub fn by_completion<'a, I>(tasks: I, include_completed: bool) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| include_completed || !task.completed)
        .collect()
}

/// Sort tasks by the given key.
///
/// `CreatedAt` is newest-first, `DueDate` is soonest-first with undated tasks
/// after all dated ones, `Priority` is high-first. The sort is stable, so ties
/// keep their relative input order.
pub fn sort<'a, I>(tasks: I, key: SortKey) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut sorted: Vec<&Task> = tasks.into_iter().collect();
    match key {
        SortKey::CreatedAt => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::DueDate => sorted.sort_by(|a, b| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SortKey::Priority => sorted.sort_by_key(|task| task.priority.rank()),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskDraft;
    use chrono::{Duration, Local};
    use pretty_assertions::assert_eq;

    fn task(title: &str, category: &str, priority: Priority) -> Task {
        Task::new(TaskDraft {
            title: title.to_string(),
            category: category.to_string(),
            priority,
            ..TaskDraft::default()
        })
    }

    fn titles(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_search_empty_term_matches_everything() {
        let tasks = vec![task("A", "inbox", Priority::Medium)];
        assert_eq!(search(&tasks, "").len(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let mut described = task("Plain", "inbox", Priority::Medium);
        described.description = Some("Call the DENTIST".to_string());
        let tasks = vec![task("Buy Milk", "inbox", Priority::Medium), described];

        assert_eq!(titles(&search(&tasks, "MILK")), vec!["Buy Milk"]);
        assert_eq!(titles(&search(&tasks, "dentist")), vec!["Plain"]);
        assert!(search(&tasks, "nothing").is_empty());
    }

    #[test]
    fn test_by_category_null_means_no_filtering() {
        let tasks = vec![
            task("A", "work", Priority::Medium),
            task("B", "home", Priority::Medium),
        ];
        assert_eq!(by_category(&tasks, None).len(), 2);
        assert_eq!(titles(&by_category(&tasks, Some("work"))), vec!["A"]);
        assert!(by_category(&tasks, Some("Work")).is_empty());
    }

    #[test]
    fn test_by_completion_excludes_done_when_asked() {
        let mut done = task("Done", "inbox", Priority::Medium);
        done.completed = true;
        let tasks = vec![done, task("Open", "inbox", Priority::Medium)];

        assert_eq!(by_completion(&tasks, true).len(), 2);
        assert_eq!(titles(&by_completion(&tasks, false)), vec!["Open"]);
    }

    #[test]
    fn test_filters_commute() {
        let tasks = vec![
            task("A", "work", Priority::High),
            task("B", "work", Priority::Low),
            task("C", "home", Priority::High),
            task("D", "home", Priority::Low),
        ];

        let cat_then_prio = by_priority(
            by_category(&tasks, Some("work")),
            Some(Priority::High),
        );
        let prio_then_cat = by_category(
            by_priority(&tasks, Some(Priority::High)),
            Some("work"),
        );
        assert_eq!(titles(&cat_then_prio), titles(&prio_then_cat));
        assert_eq!(titles(&cat_then_prio), vec!["A"]);
    }

    #[test]
    fn test_sort_created_at_newest_first() {
        let mut old = task("Old", "inbox", Priority::Medium);
        old.created_at = Local::now() - Duration::hours(2);
        let new = task("New", "inbox", Priority::Medium);
        let tasks = vec![old, new];

        assert_eq!(
            titles(&sort(&tasks, SortKey::CreatedAt)),
            vec!["New", "Old"]
        );
    }

    #[test]
    fn test_sort_due_date_puts_undated_last() {
        let now = Local::now();
        let mut soon = task("Soon", "inbox", Priority::Medium);
        soon.due_date = Some(now + Duration::days(1));
        let mut later = task("Later", "inbox", Priority::Medium);
        later.due_date = Some(now + Duration::days(5));
        let undated = task("Undated", "inbox", Priority::Medium);

        // Undated task first in input, still sorted after the dated ones
        let tasks = vec![undated, later, soon];
        assert_eq!(
            titles(&sort(&tasks, SortKey::DueDate)),
            vec!["Soon", "Later", "Undated"]
        );
    }

    #[test]
    fn test_sort_priority_high_first_and_stable() {
        let tasks = vec![
            task("M1", "inbox", Priority::Medium),
            task("H1", "inbox", Priority::High),
            task("M2", "inbox", Priority::Medium),
            task("L1", "inbox", Priority::Low),
            task("H2", "inbox", Priority::High),
        ];

        assert_eq!(
            titles(&sort(&tasks, SortKey::Priority)),
            vec!["H1", "H2", "M1", "M2", "L1"]
        );
    }

    #[test]
    fn test_repeated_calls_yield_identical_output() {
        let tasks = vec![
            task("A", "work", Priority::High),
            task("B", "home", Priority::Low),
        ];
        assert_eq!(
            titles(&search(&tasks, "a")),
            titles(&search(&tasks, "a"))
        );
        assert_eq!(
            titles(&sort(&tasks, SortKey::Priority)),
            titles(&sort(&tasks, SortKey::Priority))
        );
    }

    #[test]
    fn test_sort_key_from_label() {
        assert_eq!(SortKey::from_label("created"), Some(SortKey::CreatedAt));
        assert_eq!(SortKey::from_label("due"), Some(SortKey::DueDate));
        assert_eq!(SortKey::from_label("PRIORITY"), Some(SortKey::Priority));
        assert_eq!(SortKey::from_label("title"), None);
    }
}
