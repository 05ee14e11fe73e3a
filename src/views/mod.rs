pub mod filter;
pub mod stats;

pub use filter::{by_category, by_completion, by_priority, search, sort, SortKey};
pub use stats::{
    category_breakdown, completion_stats, distinct_categories, high_priority_open_count,
    priority_breakdown, CompletionStats,
};
