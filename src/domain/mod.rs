pub mod enums;
pub mod task;

pub use enums::Priority;
pub use task::{Subtask, Task, TaskDraft, TaskPatch};
