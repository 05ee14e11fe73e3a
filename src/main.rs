mod domain;
mod persistence;
mod store;
mod views;

use anyhow::{bail, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use clap::{Parser, Subcommand};
use domain::{Priority, Task, TaskDraft, TaskPatch};
use store::TaskStore;
use uuid::Uuid;
use views::SortKey;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "A personal task tracker with categories, priorities, subtasks and stats", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .taskdeck directory in the current directory
    Init,
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Category (suggested: inbox, work, personal, shopping, health)
        #[arg(short, long, default_value = "inbox")]
        category: String,
        /// Priority: low, medium or high
        #[arg(short, long, default_value = "medium")]
        priority: String,
        /// Due date: today, tomorrow, "in 3d", "in 2w" or YYYY-MM-DD
        #[arg(short, long)]
        due: Option<String>,
        /// Free-text description
        #[arg(long)]
        description: Option<String>,
        /// Card color (suggested: blue, green, purple, amber, pink, teal)
        #[arg(long)]
        color: Option<String>,
        /// Tag to attach (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// List tasks (default command)
    List {
        /// Substring to match against title or description
        #[arg(short, long)]
        search: Option<String>,
        /// Only show tasks in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only show tasks with this priority
        #[arg(short, long)]
        priority: Option<String>,
        /// Include completed tasks
        #[arg(long)]
        all: bool,
        /// Sort key: created, due or priority
        #[arg(long, default_value = "created")]
        sort: String,
    },
    /// Toggle a task's completed state
    Toggle {
        /// Task id (unique prefix is enough)
        id: String,
    },
    /// Update fields of an existing task
    Update {
        /// Task id (unique prefix is enough)
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a task and all its subtasks
    Rm {
        /// Task id (unique prefix is enough)
        id: String,
    },
    /// Manage subtasks of a task
    Subtask {
        #[command(subcommand)]
        command: SubtaskCommands,
    },
    /// Manage tags of a task
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Show aggregate statistics
    Stats,
}

#[derive(Subcommand)]
enum SubtaskCommands {
    /// Add a subtask to a task
    Add { task: String, title: String },
    /// Toggle a subtask's completed state
    Toggle { task: String, subtask: String },
    /// Remove a subtask
    Rm { task: String, subtask: String },
}

#[derive(Subcommand)]
enum TagCommands {
    /// Attach a tag to a task
    Add { task: String, tag: String },
    /// Remove a tag from a task
    Rm { task: String, tag: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let data_dir = persistence::init_local_dir()?;
        println!("Initialized taskdeck directory: {}", data_dir.display());
        println!();
        println!("Taskdeck will now use this local directory for task storage.");
        return Ok(());
    }

    let mut store = TaskStore::open(persistence::tasks_file()?);

    match cli.command {
        Some(Commands::Init) => unreachable!(),
        Some(Commands::Add {
            title,
            category,
            priority,
            due,
            description,
            color,
            tags,
        }) => {
            let draft = TaskDraft {
                title,
                description,
                category,
                priority: parse_priority(&priority)?,
                due_date: due.as_deref().map(parse_due_input).transpose()?,
                color,
                tags,
            };
            match store.add_task(draft) {
                Some(id) => println!("Added task {}", short_id(id)),
                None => bail!("Task title must not be empty"),
            }
        }
        Some(Commands::List {
            search,
            category,
            priority,
            all,
            sort,
        }) => {
            let priority = priority.as_deref().map(parse_priority).transpose()?;
            let Some(key) = SortKey::from_label(&sort) else {
                bail!("Unknown sort key '{}'. Use created, due or priority", sort);
            };
            let snapshot = store.snapshot();
            let filtered = views::by_completion(
                views::by_priority(
                    views::by_category(
                        views::search(snapshot.iter(), search.as_deref().unwrap_or("")),
                        category.as_deref(),
                    ),
                    priority,
                ),
                all,
            );
            let sorted = views::sort(filtered, key);
            print_table(&sorted);
        }
        None => {
            let snapshot = store.snapshot();
            let open = views::by_completion(snapshot.iter(), false);
            let sorted = views::sort(open, SortKey::CreatedAt);
            print_table(&sorted);
        }
        Some(Commands::Toggle { id }) => {
            let id = resolve_task_id(&store.snapshot(), &id)?;
            store.toggle_task(id);
        }
        Some(Commands::Update {
            id,
            title,
            description,
            category,
            priority,
            due,
            clear_due,
            color,
        }) => {
            let id = resolve_task_id(&store.snapshot(), &id)?;
            if let Some(t) = &title {
                if t.trim().is_empty() {
                    bail!("Task title must not be empty");
                }
            }
            let due_date = if clear_due {
                Some(None)
            } else {
                due.as_deref().map(parse_due_input).transpose()?.map(Some)
            };
            let patch = TaskPatch {
                title,
                description: description.map(Some),
                category,
                priority: priority.as_deref().map(parse_priority).transpose()?,
                completed: None,
                due_date,
                color: color.map(Some),
            };
            store.update_task(id, patch);
        }
        Some(Commands::Rm { id }) => {
            let id = resolve_task_id(&store.snapshot(), &id)?;
            store.delete_task(id);
            println!("Deleted task {}", short_id(id));
        }
        Some(Commands::Subtask { command }) => match command {
            SubtaskCommands::Add { task, title } => {
                let task_id = resolve_task_id(&store.snapshot(), &task)?;
                match store.add_subtask(task_id, &title) {
                    Some(id) => println!("Added subtask {}", short_id(id)),
                    None => bail!("Subtask title must not be empty"),
                }
            }
            SubtaskCommands::Toggle { task, subtask } => {
                let task_id = resolve_task_id(&store.snapshot(), &task)?;
                let subtask_id = resolve_subtask_id(store.get(task_id), &subtask)?;
                store.toggle_subtask(task_id, subtask_id);
            }
            SubtaskCommands::Rm { task, subtask } => {
                let task_id = resolve_task_id(&store.snapshot(), &task)?;
                let subtask_id = resolve_subtask_id(store.get(task_id), &subtask)?;
                store.delete_subtask(task_id, subtask_id);
            }
        },
        Some(Commands::Tag { command }) => match command {
            TagCommands::Add { task, tag } => {
                let task_id = resolve_task_id(&store.snapshot(), &task)?;
                store.add_tag(task_id, &tag);
            }
            TagCommands::Rm { task, tag } => {
                let task_id = resolve_task_id(&store.snapshot(), &task)?;
                store.remove_tag(task_id, &tag);
            }
        },
        Some(Commands::Stats) => print_stats(&store.snapshot()),
    }

    Ok(())
}

fn parse_priority(label: &str) -> Result<Priority> {
    match Priority::from_label(label) {
        Some(priority) => Ok(priority),
        None => bail!("Unknown priority '{}'. Use low, medium or high", label),
    }
}

/// Parse human-friendly due date input: "today", "tomorrow", "in 3d",
/// "in 2w" or "YYYY-MM-DD". The due moment is local midnight of that day.
fn parse_due_input(input: &str) -> Result<DateTime<Local>> {
    let input = input.trim().to_lowercase();
    let today = Local::now().date_naive();

    let date = match input.as_str() {
        "today" => Some(today),
        "tomorrow" => Some(today + Duration::days(1)),
        _ => {
            if let Some(rest) = input.strip_prefix("in ") {
                if let Some(days) = rest.strip_suffix('d') {
                    days.trim().parse::<i64>().ok().map(|n| today + Duration::days(n))
                } else if let Some(weeks) = rest.strip_suffix('w') {
                    weeks.trim().parse::<i64>().ok().map(|n| today + Duration::weeks(n))
                } else {
                    None
                }
            } else {
                NaiveDate::parse_from_str(&input, "%Y-%m-%d").ok()
            }
        }
    };

    let Some(date) = date else {
        bail!("Could not parse due date '{}'. Use today, tomorrow, \"in 3d\", \"in 2w\" or YYYY-MM-DD", input);
    };
    date.and_hms_opt(0, 0, 0)
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .ok_or_else(|| anyhow::anyhow!("Due date '{}' is not representable", input))
}

/// First 8 hex digits of the UUID, enough to address tasks interactively
fn short_id(id: Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

/// Resolve a task id from a unique hex prefix
fn resolve_task_id(tasks: &[Task], prefix: &str) -> Result<Uuid> {
    let prefix = prefix.to_lowercase().replace('-', "");
    let matches: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.id.simple().to_string().starts_with(&prefix))
        .collect();

    match matches.len() {
        0 => bail!("No task matching id '{}'", prefix),
        1 => Ok(matches[0].id),
        _ => {
            let mut msg = format!("Id '{}' is ambiguous:\n", prefix);
            for task in matches {
                msg.push_str(&format!("  {}  {}\n", short_id(task.id), task.title));
            }
            msg.push_str("Use a longer prefix.");
            bail!(msg)
        }
    }
}

/// Resolve a subtask id within a task from a unique hex prefix
fn resolve_subtask_id(task: Option<&Task>, prefix: &str) -> Result<Uuid> {
    let Some(task) = task else {
        bail!("No such task");
    };
    let prefix = prefix.to_lowercase().replace('-', "");
    let matches: Vec<Uuid> = task
        .subtasks
        .iter()
        .map(|s| s.id)
        .filter(|id| id.simple().to_string().starts_with(&prefix))
        .collect();

    match matches.len() {
        0 => bail!("No subtask matching id '{}'", prefix),
        1 => Ok(matches[0]),
        _ => bail!("Id '{}' is ambiguous. Use a longer prefix", prefix),
    }
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late")
fn format_due_relative(due: Option<DateTime<Local>>, today: NaiveDate) -> String {
    match due {
        None => "-".into(),
        Some(due) => {
            let days = (due.date_naive() - today).num_days();
            match days {
                0 => "today".into(),
                1 => "tomorrow".into(),
                d if d > 1 => format!("in {}d", d),
                d => format!("{}d late", -d),
            }
        }
    }
}

/// Print tasks in a formatted table, with subtasks indented under their parent
fn print_table(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    println!(
        "{:<10} {:<4} {:<8} {:<10} {:<10} {}",
        "ID", "Sta", "Pri", "Due", "Category", "Title [tags]"
    );
    let now = Local::now();
    let today = now.date_naive();
    for task in tasks {
        let status = if task.completed {
            "[x]"
        } else if task.is_overdue(now) {
            "[!]"
        } else {
            "[ ]"
        };
        let tags = if task.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", task.tags.join(","))
        };
        println!(
            "{:<10} {:<4} {:<8} {:<10} {:<10} {}{}",
            short_id(task.id),
            status,
            task.priority.label(),
            format_due_relative(task.due_date, today),
            task.category,
            task.title,
            tags
        );
        let count = task.subtasks.len();
        for (i, subtask) in task.subtasks.iter().enumerate() {
            let connector = if i + 1 == count { "└─" } else { "├─" };
            let status = if subtask.completed { "[x]" } else { "[ ]" };
            println!(
                "{:<10} {} {} {}",
                short_id(subtask.id),
                connector,
                status,
                subtask.title
            );
        }
    }
}

/// Print completion, priority and category statistics
fn print_stats(tasks: &[Task]) {
    let completion = views::completion_stats(tasks);
    println!("Tasks:       {}", completion.total());
    println!("Completed:   {}", completion.completed);
    println!("Pending:     {}", completion.pending);
    println!(
        "High priority open: {}",
        views::high_priority_open_count(tasks)
    );

    println!();
    println!("By priority:");
    for (priority, count) in views::priority_breakdown(tasks) {
        println!("  {:<8} {}", priority.label(), count);
    }

    let categories = views::category_breakdown(tasks);
    if !categories.is_empty() {
        println!();
        println!("By category:");
        for (category, count) in categories {
            println!("  {:<12} {}", category, count);
        }
        println!();
        println!(
            "Categories in use: {}",
            views::distinct_categories(tasks).join(", ")
        );
    }
}
