use chrono::NaiveTime;
use clap::Subcommand;
use timedeck_core::storage::Database;
use timedeck_core::{PlannerProgress, Priority, Task};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to today's plan
    Add {
        /// Task title
        title: String,
        /// Optional details
        #[arg(long, default_value = "")]
        description: String,
        /// Scheduled time, HH:MM (24h)
        #[arg(long)]
        time: Option<String>,
        /// low, medium or high
        #[arg(long, default_value = "medium")]
        priority: Priority,
    },
    /// List tasks in planner order
    List,
    /// Toggle a task's completed flag by id prefix
    Done {
        /// Task id or unique prefix
        id: String,
    },
    /// Delete a task by id prefix
    Rm {
        /// Task id or unique prefix
        id: String,
    },
    /// Delete every completed task
    Clear,
}

/// Resolve a short id prefix against the task list.
fn resolve_id(db: &Database, prefix: &str) -> Result<uuid::Uuid, Box<dyn std::error::Error>> {
    let tasks = db.task_list()?;
    let matches: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.id.to_string().starts_with(prefix))
        .collect();
    match matches.as_slice() {
        [task] => Ok(task.id),
        [] => Err(format!("no task matches id '{prefix}'").into()),
        _ => Err(format!("id '{prefix}' is ambiguous, give more characters").into()),
    }
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        TaskAction::Add {
            title,
            description,
            time,
            priority,
        } => {
            let time = time
                .map(|t| NaiveTime::parse_from_str(&t, "%H:%M"))
                .transpose()
                .map_err(|e| format!("invalid --time, expected HH:MM: {e}"))?;
            let task = Task::new(&title, &description, time, priority)?;
            db.task_add(&task)?;
            println!("added {} ({})", task.title, &task.id.to_string()[..8]);
        }
        TaskAction::List => {
            let tasks = db.task_list()?;
            if tasks.is_empty() {
                println!("no tasks planned");
                return Ok(());
            }
            for task in &tasks {
                let mark = if task.completed { "x" } else { " " };
                let time = task
                    .time
                    .map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_else(|| "--:--".into());
                println!(
                    "[{mark}] {}  {time}  {:<6}  {}",
                    &task.id.to_string()[..8],
                    task.priority.as_str(),
                    task.title
                );
            }
            let progress = PlannerProgress::of(&tasks);
            println!(
                "{}/{} done ({:.0}%)",
                progress.completed,
                progress.total,
                progress.fraction() * 100.0
            );
        }
        TaskAction::Done { id } => {
            let id = resolve_id(&db, &id)?;
            db.task_toggle(id)?;
            println!("toggled {}", &id.to_string()[..8]);
        }
        TaskAction::Rm { id } => {
            let id = resolve_id(&db, &id)?;
            db.task_delete(id)?;
            println!("removed {}", &id.to_string()[..8]);
        }
        TaskAction::Clear => {
            let removed = db.task_clear_completed()?;
            println!("cleared {removed} completed task(s)");
        }
    }
    Ok(())
}
