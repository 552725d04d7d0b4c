use std::path::Path;

use anyhow::{bail, Context};
use clap::Subcommand;

use planner_core::config::Config;
use planner_core::projector;
use planner_core::store::{NewTaskFields, Snapshot, TaskStore};
use planner_core::task::{Priority, Task};

use crate::output::{print_json, print_table};

#[derive(Subcommand)]
pub enum TaskSubcommand {
    /// Add a task to a time slot
    Add {
        /// Time slot label, e.g. "9:00 AM - 10:00 AM"
        slot: String,
        #[arg(required = true)]
        title: Vec<String>,
        /// low, medium, or high
        #[arg(long, default_value = "medium")]
        priority: String,
        #[arg(long, default_value = planner_core::roster::UNASSIGNED)]
        assignee: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// List the day's tasks, slot by slot
    List {
        #[arg(long)]
        date: Option<String>,
    },
    /// Toggle a task's completion state
    Toggle {
        slot: String,
        task_id: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// Rename a task
    Edit {
        slot: String,
        task_id: String,
        #[arg(required = true)]
        title: Vec<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Reassign a task to a roster member
    Assign {
        slot: String,
        task_id: String,
        assignee: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a task
    Delete {
        slot: String,
        task_id: String,
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: TaskSubcommand, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root)?;
    let store = super::open_store(root, &config)?;

    match subcmd {
        TaskSubcommand::Add {
            slot,
            title,
            priority,
            assignee,
            date,
        } => add(
            &config,
            &store,
            &slot,
            &title.join(" "),
            &priority,
            &assignee,
            date.as_deref(),
            json,
        ),
        TaskSubcommand::List { date } => list(&store, date.as_deref(), json),
        TaskSubcommand::Toggle {
            slot,
            task_id,
            date,
        } => toggle(&store, &slot, &task_id, date.as_deref(), json),
        TaskSubcommand::Edit {
            slot,
            task_id,
            title,
            date,
        } => edit(&store, &slot, &task_id, &title.join(" "), date.as_deref(), json),
        TaskSubcommand::Assign {
            slot,
            task_id,
            assignee,
            date,
        } => assign(
            &config,
            &store,
            &slot,
            &task_id,
            &assignee,
            date.as_deref(),
            json,
        ),
        TaskSubcommand::Delete {
            slot,
            task_id,
            date,
        } => delete(&store, &slot, &task_id, date.as_deref(), json),
    }
}

fn emit_task(task: &Task, json: bool, human: impl Fn(&Task) -> String) -> anyhow::Result<()> {
    if json {
        print_json(task)?;
    } else {
        println!("{}", human(task));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn add(
    config: &Config,
    store: &TaskStore,
    slot: &str,
    title: &str,
    priority: &str,
    assignee: &str,
    date: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let priority: Priority = priority.parse()?;
    if !config.roster().contains(assignee) {
        bail!(
            "unknown assignee '{assignee}' (roster: {})",
            config.roster.join(", ")
        );
    }
    let date = super::parse_date(date)?;

    let rt = super::runtime()?;
    let task = rt.block_on(async {
        store.load_for_date(date).await?;
        store
            .add_task(
                slot,
                NewTaskFields {
                    title: title.to_string(),
                    priority,
                    assignee: assignee.to_string(),
                },
                date,
            )
            .await
    })?;

    emit_task(&task, json, |t| {
        format!("Added task [{}] to {}: {}", t.id, t.time_slot, t.title)
    })
}

fn list(store: &TaskStore, date: Option<&str>, json: bool) -> anyhow::Result<()> {
    let date = super::parse_date(date)?;
    let rt = super::runtime()?;
    let snapshot = rt.block_on(async {
        store.load_for_date(date).await?;
        Ok::<_, anyhow::Error>(store.snapshot().await)
    })?;

    if json {
        print_json(&day_view(&snapshot, &date.to_string()))?;
        return Ok(());
    }

    println!("{}", summarize(&snapshot));
    println!();
    let rows: Vec<Vec<String>> = snapshot
        .buckets()
        .iter()
        .flat_map(|bucket| {
            bucket.tasks.iter().map(|t| {
                vec![
                    t.id.clone(),
                    bucket.label.clone(),
                    state_str(t).to_string(),
                    t.priority.to_string(),
                    t.assignee.clone(),
                    t.title.clone(),
                ]
            })
        })
        .collect();
    if rows.is_empty() {
        println!("No tasks for {date}.");
        return Ok(());
    }
    print_table(&["ID", "SLOT", "STATE", "PRIORITY", "ASSIGNEE", "TITLE"], rows);
    Ok(())
}

fn toggle(
    store: &TaskStore,
    slot: &str,
    task_id: &str,
    date: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let date = super::parse_date(date)?;
    let rt = super::runtime()?;
    let task = rt
        .block_on(async {
            store.load_for_date(date).await?;
            store.toggle_completion(slot, task_id).await
        })
        .with_context(|| format!("task '{task_id}' in '{slot}'"))?;

    emit_task(&task, json, |t| {
        format!("Task [{}] marked {}", t.id, state_str(t))
    })
}

fn edit(
    store: &TaskStore,
    slot: &str,
    task_id: &str,
    title: &str,
    date: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let date = super::parse_date(date)?;
    let rt = super::runtime()?;
    let task = rt.block_on(async {
        store.load_for_date(date).await?;
        store.edit_title(slot, task_id, title).await
    })?;

    emit_task(&task, json, |t| format!("Renamed task [{}]: {}", t.id, t.title))
}

fn assign(
    config: &Config,
    store: &TaskStore,
    slot: &str,
    task_id: &str,
    assignee: &str,
    date: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    if !config.roster().contains(assignee) {
        bail!(
            "unknown assignee '{assignee}' (roster: {})",
            config.roster.join(", ")
        );
    }
    let date = super::parse_date(date)?;
    let rt = super::runtime()?;
    let task = rt.block_on(async {
        store.load_for_date(date).await?;
        store.reassign(slot, task_id, assignee).await
    })?;

    emit_task(&task, json, |t| {
        format!("Assigned [{}] to {}", t.id, t.assignee)
    })
}

fn delete(
    store: &TaskStore,
    slot: &str,
    task_id: &str,
    date: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let date = super::parse_date(date)?;
    let rt = super::runtime()?;
    rt.block_on(async {
        store.load_for_date(date).await?;
        store.delete_task(slot, task_id).await
    })?;

    if json {
        print_json(&serde_json::json!({ "id": task_id, "deleted": true }))?;
    } else {
        println!("Deleted task [{task_id}]");
    }
    Ok(())
}

fn state_str(task: &Task) -> &'static str {
    if task.completed {
        "done"
    } else {
        "open"
    }
}

/// "2/5 completed (40%)"
pub(crate) fn summarize(snapshot: &Snapshot) -> String {
    format!(
        "{}/{} completed ({}%)",
        snapshot.completed_count(),
        snapshot.total(),
        projector::progress_percentage(snapshot)
    )
}

pub(crate) fn day_view(snapshot: &Snapshot, date: &str) -> serde_json::Value {
    let slots: Vec<serde_json::Value> = snapshot
        .buckets()
        .iter()
        .map(|bucket| {
            serde_json::json!({
                "label": &bucket.label,
                "completed": bucket.tasks.iter().filter(|t| t.completed).count(),
                "total": bucket.tasks.len(),
                "tasks": &bucket.tasks,
            })
        })
        .collect();
    serde_json::json!({
        "date": date,
        "progress": projector::progress_percentage(snapshot),
        "slots": slots,
    })
}
