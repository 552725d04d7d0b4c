use chrono::NaiveDate;
use serde::Serialize;

use crate::roster::UNASSIGNED;
use crate::slot::SlotRegistry;
use crate::store::Snapshot;

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// Completed tasks always render in this color, whatever their priority.
pub const DONE_COLOR: &str = "#4ade80";

pub const HIGH_COLOR: &str = "#ef4444";
pub const MEDIUM_COLOR: &str = "#f59e0b";
pub const LOW_COLOR: &str = "#10b981";

/// Fallback for a priority value this build does not recognize. Stored
/// documents outlive code, so an odd value gets a color, not an error.
pub const FALLBACK_COLOR: &str = "#3b82f6";

const EVENT_TEXT_COLOR: &str = "#ffffff";

pub fn event_color(completed: bool, priority: &str) -> &'static str {
    if completed {
        return DONE_COLOR;
    }
    match priority {
        "high" => HIGH_COLOR,
        "medium" => MEDIUM_COLOR,
        "low" => LOW_COLOR,
        _ => FALLBACK_COLOR,
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Percentage of the snapshot's tasks that are completed, rounded to the
/// nearest integer. An empty snapshot is 0, not a division by zero.
pub fn progress_percentage(snapshot: &Snapshot) -> u8 {
    let total = snapshot.total();
    if total == 0 {
        return 0;
    }
    let completed = snapshot.completed_count();
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

// ---------------------------------------------------------------------------
// Calendar events
// ---------------------------------------------------------------------------

/// A task projected into a calendar-displayable event. Carries enough
/// back-references (`task_id`, `time_slot`) for a click on the event to
/// round-trip into a completion toggle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    /// `YYYY-MM-DDTHH:MM:SS`, the slot's start on the snapshot's date.
    pub start: String,
    pub end: String,
    pub background_color: String,
    pub border_color: String,
    pub text_color: String,
    pub task_id: String,
    pub time_slot: String,
    pub completed: bool,
    pub assignee: String,
}

/// Project every task into an event positioned at its slot's interval on
/// `date`. Assigned tasks get the assignee appended to the display title.
pub fn calendar_events(
    snapshot: &Snapshot,
    registry: &SlotRegistry,
    date: NaiveDate,
) -> Vec<CalendarEvent> {
    let mut events = Vec::with_capacity(snapshot.total());
    for bucket in snapshot.buckets() {
        let Some(slot) = registry.get(&bucket.label) else {
            continue;
        };
        for task in &bucket.tasks {
            let title = if task.assignee != UNASSIGNED {
                format!("{} ({})", task.title, task.assignee)
            } else {
                task.title.clone()
            };
            let color = event_color(task.completed, task.priority.as_str());
            events.push(CalendarEvent {
                id: task.id.clone(),
                title,
                start: format!("{date}T{}", slot.start),
                end: format!("{date}T{}", slot.end),
                background_color: color.to_string(),
                border_color: color.to_string(),
                text_color: EVENT_TEXT_COLOR.to_string(),
                task_id: task.id.clone(),
                time_slot: task.time_slot.clone(),
                completed: task.completed,
                assignee: task.assignee.clone(),
            });
        }
    }
    events
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, Task};

    fn registry() -> SlotRegistry {
        SlotRegistry::from_labels(["11:00 AM - 12:00 PM", "12:00 PM - 1:00 PM"]).unwrap()
    }

    fn task(id: &str, slot: &str, completed: bool, priority: Priority, assignee: &str) -> Task {
        Task {
            id: id.into(),
            title: format!("Task {id}"),
            completed,
            priority,
            assignee: assignee.into(),
            created_at: "2024-06-01T08:00:00Z".parse().unwrap(),
            time_slot: slot.into(),
            date: "2024-06-01".parse().unwrap(),
        }
    }

    fn snapshot_with(tasks: Vec<Task>) -> Snapshot {
        let mut snapshot = Snapshot::empty(&registry());
        for t in tasks {
            assert!(snapshot.push(t), "test task uses a registry slot");
        }
        snapshot
    }

    #[test]
    fn progress_is_zero_for_empty_snapshot() {
        let snapshot = Snapshot::empty(&registry());
        assert_eq!(progress_percentage(&snapshot), 0);
    }

    #[test]
    fn progress_rounds_to_nearest_integer() {
        let slot = "11:00 AM - 12:00 PM";
        let snapshot = snapshot_with(vec![
            task("a", slot, true, Priority::Medium, UNASSIGNED),
            task("b", slot, false, Priority::Medium, UNASSIGNED),
            task("c", slot, false, Priority::Medium, UNASSIGNED),
        ]);
        assert_eq!(progress_percentage(&snapshot), 33);
    }

    #[test]
    fn progress_is_hundred_when_all_done() {
        let slot = "11:00 AM - 12:00 PM";
        let snapshot = snapshot_with(vec![
            task("a", slot, true, Priority::Low, UNASSIGNED),
            task("b", "12:00 PM - 1:00 PM", true, Priority::High, UNASSIGNED),
        ]);
        assert_eq!(progress_percentage(&snapshot), 100);
    }

    #[test]
    fn event_spans_slot_interval_with_noon_handling() {
        let snapshot = snapshot_with(vec![task(
            "a",
            "11:00 AM - 12:00 PM",
            false,
            Priority::Medium,
            UNASSIGNED,
        )]);
        let events = calendar_events(&snapshot, &registry(), "2024-06-01".parse().unwrap());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start, "2024-06-01T11:00:00");
        assert_eq!(events[0].end, "2024-06-01T12:00:00");
    }

    #[test]
    fn assigned_tasks_get_suffixed_titles() {
        let slot = "11:00 AM - 12:00 PM";
        let snapshot = snapshot_with(vec![
            task("a", slot, false, Priority::Medium, "Meera"),
            task("b", slot, false, Priority::Medium, UNASSIGNED),
        ]);
        let events = calendar_events(&snapshot, &registry(), "2024-06-01".parse().unwrap());
        assert_eq!(events[0].title, "Task a (Meera)");
        assert_eq!(events[1].title, "Task b");
    }

    #[test]
    fn completed_color_wins_over_priority() {
        assert_eq!(event_color(true, "high"), DONE_COLOR);
        assert_eq!(event_color(true, "low"), DONE_COLOR);
        assert_eq!(event_color(false, "high"), HIGH_COLOR);
        assert_eq!(event_color(false, "medium"), MEDIUM_COLOR);
        assert_eq!(event_color(false, "low"), LOW_COLOR);
    }

    #[test]
    fn unrecognized_priority_gets_fallback_color() {
        assert_eq!(event_color(false, "urgent"), FALLBACK_COLOR);
        assert_eq!(event_color(false, ""), FALLBACK_COLOR);
    }

    #[test]
    fn events_carry_toggle_back_references() {
        let snapshot = snapshot_with(vec![task(
            "a",
            "12:00 PM - 1:00 PM",
            true,
            Priority::High,
            "Divya",
        )]);
        let events = calendar_events(&snapshot, &registry(), "2024-06-01".parse().unwrap());
        let e = &events[0];
        assert_eq!(e.task_id, "a");
        assert_eq!(e.time_slot, "12:00 PM - 1:00 PM");
        assert!(e.completed);
        assert_eq!(e.assignee, "Divya");
        assert_eq!(e.background_color, DONE_COLOR);
    }
}
