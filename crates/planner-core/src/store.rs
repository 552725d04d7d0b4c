use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::{PlannerError, Result};
use crate::gateway::{NewTask, TaskGateway, TaskPatch};
use crate::roster::UNASSIGNED;
use crate::slot::SlotRegistry;
use crate::task::{Priority, Task};

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// One slot's bucket within a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SlotTasks {
    pub label: String,
    pub tasks: Vec<Task>,
}

/// The in-memory view of one date: every registry slot, in registry order,
/// each with its tasks in insertion order. Slots with no tasks are present
/// with an empty bucket, never absent.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    buckets: Vec<SlotTasks>,
}

impl Snapshot {
    pub fn empty(registry: &SlotRegistry) -> Self {
        Snapshot {
            buckets: registry
                .labels()
                .map(|label| SlotTasks {
                    label: label.to_string(),
                    tasks: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn buckets(&self) -> &[SlotTasks] {
        &self.buckets
    }

    pub fn tasks(&self, slot: &str) -> Option<&[Task]> {
        self.buckets
            .iter()
            .find(|b| b.label == slot)
            .map(|b| b.tasks.as_slice())
    }

    pub fn all(&self) -> impl Iterator<Item = &Task> {
        self.buckets.iter().flat_map(|b| b.tasks.iter())
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.tasks.len()).sum()
    }

    pub fn completed_count(&self) -> usize {
        self.all().filter(|t| t.completed).count()
    }

    /// Place a task in its slot's bucket. Returns false when the task's slot
    /// is not part of this snapshot's registry.
    pub(crate) fn push(&mut self, task: Task) -> bool {
        match self.buckets.iter_mut().find(|b| b.label == task.time_slot) {
            Some(bucket) => {
                bucket.tasks.push(task);
                true
            }
            None => false,
        }
    }

    fn find(&self, slot: &str, id: &str) -> Option<&Task> {
        self.tasks(slot)?.iter().find(|t| t.id == id)
    }

    fn find_mut(&mut self, slot: &str, id: &str) -> Option<&mut Task> {
        self.buckets
            .iter_mut()
            .find(|b| b.label == slot)?
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
    }

    fn remove(&mut self, slot: &str, id: &str) {
        if let Some(bucket) = self.buckets.iter_mut().find(|b| b.label == slot) {
            bucket.tasks.retain(|t| t.id != id);
        }
    }
}

// ---------------------------------------------------------------------------
// TaskStore
// ---------------------------------------------------------------------------

/// Outcome of a date load. A load that was overtaken by a later one reports
/// `Superseded` and leaves the store untouched; that is not an error.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Applied(Snapshot),
    Superseded,
}

impl LoadOutcome {
    pub fn applied(self) -> Option<Snapshot> {
        match self {
            LoadOutcome::Applied(snapshot) => Some(snapshot),
            LoadOutcome::Superseded => None,
        }
    }
}

/// Caller-supplied fields for a new task; everything else is stamped here.
#[derive(Debug, Clone)]
pub struct NewTaskFields {
    pub title: String,
    pub priority: Priority,
    pub assignee: String,
}

impl Default for NewTaskFields {
    fn default() -> Self {
        NewTaskFields {
            title: String::new(),
            priority: Priority::default(),
            assignee: UNASSIGNED.to_string(),
        }
    }
}

struct Inner {
    date: NaiveDate,
    generation: u64,
    snapshot: Snapshot,
}

/// Authoritative in-memory view of the selected date's tasks, keyed by slot,
/// synchronized with a [`TaskGateway`].
///
/// Every mutation is two-phase: the gateway call must succeed before the
/// snapshot changes, so what is displayed never diverges from what was last
/// confirmed persisted. The interior lock is never held across a gateway
/// await.
pub struct TaskStore {
    registry: SlotRegistry,
    gateway: Arc<dyn TaskGateway>,
    inner: Mutex<Inner>,
}

impl TaskStore {
    pub fn new(registry: SlotRegistry, gateway: Arc<dyn TaskGateway>) -> Self {
        let snapshot = Snapshot::empty(&registry);
        TaskStore {
            registry,
            gateway,
            inner: Mutex::new(Inner {
                date: Utc::now().date_naive(),
                generation: 0,
                snapshot,
            }),
        }
    }

    pub fn registry(&self) -> &SlotRegistry {
        &self.registry
    }

    pub async fn selected_date(&self) -> NaiveDate {
        self.inner.lock().await.date
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.inner.lock().await.snapshot.clone()
    }

    /// Fetch and install the snapshot for `date`.
    ///
    /// The selected date moves at load start, so the latest requested date
    /// always wins: if another load begins while this one's fetch is in
    /// flight, the late response is discarded instead of overwriting newer
    /// state.
    pub async fn load_for_date(&self, date: NaiveDate) -> Result<LoadOutcome> {
        let generation = {
            let mut inner = self.inner.lock().await;
            inner.generation += 1;
            inner.date = date;
            inner.generation
        };

        let fetched = self.gateway.fetch_by_date(date).await?;

        let mut snapshot = Snapshot::empty(&self.registry);
        for task in fetched {
            let slot = task.time_slot.clone();
            if !snapshot.push(task) {
                tracing::warn!(%date, %slot, "skipping task in unknown time slot");
            }
        }

        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            tracing::debug!(%date, "discarding superseded load");
            return Ok(LoadOutcome::Superseded);
        }
        inner.snapshot = snapshot.clone();
        Ok(LoadOutcome::Applied(snapshot))
    }

    /// Persist and append a new task in `slot` on `date`. The snapshot only
    /// picks it up when `date` is the selected date.
    pub async fn add_task(
        &self,
        slot: &str,
        fields: NewTaskFields,
        date: NaiveDate,
    ) -> Result<Task> {
        let title = fields.title.trim();
        if title.is_empty() {
            return Err(PlannerError::EmptyTitle);
        }
        if !self.registry.contains(slot) {
            return Err(PlannerError::UnknownSlot(slot.to_string()));
        }

        let new = NewTask {
            title: title.to_string(),
            completed: false,
            priority: fields.priority,
            assignee: fields.assignee,
            created_at: Utc::now(),
            time_slot: slot.to_string(),
            date,
        };
        let id = self.gateway.create(new.clone()).await?;
        let task = new.into_task(id);

        let mut inner = self.inner.lock().await;
        if inner.date == task.date {
            inner.snapshot.push(task.clone());
        }
        Ok(task)
    }

    /// Flip a task's completion state.
    pub async fn toggle_completion(&self, slot: &str, id: &str) -> Result<Task> {
        let current = self.lookup(slot, id).await?;
        let next = !current.completed;
        self.gateway.update(id, TaskPatch::completed(next)).await?;
        self.apply(slot, id, current, |task| task.completed = next).await
    }

    /// Rename a task. Blank titles are rejected before anything persists.
    pub async fn edit_title(&self, slot: &str, id: &str, new_title: &str) -> Result<Task> {
        let title = new_title.trim();
        if title.is_empty() {
            return Err(PlannerError::EmptyTitle);
        }
        let current = self.lookup(slot, id).await?;
        self.gateway.update(id, TaskPatch::title(title)).await?;
        let title = title.to_string();
        self.apply(slot, id, current, move |task| task.title = title).await
    }

    /// Hand a task to someone else. Roster membership is the caller's
    /// contract; any accepted name is persisted as-is.
    pub async fn reassign(&self, slot: &str, id: &str, assignee: &str) -> Result<Task> {
        let current = self.lookup(slot, id).await?;
        self.gateway.update(id, TaskPatch::assignee(assignee)).await?;
        let assignee = assignee.to_string();
        self.apply(slot, id, current, move |task| task.assignee = assignee).await
    }

    /// Persist a deletion, then drop the task from its bucket.
    pub async fn delete_task(&self, slot: &str, id: &str) -> Result<()> {
        self.lookup(slot, id).await?;
        self.gateway.delete(id).await?;
        let mut inner = self.inner.lock().await;
        inner.snapshot.remove(slot, id);
        Ok(())
    }

    async fn lookup(&self, slot: &str, id: &str) -> Result<Task> {
        let inner = self.inner.lock().await;
        match inner.snapshot.find(slot, id) {
            Some(task) => Ok(task.clone()),
            None if !self.registry.contains(slot) => {
                Err(PlannerError::UnknownSlot(slot.to_string()))
            }
            None => Err(PlannerError::TaskNotFound(id.to_string())),
        }
    }

    /// Second phase of a mutation: the gateway accepted the change, mirror it
    /// in the snapshot. If a date switch replaced the snapshot mid-flight the
    /// persisted value is still authoritative, so return it either way.
    async fn apply(
        &self,
        slot: &str,
        id: &str,
        mut fallback: Task,
        mutate: impl FnOnce(&mut Task),
    ) -> Result<Task> {
        let mut inner = self.inner.lock().await;
        match inner.snapshot.find_mut(slot, id) {
            Some(task) => {
                mutate(task);
                Ok(task.clone())
            }
            None => {
                mutate(&mut fallback);
                Ok(fallback)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
