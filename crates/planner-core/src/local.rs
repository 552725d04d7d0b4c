use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{PlannerError, Result};
use crate::gateway::{NewTask, TaskGateway, TaskPatch};
use crate::io::atomic_write;
use crate::paths;
use crate::task::Task;

/// File-backed task gateway.
///
/// Keeps every task (all dates) in a single JSON file under `.planner/`,
/// written atomically on each mutation. This is the offline mode of the
/// planner and the fixture gateway in tests; it plays the same role the
/// remote store does, id assignment included.
pub struct LocalStore {
    path: PathBuf,
    // Serializes read-modify-write cycles on the backing file.
    lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store at the conventional location under `root`.
    pub fn at_root(root: &Path) -> Self {
        LocalStore::new(paths::tasks_path(root))
    }

    fn read_all(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn write_all(&self, tasks: &[Task]) -> Result<()> {
        let data = serde_json::to_string_pretty(tasks)?;
        atomic_write(&self.path, data.as_bytes())
    }
}

#[async_trait]
impl TaskGateway for LocalStore {
    async fn fetch_by_date(&self, date: NaiveDate) -> Result<Vec<Task>> {
        let _guard = self.lock.lock().await;
        let tasks = self.read_all()?;
        Ok(tasks.into_iter().filter(|t| t.date == date).collect())
    }

    async fn create(&self, new: NewTask) -> Result<String> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.read_all()?;
        let id = Uuid::new_v4().to_string();
        tasks.push(new.into_task(id.clone()));
        self.write_all(&tasks)?;
        Ok(id)
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.read_all()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| PlannerError::TaskNotFound(id.to_string()))?;
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        if let Some(assignee) = patch.assignee {
            task.assignee = assignee;
        }
        self.write_all(&tasks)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.read_all()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            // Already gone; deletes are repeatable.
            return Ok(());
        }
        self.write_all(&tasks)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
