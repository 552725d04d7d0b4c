use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("not initialized: run 'planner init'")]
    NotInitialized,

    #[error("task title must not be empty")]
    EmptyTitle,

    #[error("unknown time slot: {0}")]
    UnknownSlot(String),

    #[error("unknown assignee: {0}")]
    UnknownAssignee(String),

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("invalid time slot label '{0}': expected \"H:MM AM/PM - H:MM AM/PM\"")]
    InvalidTimeLabel(String),

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid priority '{0}': expected low, medium, or high")]
    InvalidPriority(String),

    #[error("gateway error: {0}")]
    Gateway(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
