use crate::error::PlannerError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn all() -> &'static [Priority] {
        &[Priority::Low, Priority::Medium, Priority::High]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(PlannerError::InvalidPriority(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// A unit of work in one time slot on one date.
///
/// Field names serialize camelCase — the document schema the store has
/// always used, and what the browser UI consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Gateway-assigned on creation; never generated client-side.
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    pub assignee: String,
    pub created_at: DateTime<Utc>,
    pub time_slot: String,
    pub date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_roundtrip() {
        use std::str::FromStr;
        for p in Priority::all() {
            assert_eq!(Priority::from_str(p.as_str()).unwrap(), *p);
        }
    }

    #[test]
    fn priority_rejects_unknown() {
        assert!("urgent".parse::<Priority>().is_err());
        assert!("".parse::<Priority>().is_err());
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn task_serializes_camel_case() {
        let task = Task {
            id: "t-1".into(),
            title: "Standup".into(),
            completed: false,
            priority: Priority::High,
            assignee: "Ananya".into(),
            created_at: "2024-06-01T08:30:00Z".parse().unwrap(),
            time_slot: "9:00 AM - 10:00 AM".into(),
            date: "2024-06-01".parse().unwrap(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["timeSlot"], "9:00 AM - 10:00 AM");
        assert_eq!(json["createdAt"], "2024-06-01T08:30:00Z");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["date"], "2024-06-01");

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }
}
