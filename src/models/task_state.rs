use serde::{Deserialize, Serialize};

/// Lifecycle of a task. Only explicit user action moves between the two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    #[default]
    Pending,
    Complete,
}

impl TaskState {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TaskState::Pending => "pending",
            TaskState::Complete => "complete",
        }
    }

    /// Convert DB / CLI string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(TaskState::Pending),
            "complete" => Some(TaskState::Complete),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TaskState::Pending => TaskState::Complete,
            TaskState::Complete => TaskState::Pending,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, TaskState::Complete)
    }
}
