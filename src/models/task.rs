use super::EmbeddedName;
use super::task_state::TaskState;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub duration: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub project_id: i64,
    #[serde(default)]
    pub state: TaskState,
    #[serde(default)]
    pub note: Option<String>,

    /// ⇔ embedded `projects(name)`
    #[serde(rename = "projects", default, skip_serializing_if = "Option::is_none")]
    pub project: Option<EmbeddedName>,
}

impl Task {
    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.name.as_str())
    }

    /// Same task with the state flipped; every other field untouched.
    pub fn with_toggled_state(&self) -> Self {
        Self {
            state: self.state.toggled(),
            ..self.clone()
        }
    }
}

/// Insert payload for `tasks`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub name: String,
    pub duration: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub project_id: i64,
    pub state: TaskState,
    pub note: Option<String>,
}
