use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub duration: Option<String>, // free-text label, e.g. "30 days"
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Insert payload for `projects`.
#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub name: String,
    pub duration: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}
