pub mod assignment;
pub mod location;
pub mod project;
pub mod task;
pub mod task_state;
pub mod technician;
pub mod zone;

use serde::{Deserialize, Serialize};

/// A related row embedded by the store (`technicians(name)`, `projects(name)`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedName {
    pub name: String,
}
