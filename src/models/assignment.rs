use crate::core::grouping::group_by;
use crate::db::query::Table;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Which join table an assignment lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentKind {
    Project,
    Task,
}

impl AssignmentKind {
    pub fn table(&self) -> Table {
        match self {
            AssignmentKind::Project => Table::ProjectTechnicians,
            AssignmentKind::Task => Table::TaskTechnicians,
        }
    }

    /// Foreign-key column pointing at the assigned entity.
    pub fn entity_column(&self) -> &'static str {
        match self {
            AssignmentKind::Project => "project_id",
            AssignmentKind::Task => "task_id",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssignmentKind::Project => "project",
            AssignmentKind::Task => "task",
        }
    }
}

/// One join row, independent of which table it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub entity_id: i64,
    pub technician_id: i64,
}

/// Outcome of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// entity id → ordered set of technician ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentMap {
    inner: BTreeMap<i64, BTreeSet<i64>>,
}

impl AssignmentMap {
    pub fn from_rows(rows: &[Assignment]) -> Self {
        Self {
            inner: group_by(rows.iter(), |a| a.entity_id, |a| a.technician_id),
        }
    }

    pub fn contains(&self, entity_id: i64, technician_id: i64) -> bool {
        self.inner
            .get(&entity_id)
            .is_some_and(|ids| ids.contains(&technician_id))
    }

    /// Technicians assigned to `entity_id`, ascending (empty when none).
    pub fn technicians(&self, entity_id: i64) -> Vec<i64> {
        self.inner
            .get(&entity_id)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn insert(&mut self, entity_id: i64, technician_id: i64) -> bool {
        self.inner.entry(entity_id).or_default().insert(technician_id)
    }

    pub fn remove(&mut self, entity_id: i64, technician_id: i64) -> bool {
        let Some(ids) = self.inner.get_mut(&entity_id) else {
            return false;
        };
        let removed = ids.remove(&technician_id);
        if ids.is_empty() {
            self.inner.remove(&entity_id);
        }
        removed
    }

    /// What a toggle of this pair would do, without changing the map.
    pub fn toggle_action(&self, entity_id: i64, technician_id: i64) -> Toggle {
        if self.contains(entity_id, technician_id) {
            Toggle::Removed
        } else {
            Toggle::Added
        }
    }

    /// Remove the pair if present, insert it otherwise.
    pub fn toggle(&mut self, entity_id: i64, technician_id: i64) -> Toggle {
        match self.toggle_action(entity_id, technician_id) {
            Toggle::Removed => {
                self.remove(entity_id, technician_id);
                Toggle::Removed
            }
            Toggle::Added => {
                self.insert(entity_id, technician_id);
                Toggle::Added
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&i64, &BTreeSet<i64>)> {
        self.inner.iter()
    }
}
