use crate::db::DataStore;
use crate::db::queries::{delete_assignment, insert_assignments, load_assignments};
use crate::errors::{AppError, AppResult};
use crate::models::assignment::{Assignment, AssignmentKind, AssignmentMap, Toggle};
use tracing::info;

/// Assignment of technicians to projects and tasks.
///
/// Every mutation is followed by a full reload of the map; callers render
/// what the store returns, never a locally patched copy.
pub struct AssignLogic;

impl AssignLogic {
    pub async fn load_map(store: &dyn DataStore, kind: AssignmentKind) -> AppResult<AssignmentMap> {
        let rows = load_assignments(store, kind).await?;
        Ok(AssignmentMap::from_rows(&rows))
    }

    /// Insert the pair unless the technician is already assigned.
    pub async fn assign(
        store: &dyn DataStore,
        kind: AssignmentKind,
        entity_id: i64,
        technician_id: i64,
    ) -> AppResult<AssignmentMap> {
        let current = Self::load_map(store, kind).await?;
        if current.contains(entity_id, technician_id) {
            return Err(AppError::AlreadyAssigned {
                entity: kind.label(),
                id: entity_id,
                technician: technician_id,
            });
        }

        let pair = Assignment {
            entity_id,
            technician_id,
        };
        insert_assignments(store, kind, &[pair]).await?;
        info!(kind = kind.label(), entity_id, technician_id, "assigned");

        Self::load_map(store, kind).await
    }

    pub async fn unassign(
        store: &dyn DataStore,
        kind: AssignmentKind,
        entity_id: i64,
        technician_id: i64,
    ) -> AppResult<AssignmentMap> {
        let pair = Assignment {
            entity_id,
            technician_id,
        };
        let removed = delete_assignment(store, kind, &pair).await?;
        info!(kind = kind.label(), entity_id, technician_id, removed, "unassigned");

        Self::load_map(store, kind).await
    }

    /// Remove the pair when present, insert it otherwise.
    pub async fn toggle(
        store: &dyn DataStore,
        kind: AssignmentKind,
        entity_id: i64,
        technician_id: i64,
    ) -> AppResult<(Toggle, AssignmentMap)> {
        let current = Self::load_map(store, kind).await?;
        let pair = Assignment {
            entity_id,
            technician_id,
        };

        let action = current.toggle_action(entity_id, technician_id);
        match action {
            Toggle::Removed => {
                delete_assignment(store, kind, &pair).await?;
            }
            Toggle::Added => {
                insert_assignments(store, kind, &[pair]).await?;
            }
        }
        info!(kind = kind.label(), entity_id, technician_id, ?action, "toggled");

        Ok((action, Self::load_map(store, kind).await?))
    }
}
