use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    pub id: i64,
    pub name: String,
}

/// Insert payload for `technicians`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTechnician {
    pub name: String,
}

/// Resolve a list of technician ids to display names, keeping the order of
/// the technician list. Unknown ids are skipped.
pub fn names_for(technicians: &[Technician], ids: &[i64]) -> Vec<String> {
    technicians
        .iter()
        .filter(|t| ids.contains(&t.id))
        .map(|t| t.name.clone())
        .collect()
}
