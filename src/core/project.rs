use crate::core::assignment::AssignLogic;
use crate::core::or_empty;
use crate::db::DataStore;
use crate::db::queries::{insert_project, load_projects, load_technicians};
use crate::errors::AppResult;
use crate::models::assignment::AssignmentKind;
use crate::models::project::{NewProject, Project};
use crate::models::technician::names_for;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct ProjectView {
    pub project: Project,
    pub technicians: Vec<String>,
}

pub struct ProjectLogic;

impl ProjectLogic {
    pub async fn create(store: &dyn DataStore, project: &NewProject) -> AppResult<Project> {
        let created = insert_project(store, project).await?;
        info!(id = created.id, name = %created.name, "project created");
        Ok(created)
    }

    pub async fn list(store: &dyn DataStore) -> Vec<ProjectView> {
        let projects = or_empty("projects", load_projects(store).await);
        if projects.is_empty() {
            return Vec::new();
        }

        let technicians = or_empty("technicians", load_technicians(store).await);
        let assignments = AssignLogic::load_map(store, AssignmentKind::Project)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "failed to load project assignments");
                Default::default()
            });

        projects
            .into_iter()
            .map(|project| {
                let ids = assignments.technicians(project.id);
                ProjectView {
                    technicians: names_for(&technicians, &ids),
                    project,
                }
            })
            .collect()
    }
}
