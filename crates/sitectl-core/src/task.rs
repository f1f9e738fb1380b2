// ── Pipeline task dispatch ──
//
// Build hosts drive sitectl with a flat (action, name, flags) tuple rather
// than subcommands. `run_task` is that entry point: one dispatch over the
// fixed vocabulary, mirroring the CLI surface one-to-one.

use serde::Serialize;

use crate::action::TaskAction;
use crate::directory::SiteDirectory;
use crate::error::CoreError;
use crate::model::{PropertySet, Site};
use crate::store::DirectoryStore;

/// One task invocation as bound from host parameters.
#[derive(Debug, Clone)]
pub struct TaskRequest {
    pub action: TaskAction,
    /// Site name (`ServerComment`).
    pub name: String,
    /// For `Create`: delete an existing site of the same name first.
    pub force: bool,
    /// For `Create`: raw semicolon-delimited property string.
    pub properties: Option<String>,
}

/// What a task produced, beyond success itself.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum TaskOutcome {
    Done,
    Exists { exists: bool },
    Created { site: Site },
}

impl<S: DirectoryStore> SiteDirectory<S> {
    /// Execute one pipeline task against the directory.
    pub async fn run_task(&self, request: &TaskRequest) -> Result<TaskOutcome, CoreError> {
        match request.action {
            TaskAction::Create => {
                let properties =
                    PropertySet::parse(request.properties.as_deref().unwrap_or_default())?;
                let site = self.create(&request.name, request.force, &properties).await?;
                Ok(TaskOutcome::Created { site })
            }
            TaskAction::Delete => {
                self.delete(&request.name).await?;
                Ok(TaskOutcome::Done)
            }
            TaskAction::CheckExists => Ok(TaskOutcome::Exists {
                exists: self.exists(&request.name).await?,
            }),
            action => {
                let control = action.control_action().ok_or_else(|| {
                    CoreError::InvalidAction {
                        action: action.to_string(),
                    }
                })?;
                self.control(&request.name, control).await?;
                Ok(TaskOutcome::Done)
            }
        }
    }
}
