use super::DiagnosticsError;
use crate::api::types::Attempt;
use serde::Serialize;
use serde_json::{Map, Value};

/// How a new attempt relates to the one it replays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeIntent {
    /// Re-run the whole workflow from scratch.
    None,
    FromTask {
        attempt_id: String,
        task_name: String,
    },
    /// Let the server pick up every task that ended in error.
    FromFailed { attempt_id: String },
}

impl ResumeIntent {
    /// Builds an intent from untyped shell input. Accepted modes are `none`,
    /// `from` (needs a task name) and `failed` (takes none).
    pub fn from_parts(
        mode: &str,
        attempt_id: &str,
        task_name: Option<&str>,
    ) -> Result<Self, DiagnosticsError> {
        match (mode, task_name) {
            ("none", None) => Ok(Self::None),
            ("from", Some(task_name)) => Ok(Self::FromTask {
                attempt_id: attempt_id.to_string(),
                task_name: task_name.to_string(),
            }),
            ("failed", None) => Ok(Self::FromFailed {
                attempt_id: attempt_id.to_string(),
            }),
            ("from", None) => Err(DiagnosticsError::InvalidResumeIntent(
                "mode `from` requires a task name".to_string(),
            )),
            ("none" | "failed", Some(_)) => Err(DiagnosticsError::InvalidResumeIntent(format!(
                "mode `{mode}` does not take a task name"
            ))),
            (other, _) => Err(DiagnosticsError::InvalidResumeIntent(format!(
                "unknown mode `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ResumeDescriptor {
    From {
        #[serde(rename = "attemptId")]
        attempt_id: String,
        from: String,
    },
    Failed {
        #[serde(rename = "attemptId")]
        attempt_id: String,
    },
}

/// Body of `PUT /attempts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptCreationPayload {
    pub workflow_id: String,
    pub session_time: String,
    pub retry_attempt_name: String,
    pub params: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<ResumeDescriptor>,
}

fn require_non_empty(field: &str, value: &str) -> Result<(), DiagnosticsError> {
    if value.trim().is_empty() {
        return Err(DiagnosticsError::InvalidResumeIntent(format!(
            "{field} must be non-empty"
        )));
    }
    Ok(())
}

/// Workflow id, session time and params are copied verbatim from `attempt`;
/// only the attempt name and the resume point are new.
pub fn compose_retry_payload<F>(
    attempt: &Attempt,
    intent: &ResumeIntent,
    now_provider: F,
) -> Result<AttemptCreationPayload, DiagnosticsError>
where
    F: FnOnce() -> String,
{
    let resume = match intent {
        ResumeIntent::None => None,
        ResumeIntent::FromTask {
            attempt_id,
            task_name,
        } => {
            require_non_empty("attempt id", attempt_id)?;
            require_non_empty("task name", task_name)?;
            Some(ResumeDescriptor::From {
                attempt_id: attempt_id.clone(),
                from: task_name.clone(),
            })
        }
        ResumeIntent::FromFailed { attempt_id } => {
            require_non_empty("attempt id", attempt_id)?;
            Some(ResumeDescriptor::Failed {
                attempt_id: attempt_id.clone(),
            })
        }
    };

    Ok(AttemptCreationPayload {
        workflow_id: attempt.workflow.id.clone(),
        session_time: attempt.session_time.clone(),
        retry_attempt_name: now_provider(),
        params: attempt.params.clone(),
        resume,
    })
}
