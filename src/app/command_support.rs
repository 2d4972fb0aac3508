use crate::api::types::Attempt;
use crate::api::DigdagClient;
use crate::config::ShellSettings;
use crate::shared::ids::{attempt_name_now, validate_identifier_value};
use crate::shared::logging::append_shell_log;
use serde::Serialize;
use std::path::PathBuf;

/// Everything a command handler needs; built once per process.
#[derive(Debug, Clone)]
pub struct ShellContext {
    pub client: DigdagClient,
    pub state_root: Option<PathBuf>,
    pub attempt_name: fn() -> String,
}

impl ShellContext {
    pub fn new(client: DigdagClient, state_root: Option<PathBuf>) -> Self {
        Self {
            client,
            state_root,
            attempt_name: attempt_name_now,
        }
    }

    pub fn from_settings(settings: &ShellSettings) -> Self {
        Self::new(
            DigdagClient::from_settings(settings),
            settings.state_root.clone(),
        )
    }

    pub fn log(&self, level: &str, event: &str, message: &str) {
        if let Some(root) = &self.state_root {
            append_shell_log(root, level, event, message);
        }
    }
}

pub fn json_line<T: Serialize>(row: &T) -> Result<String, String> {
    serde_json::to_string(row).map_err(|e| format!("failed to encode output row: {e}"))
}

pub fn parse_count(raw: &str) -> Result<u32, String> {
    match raw.parse::<u32>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(format!("count must be a positive integer, got `{raw}`")),
    }
}

pub fn require_id(kind: &str, raw: &str) -> Result<(), String> {
    validate_identifier_value(kind, raw)
}

/// Column subset printed for attempts listed under a session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRow<'a> {
    pub id: &'a str,
    pub index: Option<u32>,
    pub done: bool,
    pub success: bool,
    pub created_at: Option<&'a str>,
    pub finished_at: Option<&'a str>,
}

impl<'a> From<&'a Attempt> for AttemptRow<'a> {
    fn from(attempt: &'a Attempt) -> Self {
        Self {
            id: &attempt.id,
            index: attempt.index,
            done: attempt.done,
            success: attempt.success,
            created_at: attempt.created_at.as_deref(),
            finished_at: attempt.finished_at.as_deref(),
        }
    }
}

/// Column subset printed for attempts created by backfill, retry and resume.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAttemptRow<'a> {
    pub id: &'a str,
    pub index: Option<u32>,
    pub session_time: &'a str,
    pub project: Option<&'a str>,
    pub workflow: Option<&'a str>,
    pub session_id: Option<&'a str>,
    pub retry_attempt_name: Option<&'a str>,
}

impl<'a> From<&'a Attempt> for CreatedAttemptRow<'a> {
    fn from(attempt: &'a Attempt) -> Self {
        Self {
            id: &attempt.id,
            index: attempt.index,
            session_time: &attempt.session_time,
            project: attempt
                .project
                .as_ref()
                .and_then(|project| project.name.as_deref()),
            workflow: attempt.workflow.name.as_deref(),
            session_id: attempt.session_id.as_deref(),
            retry_attempt_name: attempt.retry_attempt_name.as_deref(),
        }
    }
}
