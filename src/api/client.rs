use super::types::{
    Attempt, AttemptList, BackfillRequest, LogFileEntry, LogFileList, Project, ProjectList,
    Schedule, ScheduleList, ServerVersion, Session, SessionList, SkipRequest, Task, TaskList,
    WorkflowDefinition, WorkflowList,
};
use super::ApiError;
use crate::config::ShellSettings;
use crate::diagnostics::failure_logs::RawLogSource;
use crate::diagnostics::resume::AttemptCreationPayload;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Read;

/// Thin client over the digdag REST API. Constructed once per shell and passed
/// to every command handler.
#[derive(Debug, Clone)]
pub struct DigdagClient {
    api_base: String,
    agent: ureq::Agent,
}

impl DigdagClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn from_settings(settings: &ShellSettings) -> Self {
        Self::new(settings.api_base())
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        if !query.is_empty() {
            let encoded = query
                .iter()
                .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url = format!("{url}?{encoded}");
        }
        url
    }

    fn send(
        &self,
        path: &str,
        request: ureq::Request,
        body: Option<serde_json::Value>,
    ) -> Result<ureq::Response, ApiError> {
        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };
        match result {
            Ok(response) => Ok(response),
            Err(ureq::Error::Status(status, response)) => Err(ApiError::Status {
                path: path.to_string(),
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(err) => Err(ApiError::Request {
                path: path.to_string(),
                source: Box::new(err),
            }),
        }
    }

    fn decode<T: DeserializeOwned>(path: &str, response: ureq::Response) -> Result<T, ApiError> {
        response
            .into_json::<T>()
            .map_err(|source| ApiError::Decode {
                path: path.to_string(),
                source,
            })
    }

    fn encode<B: Serialize>(path: &str, body: &B) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(body).map_err(|source| ApiError::Encode {
            path: path.to_string(),
            source,
        })
    }

    pub fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let request = self
            .agent
            .get(&self.endpoint(path, query))
            .set("Accept", "application/json");
        let response = self.send(path, request, None)?;
        Self::decode(path, response)
    }

    pub fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = Self::encode(path, body)?;
        let request = self.agent.post(&self.endpoint(path, &[]));
        let response = self.send(path, request, Some(body))?;
        Self::decode(path, response)
    }

    pub fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = Self::encode(path, body)?;
        let request = self.agent.put(&self.endpoint(path, &[]));
        let response = self.send(path, request, Some(body))?;
        Self::decode(path, response)
    }

    pub fn get_raw(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let request = self.agent.get(&self.endpoint(path, &[]));
        let response = self.send(path, request, None)?;
        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|source| ApiError::Request {
                path: path.to_string(),
                source: Box::new(source),
            })?;
        Ok(bytes)
    }

    pub fn version(&self) -> Result<ServerVersion, ApiError> {
        self.get_json("version", &[])
    }

    pub fn projects(&self) -> Result<Vec<Project>, ApiError> {
        let list: ProjectList = self.get_json("projects", &[])?;
        Ok(list.projects)
    }

    pub fn workflows(&self, project_id: &str) -> Result<Vec<WorkflowDefinition>, ApiError> {
        let path = format!("projects/{}/workflows", urlencoding::encode(project_id));
        let list: WorkflowList = self.get_json(&path, &[])?;
        Ok(list.workflows)
    }

    pub fn schedules(&self, project_id: &str, workflow: &str) -> Result<Vec<Schedule>, ApiError> {
        let path = format!("projects/{}/schedules", urlencoding::encode(project_id));
        let list: ScheduleList = self.get_json(&path, &[("workflow", workflow.to_string())])?;
        Ok(list.schedules)
    }

    pub fn sessions(&self, project_id: &str, workflow: &str) -> Result<Vec<Session>, ApiError> {
        let path = format!("projects/{}/sessions", urlencoding::encode(project_id));
        let list: SessionList = self.get_json(&path, &[("workflow", workflow.to_string())])?;
        Ok(list.sessions)
    }

    pub fn session_attempts(&self, session_id: &str) -> Result<Vec<Attempt>, ApiError> {
        let path = format!("sessions/{}/attempts", urlencoding::encode(session_id));
        let list: AttemptList =
            self.get_json(&path, &[("include_retried", "true".to_string())])?;
        Ok(list.attempts)
    }

    pub fn attempt(&self, attempt_id: &str) -> Result<Attempt, ApiError> {
        self.get_json(&format!("attempts/{}", urlencoding::encode(attempt_id)), &[])
    }

    pub fn attempt_tasks(&self, attempt_id: &str) -> Result<Vec<Task>, ApiError> {
        let path = format!("attempts/{}/tasks", urlencoding::encode(attempt_id));
        let list: TaskList = self.get_json(&path, &[])?;
        Ok(list.tasks)
    }

    /// Create-or-replace; the server deduplicates on workflow, session time
    /// and retry attempt name.
    pub fn create_attempt(&self, payload: &AttemptCreationPayload) -> Result<Attempt, ApiError> {
        self.put_json("attempts", payload)
    }

    pub fn backfill(
        &self,
        schedule_id: &str,
        request: &BackfillRequest,
    ) -> Result<Vec<Attempt>, ApiError> {
        let path = format!("schedules/{}/backfill", urlencoding::encode(schedule_id));
        let list: AttemptList = self.post_json(&path, request)?;
        Ok(list.attempts)
    }

    pub fn skip(&self, schedule_id: &str, request: &SkipRequest) -> Result<Schedule, ApiError> {
        let path = format!("schedules/{}/skip", urlencoding::encode(schedule_id));
        self.post_json(&path, request)
    }

    pub fn log_files(&self, attempt_id: &str) -> Result<Vec<LogFileEntry>, ApiError> {
        let path = format!("logs/{}/files", urlencoding::encode(attempt_id));
        let list: LogFileList = self.get_json(&path, &[])?;
        Ok(list.files)
    }

    pub fn log_file(&self, attempt_id: &str, file_name: &str) -> Result<Vec<u8>, ApiError> {
        self.get_raw(&format!(
            "logs/{}/files/{}",
            urlencoding::encode(attempt_id),
            urlencoding::encode(file_name)
        ))
    }

    pub fn log_source<'a>(&'a self, attempt_id: &'a str) -> AttemptLogSource<'a> {
        AttemptLogSource {
            client: self,
            attempt_id,
        }
    }
}

/// Raw log fetches bound to one attempt.
#[derive(Debug, Clone, Copy)]
pub struct AttemptLogSource<'a> {
    client: &'a DigdagClient,
    attempt_id: &'a str,
}

impl RawLogSource for AttemptLogSource<'_> {
    type Error = ApiError;

    fn fetch_raw(&self, file_name: &str) -> Result<Vec<u8>, ApiError> {
        self.client.log_file(self.attempt_id, file_name)
    }
}
