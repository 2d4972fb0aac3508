mod common;

use common::{gzip, MockDigdagServer, MockResponse};
use digdag_shell::api::types::{BackfillRequest, SkipRequest, TaskState};
use digdag_shell::api::{ApiError, DigdagClient};
use digdag_shell::diagnostics::{AttemptCreationPayload, RawLogSource, ResumeDescriptor};
use serde_json::{Map, Value};

#[test]
fn get_requests_decode_list_envelopes() {
    let server = MockDigdagServer::start(|request| match request.path.as_str() {
        "/api/projects" => MockResponse::json(
            r#"{"projects":[{"id":"1","name":"etl"},{"id":2,"name":"ml"}]}"#,
        ),
        "/api/projects/1/sessions?workflow=daily%20load" => MockResponse::json(
            r#"{"sessions":[{"id":"30","sessionTime":"2024-03-01T00:00:00Z","lastAttempt":{"id":"90","done":true,"success":false}}]}"#,
        ),
        "/api/attempts/90/tasks" => MockResponse::json(
            r#"{"tasks":[{"id":"1","parentId":null,"fullName":"+daily","state":"group_error"},{"id":"2","parentId":"1","fullName":"+daily+load","state":"error"}]}"#,
        ),
        _ => MockResponse::status(404, r#"{"message":"not found"}"#),
    });
    let client = DigdagClient::new(server.api_base());

    let projects = client.projects().expect("projects");
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[1].id, "2");

    let sessions = client.sessions("1", "daily load").expect("sessions");
    let last = sessions[0].last_attempt.as_ref().expect("last attempt");
    assert!(last.done && !last.success);

    let tasks = client.attempt_tasks("90").expect("tasks");
    assert_eq!(tasks[1].state, TaskState::Error);

    let methods = server
        .requests()
        .iter()
        .map(|r| r.method.clone())
        .collect::<Vec<_>>();
    assert_eq!(methods, vec!["GET", "GET", "GET"]);
}

#[test]
fn non_success_status_is_reported_with_path_and_body() {
    let server =
        MockDigdagServer::start(|_| MockResponse::status(404, r#"{"message":"no attempt"}"#));
    let client = DigdagClient::new(server.api_base());

    let err = client.attempt("404").expect_err("missing attempt");
    match err {
        ApiError::Status { path, status, body } => {
            assert_eq!(path, "attempts/404");
            assert_eq!(status, 404);
            assert!(body.contains("no attempt"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn undecodable_body_is_a_decode_error() {
    let server = MockDigdagServer::start(|_| MockResponse::json("<html>proxy error</html>"));
    let client = DigdagClient::new(server.api_base());
    let err = client.version().expect_err("html body");
    assert!(matches!(err, ApiError::Decode { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn unreachable_server_is_a_request_error() {
    let client = DigdagClient::new("http://127.0.0.1:1/api");
    let err = client.projects().expect_err("connection refused");
    assert!(matches!(err, ApiError::Request { ref path, .. } if path == "projects"));
    let source = std::error::Error::source(&err).expect("transport error kept as source");
    assert!(err.to_string().ends_with(&source.to_string()));
}

#[test]
fn create_attempt_puts_the_payload() {
    let server = MockDigdagServer::start(|request| {
        assert_eq!(request.method, "PUT");
        assert_eq!(request.path, "/api/attempts");
        MockResponse::json(
            r#"{"id":"91","index":2,"workflow":{"id":"57","name":"daily"},"sessionTime":"2024-03-01T00:00:00Z","retryAttemptName":"abc","done":false,"success":false,"params":{}}"#,
        )
    });
    let client = DigdagClient::new(server.api_base());
    let payload = AttemptCreationPayload {
        workflow_id: "57".to_string(),
        session_time: "2024-03-01T00:00:00Z".to_string(),
        retry_attempt_name: "abc".to_string(),
        params: Map::new(),
        resume: Some(ResumeDescriptor::Failed {
            attempt_id: "90".to_string(),
        }),
    };

    let created = client.create_attempt(&payload).expect("created");
    assert_eq!(created.id, "91");

    let body: Value =
        serde_json::from_str(&server.requests()[0].body).expect("request body json");
    assert_eq!(body["resume"]["mode"], "failed");
    assert_eq!(body["workflowId"], "57");
}

#[test]
fn backfill_posts_camel_case_body() {
    let server = MockDigdagServer::start(|_| MockResponse::json(r#"{"attempts":[]}"#));
    let client = DigdagClient::new(server.api_base());
    let request = BackfillRequest {
        attempt_name: "lt3k2".to_string(),
        from_time: "2024-03-01T00:00:00Z".to_string(),
        count: 2,
        dry_run: true,
    };
    assert!(client.backfill("12", &request).expect("backfill").is_empty());

    let recorded = &server.requests()[0];
    assert_eq!(recorded.method, "POST");
    assert_eq!(recorded.path, "/api/schedules/12/backfill");
    let body: Value = serde_json::from_str(&recorded.body).expect("json");
    assert_eq!(body["attemptName"], "lt3k2");
    assert_eq!(body["fromTime"], "2024-03-01T00:00:00Z");
    assert_eq!(body["count"], 2);
    assert_eq!(body["dryRun"], true);
}

#[test]
fn log_source_fetches_raw_bytes_for_the_bound_attempt() {
    let compressed = gzip("hello\n");
    let expected = compressed.clone();
    let server = MockDigdagServer::start(move |request| match request.path.as_str() {
        "/api/logs/90/files" => MockResponse::json(
            r#"{"files":[{"fileName":"+daily+load@1.log.gz","taskName":"+daily+load","fileSize":20}]}"#,
        ),
        "/api/logs/90/files/%2Bdaily%2Bload%401.log.gz" => MockResponse::bytes(compressed.clone()),
        _ => MockResponse::status(404, "{}"),
    });
    let client = DigdagClient::new(server.api_base());

    let files = client.log_files("90").expect("files");
    assert_eq!(files[0].task_name, "+daily+load");
    let bytes = client
        .log_source("90")
        .fetch_raw(&files[0].file_name)
        .expect("raw");
    assert_eq!(bytes, expected);
}

#[test]
fn skip_posts_camel_case_body_and_decodes_schedule() {
    let server = MockDigdagServer::start(|_| {
        MockResponse::json(
            r#"{"id":12,"nextRunTime":"2024-03-04T00:00:00Z","nextScheduleTime":"2024-03-04T00:00:00+00:00"}"#,
        )
    });
    let client = DigdagClient::new(server.api_base());
    let request = SkipRequest {
        from_time: "2024-03-01T00:00:00Z".to_string(),
        count: 3,
        dry_run: false,
    };

    let schedule = client.skip("12", &request).expect("skip");
    assert_eq!(schedule.id, "12");
    assert_eq!(
        schedule.next_run_time.as_deref(),
        Some("2024-03-04T00:00:00Z")
    );

    let recorded = &server.requests()[0];
    assert_eq!(recorded.method, "POST");
    assert_eq!(recorded.path, "/api/schedules/12/skip");
    let body: Value = serde_json::from_str(&recorded.body).expect("json");
    assert_eq!(
        body,
        serde_json::json!({"fromTime": "2024-03-01T00:00:00Z", "count": 3, "dryRun": false})
    );
}
