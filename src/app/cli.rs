#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Help,
    Version,
    Projects,
    Workflows,
    Schedules,
    Sessions,
    Attempts,
    Attempt,
    Tasks,
    BackfillDryRun,
    Backfill,
    Skip,
    Retry,
    Resume,
    Logs,
    Exit,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "" | "help" => CliVerb::Help,
        "version" => CliVerb::Version,
        "projects" => CliVerb::Projects,
        "workflows" => CliVerb::Workflows,
        "schedules" => CliVerb::Schedules,
        "sessions" => CliVerb::Sessions,
        "attempts" => CliVerb::Attempts,
        "attempt" => CliVerb::Attempt,
        "tasks" => CliVerb::Tasks,
        "backfillDryRun" => CliVerb::BackfillDryRun,
        "backfill" => CliVerb::Backfill,
        "skip" => CliVerb::Skip,
        "retry" => CliVerb::Retry,
        "resume" => CliVerb::Resume,
        "logs" => CliVerb::Logs,
        "exit" | "quit" => CliVerb::Exit,
        _ => CliVerb::Unknown,
    }
}

pub const COMMANDS: &[(&str, &str)] = &[
    ("help", "Show this message"),
    ("version", "show digdag server version"),
    ("projects", "show projects"),
    ("workflows <projectId>", "show workflows of project"),
    (
        "schedules <projectId> <workflowName>",
        "show schedules of workflow",
    ),
    ("sessions <projectId> <workflowName>", "show sessions of workflow"),
    ("attempts <sessionId>", "show attempts of session"),
    ("attempt <attemptId>", "show attempt detail"),
    ("tasks <attemptId>", "show task tree of attempt"),
    (
        "backfillDryRun <scheduleId> <fromISODateTime> <count>",
        "dry run backfill sessions of schedule",
    ),
    (
        "backfill <scheduleId> <fromISODateTime> <count>",
        "backfill sessions of schedule",
    ),
    (
        "skip <scheduleId> <fromISODateTime> <count>",
        "skip upcoming sessions of schedule",
    ),
    ("retry <attemptId>", "retry attempt from scratch"),
    (
        "resume <attemptId> failed|from <taskName>",
        "resume attempt from failed tasks or a named task",
    ),
    ("logs <attemptId>", "show logs of failed tasks"),
    ("exit", "leave the shell"),
];

pub fn cli_help_lines() -> Vec<String> {
    let mut lines = vec!["Available commands:".to_string()];
    lines.extend(
        COMMANDS
            .iter()
            .map(|(command, description)| format!("  {command:55} {description}")),
    );
    lines
}

/// Splits leading `--endpoint <url>` / `--endpoint=<url>` off the process
/// arguments. Anything after the first non-flag argument is left alone.
pub fn take_endpoint_flag(args: &mut Vec<String>) -> Result<Option<String>, String> {
    let Some(first) = args.first() else {
        return Ok(None);
    };
    if let Some(value) = first.strip_prefix("--endpoint=") {
        let value = value.to_string();
        args.remove(0);
        return Ok(Some(value));
    }
    if first == "--endpoint" {
        if args.len() < 2 {
            return Err("usage: digdag-shell [--endpoint <url>] [command args...]".to_string());
        }
        let value = args[1].clone();
        args.drain(..2);
        return Ok(Some(value));
    }
    Ok(None)
}
