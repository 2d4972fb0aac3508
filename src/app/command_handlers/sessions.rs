use crate::app::command_support::{json_line, require_id, AttemptRow, ShellContext};
use crate::app::render::{OutputLine, Tone};

pub fn completion_tone(done: bool, success: bool) -> Tone {
    match (done, success) {
        (true, false) => Tone::Failure,
        (true, true) => Tone::Success,
        _ => Tone::Plain,
    }
}

pub fn cmd_sessions(ctx: &ShellContext, args: &[String]) -> Result<Vec<OutputLine>, String> {
    if args.len() != 2 {
        return Err("usage: sessions <projectId> <workflowName>".to_string());
    }
    require_id("project id", &args[0])?;
    let sessions = ctx
        .client
        .sessions(&args[0], &args[1])
        .map_err(|e| e.to_string())?;
    sessions
        .iter()
        .map(|session| {
            let tone = session
                .last_attempt
                .as_ref()
                .map(|attempt| completion_tone(attempt.done, attempt.success))
                .unwrap_or(Tone::Plain);
            json_line(session).map(|text| OutputLine::new(tone, text))
        })
        .collect()
}

pub fn cmd_attempts(ctx: &ShellContext, args: &[String]) -> Result<Vec<OutputLine>, String> {
    if args.len() != 1 {
        return Err("usage: attempts <sessionId>".to_string());
    }
    require_id("session id", &args[0])?;
    let attempts = ctx
        .client
        .session_attempts(&args[0])
        .map_err(|e| e.to_string())?;
    attempts
        .iter()
        .map(|attempt| {
            json_line(&AttemptRow::from(attempt)).map(|text| {
                OutputLine::new(completion_tone(attempt.done, attempt.success), text)
            })
        })
        .collect()
}

pub fn cmd_attempt(ctx: &ShellContext, args: &[String]) -> Result<Vec<OutputLine>, String> {
    if args.len() != 1 {
        return Err("usage: attempt <attemptId>".to_string());
    }
    require_id("attempt id", &args[0])?;
    let attempt = ctx.client.attempt(&args[0]).map_err(|e| e.to_string())?;
    let body =
        serde_yaml::to_string(&attempt).map_err(|e| format!("failed to encode attempt: {e}"))?;
    let tone = completion_tone(attempt.done, attempt.success);
    Ok(body
        .lines()
        .map(|line| OutputLine::new(tone, line))
        .collect())
}
